//! Session server
//!
//! Bridges an external engine process to a [`PointerSession`] over a
//! line-oriented JSON protocol (one request per input line, one response per
//! output line). Malformed lines get an error response; the loop keeps going.

mod handlers;

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::protocol::{Request, Response};
use crate::session::PointerSession;

pub use handlers::{handle_command, tick_json};

/// Result type for server operations
pub type ServerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Line-protocol server over any reader/writer pair
pub struct SessionServer<R, W> {
    session: Arc<PointerSession>,
    reader: R,
    writer: W,
}

impl SessionServer<BufReader<io::Stdin>, BufWriter<io::Stdout>> {
    /// Serve over stdin/stdout
    pub fn stdio(session: Arc<PointerSession>) -> Self {
        Self::new(
            session,
            BufReader::new(io::stdin()),
            BufWriter::new(io::stdout()),
        )
    }
}

impl<R: BufRead, W: Write> SessionServer<R, W> {
    pub fn new(session: Arc<PointerSession>, reader: R, writer: W) -> Self {
        Self {
            session,
            reader,
            writer,
        }
    }

    pub fn session(&self) -> &Arc<PointerSession> {
        &self.session
    }

    /// Run until the input is exhausted (blocking)
    pub fn run(&mut self) -> ServerResult<()> {
        let mut line = String::new();
        while self.reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                let response = self.handle_line(trimmed);
                self.send(&response)?;
            }
            line.clear();
        }
        Ok(())
    }

    /// Handle a single request line
    pub fn handle_line(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Response::failure(None, format!("Parse error: {}", e));
            }
        };

        let name = request.command.name();
        debug!(command = name, "handling request");
        match handle_command(&self.session, request.command) {
            Ok(result) => Response::success(request.id, result),
            Err(e) => {
                warn!(command = name, error = %e, "command failed");
                Response::failure(request.id, e)
            }
        }
    }

    fn send(&mut self, response: &Response) -> ServerResult<()> {
        let json = serde_json::to_string(response)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Give back the writer (for inspecting output in tests)
    pub fn into_writer(self) -> W {
        self.writer
    }
}
