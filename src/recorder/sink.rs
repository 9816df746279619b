//! Durable sinks for the interaction log

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::store::RecorderConfig;

/// Destination for formatted log lines
///
/// The recorder only calls a sink while holding its write lock, so
/// implementations never see interleaved calls.
pub trait LogSink: Send {
    /// Discard everything and start over with just the header line
    fn truncate(&mut self, header: &str) -> io::Result<()>;

    /// Append one line (without trailing newline)
    fn append_line(&mut self, line: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// File backing this sink, if any
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Plain-text file sink
///
/// The file is opened in append mode for every line, so external viewers can
/// keep it open between writes.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    sync_on_write: bool,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sync_on_write: true,
        }
    }

    pub fn from_config(config: &RecorderConfig) -> Self {
        Self {
            path: config.log_path.clone(),
            sync_on_write: config.sync_on_write,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl LogSink for FileSink {
    fn truncate(&mut self, header: &str) -> io::Result<()> {
        self.ensure_parent()?;

        let mut file = File::create(&self.path)?;
        writeln!(file, "{}", header)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // One write call per record keeps the line contiguous
        file.write_all(format!("{}\n", line).as_bytes())?;

        if self.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory sink, shareable so tests and tools can read what was written
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, header included
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// The sink contents as they would appear in a file
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .iter()
            .map(|l| format!("{}\n", l))
            .collect()
    }
}

impl LogSink for MemorySink {
    fn truncate(&mut self, header: &str) -> io::Result<()> {
        let mut lines = self.lines.lock();
        lines.clear();
        lines.push(header.to_string());
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
