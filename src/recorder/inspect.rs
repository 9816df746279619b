//! Reading a persisted log back and handing it to the user

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::store::{RecorderError, RecorderResult};
use crate::types::{EventRecord, CSV_HEADER};

/// Launch the platform's default viewer for `path` without waiting for it
///
/// The launcher is reaped on a detached thread so repeated calls do not
/// leave zombie processes behind.
pub(crate) fn open_in_viewer(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        ));
    }

    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    reap_in_background(command.spawn()?)?;
    Ok(())
}

/// Wait on `child` from a detached thread
fn reap_in_background(mut child: Child) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    thread::Builder::new()
        .name("log-viewer-reaper".to_string())
        .spawn(move || {
            let status = child.wait();
            match &status {
                Ok(status) => debug!(%status, "log viewer launcher exited"),
                Err(e) => warn!(error = %e, "failed to wait on log viewer launcher"),
            }
            status
        })
}

/// Load every record from a log file written by the recorder
///
/// The first line must be the header. Blank lines are skipped; a malformed
/// data line is an error carrying its 1-based line number.
pub fn load_records<P: AsRef<Path>>(path: P) -> RecorderResult<Vec<EventRecord>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            let header = header?;
            if header.trim_end() != CSV_HEADER {
                warn!(found = %header, "unexpected event log header");
            }
        }
        None => return Ok(Vec::new()),
    }

    let mut records = Vec::new();
    for (line_num, line_result) in lines.enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        let record = EventRecord::from_csv_line(&line).map_err(|source| RecorderError::Parse {
            line: line_num + 2,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
