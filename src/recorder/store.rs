//! Event Recorder - ordered, durable interaction log
//!
//! The recorder keeps the authoritative in-memory sequence of records and
//! mirrors each one to a [`LogSink`]. Appends and resets share one lock, so
//! index assignment, the in-memory push and the durable write happen as a
//! single step.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::inspect;
use super::sink::{FileSink, LogSink};
use crate::types::{EventRecord, RecordParseError, CSV_HEADER};
use crate::utils::current_timestamp_millis;

/// Configuration for the EventRecorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Path of the durable log file
    pub log_path: PathBuf,
    /// Whether to fsync after every write
    pub sync_on_write: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("ButtonClicks.csv"),
            sync_on_write: true,
        }
    }
}

impl RecorderConfig {
    /// Create config with a custom log path
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.sync_on_write = sync;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Result type for EventRecorder operations
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Errors that can occur in EventRecorder operations
///
/// None of these leave the in-memory log inconsistent.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("failed to initialize log at {location}: {source}")]
    Open {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("record {} kept in memory but not persisted: {source}", .record.index)]
    Persist {
        record: EventRecord,
        #[source]
        source: io::Error,
    },
    #[error("failed to truncate log: {0}")]
    Reset(#[source] io::Error),
    #[error("failed to flush log: {0}")]
    Flush(#[source] io::Error),
    #[error("cannot open log for inspection: {0}")]
    Inspect(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed log line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: RecordParseError,
    },
}

impl RecorderError {
    /// The in-memory record an append produced, if this is a persist failure
    pub fn record(&self) -> Option<&EventRecord> {
        match self {
            RecorderError::Persist { record, .. } => Some(record),
            _ => None,
        }
    }
}

struct EventLog {
    records: Vec<EventRecord>,
    sink: Box<dyn LogSink>,
}

/// Process-wide, thread-safe append-only interaction log
///
/// Construct one per process and share it (for example through
/// [`crate::PointerSession`]); every instance truncates its sink on creation.
pub struct EventRecorder {
    log: Mutex<EventLog>,
    /// Mirror of `records.len()`, updated inside the lock
    count: AtomicUsize,
}

impl std::fmt::Debug for EventRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRecorder")
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}

impl EventRecorder {
    /// Create a recorder writing to the configured file
    pub fn open(config: &RecorderConfig) -> RecorderResult<Self> {
        Self::with_sink(FileSink::from_config(config))
    }

    /// Create a recorder over any sink; the sink is truncated to the header
    pub fn with_sink<S: LogSink + 'static>(mut sink: S) -> RecorderResult<Self> {
        let location = sink
            .location()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());

        sink.truncate(CSV_HEADER)
            .map_err(|source| RecorderError::Open {
                location: location.clone(),
                source,
            })?;
        info!(location = %location, "event log initialized");

        Ok(Self {
            log: Mutex::new(EventLog {
                records: Vec::new(),
                sink: Box::new(sink),
            }),
            count: AtomicUsize::new(0),
        })
    }

    /// Append a record
    ///
    /// The record gets index `count + 1` and is kept in memory even when the
    /// durable write fails; in that case `RecorderError::Persist` carries the
    /// record so the caller can retry or just log it.
    pub fn append(
        &self,
        primary: &str,
        timestamp: i64,
        secondary: &str,
    ) -> RecorderResult<EventRecord> {
        let mut log = self.log.lock();

        let index = log.records.len() as u64 + 1;
        let record = EventRecord::new(index, timestamp, primary, secondary);
        log.records.push(record.clone());
        self.count.store(log.records.len(), Ordering::Release);

        match log.sink.append_line(&record.to_csv_line()) {
            Ok(()) => {
                debug!(index, primary, secondary, timestamp, "recorded interaction");
                Ok(record)
            }
            Err(source) => {
                warn!(index, error = %source, "interaction kept in memory only");
                Err(RecorderError::Persist { record, source })
            }
        }
    }

    /// Append a record stamped with the current time
    pub fn record_now(&self, primary: &str, secondary: &str) -> RecorderResult<EventRecord> {
        self.append(primary, current_timestamp_millis(), secondary)
    }

    /// Drop every record and truncate the sink to its header
    ///
    /// Memory is only cleared once the sink has been truncated. When
    /// truncation fails the log is left as it was and numbering continues,
    /// so the durable file never holds two records with the same index.
    pub fn reset(&self) -> RecorderResult<()> {
        let mut log = self.log.lock();

        if let Err(source) = log.sink.truncate(CSV_HEADER) {
            warn!(kept = log.records.len(), error = %source, "event log reset failed");
            return Err(RecorderError::Reset(source));
        }

        let dropped = log.records.len();
        log.records.clear();
        self.count.store(0, Ordering::Release);
        info!(dropped, "event log reset");
        Ok(())
    }

    /// Number of records in memory
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Snapshot of all records in order
    pub fn records(&self) -> Vec<EventRecord> {
        self.log.lock().records.clone()
    }

    /// Record with the given 1-based index
    pub fn get(&self, index: u64) -> Option<EventRecord> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.log.lock().records.get(position).cloned()
    }

    pub fn location(&self) -> Option<PathBuf> {
        self.log.lock().sink.location().map(Path::to_path_buf)
    }

    pub fn flush(&self) -> RecorderResult<()> {
        self.log.lock().sink.flush().map_err(RecorderError::Flush)
    }

    /// Flush before process exit
    pub fn shutdown(&self) -> RecorderResult<()> {
        self.flush()?;
        info!(records = self.count(), "event log closed");
        Ok(())
    }

    /// Ask the platform to show the log file to the user
    pub fn open_for_inspection(&self) -> RecorderResult<()> {
        let path = self
            .location()
            .ok_or_else(|| RecorderError::Inspect("log has no file location".to_string()))?;

        match inspect::open_in_viewer(&path) {
            Ok(()) => {
                info!(path = %path.display(), "opened event log");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open event log");
                Err(RecorderError::Inspect(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::MemorySink;
    use std::fs;
    use tempfile::TempDir;

    /// Sink that fails every write from the `fail_from`-th append onward
    struct FlakySink {
        inner: MemorySink,
        appends: usize,
        fail_from: usize,
    }

    impl LogSink for FlakySink {
        fn truncate(&mut self, header: &str) -> io::Result<()> {
            self.inner.truncate(header)
        }

        fn append_line(&mut self, line: &str) -> io::Result<()> {
            self.appends += 1;
            if self.appends >= self.fail_from {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.inner.append_line(line)
        }
    }

    fn create_test_recorder() -> (EventRecorder, MemorySink) {
        let sink = MemorySink::new();
        let recorder = EventRecorder::with_sink(sink.clone()).unwrap();
        (recorder, sink)
    }

    #[test]
    fn test_new_recorder_writes_header() {
        let (recorder, sink) = create_test_recorder();
        assert_eq!(recorder.count(), 0);
        assert_eq!(sink.lines(), vec![CSV_HEADER]);
    }

    #[test]
    fn test_append_assigns_sequential_indices() {
        let (recorder, sink) = create_test_recorder();

        let first = recorder.append("View", 1000, "ActionLog").unwrap();
        let second = recorder.append("Home", 2000, "").unwrap();

        assert_eq!(first, EventRecord::new(1, 1000, "View", "ActionLog"));
        assert_eq!(second.index, 2);
        assert_eq!(recorder.count(), 2);
        assert_eq!(
            sink.lines(),
            vec![CSV_HEADER, "1,1000,View,ActionLog", "2,2000,Home,"]
        );
    }

    #[test]
    fn test_reset_failure_leaves_records_untouched() {
        struct ReadOnlySink;

        impl LogSink for ReadOnlySink {
            fn truncate(&mut self, _header: &str) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
            }

            fn append_line(&mut self, _line: &str) -> io::Result<()> {
                Ok(())
            }
        }

        let recorder = EventRecorder::with_sink(MemorySink::new()).unwrap();
        recorder.append("View", 1, "").unwrap();
        // Swap in a sink that cannot be truncated
        recorder.log.lock().sink = Box::new(ReadOnlySink);

        assert!(matches!(recorder.reset(), Err(RecorderError::Reset(_))));
        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.append("Home", 2, "").unwrap().index, 2);
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let (recorder, sink) = create_test_recorder();
        recorder.append("View", 1000, "ActionLog").unwrap();
        assert_eq!(recorder.count(), 1);

        recorder.reset().unwrap();
        assert_eq!(recorder.count(), 0);
        assert_eq!(sink.lines(), vec![CSV_HEADER]);

        let record = recorder.append("Home", 2000, "").unwrap();
        assert_eq!(record, EventRecord::new(1, 2000, "Home", ""));
    }

    #[test]
    fn test_failed_persist_keeps_record_in_memory() {
        let inner = MemorySink::new();
        let recorder = EventRecorder::with_sink(FlakySink {
            inner: inner.clone(),
            appends: 0,
            fail_from: 3,
        })
        .unwrap();

        assert!(recorder.append("A", 1, "").is_ok());
        assert!(recorder.append("B", 2, "").is_ok());
        match recorder.append("C", 3, "sub") {
            Err(RecorderError::Persist { record, .. }) => assert_eq!(record.index, 3),
            other => panic!("expected persist error, got {:?}", other),
        }

        assert_eq!(recorder.count(), 3);
        assert_eq!(recorder.get(3), Some(EventRecord::new(3, 3, "C", "sub")));
        assert_eq!(inner.lines(), vec![CSV_HEADER, "1,1,A,", "2,2,B,"]);

        // Later appends still get fresh indices
        let err = recorder.append("D", 4, "").unwrap_err();
        assert_eq!(err.record().map(|r| r.index), Some(4));
    }

    #[test]
    fn test_get_out_of_range() {
        let (recorder, _sink) = create_test_recorder();
        recorder.append("A", 1, "").unwrap();
        assert!(recorder.get(0).is_none());
        assert!(recorder.get(2).is_none());
        assert!(recorder.get(1).is_some());
    }

    #[test]
    fn test_open_file_recorder_truncates_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let config = RecorderConfig::new(temp_dir.path().join("clicks.csv")).sync_on_write(false);
        fs::write(config.log_path(), "old,data\n").unwrap();

        let recorder = EventRecorder::open(&config).unwrap();
        recorder.append("View", 1000, "ActionLog").unwrap();

        let content = fs::read_to_string(config.log_path()).unwrap();
        assert_eq!(
            content,
            "Index,Timestamp,ObjectName,SubButtonName\n1,1000,View,ActionLog\n"
        );
        assert_eq!(recorder.location(), Some(config.log_path.clone()));
    }

    #[test]
    fn test_line_breaks_in_names_keep_file_readable() {
        let temp_dir = TempDir::new().unwrap();
        let config = RecorderConfig::new(temp_dir.path().join("clicks.csv")).sync_on_write(false);
        let recorder = EventRecorder::open(&config).unwrap();

        recorder.append("Main\nMenu", 1000, "Save\rAs").unwrap();
        recorder.append("Home", 2000, "").unwrap();

        let loaded = inspect::load_records(config.log_path()).unwrap();
        assert_eq!(
            loaded,
            vec![
                EventRecord::new(1, 1000, "Main Menu", "Save As"),
                EventRecord::new(2, 2000, "Home", ""),
            ]
        );
    }

    #[test]
    fn test_open_reports_bad_location() {
        let temp_dir = TempDir::new().unwrap();
        let err = EventRecorder::open(&RecorderConfig::new(temp_dir.path())).unwrap_err();
        assert!(matches!(err, RecorderError::Open { .. }));
    }

    #[test]
    fn test_inspection_without_file_fails_softly() {
        let (recorder, _sink) = create_test_recorder();
        assert!(matches!(
            recorder.open_for_inspection(),
            Err(RecorderError::Inspect(_))
        ));
    }

    #[test]
    fn test_record_now_uses_millis() {
        let (recorder, _sink) = create_test_recorder();
        let record = recorder.record_now("Home", "").unwrap();
        assert!(record.timestamp > 1_577_836_800_000);
    }
}
