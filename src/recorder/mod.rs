//! Event Recorder Module
//!
//! This module provides the durable interaction log:
//! - `EventRecorder`: thread-safe append/reset/count over an in-memory sequence
//! - `LogSink`: where formatted lines go (`FileSink`, `MemorySink`)
//! - `load_records`: reads a persisted log back for inspection
//!
//! # Architecture
//!
//! ```text
//! Write Path (one lock held throughout):
//! ┌──────────┐    ┌──────────────┐    ┌──────────────┐    ┌────────────────┐
//! │ append() │───►│ index =      │───►│ push to      │───►│ sink.append_   │
//! │          │    │ count + 1    │    │ records      │    │ line() (fsync) │
//! └──────────┘    └──────────────┘    └──────────────┘    └────────────────┘
//!
//! File layout:
//! Index,Timestamp,ObjectName,SubButtonName
//! 1,1718000000000,View,ActionLog
//! ```

mod inspect;
mod sink;
mod store;

pub use inspect::load_records;
pub use sink::{FileSink, LogSink, MemorySink};
pub use store::{EventRecorder, RecorderConfig, RecorderError, RecorderResult};
