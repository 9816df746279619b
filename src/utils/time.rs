//! Time and timestamp utilities
//!
//! Every timestamp stored in the event log is Unix time in milliseconds.

use chrono::{DateTime, Utc};

/// Get current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp in seconds to milliseconds
///
/// For engine bridges that only report whole seconds.
pub fn seconds_to_millis(seconds: i64) -> i64 {
    seconds.saturating_mul(1000)
}

/// Format a millisecond timestamp as RFC 3339, `None` if out of range
pub fn format_millis(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339())
}
