//! Interaction records for the append-only event log
//!
//! Records are immutable once created by the recorder. Each one is persisted
//! as a single CSV line:
//!
//! ```text
//! Index,Timestamp,ObjectName,SubButtonName
//! 1,1718000000000,View,ActionLog
//! 2,1718000001500,Home,
//! ```
//!
//! Embedded commas are not escaped. When reading a line back, everything after
//! the third comma is taken as the secondary target. Line breaks inside a
//! name are written as spaces so a record always stays on one line.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header line written once at initialization and after every reset
pub const CSV_HEADER: &str = "Index,Timestamp,ObjectName,SubButtonName";

/// Errors raised while parsing a persisted log line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid index: {0}")]
    Index(String),
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}

/// One sequence-numbered log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 1 after each reset
    pub index: u64,

    /// Unix timestamp in milliseconds
    pub timestamp: i64,

    /// Main target (e.g. the parent button)
    #[serde(rename = "objectName")]
    pub primary: String,

    /// Sub-target, empty when the interaction hit a main target directly
    #[serde(rename = "subButtonName", default)]
    pub secondary: String,
}

impl EventRecord {
    pub fn new(
        index: u64,
        timestamp: i64,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        Self {
            index,
            timestamp,
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Format as a CSV line without the trailing newline
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.index,
            self.timestamp,
            single_line(&self.primary),
            single_line(&self.secondary)
        )
    }

    /// Parse a CSV line written by [`EventRecord::to_csv_line`]
    pub fn from_csv_line(line: &str) -> Result<Self, RecordParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.splitn(4, ',').collect();
        if fields.len() != 4 {
            return Err(RecordParseError::FieldCount(fields.len()));
        }

        let index = fields[0]
            .trim()
            .parse::<u64>()
            .map_err(|_| RecordParseError::Index(fields[0].to_string()))?;
        let timestamp = fields[1]
            .trim()
            .parse::<i64>()
            .map_err(|_| RecordParseError::Timestamp(fields[1].to_string()))?;

        Ok(Self::new(index, timestamp, fields[2], fields[3]))
    }

    /// Serialize to a JSON line
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn has_secondary(&self) -> bool {
        !self.secondary.is_empty()
    }
}

fn single_line(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(['\r', '\n']) {
        field.replace(['\r', '\n'], " ").into()
    } else {
        field.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_line_format() {
        let record = EventRecord::new(1, 1000, "View", "ActionLog");
        assert_eq!(record.to_csv_line(), "1,1000,View,ActionLog");

        let record = EventRecord::new(2, 2000, "Home", "");
        assert_eq!(record.to_csv_line(), "2,2000,Home,");
        assert!(!record.has_secondary());
    }

    #[test]
    fn test_parse_csv_line() {
        let record = EventRecord::from_csv_line("3,1718000000000,Settings,Audio\n").unwrap();
        assert_eq!(record, EventRecord::new(3, 1718000000000, "Settings", "Audio"));

        let record = EventRecord::from_csv_line("4,5,Home,").unwrap();
        assert_eq!(record.secondary, "");
    }

    #[test]
    fn test_parse_keeps_extra_commas_in_secondary() {
        let record = EventRecord::from_csv_line("1,10,Menu,Save,As").unwrap();
        assert_eq!(record.primary, "Menu");
        assert_eq!(record.secondary, "Save,As");
    }

    #[test]
    fn test_line_breaks_stay_on_one_line() {
        let record = EventRecord::new(1, 10, "Main\nMenu", "Save\r\nAs");
        let line = record.to_csv_line();
        assert_eq!(line, "1,10,Main Menu,Save  As");

        let back = EventRecord::from_csv_line(&line).unwrap();
        assert_eq!(back, EventRecord::new(1, 10, "Main Menu", "Save  As"));
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert_eq!(
            EventRecord::from_csv_line("1,2,View"),
            Err(RecordParseError::FieldCount(3))
        );
        assert_eq!(
            EventRecord::from_csv_line(CSV_HEADER),
            Err(RecordParseError::Index("Index".to_string()))
        );
        assert_eq!(
            EventRecord::from_csv_line("1,soon,View,"),
            Err(RecordParseError::Timestamp("soon".to_string()))
        );
    }

    #[test]
    fn test_json_field_names() {
        let json = EventRecord::new(1, 1000, "View", "ActionLog")
            .to_json_line()
            .unwrap();
        assert_eq!(
            json,
            r#"{"index":1,"timestamp":1000,"objectName":"View","subButtonName":"ActionLog"}"#
        );
    }
}
