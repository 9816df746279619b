//! Responses written by the session server

use serde::Serialize;
use serde_json::{json, Value};

use crate::recorder::RecorderResult;
use crate::types::EventRecord;

/// One response line
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            ok: true,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Describe an append result, including records kept only in memory
pub fn logged_json(result: &RecorderResult<EventRecord>) -> Value {
    match result {
        Ok(record) => json!({ "record": record, "persisted": true }),
        Err(e) => json!({
            "record": e.record(),
            "persisted": false,
            "error": e.to_string(),
        }),
    }
}
