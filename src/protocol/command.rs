//! Commands accepted by the session server

use serde::Deserialize;
use serde_json::Value;

use crate::types::{ButtonSample, Hand, SourceId, Target, TargetId};

/// One request line: an optional correlation id plus the command
#[derive(Deserialize, Debug, Clone)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub command: Command,
}

/// Session operations, tagged by `cmd`
///
/// Timestamps are Unix milliseconds; when omitted the server stamps the
/// command with the current time.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Focus candidate of one source (`target` absent = ray hits nothing)
    Tick {
        source: SourceId,
        #[serde(default)]
        target: Option<TargetId>,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    /// Raw hover hit of one source
    Hover {
        source: SourceId,
        #[serde(default)]
        target: Option<TargetId>,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    /// One-shot interaction
    Interact {
        #[serde(rename = "objectName")]
        primary: String,
        #[serde(rename = "subButtonName", default)]
        secondary: String,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    /// Button readings of one controller
    Buttons {
        hand: Hand,
        #[serde(default)]
        buttons: ButtonSample,
    },
    Register {
        target: Target,
    },
    Unregister {
        target: TargetId,
    },
    /// Controller lost: release whatever focus it owns
    Detach {
        source: SourceId,
    },
    Reset,
    Count,
    Records,
    Open,
    Holder,
    Stats,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Tick { .. } => "tick",
            Command::Hover { .. } => "hover",
            Command::Interact { .. } => "interact",
            Command::Buttons { .. } => "buttons",
            Command::Register { .. } => "register",
            Command::Unregister { .. } => "unregister",
            Command::Detach { .. } => "detach",
            Command::Reset => "reset",
            Command::Count => "count",
            Command::Records => "records",
            Command::Open => "open",
            Command::Holder => "holder",
            Command::Stats => "stats",
        }
    }
}
