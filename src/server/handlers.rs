//! Command handlers for the session server
//!
//! Each handler maps one [`Command`] onto the session and builds the JSON
//! result. Recorder failures on the append path are reported inside the
//! result (the record still exists in memory); other recorder failures become
//! error responses.

use serde_json::{json, Value};

use crate::protocol::{logged_json, Command};
use crate::session::{PointerSession, TickReport};
use crate::types::EventRecord;
use crate::utils::{current_timestamp_millis, format_millis};

/// Execute a command against the session
pub fn handle_command(session: &PointerSession, command: Command) -> Result<Value, String> {
    match command {
        Command::Tick {
            source,
            target,
            timestamp,
        } => {
            let ts = timestamp.unwrap_or_else(current_timestamp_millis);
            let report = session.on_tick(&source, target.as_ref(), ts);
            Ok(tick_json(&report))
        }

        Command::Hover {
            source,
            target,
            timestamp,
        } => {
            let ts = timestamp.unwrap_or_else(current_timestamp_millis);
            let logged = session.on_hover(&source, target.as_ref(), ts);
            Ok(json!({ "logged": logged.as_ref().map(logged_json) }))
        }

        Command::Interact {
            primary,
            secondary,
            timestamp,
        } => {
            let ts = timestamp.unwrap_or_else(current_timestamp_millis);
            Ok(logged_json(&session.on_interact(&primary, &secondary, ts)))
        }

        Command::Buttons { hand, buttons } => {
            let edges = session.on_buttons(hand, buttons);
            Ok(json!({ "edges": edges }))
        }

        Command::Register { target } => {
            let id = target.id.clone();
            session.arbiter().register(target);
            Ok(json!({ "registered": id }))
        }

        Command::Unregister { target } => {
            let closed = session.arbiter().unregister(&target);
            Ok(json!({ "closed": closed }))
        }

        Command::Detach { source } => Ok(tick_json(&session.detach_source(&source))),

        Command::Reset => session
            .recorder()
            .reset()
            .map(|()| json!({ "count": 0 }))
            .map_err(|e| e.to_string()),

        Command::Count => Ok(json!({ "count": session.recorder().count() })),

        Command::Records => {
            let records: Vec<Value> = session
                .recorder()
                .records()
                .iter()
                .map(record_with_time)
                .collect();
            Ok(json!({ "records": records }))
        }

        Command::Open => session
            .recorder()
            .open_for_inspection()
            .map(|()| json!({ "opened": session.recorder().location() }))
            .map_err(|e| e.to_string()),

        Command::Holder => Ok(json!({
            "holder": session.arbiter().current_holder(),
            "owner": session.arbiter().current_owner(),
        })),

        Command::Stats => serde_json::to_value(session.stats()).map_err(|e| e.to_string()),
    }
}

/// Build the result of a focus evaluation
pub fn tick_json(report: &TickReport) -> Value {
    let transitions: Vec<_> = report.outcome.transitions().collect();
    json!({
        "kind": report.outcome.kind(),
        "transitions": transitions,
        "show": report.show,
        "hide": report.hide,
        "logged": report.logged.as_ref().map(logged_json),
    })
}

fn record_with_time(record: &EventRecord) -> Value {
    let mut value = json!(record);
    if let (Some(obj), Some(time)) = (value.as_object_mut(), format_millis(record.timestamp)) {
        obj.insert("time".to_string(), Value::String(time));
    }
    value
}
