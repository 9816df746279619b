//! Line protocol for the session server
//!
//! Each stdin line is one JSON [`Request`]; each stdout line is one JSON
//! [`Response`].

mod command;
mod response;

pub use command::{Command, Request};
pub use response::{logged_json, Response};
