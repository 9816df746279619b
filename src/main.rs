//! Pointer Log Server - Binary Entry Point
//!
//! Reads session commands from stdin, writes responses to stdout and logs
//! to stderr.
//!
//! Environment:
//! - `POINTER_LOG_PATH`: durable log file (default `./ButtonClicks.csv`)
//! - `POINTER_LOG_SYNC`: `0`/`false` disables fsync after each write
//! - `RUST_LOG`: tracing filter (default `info`)

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vr_pointer_log::server::{ServerResult, SessionServer};
use vr_pointer_log::{PointerSession, RecorderConfig};

fn config_from_env() -> RecorderConfig {
    let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let log_path = match env::var("POINTER_LOG_PATH") {
        Ok(path) if PathBuf::from(&path).is_absolute() => PathBuf::from(path),
        Ok(path) => current_dir.join(path),
        Err(_) => current_dir.join("ButtonClicks.csv"),
    };

    let sync = env::var("POINTER_LOG_SYNC")
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true);

    RecorderConfig::new(log_path).sync_on_write(sync)
}

fn main() -> ServerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config_from_env();
    let session = Arc::new(PointerSession::open(&config)?);
    info!(path = %config.log_path.display(), "pointer log server ready");

    // Flush the log on Ctrl+C / SIGTERM
    let shutdown_session = Arc::clone(&session);
    ctrlc::set_handler(move || {
        if let Err(e) = shutdown_session.shutdown() {
            error!(error = %e, "failed to flush event log");
        }
        std::process::exit(0);
    })?;

    let mut server = SessionServer::stdio(Arc::clone(&session));
    server.run()?;

    session.shutdown()?;
    Ok(())
}
