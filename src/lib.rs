//! VR Pointer Log
//!
//! Engine-independent core for VR pointer-based UI interaction: exclusive
//! focus arbitration between competing controller rays and a durable,
//! ordered interaction log.
//!
//! # Features
//!
//! - **Exclusive focus**: at most one expandable target is open at a time,
//!   whatever the number of pointer sources
//! - **Thread-Safe**: arbiter and recorder are `Send + Sync` and shared via `Arc`
//! - **Durable log**: CSV file with sequence numbers restarting at 1 after reset
//! - **Failure tolerant**: a failed write keeps the record in memory and is
//!   reported as a value, never a panic
//!
//! # Modules
//!
//! - `types`: identifiers, records, transitions, controller input
//! - `focus`: `FocusArbiter` and the target registry
//! - `recorder`: `EventRecorder`, sinks and log read-back
//! - `input`: per-source button and hover trackers
//! - `session`: `PointerSession`, the context shared by all sources
//! - `protocol` / `server`: JSON line protocol for an engine bridge
//! - `utils`: timestamp helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vr_pointer_log::{PointerSession, RecorderConfig, SourceId, Target, TargetId};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(PointerSession::open(&RecorderConfig::new("ButtonClicks.csv"))?);
//!     session.arbiter().register(Target::with_children("View", ["ActionLog"]));
//!
//!     let right = SourceId::new("right-hand");
//!     let report = session.on_tick(&right, Some(&TargetId::new("View")), 1_718_000_000_000);
//!     assert_eq!(report.show, vec![TargetId::new("ActionLog")]);
//!
//!     session.shutdown()?;
//!     Ok(())
//! }
//! ```

pub mod focus;
pub mod input;
pub mod protocol;
pub mod recorder;
pub mod server;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use focus::FocusArbiter;
pub use recorder::{EventRecorder, RecorderConfig, RecorderError, RecorderResult};
pub use server::SessionServer;
pub use session::{PointerSession, TickReport};
pub use types::{
    ButtonEdge, ButtonKind, ButtonSample, EventRecord, FocusOutcome, FocusTransition, Hand,
    SourceId, Target, TargetId, TransitionKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
