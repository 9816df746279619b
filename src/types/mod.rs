//! Data types shared by the focus arbiter, the recorder and the session
//!
//! This module contains the identifiers, records and transitions that flow
//! between the core components and the external engine layer.

mod input;
mod record;
mod target;
mod transition;

pub use input::{ButtonEdge, ButtonKind, ButtonSample, Hand};
pub use record::{EventRecord, RecordParseError, CSV_HEADER};
pub use target::{SourceId, Target, TargetId};
pub use transition::{FocusOutcome, FocusTransition, TransitionKind};
