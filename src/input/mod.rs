//! Input adapters
//!
//! Small per-source state machines that turn raw per-tick samples from the
//! engine into the discrete signals the core consumes.

mod buttons;
mod hover;

pub use buttons::ButtonTracker;
pub use hover::{HoverHit, HoverTracker};
