//! Pointer Session - the shared context handed to every pointer source
//!
//! A session owns one [`FocusArbiter`] and one [`EventRecorder`] and turns the
//! engine's per-tick signals into focus changes and log entries:
//!
//! ```text
//! on_tick(source, hit)        ──► FocusArbiter::evaluate ──► Opened(t) ──► append(t, ts, "")
//! on_hover(source, hit)       ──► HoverTracker ──► new hit ──► append(main, ts, sub)
//! on_interact(main, sub, ts)  ──────────────────────────────► append(main, ts, sub)
//! on_buttons(hand, sample)    ──► ButtonTracker ──► edges (traced only)
//! ```
//!
//! Build exactly one session per process and clone the `Arc` into each source
//! task. Call [`PointerSession::shutdown`] before exit.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::focus::FocusArbiter;
use crate::input::{ButtonTracker, HoverTracker};
use crate::recorder::{EventRecorder, RecorderConfig, RecorderResult};
use crate::types::{
    ButtonEdge, ButtonSample, EventRecord, FocusOutcome, Hand, SourceId, TargetId,
};

/// What one tick changed
#[derive(Debug)]
pub struct TickReport {
    pub outcome: FocusOutcome,
    /// Sub-elements to hide (children of the closed target)
    pub hide: Vec<TargetId>,
    /// Sub-elements to show (children of the opened target)
    pub show: Vec<TargetId>,
    /// Log entry for the opened target, if any
    pub logged: Option<RecorderResult<EventRecord>>,
}

impl TickReport {
    pub fn is_unchanged(&self) -> bool {
        self.outcome.is_unchanged()
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    #[serde(rename = "recordCount")]
    pub record_count: usize,
    #[serde(rename = "registeredTargets")]
    pub registered_targets: usize,
    #[serde(rename = "activeSources")]
    pub active_sources: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<TargetId>,
}

/// Context shared by all pointer sources
#[derive(Debug)]
pub struct PointerSession {
    arbiter: Arc<FocusArbiter>,
    recorder: Arc<EventRecorder>,
    hovers: Mutex<HashMap<SourceId, HoverTracker>>,
    buttons: Mutex<ButtonTracker>,
}

impl PointerSession {
    /// Create a session logging to the configured file
    pub fn open(config: &RecorderConfig) -> RecorderResult<Self> {
        let recorder = EventRecorder::open(config)?;
        Ok(Self::with_parts(
            Arc::new(FocusArbiter::new()),
            Arc::new(recorder),
        ))
    }

    pub fn with_parts(arbiter: Arc<FocusArbiter>, recorder: Arc<EventRecorder>) -> Self {
        Self {
            arbiter,
            recorder,
            hovers: Mutex::new(HashMap::new()),
            buttons: Mutex::new(ButtonTracker::new()),
        }
    }

    pub fn arbiter(&self) -> &Arc<FocusArbiter> {
        &self.arbiter
    }

    pub fn recorder(&self) -> &Arc<EventRecorder> {
        &self.recorder
    }

    /// Focus candidate of one source for this tick
    pub fn on_tick(
        &self,
        source: &SourceId,
        candidate: Option<&TargetId>,
        timestamp: i64,
    ) -> TickReport {
        let outcome = self.arbiter.evaluate(source, candidate);

        let hide = outcome
            .closed()
            .map(|t| self.arbiter.children_of(t))
            .unwrap_or_default();
        let show = outcome
            .opened()
            .map(|t| self.arbiter.children_of(t))
            .unwrap_or_default();

        if let Some(closed) = outcome.closed() {
            debug!(source = %source, element = %closed, "no longer pointed at");
        }
        let logged = outcome.opened().map(|opened| {
            debug!(source = %source, element = %opened, "pointed at");
            self.recorder.append(opened.as_str(), timestamp, "")
        });

        TickReport {
            outcome,
            hide,
            show,
            logged,
        }
    }

    /// Element one source's ray currently hits, logged once per new hit
    pub fn on_hover(
        &self,
        source: &SourceId,
        hit: Option<&TargetId>,
        timestamp: i64,
    ) -> Option<RecorderResult<EventRecord>> {
        let hover = self
            .hovers
            .lock()
            .entry(source.clone())
            .or_default()
            .observe(hit, &self.arbiter)?;

        debug!(
            source = %source,
            main = %hover.primary,
            sub = hover.secondary_str(),
            "hovered"
        );
        Some(
            self.recorder
                .append(hover.primary.as_str(), timestamp, hover.secondary_str()),
        )
    }

    /// One-shot interaction reported directly by the engine
    pub fn on_interact(
        &self,
        primary: &str,
        secondary: &str,
        timestamp: i64,
    ) -> RecorderResult<EventRecord> {
        debug!(main = primary, sub = secondary, "interaction");
        self.recorder.append(primary, timestamp, secondary)
    }

    /// Raw button readings of one controller for this tick
    pub fn on_buttons(&self, hand: Hand, sample: ButtonSample) -> Vec<ButtonEdge> {
        self.buttons.lock().observe(hand, sample)
    }

    /// Forget a source (controller lost or torn down), releasing focus it owns
    pub fn detach_source(&self, source: &SourceId) -> TickReport {
        self.hovers.lock().remove(source);
        // A release only takes effect for the owning source
        let outcome = self.arbiter.evaluate(source, None);
        let hide = outcome
            .closed()
            .map(|t| self.arbiter.children_of(t))
            .unwrap_or_default();

        TickReport {
            outcome,
            hide,
            show: Vec::new(),
            logged: None,
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            record_count: self.recorder.count(),
            registered_targets: self.arbiter.registered_count(),
            active_sources: self.hovers.lock().len(),
            holder: self.arbiter.current_holder(),
        }
    }

    /// Flush the log before the process exits
    pub fn shutdown(&self) -> RecorderResult<()> {
        info!(records = self.recorder.count(), "pointer session shutting down");
        self.recorder.shutdown()
    }
}
