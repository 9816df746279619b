//! Focus transitions reported by the arbiter

use serde::{Deserialize, Serialize};

use super::TargetId;

/// Kind of a focus change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Nothing changed
    None,
    /// A target gained focus and its children should be shown
    Opened,
    /// A target lost focus and its children should be hidden
    Closed,
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionKind::None => write!(f, "none"),
            TransitionKind::Opened => write!(f, "opened"),
            TransitionKind::Closed => write!(f, "closed"),
        }
    }
}

/// A single focus change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum FocusTransition {
    Opened(TargetId),
    Closed(TargetId),
}

impl FocusTransition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            FocusTransition::Opened(_) => TransitionKind::Opened,
            FocusTransition::Closed(_) => TransitionKind::Closed,
        }
    }

    pub fn target(&self) -> &TargetId {
        match self {
            FocusTransition::Opened(t) | FocusTransition::Closed(t) => t,
        }
    }
}

/// Ordered result of one `evaluate` call
///
/// Holds at most two transitions: a `Closed` for the revoked holder followed
/// by an `Opened` for the new one. An empty outcome means no change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    closed: Option<TargetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opened: Option<TargetId>,
}

impl FocusOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub(crate) fn close(target: TargetId) -> Self {
        Self {
            closed: Some(target),
            opened: None,
        }
    }

    pub(crate) fn replace(closed: Option<TargetId>, opened: TargetId) -> Self {
        Self {
            closed,
            opened: Some(opened),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.closed.is_none() && self.opened.is_none()
    }

    /// Target whose children should be hidden, if any
    pub fn closed(&self) -> Option<&TargetId> {
        self.closed.as_ref()
    }

    /// Target whose children should be shown, if any
    pub fn opened(&self) -> Option<&TargetId> {
        self.opened.as_ref()
    }

    /// Kind of the final transition (`None` when nothing changed)
    pub fn kind(&self) -> TransitionKind {
        if self.opened.is_some() {
            TransitionKind::Opened
        } else if self.closed.is_some() {
            TransitionKind::Closed
        } else {
            TransitionKind::None
        }
    }

    /// Transitions in the order they happened: close before open
    pub fn transitions(&self) -> impl Iterator<Item = FocusTransition> + '_ {
        self.closed
            .iter()
            .cloned()
            .map(FocusTransition::Closed)
            .chain(self.opened.iter().cloned().map(FocusTransition::Opened))
    }
}
