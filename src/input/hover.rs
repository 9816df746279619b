//! Per-source hover de-duplication

use serde::{Deserialize, Serialize};

use crate::focus::FocusArbiter;
use crate::types::TargetId;

/// A newly hovered element, resolved against the target registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverHit {
    /// Enclosing main button, or the hit itself when it has no parent
    pub primary: TargetId,
    /// The hit element when it is a sub-button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<TargetId>,
}

impl HoverHit {
    pub fn secondary_str(&self) -> &str {
        self.secondary.as_ref().map(TargetId::as_str).unwrap_or("")
    }
}

/// Remembers the last element one source pointed at
///
/// A hit is reported once when the ray moves onto an element. Losing the hit
/// clears the memory, so moving off and back onto the same element reports it
/// again.
#[derive(Debug, Default)]
pub struct HoverTracker {
    last: Option<TargetId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, hit: Option<&TargetId>, arbiter: &FocusArbiter) -> Option<HoverHit> {
        let Some(hit) = hit else {
            self.last = None;
            return None;
        };
        if self.last.as_ref() == Some(hit) {
            return None;
        }
        self.last = Some(hit.clone());

        Some(match arbiter.parent_of(hit) {
            Some(parent) => HoverHit {
                primary: parent,
                secondary: Some(hit.clone()),
            },
            None => HoverHit {
                primary: hit.clone(),
                secondary: None,
            },
        })
    }

    pub fn last(&self) -> Option<&TargetId> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Target;

    fn arbiter() -> FocusArbiter {
        let arbiter = FocusArbiter::new();
        arbiter.register(Target::with_children("View", ["ActionLog"]));
        arbiter
    }

    #[test]
    fn test_reports_each_new_hit_once() {
        let arbiter = arbiter();
        let mut tracker = HoverTracker::new();
        let home = TargetId::new("Home");

        let hit = tracker.observe(Some(&home), &arbiter).unwrap();
        assert_eq!(hit.primary, home);
        assert_eq!(hit.secondary_str(), "");

        assert!(tracker.observe(Some(&home), &arbiter).is_none());
        assert!(tracker.observe(None, &arbiter).is_none());
        assert!(tracker.last().is_none());
        assert!(tracker.observe(Some(&home), &arbiter).is_some());
    }

    #[test]
    fn test_sub_button_resolves_to_parent() {
        let arbiter = arbiter();
        let mut tracker = HoverTracker::new();

        let hit = tracker
            .observe(Some(&TargetId::new("ActionLog")), &arbiter)
            .unwrap();
        assert_eq!(hit.primary, TargetId::new("View"));
        assert_eq!(hit.secondary_str(), "ActionLog");
    }
}
