//! Focus Arbiter - scene-wide exclusive focus
//!
//! Many pointer sources evaluate their ray hit once per tick. Only one
//! expandable target (a dropdown, a main button with sub-buttons) may be
//! expanded at a time, so every source goes through a single arbiter:
//!
//! ```text
//! ctrlA ──evaluate(ButtonX)──┐
//!                            ├──► FocusArbiter ──► FocusOutcome ──► show/hide children
//! ctrlB ──evaluate(ButtonY)──┘        │                          └─► EventRecorder
//!                                     └── holder: (target, owning source)
//! ```
//!
//! Calls are applied in the order they reach the arbiter. When several sources
//! run on separate threads, the winner of a same-tick race is whichever call
//! takes the lock last; callers that need a fixed order must serialize their
//! own per-tick loop.

mod registry;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::types::{FocusOutcome, FocusTransition, SourceId, Target, TargetId};

pub use registry::TargetRegistry;

#[derive(Debug, Clone)]
struct Holder {
    target: TargetId,
    owner: SourceId,
}

/// Arbitrates single ownership of the expanded target
#[derive(Debug, Default)]
pub struct FocusArbiter {
    holder: Mutex<Option<Holder>>,
    registry: RwLock<TargetRegistry>,
}

impl FocusArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one source's candidate for this tick
    ///
    /// - a new candidate revokes the current holder (if any) and takes focus
    /// - the current holder as candidate changes nothing, whichever source asks
    /// - no candidate releases focus only when the caller owns it
    pub fn evaluate(&self, source: &SourceId, candidate: Option<&TargetId>) -> FocusOutcome {
        let mut holder = self.holder.lock();

        let outcome = match (candidate, holder.as_ref()) {
            (Some(candidate), Some(current)) if current.target == *candidate => {
                FocusOutcome::unchanged()
            }
            (Some(candidate), current) => {
                let previous = current.map(|h| h.target.clone());
                *holder = Some(Holder {
                    target: candidate.clone(),
                    owner: source.clone(),
                });
                FocusOutcome::replace(previous, candidate.clone())
            }
            (None, Some(current)) if current.owner == *source => {
                let released = current.target.clone();
                *holder = None;
                FocusOutcome::close(released)
            }
            (None, _) => FocusOutcome::unchanged(),
        };
        drop(holder);

        for transition in outcome.transitions() {
            debug!(source = %source, transition = ?transition, "focus changed");
        }
        outcome
    }

    /// Clear focus if `target` holds it
    pub fn force_close(&self, target: &TargetId) -> Option<FocusTransition> {
        let mut holder = self.holder.lock();
        match holder.as_ref() {
            Some(current) if current.target == *target => {
                *holder = None;
                debug!(element = %target, "focus force-closed");
                Some(FocusTransition::Closed(target.clone()))
            }
            _ => None,
        }
    }

    pub fn current_holder(&self) -> Option<TargetId> {
        self.holder.lock().as_ref().map(|h| h.target.clone())
    }

    /// Source that acquired the current holder
    pub fn current_owner(&self) -> Option<SourceId> {
        self.holder.lock().as_ref().map(|h| h.owner.clone())
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Add an expandable target (or replace its definition)
    pub fn register(&self, target: Target) {
        debug!(element = %target.id, children = target.children.len(), "target registered");
        self.registry.write().register(target);
    }

    /// Remove a target; if it held focus, focus is closed
    pub fn unregister(&self, id: &TargetId) -> Option<FocusTransition> {
        let removed = self.registry.write().unregister(id);
        if removed.is_some() {
            debug!(element = %id, "target unregistered");
        }
        self.force_close(id)
    }

    pub fn is_registered(&self, id: &TargetId) -> bool {
        self.registry.read().contains(id)
    }

    pub fn registered_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Sub-elements to show or hide when `id` opens or closes
    pub fn children_of(&self, id: &TargetId) -> Vec<TargetId> {
        self.registry.read().children_of(id)
    }

    pub fn parent_of(&self, id: &TargetId) -> Option<TargetId> {
        self.registry.read().parent_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransitionKind;

    fn src(id: &str) -> SourceId {
        SourceId::new(id)
    }

    fn tgt(id: &str) -> TargetId {
        TargetId::new(id)
    }

    #[test]
    fn test_open_hold_release() {
        let arbiter = FocusArbiter::new();
        let a = src("ctrlA");
        let x = tgt("ButtonX");

        let outcome = arbiter.evaluate(&a, Some(&x));
        assert_eq!(outcome.kind(), TransitionKind::Opened);
        assert_eq!(outcome.opened(), Some(&x));
        assert_eq!(outcome.closed(), None);

        assert!(arbiter.evaluate(&a, Some(&x)).is_unchanged());

        let outcome = arbiter.evaluate(&a, None);
        assert_eq!(outcome.kind(), TransitionKind::Closed);
        assert_eq!(outcome.closed(), Some(&x));
        assert_eq!(arbiter.current_holder(), None);
    }

    #[test]
    fn test_other_source_takes_over() {
        let arbiter = FocusArbiter::new();
        arbiter.evaluate(&src("ctrlA"), Some(&tgt("ButtonX")));

        let outcome = arbiter.evaluate(&src("ctrlB"), Some(&tgt("ButtonY")));
        let transitions: Vec<_> = outcome.transitions().collect();
        assert_eq!(
            transitions,
            vec![
                FocusTransition::Closed(tgt("ButtonX")),
                FocusTransition::Opened(tgt("ButtonY")),
            ]
        );
        assert_eq!(arbiter.current_holder(), Some(tgt("ButtonY")));
        assert_eq!(arbiter.current_owner(), Some(src("ctrlB")));
    }

    #[test]
    fn test_same_source_moves_between_targets() {
        let arbiter = FocusArbiter::new();
        arbiter.evaluate(&src("ctrlA"), Some(&tgt("View")));
        let outcome = arbiter.evaluate(&src("ctrlA"), Some(&tgt("Home")));
        assert_eq!(outcome.closed(), Some(&tgt("View")));
        assert_eq!(outcome.opened(), Some(&tgt("Home")));
    }

    #[test]
    fn test_non_owner_release_is_ignored() {
        let arbiter = FocusArbiter::new();
        arbiter.evaluate(&src("ctrlA"), Some(&tgt("ButtonX")));

        assert!(arbiter.evaluate(&src("ctrlB"), None).is_unchanged());
        assert_eq!(arbiter.current_holder(), Some(tgt("ButtonX")));
    }

    #[test]
    fn test_same_target_from_other_source_keeps_owner() {
        let arbiter = FocusArbiter::new();
        arbiter.evaluate(&src("ctrlA"), Some(&tgt("ButtonX")));

        assert!(arbiter.evaluate(&src("ctrlB"), Some(&tgt("ButtonX"))).is_unchanged());
        assert_eq!(arbiter.current_owner(), Some(src("ctrlA")));

        // ctrlB cannot release what ctrlA owns
        assert!(arbiter.evaluate(&src("ctrlB"), None).is_unchanged());
        assert!(!arbiter.evaluate(&src("ctrlA"), None).is_unchanged());
    }

    #[test]
    fn test_release_with_nothing_focused() {
        let arbiter = FocusArbiter::new();
        assert!(arbiter.evaluate(&src("ctrlA"), None).is_unchanged());
    }

    #[test]
    fn test_force_close() {
        let arbiter = FocusArbiter::new();
        arbiter.evaluate(&src("ctrlA"), Some(&tgt("ButtonX")));

        assert_eq!(arbiter.force_close(&tgt("ButtonY")), None);
        assert_eq!(
            arbiter.force_close(&tgt("ButtonX")),
            Some(FocusTransition::Closed(tgt("ButtonX")))
        );
        assert_eq!(arbiter.current_holder(), None);
        assert_eq!(arbiter.force_close(&tgt("ButtonX")), None);
    }

    #[test]
    fn test_unregister_holder_closes_focus() {
        let arbiter = FocusArbiter::new();
        arbiter.register(Target::with_children("View", ["ActionLog"]));
        arbiter.register(Target::with_children("Home", ["Recent"]));
        assert_eq!(arbiter.registered_count(), 2);
        assert_eq!(arbiter.children_of(&tgt("View")), vec![tgt("ActionLog")]);

        arbiter.evaluate(&src("ctrlA"), Some(&tgt("View")));
        assert_eq!(arbiter.unregister(&tgt("Home")), None);
        assert_eq!(
            arbiter.unregister(&tgt("View")),
            Some(FocusTransition::Closed(tgt("View")))
        );
        assert!(!arbiter.is_registered(&tgt("View")));
        assert_eq!(arbiter.registered_count(), 1);
    }

    #[test]
    fn test_unregistered_targets_are_accepted() {
        let arbiter = FocusArbiter::new();
        let outcome = arbiter.evaluate(&src("ctrlA"), Some(&tgt("NeverRegistered")));
        assert_eq!(outcome.kind(), TransitionKind::Opened);
        assert!(arbiter.children_of(&tgt("NeverRegistered")).is_empty());
    }

    #[test]
    fn test_single_holder_across_random_sequence() {
        let arbiter = FocusArbiter::new();
        let sources = [src("ctrlA"), src("ctrlB"), src("gaze")];
        let targets = [None, Some(tgt("X")), Some(tgt("Y")), Some(tgt("Z"))];
        let mut open: Option<TargetId> = None;

        // Deterministic pseudo-random walk over (source, candidate) pairs
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let source = &sources[(seed >> 8) as usize % sources.len()];
            let candidate = &targets[(seed >> 16) as usize % targets.len()];

            for transition in arbiter.evaluate(source, candidate.as_ref()).transitions() {
                match transition {
                    FocusTransition::Opened(t) => {
                        assert!(open.is_none(), "opened {t} while {open:?} still open");
                        open = Some(t);
                    }
                    FocusTransition::Closed(t) => {
                        assert_eq!(open.as_ref(), Some(&t));
                        open = None;
                    }
                }
            }
            assert_eq!(open, arbiter.current_holder());
        }
    }
}
