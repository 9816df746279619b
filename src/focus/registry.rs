//! Registry of expandable targets and their sub-elements

use std::collections::HashMap;

use crate::types::{Target, TargetId};

/// Parent/child relations of the targets currently in the scene
///
/// Targets are added and removed explicitly by the UI layer as elements are
/// created and destroyed.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: HashMap<TargetId, Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a target, returning the previous definition
    pub fn register(&mut self, target: Target) -> Option<Target> {
        self.targets.insert(target.id.clone(), target)
    }

    pub fn unregister(&mut self, id: &TargetId) -> Option<Target> {
        self.targets.remove(id)
    }

    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.get(id)
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        self.targets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Children of `id`, empty for unknown or leaf targets
    pub fn children_of(&self, id: &TargetId) -> Vec<TargetId> {
        self.targets
            .get(id)
            .map(|t| t.children.clone())
            .unwrap_or_default()
    }

    /// Nearest enclosing target of `id`
    ///
    /// An explicit `parent` on the registered target wins; otherwise any
    /// registered target listing `id` among its children is used.
    pub fn parent_of(&self, id: &TargetId) -> Option<TargetId> {
        if let Some(parent) = self.targets.get(id).and_then(|t| t.parent.clone()) {
            return Some(parent);
        }

        let mut owners: Vec<&TargetId> = self
            .targets
            .values()
            .filter(|t| t.children.contains(id))
            .map(|t| &t.id)
            .collect();
        // HashMap order is arbitrary; pick deterministically when a child is shared
        owners.sort();
        owners.first().map(|id| (*id).clone())
    }
}
