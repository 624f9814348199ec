//! Subscription bookkeeping for one monitoring context.
//!
//! The registry is the single source of truth for "is (target, type)
//! monitored". It never talks to the platform: the controller records a pair
//! right after attaching it and forgets it right after detaching it.
//!
//! Targets are stored arena style. The first recorded pair assigns the target
//! a [`TargetId`]; the slot (and the id) goes away with the last pair, so an
//! empty type set is never observable.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::types::TargetId;

#[derive(Debug, Clone)]
struct Slot<T> {
    target: T,
    types: HashSet<String>,
    all_types: bool,
}

/// Types removed from a target by [`SubscriptionRegistry::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearedEntry<T> {
    pub target: T,
    pub types: HashSet<String>,
    /// The target was monitored with the catalog-wide selector.
    pub all_types: bool,
}

/// Per-context map of monitored (target, event type) pairs.
#[derive(Debug, Clone)]
pub struct SubscriptionRegistry<T> {
    ids: HashMap<T, TargetId>,
    slots: HashMap<TargetId, Slot<T>>,
    next_id: u64,
}

impl<T> Default for SubscriptionRegistry<T> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            slots: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> SubscriptionRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, target: &T) -> Option<&Slot<T>> {
        self.ids.get(target).and_then(|id| self.slots.get(id))
    }

    /// Returns true if `event_type` is recorded for `target`.
    #[must_use]
    pub fn is_monitored(&self, target: &T, event_type: &str) -> bool {
        self.slot(target).is_some_and(|slot| slot.types.contains(event_type))
    }

    /// Records a pair. Returns false if it was already recorded.
    pub fn record(&mut self, target: &T, event_type: &str) -> bool {
        let id = match self.ids.get(target) {
            Some(id) => *id,
            None => {
                let id = TargetId::new(self.next_id);
                self.next_id += 1;
                self.ids.insert(target.clone(), id);
                self.slots.insert(
                    id,
                    Slot {
                        target: target.clone(),
                        types: HashSet::new(),
                        all_types: false,
                    },
                );
                id
            }
        };

        match self.slots.get_mut(&id) {
            Some(slot) if slot.types.contains(event_type) => false,
            Some(slot) => slot.types.insert(event_type.to_string()),
            None => false,
        }
    }

    /// Forgets a pair. Returns false if it was not recorded.
    pub fn forget(&mut self, target: &T, event_type: &str) -> bool {
        let Some(id) = self.ids.get(target).copied() else {
            return false;
        };
        let Some(slot) = self.slots.get_mut(&id) else {
            return false;
        };

        let removed = slot.types.remove(event_type);
        if slot.types.is_empty() {
            self.slots.remove(&id);
            self.ids.remove(target);
        }
        removed
    }

    /// Marks `target` as monitored with the catalog-wide selector.
    ///
    /// No effect unless the target has at least one recorded pair.
    pub fn mark_all_types(&mut self, target: &T) {
        if let Some(slot) = self.ids.get(target).and_then(|id| self.slots.get_mut(id)) {
            slot.all_types = true;
        }
    }

    /// Returns true if `target` was monitored with the catalog-wide selector.
    #[must_use]
    pub fn is_all_types(&self, target: &T) -> bool {
        self.slot(target).is_some_and(|slot| slot.all_types)
    }

    /// Recorded types for `target` (empty if none).
    #[must_use]
    pub fn entries_for(&self, target: &T) -> HashSet<String> {
        self.slot(target).map(|slot| slot.types.clone()).unwrap_or_default()
    }

    /// Drops every pair of `target`, returning what was removed.
    pub fn clear(&mut self, target: &T) -> Option<ClearedEntry<T>> {
        let id = self.ids.remove(target)?;
        let slot = self.slots.remove(&id)?;
        Some(ClearedEntry {
            target: slot.target,
            types: slot.types,
            all_types: slot.all_types,
        })
    }

    /// Arena id of a monitored target.
    #[must_use]
    pub fn target_id(&self, target: &T) -> Option<TargetId> {
        self.ids.get(target).copied()
    }

    /// Monitored targets, ordered by first use.
    #[must_use]
    pub fn targets(&self) -> Vec<T> {
        let mut ids: Vec<&TargetId> = self.slots.keys().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.slots.get(id))
            .map(|slot| slot.target.clone())
            .collect()
    }

    /// Number of monitored targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when nothing is monitored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of monitored pairs across all targets.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.slots.values().map(|slot| slot.types.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_monitors_nothing() {
        let reg: SubscriptionRegistry<&str> = SubscriptionRegistry::new();
        assert!(!reg.is_monitored(&"btn", "click"));
        assert!(reg.entries_for(&"btn").is_empty());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut reg = SubscriptionRegistry::new();
        assert!(reg.record(&"btn", "click"));
        assert!(!reg.record(&"btn", "click"));
        assert_eq!(reg.pair_count(), 1);
        assert!(reg.is_monitored(&"btn", "click"));
        assert!(!reg.is_monitored(&"btn", "mouseup"));
    }

    #[test]
    fn test_forget_last_pair_removes_target() {
        let mut reg = SubscriptionRegistry::new();
        reg.record(&"btn", "click");
        reg.record(&"btn", "mouseup");
        let id = reg.target_id(&"btn");
        assert!(id.is_some());

        assert!(reg.forget(&"btn", "click"));
        assert_eq!(reg.target_id(&"btn"), id);

        assert!(reg.forget(&"btn", "mouseup"));
        assert!(reg.target_id(&"btn").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_forget_unknown_pair_is_noop() {
        let mut reg = SubscriptionRegistry::new();
        assert!(!reg.forget(&"btn", "click"));
        reg.record(&"btn", "click");
        assert!(!reg.forget(&"btn", "keydown"));
        assert!(reg.is_monitored(&"btn", "click"));
    }

    #[test]
    fn test_target_ids_are_stable_and_distinct() {
        let mut reg = SubscriptionRegistry::new();
        reg.record(&"a", "click");
        reg.record(&"b", "click");
        let a = reg.target_id(&"a").unwrap();
        reg.record(&"a", "keydown");
        assert_eq!(reg.target_id(&"a"), Some(a));
        assert_ne!(reg.target_id(&"b"), Some(a));
        assert_eq!(reg.targets(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_returns_removed_types() {
        let mut reg = SubscriptionRegistry::new();
        reg.record(&"btn", "click");
        reg.record(&"btn", "keydown");
        reg.mark_all_types(&"btn");

        let cleared = reg.clear(&"btn").unwrap();
        assert_eq!(cleared.target, "btn");
        assert!(cleared.all_types);
        assert_eq!(cleared.types.len(), 2);
        assert!(cleared.types.contains("keydown"));
        assert!(reg.clear(&"btn").is_none());
        assert!(!reg.is_monitored(&"btn", "click"));
    }

    #[test]
    fn test_mark_all_types_needs_recorded_target() {
        let mut reg = SubscriptionRegistry::new();
        reg.mark_all_types(&"btn");
        assert!(!reg.is_all_types(&"btn"));
        assert!(reg.is_empty());
    }
}
