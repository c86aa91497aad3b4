//! Deferred activation until a set of resources has finished loading.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Result of a [`ReadinessGate`] state change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GateStatus {
    /// Every resource is complete. Reported once per activation; the gate is now inactive.
    Ready,
    /// Active, with this many resources still incomplete.
    Pending(usize),
    /// Not activated, already reported ready, or deactivated.
    Inactive,
}

/// Tracks a fixed set of resource keys and reports when all of them are complete.
///
/// A resource that fails to load counts as complete, the same as one that loads; the gate only
/// waits, it does not judge. Loading itself is the caller's business.
///
/// # Example
///
/// ```
/// use flipbook_core::readiness::{GateStatus, ReadinessGate};
///
/// let mut gate = ReadinessGate::new(["sky.png", "sea.png", "sun.png"]);
///
/// assert_eq!(gate.activate(|key| *key == "sun.png"), GateStatus::Pending(2));
/// assert_eq!(gate.complete(&"sky.png"), GateStatus::Pending(1));
/// assert_eq!(gate.complete(&"sea.png"), GateStatus::Ready);
/// assert_eq!(gate.complete(&"sea.png"), GateStatus::Inactive);
/// ```
#[derive(Clone, Debug)]
pub struct ReadinessGate<K> {
    keys: Vec<K>,
    incomplete: HashSet<K>,
    active: bool,
}

impl<K: Clone + Debug + Eq + Hash> ReadinessGate<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            incomplete: HashSet::new(),
            active: false,
        }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of resources still awaited; zero while inactive.
    pub fn pending(&self) -> usize {
        self.incomplete.len()
    }

    /// Starts waiting for every key for which `is_ready` returns `false`.
    ///
    /// Returns [`GateStatus::Ready`] straight away if nothing needs to be awaited.
    pub fn activate(&mut self, is_ready: impl Fn(&K) -> bool) -> GateStatus {
        self.active = true;
        self.incomplete = self
            .keys
            .iter()
            .filter(|key| !is_ready(key))
            .cloned()
            .collect();
        self.status()
    }

    /// Marks `key` as complete, whether it loaded or failed.
    pub fn complete(&mut self, key: &K) -> GateStatus {
        if !self.active {
            return GateStatus::Inactive;
        }
        if !self.incomplete.remove(key) {
            tracing::trace!(?key, "completed resource was not awaited");
        }
        self.status()
    }

    /// Stops waiting and forgets any incomplete resources.
    pub fn deactivate(&mut self) {
        self.incomplete.clear();
        self.active = false;
    }

    fn status(&mut self) -> GateStatus {
        if !self.active {
            GateStatus::Inactive
        } else if self.incomplete.is_empty() {
            self.active = false;
            tracing::debug!(count = self.keys.len(), "all resources ready");
            GateStatus::Ready
        } else {
            GateStatus::Pending(self.incomplete.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_everything_is_loaded_then_ready_on_activation() {
        let mut gate = ReadinessGate::new([1, 2, 3]);

        assert_eq!(gate.activate(|_| true), GateStatus::Ready);
        assert!(!gate.is_active());
    }

    #[test]
    fn when_no_resources_then_ready_on_activation() {
        let mut gate = ReadinessGate::<u32>::new([]);

        assert_eq!(gate.activate(|_| false), GateStatus::Ready);
    }

    #[test]
    fn repeated_completion_counts_once() {
        let mut gate = ReadinessGate::new(["a", "b"]);
        gate.activate(|_| false);

        assert_eq!(gate.complete(&"a"), GateStatus::Pending(1));
        assert_eq!(gate.complete(&"a"), GateStatus::Pending(1));
        assert_eq!(gate.complete(&"unknown"), GateStatus::Pending(1));
        assert_eq!(gate.pending(), 1);
    }

    #[test]
    fn when_deactivated_then_completion_is_ignored() {
        let mut gate = ReadinessGate::new(["a"]);
        gate.activate(|_| false);
        gate.deactivate();

        assert_eq!(gate.complete(&"a"), GateStatus::Inactive);
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn can_be_reactivated() {
        let mut gate = ReadinessGate::new(["a", "b"]);
        gate.activate(|_| false);
        gate.complete(&"a");
        gate.complete(&"b");

        assert_eq!(gate.activate(|key| *key == "a"), GateStatus::Pending(1));
        assert_eq!(gate.complete(&"b"), GateStatus::Ready);
    }
}
