//! Fixed-capacity rolling history of variable snapshots.
//!
//! [`VariableHistory`] keeps the most recent `capacity` snapshots in
//! arrival order. Pushing into a full history evicts the oldest entry,
//! so the length never exceeds the capacity.

use std::collections::VecDeque;

use crate::variables::VariableSnapshot;

/// Ring buffer of the most recent [`VariableSnapshot`]s.
///
/// Index 0 is the oldest retained snapshot; `len() - 1` is the newest.
#[derive(Clone, Debug)]
pub struct VariableHistory {
    slots: VecDeque<VariableSnapshot>,
    capacity: usize,
}

impl VariableHistory {
    /// Default capacity used by every scenario.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Create an empty history holding at most `capacity` snapshots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`. Reward terms compare the two newest
    /// snapshots, so a shorter history could never produce a reward.
    /// Environment configs reject such values before reaching here.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity >= 2,
            "VariableHistory capacity must be >= 2, got {capacity}"
        );
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, returning the evicted oldest one when full.
    pub fn push(&mut self, snapshot: VariableSnapshot) -> Option<VariableSnapshot> {
        let evicted = if self.slots.len() == self.capacity {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(snapshot);
        evicted
    }

    /// Fill the history with `capacity` copies of `snapshot`.
    ///
    /// Used at episode start so that reward computation never starts on
    /// an under-filled or stale history.
    pub fn fill(&mut self, snapshot: &VariableSnapshot) {
        for _ in 0..self.capacity {
            self.push(snapshot.clone());
        }
    }

    /// The most recently pushed snapshot.
    pub fn latest(&self) -> Option<&VariableSnapshot> {
        self.slots.back()
    }

    /// The oldest retained snapshot.
    pub fn oldest(&self) -> Option<&VariableSnapshot> {
        self.slots.front()
    }

    /// The two newest snapshots as `(previous, current)`.
    ///
    /// Returns `None` while fewer than two snapshots are held.
    pub fn last_two(&self) -> Option<(&VariableSnapshot, &VariableSnapshot)> {
        let n = self.slots.len();
        if n < 2 {
            return None;
        }
        Some((&self.slots[n - 2], &self.slots[n - 1]))
    }

    /// Snapshot at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&VariableSnapshot> {
        self.slots.get(index)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &VariableSnapshot> {
        self.slots.iter()
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no snapshots are held.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of snapshots retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the next push will evict.
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Drop every snapshot, keeping the capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
