//! Game-variable snapshots and per-scenario index layouts.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::ops::Index;

/// Named per-episode statistics reported in a step's `info` map.
///
/// Insertion order is preserved so that logs list keys the way the
/// scenario declared them.
pub type Statistics = IndexMap<&'static str, f64>;

/// An ordered tuple of game variables read from the engine after one step.
///
/// What each index means is decided by the scenario's configuration file;
/// see [`VariableLayout`]. Snapshots are never mutated once captured.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSnapshot(SmallVec<[f64; 8]>);

impl VariableSnapshot {
    /// Build a snapshot from engine-provided values.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().collect())
    }

    /// Value at `index`, or `None` if the engine exposed fewer variables.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the engine exposed no variables at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All values in engine order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for VariableSnapshot {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<Vec<f64>> for VariableSnapshot {
    fn from(values: Vec<f64>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl<const N: usize> From<[f64; N]> for VariableSnapshot {
    fn from(values: [f64; N]) -> Self {
        Self::new(values)
    }
}

/// Where a scenario's configuration places each game variable.
///
/// Scenarios disagree on ordering (DefendTheCenter lists the kill count
/// first, RunAndGun lists health first), so reward terms always read
/// through a layout rather than hard-coded indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableLayout {
    /// Index of the kill counter.
    pub kills: usize,
    /// Index of the player's health.
    pub health: usize,
    /// Index of the selected weapon's ammunition.
    pub ammo: usize,
    /// Indices of the `(x, y)` position, when the scenario exposes it.
    pub position: Option<(usize, usize)>,
}

impl VariableLayout {
    /// Smallest snapshot length that covers every index in the layout.
    pub fn required_len(&self) -> usize {
        let mut max = self.kills.max(self.health).max(self.ammo);
        if let Some((x, y)) = self.position {
            max = max.max(x).max(y);
        }
        max + 1
    }

    /// Reads a variable through this layout, treating a missing index as 0.
    pub fn read(snapshot: &VariableSnapshot, index: usize) -> f64 {
        snapshot.get(index).unwrap_or(0.0)
    }

    /// Current kill count in `snapshot`.
    pub fn kills(&self, snapshot: &VariableSnapshot) -> f64 {
        Self::read(snapshot, self.kills)
    }

    /// Current health in `snapshot`.
    pub fn health(&self, snapshot: &VariableSnapshot) -> f64 {
        Self::read(snapshot, self.health)
    }

    /// Current ammunition in `snapshot`.
    pub fn ammo(&self, snapshot: &VariableSnapshot) -> f64 {
        Self::read(snapshot, self.ammo)
    }

    /// `(x, y)` position in `snapshot`, if the layout has one.
    pub fn position(&self, snapshot: &VariableSnapshot) -> Option<(f64, f64)> {
        self.position
            .map(|(x, y)| (Self::read(snapshot, x), Self::read(snapshot, y)))
    }
}
