//! The [`ScenarioPolicy`] capability contract.

use doomsuite_core::{ActionTable, Statistics, VariableHistory, VariableLayout};

/// Everything the environment adapter needs from a scenario.
///
/// `available_actions` and `calc_reward` are required, so a scenario
/// cannot be handed to the adapter without them. Statistics are
/// optional and default to an empty map.
///
/// # Object safety
///
/// This trait is object-safe; the adapter stores the active scenario as
/// `Box<dyn ScenarioPolicy>`.
pub trait ScenarioPolicy: Send + 'static {
    /// Variant name, e.g. `"RunAndGunV1"`.
    fn name(&self) -> &'static str;

    /// Where this scenario's config places each game variable.
    fn variable_layout(&self) -> VariableLayout;

    /// The discrete actions exposed to the agent.
    fn available_actions(&self) -> &ActionTable;

    /// Reward for the latest step.
    ///
    /// Must return `0.0` when `history` holds fewer than two snapshots.
    /// Takes `&mut self` so that scenarios can update per-episode tallies
    /// from the same comparison.
    fn calc_reward(&mut self, history: &VariableHistory) -> f64;

    /// Statistics for the step's `info` map.
    fn statistics(&self, _history: &VariableHistory) -> Statistics {
        Statistics::new()
    }

    /// Reset per-episode tallies. Called at the start of every episode.
    fn clear_episode_statistics(&mut self) {}
}
