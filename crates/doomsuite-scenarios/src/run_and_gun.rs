//! RunAndGun: a mobile agent hunting stationary enemies in a maze.
//!
//! The agent spawns at one of twenty locations with a weapon and
//! unlimited ammunition. Enemies are placed at random and cannot move;
//! more are added over time. The agent can turn, move forward and shoot,
//! and is rewarded for each kill.
//!
//! Game variables: `0 = HEALTH`, `1 = KILLCOUNT`, `2 = SELECTED_WEAPON_AMMO`,
//! `3 = POSITION_X`, `4 = POSITION_Y`.
//! Buttons: `TURN_LEFT, TURN_RIGHT, MOVE_FORWARD, ATTACK`.

use doomsuite_core::{ActionTable, Statistics, VariableHistory, VariableLayout};
use tracing::trace;

use crate::params::ScenarioParams;
use crate::policy::ScenarioPolicy;
use crate::reward::{RewardPipeline, RewardWindow};
use crate::terms::{KillBonus, TraversalBonus};

/// Variable layout of the RunAndGun config.
pub const LAYOUT: VariableLayout = VariableLayout {
    kills: 1,
    health: 0,
    ammo: 2,
    position: Some((3, 4)),
};

/// {no turn, turn right, turn left} × {stay, forward} × {hold fire, shoot}.
fn action_table() -> ActionTable {
    let turn: &[&[f64]] = &[&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]];
    let forward: &[&[f64]] = &[&[0.0], &[1.0]];
    let shoot: &[&[f64]] = &[&[0.0], &[1.0]];
    ActionTable::product(&[turn, forward, shoot])
}

/// Sparse kill reward only.
pub struct RunAndGun {
    actions: ActionTable,
    reward: RewardPipeline,
}

impl RunAndGun {
    /// Scenario name.
    pub const NAME: &'static str = "RunAndGun";

    /// Build the scenario.
    pub fn new(params: &ScenarioParams) -> Self {
        Self {
            actions: action_table(),
            reward: Self::reward_pipeline(params),
        }
    }

    /// The base pipeline: [`KillBonus`].
    pub fn reward_pipeline(params: &ScenarioParams) -> RewardPipeline {
        RewardPipeline::new(KillBonus {
            amount: params.kill_reward,
        })
    }

    /// The reward pipeline in evaluation order.
    pub fn reward(&self) -> &RewardPipeline {
        &self.reward
    }
}

impl ScenarioPolicy for RunAndGun {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn variable_layout(&self) -> VariableLayout {
        LAYOUT
    }

    fn available_actions(&self) -> &ActionTable {
        &self.actions
    }

    fn calc_reward(&mut self, history: &VariableHistory) -> f64 {
        self.reward.evaluate(history, LAYOUT)
    }
}

/// Running per-episode counters for [`RunAndGunV1`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeTally {
    /// Steps on which health decreased.
    pub hits_taken: u32,
    /// Steps on which ammunition decreased.
    pub ammo_used: u32,
    /// Distance traversed across the history, one entry per step.
    pub distances: Vec<f64>,
}

impl EpisodeTally {
    /// Fold one reward window into the counters.
    pub fn record(&mut self, window: &RewardWindow<'_>) {
        self.distances.push(window.distance_traversed());
        if window.health_delta() < 0.0 {
            self.hits_taken += 1;
        }
        if window.ammo_delta() < 0.0 {
            self.ammo_used += 1;
        }
    }

    /// Mean of the recorded distances, rounded to three decimals.
    ///
    /// `0.0` before any step has been recorded.
    pub fn mean_movement(&self) -> f64 {
        if self.distances.is_empty() {
            return 0.0;
        }
        let mean = self.distances.iter().sum::<f64>() / self.distances.len() as f64;
        (mean * 1000.0).round() / 1000.0
    }

    /// Back to the start-of-episode state.
    pub fn clear(&mut self) {
        self.hits_taken = 0;
        self.ammo_used = 0;
        self.distances.clear();
    }
}

/// Kill reward plus dense movement shaping, with per-episode tallies.
///
/// Pipeline: [`KillBonus`] → [`TraversalBonus`].
pub struct RunAndGunV1 {
    actions: ActionTable,
    reward: RewardPipeline,
    tally: EpisodeTally,
}

impl RunAndGunV1 {
    /// Scenario name.
    pub const NAME: &'static str = "RunAndGunV1";

    /// Build the scenario.
    pub fn new(params: &ScenarioParams) -> Self {
        Self {
            actions: action_table(),
            reward: Self::reward_pipeline(params),
            tally: EpisodeTally::default(),
        }
    }

    /// RunAndGun's pipeline followed by the traversal bonus.
    pub fn reward_pipeline(params: &ScenarioParams) -> RewardPipeline {
        RunAndGun::reward_pipeline(params).then(TraversalBonus {
            scale: params.traversal_scale,
        })
    }

    /// The reward pipeline in evaluation order.
    pub fn reward(&self) -> &RewardPipeline {
        &self.reward
    }

    /// Counters accumulated since the last episode start.
    pub fn tally(&self) -> &EpisodeTally {
        &self.tally
    }
}

impl ScenarioPolicy for RunAndGunV1 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn variable_layout(&self) -> VariableLayout {
        LAYOUT
    }

    fn available_actions(&self) -> &ActionTable {
        &self.actions
    }

    fn calc_reward(&mut self, history: &VariableHistory) -> f64 {
        let Some(window) = RewardWindow::new(history, LAYOUT) else {
            return 0.0;
        };
        let reward = self.reward.evaluate_window(&window);
        self.tally.record(&window);
        trace!(
            reward,
            hits_taken = self.tally.hits_taken,
            ammo_used = self.tally.ammo_used,
            "RunAndGunV1 reward"
        );
        reward
    }

    fn statistics(&self, history: &VariableHistory) -> Statistics {
        let Some(latest) = history.latest() else {
            return Statistics::new();
        };
        Statistics::from([
            ("health", LAYOUT.health(latest)),
            ("kills", LAYOUT.kills(latest)),
            ("ammo", f64::from(self.tally.ammo_used)),
            ("movement", self.tally.mean_movement()),
            ("hits_taken", f64::from(self.tally.hits_taken)),
        ])
    }

    fn clear_episode_statistics(&mut self) {
        self.tally.clear();
    }
}
