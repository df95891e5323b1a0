//! DefendTheCenter: a stationary agent in a circular arena.
//!
//! The agent spawns in the middle of a round room and cannot move. Melee
//! enemies spawn along the wall, walk towards it, and respawn after a
//! delay once killed. The agent can only turn and shoot with limited
//! ammunition; it is rewarded for each kill.
//!
//! Game variables: `0 = KILLCOUNT`, `1 = HEALTH`, `2 = AMMO2`.
//! Buttons: `TURN_LEFT, TURN_RIGHT, ATTACK`.

use doomsuite_core::{ActionTable, Statistics, VariableHistory, VariableLayout};

use crate::params::ScenarioParams;
use crate::policy::ScenarioPolicy;
use crate::reward::RewardPipeline;
use crate::terms::{AmmoUsedPenalty, HealthLossPenalty, KillBonus};

/// Variable layout of the DefendTheCenter config.
pub const LAYOUT: VariableLayout = VariableLayout {
    kills: 0,
    health: 1,
    ammo: 2,
    position: None,
};

/// {no turn, turn right, turn left} × {hold fire, attack}.
fn action_table() -> ActionTable {
    let turn: &[&[f64]] = &[&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]];
    let attack: &[&[f64]] = &[&[0.0], &[1.0]];
    ActionTable::product(&[turn, attack])
}

/// Sparse kill reward only.
pub struct DefendTheCenter {
    actions: ActionTable,
    reward: RewardPipeline,
}

impl DefendTheCenter {
    /// Scenario name.
    pub const NAME: &'static str = "DefendTheCenter";

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

impl ScenarioPolicy for DefendTheCenter {
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

/// Kill reward with health-loss and ammo-use penalties.
///
/// Pipeline: [`KillBonus`] → [`HealthLossPenalty`] → [`AmmoUsedPenalty`].
pub struct DefendTheCenterV1 {
    actions: ActionTable,
    reward: RewardPipeline,
}

impl DefendTheCenterV1 {
    /// Scenario name.
    pub const NAME: &'static str = "DefendTheCenterV1";

    /// Build the scenario.
    pub fn new(params: &ScenarioParams) -> Self {
        Self {
            actions: action_table(),
            reward: Self::reward_pipeline(params),
        }
    }

    /// DefendTheCenter's pipeline followed by the two penalties.
    pub fn reward_pipeline(params: &ScenarioParams) -> RewardPipeline {
        DefendTheCenter::reward_pipeline(params)
            .then(HealthLossPenalty {
                amount: params.health_loss_penalty,
            })
            .then(AmmoUsedPenalty {
                amount: params.ammo_used_penalty,
            })
    }

    /// The reward pipeline in evaluation order.
    pub fn reward(&self) -> &RewardPipeline {
        &self.reward
    }
}

impl ScenarioPolicy for DefendTheCenterV1 {
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

    fn statistics(&self, history: &VariableHistory) -> Statistics {
        let Some(latest) = history.latest() else {
            return Statistics::new();
        };
        Statistics::from([("kills", LAYOUT.kills(latest)), ("ammo", LAYOUT.ammo(latest))])
    }
}
