//! Reward terms shared by the scenario family.
//!
//! Sparse terms fire on a change between the two newest snapshots;
//! [`TraversalBonus`] is dense and looks across the whole history.

use crate::reward::{RewardTerm, RewardWindow};

/// `+amount` when the kill counter increased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KillBonus {
    /// Reward per step with at least one new kill.
    pub amount: f64,
}

impl RewardTerm for KillBonus {
    fn name(&self) -> &str {
        "kill_bonus"
    }

    fn evaluate(&self, window: &RewardWindow<'_>) -> f64 {
        if window.kills_delta() > 0.0 {
            self.amount
        } else {
            0.0
        }
    }
}

/// `-amount` when health decreased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthLossPenalty {
    /// Penalty magnitude (positive).
    pub amount: f64,
}

impl RewardTerm for HealthLossPenalty {
    fn name(&self) -> &str {
        "health_loss_penalty"
    }

    fn evaluate(&self, window: &RewardWindow<'_>) -> f64 {
        if window.health_delta() < 0.0 {
            -self.amount
        } else {
            0.0
        }
    }
}

/// `-amount` when ammunition decreased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmmoUsedPenalty {
    /// Penalty magnitude (positive).
    pub amount: f64,
}

impl RewardTerm for AmmoUsedPenalty {
    fn name(&self) -> &str {
        "ammo_used_penalty"
    }

    fn evaluate(&self, window: &RewardWindow<'_>) -> f64 {
        if window.ammo_delta() < 0.0 {
            -self.amount
        } else {
            0.0
        }
    }
}

/// `scale * distance` between the oldest and newest positions in history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalBonus {
    /// Reward per map unit travelled.
    pub scale: f64,
}

impl RewardTerm for TraversalBonus {
    fn name(&self) -> &str {
        "traversal_bonus"
    }

    fn evaluate(&self, window: &RewardWindow<'_>) -> f64 {
        window.distance_traversed() * self.scale
    }
}
