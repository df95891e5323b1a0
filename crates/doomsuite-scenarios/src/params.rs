//! Tunable reward constants shared by the scenario family.

use std::error::Error;
use std::fmt;

/// Reward magnitudes used when building a scenario.
///
/// Each scenario reads only the fields it needs; the defaults reproduce
/// the reference reward formulas.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioParams {
    /// Reward for a step with a new kill. Default: 1.0.
    pub kill_reward: f64,
    /// Penalty for a step that lost health. Default: 0.1.
    pub health_loss_penalty: f64,
    /// Penalty for a step that spent ammunition. Default: 0.1.
    pub ammo_used_penalty: f64,
    /// Reward per map unit travelled across the history. Default: 0.001.
    pub traversal_scale: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            kill_reward: 1.0,
            health_loss_penalty: 0.1,
            ammo_used_penalty: 0.1,
            traversal_scale: 0.001,
        }
    }
}

impl ScenarioParams {
    /// Check that every constant is finite.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let fields = [
            ("kill_reward", self.kill_reward),
            ("health_loss_penalty", self.health_loss_penalty),
            ("ammo_used_penalty", self.ammo_used_penalty),
            ("traversal_scale", self.traversal_scale),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ParamsError { field, value });
            }
        }
        Ok(())
    }
}

/// A reward constant that is NaN or infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamsError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Its value.
    pub value: f64,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be finite, got {}", self.field, self.value)
    }
}

impl Error for ParamsError {}
