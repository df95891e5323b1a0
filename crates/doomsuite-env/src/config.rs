//! Environment configuration, validation, and error types.
//!
//! [`EnvConfig`] is the input to [`DoomEnv::new`](crate::DoomEnv::new).
//! [`validate()`](EnvConfig::validate) checks everything that can be
//! checked without an engine; the constructor adds the checks that need
//! one (action arity, screen size, variable count).

use std::error::Error;
use std::fmt;

use doomsuite_core::{ScreenResolution, VariableHistory};
use doomsuite_scenarios::{ParamsError, ScenarioKind, ScenarioParams};

use crate::assets::{AssetPaths, AssetSource, DEFAULT_TASK};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EnvConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `frame_skip` is zero.
    ZeroFrameSkip,
    /// `history_len` is below the minimum of 2.
    HistoryTooShort {
        /// The configured length that was too short.
        configured: usize,
    },
    /// A reward constant is NaN or infinite.
    InvalidParams(ParamsError),
    /// The task name cannot be turned into an asset file name.
    InvalidTask {
        /// The rejected name.
        name: String,
    },
    /// The scenario's control vectors do not match the engine's buttons.
    ActionArityMismatch {
        /// Scenario whose table was checked.
        scenario: &'static str,
        /// Buttons per control vector, `None` if the table is ragged.
        arity: Option<usize>,
        /// Buttons the engine exposes.
        buttons: usize,
    },
    /// The engine exposes fewer game variables than the scenario reads.
    VariableCountMismatch {
        /// Scenario whose layout was checked.
        scenario: &'static str,
        /// Variables the scenario's layout needs.
        required: usize,
        /// Variables in the engine's initial state.
        exposed: usize,
    },
    /// The engine reports a zero-sized screen.
    EmptyScreen {
        /// Reported height.
        height: usize,
        /// Reported width.
        width: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrameSkip => write!(f, "frame_skip must be at least 1"),
            Self::HistoryTooShort { configured } => {
                write!(f, "history_len {configured} is below minimum of 2")
            }
            Self::InvalidParams(e) => write!(f, "invalid scenario params: {e}"),
            Self::InvalidTask { name } => {
                write!(f, "task name '{name}' must be non-empty without path separators")
            }
            Self::ActionArityMismatch {
                scenario,
                arity: Some(arity),
                buttons,
            } => write!(
                f,
                "{scenario} actions press {arity} buttons, engine exposes {buttons}"
            ),
            Self::ActionArityMismatch {
                scenario,
                arity: None,
                ..
            } => write!(f, "{scenario} action table has mixed lengths"),
            Self::VariableCountMismatch {
                scenario,
                required,
                exposed,
            } => write!(
                f,
                "{scenario} reads {required} game variables, engine exposes {exposed}"
            ),
            Self::EmptyScreen { height, width } => {
                write!(f, "engine screen {height}x{width} has no pixels")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Everything needed to build a [`DoomEnv`](crate::DoomEnv).
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Scenario variant to play.
    pub scenario: ScenarioKind,
    /// Level within the scenario. `None` plays `"default"`.
    pub task: Option<String>,
    /// Where the scenario's cfg and wad come from.
    pub assets: AssetSource,
    /// Engine frames advanced per step. Default: 4.
    pub frame_skip: u32,
    /// Show the engine window. Default: false.
    pub visible: bool,
    /// Screen resolution, applied only when `visible`. Default: 800x600.
    pub screen_resolution: ScreenResolution,
    /// Variable history capacity. Default: 5.
    pub history_len: usize,
    /// Reward constants.
    pub params: ScenarioParams,
}

impl EnvConfig {
    /// Default config for `scenario`.
    pub fn new(scenario: ScenarioKind) -> Self {
        Self {
            scenario,
            task: None,
            assets: AssetSource::default(),
            frame_skip: 4,
            visible: false,
            screen_resolution: ScreenResolution::default(),
            history_len: VariableHistory::DEFAULT_CAPACITY,
            params: ScenarioParams::default(),
        }
    }

    /// Set the task.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Set the asset source.
    pub fn with_assets(mut self, assets: AssetSource) -> Self {
        self.assets = assets;
        self
    }

    /// Task name, falling back to `"default"`.
    pub fn task_name(&self) -> &str {
        self.task.as_deref().unwrap_or(DEFAULT_TASK)
    }

    /// Resolved asset paths.
    pub fn asset_paths(&self) -> AssetPaths {
        self.assets.paths(self.scenario.name(), self.task_name())
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_skip == 0 {
            return Err(ConfigError::ZeroFrameSkip);
        }
        if self.history_len < 2 {
            return Err(ConfigError::HistoryTooShort {
                configured: self.history_len,
            });
        }
        self.params.validate().map_err(ConfigError::InvalidParams)?;
        let task = self.task_name();
        if task.is_empty() || task == ".." || task.contains(['/', '\\']) {
            return Err(ConfigError::InvalidTask {
                name: task.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        for kind in ScenarioKind::ALL {
            assert!(EnvConfig::new(kind).validate().is_ok());
        }
    }

    #[test]
    fn default_task_and_paths() {
        let cfg = EnvConfig::new(ScenarioKind::RunAndGunV1);
        assert_eq!(cfg.task_name(), "default");
        let paths = cfg.asset_paths();
        assert_eq!(paths.cfg, PathBuf::from("maps/RunAndGunV1/RunAndGunV1.cfg"));
        assert_eq!(paths.wad, PathBuf::from("maps/RunAndGunV1/default.wad"));
    }

    #[test]
    fn every_variant_resolves_its_own_directory() {
        for kind in ScenarioKind::ALL {
            let paths = EnvConfig::new(kind).with_task("obstacles").asset_paths();
            let dir = PathBuf::from("maps").join(kind.name());
            assert_eq!(paths.cfg, dir.join(format!("{kind}.cfg")));
            assert_eq!(paths.wad, dir.join("obstacles.wad"));
        }
    }

    #[test]
    fn zero_frame_skip_rejected() {
        let mut cfg = EnvConfig::new(ScenarioKind::DefendTheCenter);
        cfg.frame_skip = 0;
        match cfg.validate() {
            Err(ConfigError::ZeroFrameSkip) => {}
            other => panic!("expected ZeroFrameSkip, got {other:?}"),
        }
    }

    #[test]
    fn short_history_rejected() {
        let mut cfg = EnvConfig::new(ScenarioKind::DefendTheCenter);
        cfg.history_len = 1;
        match cfg.validate() {
            Err(ConfigError::HistoryTooShort { configured: 1 }) => {}
            other => panic!("expected HistoryTooShort, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_params_rejected() {
        let mut cfg = EnvConfig::new(ScenarioKind::DefendTheCenterV1);
        cfg.params.health_loss_penalty = f64::INFINITY;
        match cfg.validate() {
            Err(ConfigError::InvalidParams(ParamsError {
                field: "health_loss_penalty",
                ..
            })) => {}
            other => panic!("expected InvalidParams, got {other:?}"),
        }
    }

    #[test]
    fn task_with_separator_rejected() {
        for bad in ["", "..", "a/b", "a\\b"] {
            let cfg = EnvConfig::new(ScenarioKind::RunAndGun).with_task(bad);
            match cfg.validate() {
                Err(ConfigError::InvalidTask { name }) => assert_eq!(name, bad),
                other => panic!("expected InvalidTask for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn arity_mismatch_display() {
        let err = ConfigError::ActionArityMismatch {
            scenario: "RunAndGun",
            arity: Some(4),
            buttons: 3,
        };
        assert_eq!(
            err.to_string(),
            "RunAndGun actions press 4 buttons, engine exposes 3"
        );
    }

    #[test]
    fn invalid_params_chain_source() {
        let err = ConfigError::InvalidParams(ParamsError {
            field: "kill_reward",
            value: f64::NAN,
        });
        assert!(err.to_string().contains("kill_reward must be finite"));
        assert!(err.source().is_some());
    }
}
