//! Errors returned by [`DoomEnv`](crate::DoomEnv).

use std::error::Error;
use std::fmt;

use doomsuite_core::EngineError;

use crate::config::ConfigError;

/// Failures surfaced by environment construction and the RL interface.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvError {
    /// The config failed validation or does not fit the engine.
    Config(ConfigError),
    /// The engine could not load its assets or initialise.
    EngineInit(EngineError),
    /// The engine failed while running an episode.
    Engine(EngineError),
    /// The action index is outside the action space.
    InvalidAction {
        /// The rejected index.
        index: usize,
        /// Number of valid actions.
        action_count: usize,
    },
    /// The engine returned a frame whose shape differs from the
    /// observation space.
    FrameShape {
        /// Observation space shape, `(height, width)`.
        expected: (usize, usize),
        /// Shape of the returned frame.
        actual: (usize, usize),
    },
    /// The engine reported no state right after starting an episode.
    NoInitialState,
    /// `step` was called before the first `reset`.
    EpisodeNotStarted,
    /// The environment has been closed.
    Closed,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::EngineInit(e) => write!(f, "engine setup: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
            Self::InvalidAction {
                index,
                action_count,
            } => write!(
                f,
                "action {index} out of range, action space has {action_count} actions"
            ),
            Self::FrameShape { expected, actual } => write!(
                f,
                "engine frame is {}x{}, observation space is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::NoInitialState => write!(f, "engine has no state at episode start"),
            Self::EpisodeNotStarted => write!(f, "step called before reset"),
            Self::Closed => write!(f, "environment is closed"),
        }
    }
}

impl Error for EnvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::EngineInit(e) | Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EnvError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
