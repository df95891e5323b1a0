//! Errors surfaced by a [`GameEngine`](crate::GameEngine) implementation.
//!
//! The adapter never retries: every variant here is propagated to the
//! caller, wrapped by the environment layer according to when it occurred.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures reported by the external game engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The scenario configuration file could not be loaded.
    ConfigLoad {
        /// Path that was passed to the engine.
        path: PathBuf,
        /// Engine-provided description.
        reason: String,
    },
    /// The level asset (wad) could not be used.
    ScenarioAsset {
        /// Path that was passed to the engine.
        path: PathBuf,
        /// Engine-provided description.
        reason: String,
    },
    /// `init()` failed.
    InitFailed {
        /// Engine-provided description.
        reason: String,
    },
    /// An operation was attempted before `init()` or after `close()`.
    NotRunning,
    /// The engine rejected a control vector.
    InvalidControl {
        /// Length of the rejected vector.
        len: usize,
        /// Number of buttons the engine expects.
        expected: usize,
    },
    /// Any other fault raised while the engine was running.
    Fault {
        /// Engine-provided description.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigLoad { path, reason } => {
                write!(f, "failed to load config '{}': {reason}", path.display())
            }
            Self::ScenarioAsset { path, reason } => {
                write!(f, "failed to use scenario '{}': {reason}", path.display())
            }
            Self::InitFailed { reason } => write!(f, "engine init failed: {reason}"),
            Self::NotRunning => write!(f, "engine is not running"),
            Self::InvalidControl { len, expected } => {
                write!(f, "control vector has {len} buttons, engine expects {expected}")
            }
            Self::Fault { reason } => write!(f, "engine fault: {reason}"),
        }
    }
}

impl Error for EngineError {}
