//! Doomsuite: Doom scenarios as reinforcement-learning environments.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all doomsuite sub-crates. For most users, adding `doomsuite` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::path::Path;
//!
//! use doomsuite::prelude::*;
//!
//! // An engine stand-in that never changes: one frame, fixed variables.
//! struct StillEngine {
//!     steps: u32,
//! }
//!
//! impl GameEngine for StillEngine {
//!     fn load_config(&mut self, _: &Path) -> Result<(), EngineError> { Ok(()) }
//!     fn set_scenario_path(&mut self, _: &Path) -> Result<(), EngineError> { Ok(()) }
//!     fn set_window_visible(&mut self, _: bool) {}
//!     fn set_screen_resolution(&mut self, _: ScreenResolution) {}
//!     fn init(&mut self) -> Result<(), EngineError> { Ok(()) }
//!     fn new_episode(&mut self) -> Result<(), EngineError> {
//!         self.steps = 0;
//!         Ok(())
//!     }
//!     fn set_action(&mut self, _: &[f64]) -> Result<(), EngineError> { Ok(()) }
//!     fn advance_action(&mut self, _: u32) -> Result<(), EngineError> {
//!         self.steps += 1;
//!         Ok(())
//!     }
//!     fn state(&self) -> Option<GameState> {
//!         (self.steps < 3).then(|| GameState {
//!             frame: Frame::zeros(120, 160),
//!             variables: VariableSnapshot::from([0.0, 100.0, 26.0]),
//!         })
//!     }
//!     fn screen_height(&self) -> usize { 120 }
//!     fn screen_width(&self) -> usize { 160 }
//!     fn button_count(&self) -> usize { 3 }
//!     fn is_player_dead(&self) -> bool { false }
//!     fn is_episode_finished(&self) -> bool { self.steps >= 3 }
//!     fn close(&mut self) {}
//! }
//!
//! let config = EnvConfig::new(ScenarioKind::DefendTheCenter);
//! let mut env = DoomEnv::new(StillEngine { steps: 0 }, config).unwrap();
//! assert_eq!(env.action_space().n, 6);
//!
//! env.reset().unwrap();
//! let mut steps = 0;
//! loop {
//!     let result = env.step(1).unwrap();
//!     steps += 1;
//!     if result.done {
//!         break;
//!     }
//!     assert_eq!(result.reward, 0.0);
//! }
//! assert_eq!(steps, 3);
//! env.close().unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `doomsuite-core` | Engine trait, snapshots, history, spaces |
//! | [`scenarios`] | `doomsuite-scenarios` | Scenario policies and reward pipelines |
//! | [`env`] | `doomsuite-env` | Environment adapter, config, task catalog |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the engine trait (`doomsuite-core`).
///
/// Contains [`types::GameEngine`], [`types::VariableHistory`], the
/// observation and action spaces, and [`types::EngineError`].
pub use doomsuite_core as types;

/// Scenario policies (`doomsuite-scenarios`).
///
/// The [`scenarios::ScenarioPolicy`] trait, the four scenario variants,
/// and the [`scenarios::RewardTerm`] building blocks.
pub use doomsuite_scenarios as scenarios;

/// Environment adapter and task catalog (`doomsuite-env`).
pub use doomsuite_env as env;

/// Common imports for typical doomsuite usage.
///
/// ```rust
/// use doomsuite::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use doomsuite_core::{
        ActionTable, Discrete, Frame, FrameSpace, GameEngine, GameState, ScreenResolution,
        Statistics, VariableHistory, VariableLayout, VariableSnapshot,
    };

    // Errors
    pub use doomsuite_core::EngineError;
    pub use doomsuite_env::{CatalogError, ConfigError, EnvError};
    pub use doomsuite_scenarios::ParamsError;

    // Scenarios
    pub use doomsuite_scenarios::{
        RewardPipeline, RewardTerm, RewardWindow, ScenarioKind, ScenarioParams, ScenarioPolicy,
    };

    // Environment
    pub use doomsuite_env::{
        AssetPaths, AssetSource, DoomEnv, EnvConfig, Lifecycle, StepResult, TaskCatalog,
    };
}
