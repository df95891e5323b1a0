//! Reinforcement-learning environments over a Doom engine.
//!
//! [`DoomEnv`] is the adapter: built from a [`GameEngine`] binding and an
//! [`EnvConfig`], it exposes `reset`/`step`/`close` together with an
//! observation and action space. Scenario semantics come from
//! [`doomsuite_scenarios`].
//!
//! [`TaskCatalog`] is a separate, explicitly loaded lookup of task lists
//! used by training drivers to decide which environments to build.
//!
//! [`GameEngine`]: doomsuite_core::GameEngine

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;

pub use assets::{AssetPaths, AssetSource, DEFAULT_MAPS_ROOT, DEFAULT_TASK};
pub use catalog::{CatalogError, ScenarioTasks, TaskCatalog};
pub use config::{ConfigError, EnvConfig};
pub use env::{DoomEnv, Lifecycle, StepResult};
pub use error::EnvError;
