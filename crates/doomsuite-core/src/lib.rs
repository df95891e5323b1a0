//! Core types and traits for doomsuite environments.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by the scenario policies and the environment adapter:
//! variable snapshots and their rolling history, control vectors, screen
//! frames, observation/action spaces, engine errors, and the
//! [`GameEngine`] trait through which an external Doom binding is driven.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod engine;
pub mod error;
pub mod frame;
pub mod history;
pub mod space;
pub mod variables;

pub use action::{ActionTable, ControlVector};
pub use engine::{GameEngine, GameState};
pub use error::EngineError;
pub use frame::{Frame, ScreenResolution};
pub use history::VariableHistory;
pub use space::{Discrete, FrameSpace};
pub use variables::{Statistics, VariableLayout, VariableSnapshot};
