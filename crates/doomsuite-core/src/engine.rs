//! The [`GameEngine`] trait: the external Doom binding as seen by the
//! environment adapter.
//!
//! The engine itself (rendering, physics, level loading) lives outside
//! this workspace. A binding implements this trait once; every
//! scenario and environment in doomsuite drives the engine through it.

use std::path::Path;

use crate::error::EngineError;
use crate::frame::{Frame, ScreenResolution};
use crate::variables::VariableSnapshot;

/// Engine state after a simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Current screen buffer.
    pub frame: Frame,
    /// Game variables in the order the scenario config declares them.
    pub variables: VariableSnapshot,
}

/// Operations the adapter consumes from a Doom engine binding.
///
/// # Contract
///
/// - Setup calls (`load_config`, `set_scenario_path`, `set_window_visible`,
///   `set_screen_resolution`) happen before `init()`.
/// - After `init()` the engine has an episode in progress, so `state()`
///   returns `Some`.
/// - `state()` returns `None` once the episode has ended.
/// - `close()` releases every engine resource. The adapter calls it at
///   most once.
///
/// Every call blocks until the engine has finished the work.
pub trait GameEngine {
    /// Load a scenario configuration (`.cfg`) file.
    fn load_config(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Set the level asset (`.wad`) to play.
    fn set_scenario_path(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Show or hide the game window.
    fn set_window_visible(&mut self, visible: bool);

    /// Set the screen resolution for rendering.
    fn set_screen_resolution(&mut self, resolution: ScreenResolution);

    /// Start the engine with the loaded configuration.
    fn init(&mut self) -> Result<(), EngineError>;

    /// Begin a new episode.
    fn new_episode(&mut self) -> Result<(), EngineError>;

    /// Submit a control vector (one value per button).
    fn set_action(&mut self, action: &[f64]) -> Result<(), EngineError>;

    /// Advance the simulation by `tics` frames using the submitted action.
    fn advance_action(&mut self, tics: u32) -> Result<(), EngineError>;

    /// Current state, or `None` when the engine has no further state.
    fn state(&self) -> Option<GameState>;

    /// Screen height in pixels.
    fn screen_height(&self) -> usize;

    /// Screen width in pixels.
    fn screen_width(&self) -> usize;

    /// Number of buttons a control vector must set.
    fn button_count(&self) -> usize;

    /// Whether the player has died.
    fn is_player_dead(&self) -> bool;

    /// Whether the current episode has concluded.
    fn is_episode_finished(&self) -> bool;

    /// Shut the engine down.
    fn close(&mut self);
}
