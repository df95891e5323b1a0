//! The RL environment adapter.
//!
//! [`DoomEnv`] drives a [`GameEngine`] through the standard
//! `reset`/`step`/`close` interface. It owns the engine, the active
//! [`ScenarioPolicy`], and the rolling [`VariableHistory`] that rewards
//! are computed from.
//!
//! # Lifecycle
//!
//! ```text
//! Ready ──reset──▶ Running ──step (done)──▶ EpisodeEnded
//!                    ▲  │                        │
//!                    └──┘ step                   │
//!                    ▲                           │
//!                    └──────────reset────────────┘
//! ```
//!
//! `close()` moves any state to `Closed`, which is terminal.
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`. `DoomEnv<E>` is [`Send`]
//! whenever `E` is. Dropping an environment that was never closed
//! closes its engine.

use doomsuite_core::{
    Discrete, Frame, FrameSpace, GameEngine, GameState, Statistics, VariableHistory,
};
use doomsuite_scenarios::ScenarioPolicy;
use tracing::{debug, info, trace, warn};

use crate::assets::AssetPaths;
use crate::config::{ConfigError, EnvConfig};
use crate::error::EnvError;

// ── Lifecycle ───────────────────────────────────────────────────

/// Where an environment is in its episode lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; `reset` has not been called.
    Ready,
    /// An episode is in progress.
    Running,
    /// The last step ended the episode.
    EpisodeEnded,
    /// The engine has been released.
    Closed,
}

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`DoomEnv::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Screen after the step, or a zero frame if the engine has no state.
    pub observation: Frame,
    /// Scenario reward for the step.
    pub reward: f64,
    /// The episode has ended.
    pub done: bool,
    /// Scenario statistics.
    pub info: Statistics,
}

// ── DoomEnv ─────────────────────────────────────────────────────

/// A Doom scenario exposed as a reinforcement-learning environment.
///
/// # Example
///
/// ```ignore
/// let mut env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::RunAndGunV1))?;
/// let mut obs = env.reset()?;
/// loop {
///     let result = env.step(policy(&obs))?;
///     if result.done {
///         break;
///     }
///     obs = result.observation;
/// }
/// env.close()?;
/// ```
pub struct DoomEnv<E: GameEngine> {
    engine: E,
    config: EnvConfig,
    paths: AssetPaths,
    scenario: Box<dyn ScenarioPolicy>,
    history: VariableHistory,
    observation_space: FrameSpace,
    action_space: Discrete,
    lifecycle: Lifecycle,
    episode_count: u64,
}

impl<E: GameEngine> DoomEnv<E> {
    /// Configure and initialise `engine` for `config`.
    ///
    /// Loads the scenario cfg, points the engine at the task's wad,
    /// applies window settings, initialises the engine, and pre-fills
    /// the variable history from the engine's initial state.
    ///
    /// # Errors
    ///
    /// [`EnvError::Config`] if the config is invalid, the scenario's
    /// actions do not match the engine's buttons, or the engine exposes
    /// fewer game variables than the scenario reads. [`EnvError::EngineInit`]
    /// if the engine cannot load its assets or start. If the failure
    /// happens after the engine started, the engine is closed first.
    pub fn new(mut engine: E, config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let paths = config.asset_paths();

        engine
            .load_config(&paths.cfg)
            .map_err(EnvError::EngineInit)?;
        engine
            .set_scenario_path(&paths.wad)
            .map_err(EnvError::EngineInit)?;
        engine.set_window_visible(config.visible);
        if config.visible {
            engine.set_screen_resolution(config.screen_resolution);
        }
        engine.init().map_err(EnvError::EngineInit)?;

        match Self::prepare(&engine, &config) {
            Ok((scenario, history, observation_space)) => {
                let action_space = Discrete {
                    n: scenario.available_actions().len(),
                };
                info!(
                    scenario = scenario.name(),
                    task = config.task_name(),
                    actions = action_space.n,
                    height = observation_space.height,
                    width = observation_space.width,
                    "environment ready"
                );
                Ok(Self {
                    engine,
                    config,
                    paths,
                    scenario,
                    history,
                    observation_space,
                    action_space,
                    lifecycle: Lifecycle::Ready,
                    episode_count: 0,
                })
            }
            Err(e) => {
                engine.close();
                Err(e)
            }
        }
    }

    /// Post-init checks and setup that need a running engine.
    fn prepare(
        engine: &E,
        config: &EnvConfig,
    ) -> Result<(Box<dyn ScenarioPolicy>, VariableHistory, FrameSpace), EnvError> {
        let scenario = config.scenario.build(&config.params);

        let arity = scenario.available_actions().arity();
        let buttons = engine.button_count();
        if arity != Some(buttons) {
            return Err(ConfigError::ActionArityMismatch {
                scenario: scenario.name(),
                arity,
                buttons,
            }
            .into());
        }

        let observation_space = FrameSpace {
            height: engine.screen_height(),
            width: engine.screen_width(),
        };
        if observation_space.height == 0 || observation_space.width == 0 {
            return Err(ConfigError::EmptyScreen {
                height: observation_space.height,
                width: observation_space.width,
            }
            .into());
        }

        let required = scenario.variable_layout().required_len();
        let mut history = VariableHistory::new(config.history_len);
        for _ in 0..config.history_len {
            let state = engine.state().ok_or(EnvError::NoInitialState)?;
            if state.variables.len() < required {
                return Err(ConfigError::VariableCountMismatch {
                    scenario: scenario.name(),
                    required,
                    exposed: state.variables.len(),
                }
                .into());
            }
            history.push(state.variables);
        }

        Ok((scenario, history, observation_space))
    }

    /// Start a new episode and return its first observation.
    ///
    /// Clears the scenario's per-episode statistics and refills the
    /// variable history with the new episode's initial variables, so the
    /// first reward never compares across episodes.
    pub fn reset(&mut self) -> Result<Frame, EnvError> {
        self.ensure_open()?;
        self.engine.new_episode().map_err(EnvError::Engine)?;
        let GameState { frame, variables } =
            self.engine.state().ok_or(EnvError::NoInitialState)?;
        self.check_frame(&frame)?;
        self.history.fill(&variables);
        self.scenario.clear_episode_statistics();
        self.episode_count += 1;
        self.lifecycle = Lifecycle::Running;
        debug!(
            scenario = self.scenario.name(),
            episode = self.episode_count,
            "episode reset"
        );
        Ok(frame)
    }

    /// Apply `action` for `frame_skip` engine frames.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] for an index outside the action space,
    /// checked before anything is sent to the engine.
    /// [`EnvError::EpisodeNotStarted`] before the first `reset`.
    /// [`EnvError::Engine`] if the engine faults.
    /// [`EnvError::FrameShape`] if the engine's frame does not fit the
    /// observation space; the history is left untouched.
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        match self.lifecycle {
            Lifecycle::Closed => return Err(EnvError::Closed),
            Lifecycle::Ready => return Err(EnvError::EpisodeNotStarted),
            Lifecycle::Running | Lifecycle::EpisodeEnded => {}
        }
        let control = self
            .scenario
            .available_actions()
            .get(action)
            .ok_or(EnvError::InvalidAction {
                index: action,
                action_count: self.action_space.n,
            })?;

        self.engine.set_action(control).map_err(EnvError::Engine)?;
        self.engine
            .advance_action(self.config.frame_skip)
            .map_err(EnvError::Engine)?;

        let state = self.engine.state();
        if let Some(GameState { frame, .. }) = &state {
            self.check_frame(frame)?;
        }
        let finished = self.engine.is_player_dead() || self.engine.is_episode_finished();
        let done = finished || state.is_none();

        // The history only receives snapshots from live steps. A terminal
        // snapshot is scored against a scratch copy so the last
        // transition is counted exactly once.
        let (reward, info, observation) = match state {
            Some(GameState { frame, variables }) if !done => {
                self.history.push(variables);
                let reward = self.scenario.calc_reward(&self.history);
                (reward, self.scenario.statistics(&self.history), frame)
            }
            Some(GameState { frame, variables }) => {
                let mut terminal = self.history.clone();
                terminal.push(variables);
                let reward = self.scenario.calc_reward(&terminal);
                (reward, self.scenario.statistics(&terminal), frame)
            }
            None => {
                if !finished {
                    warn!(
                        scenario = self.scenario.name(),
                        "engine returned no state mid-episode; ending episode"
                    );
                }
                (
                    0.0,
                    self.scenario.statistics(&self.history),
                    self.observation_space.zeros(),
                )
            }
        };

        self.lifecycle = if done {
            Lifecycle::EpisodeEnded
        } else {
            Lifecycle::Running
        };
        trace!(action, reward, done, "step");

        Ok(StepResult {
            observation,
            reward,
            done,
            info,
        })
    }

    /// Release the engine.
    ///
    /// Returns [`EnvError::Closed`] if already closed.
    pub fn close(&mut self) -> Result<(), EnvError> {
        self.ensure_open()?;
        self.engine.close();
        self.lifecycle = Lifecycle::Closed;
        info!(
            scenario = self.scenario.name(),
            episodes = self.episode_count,
            "environment closed"
        );
        Ok(())
    }

    fn check_frame(&self, frame: &Frame) -> Result<(), EnvError> {
        if !self.observation_space.contains(frame) {
            return Err(EnvError::FrameShape {
                expected: self.observation_space.shape(),
                actual: frame.shape(),
            });
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), EnvError> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(EnvError::Closed);
        }
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Shape of every observation.
    pub fn observation_space(&self) -> FrameSpace {
        self.observation_space
    }

    /// Valid action indices.
    pub fn action_space(&self) -> Discrete {
        self.action_space
    }

    /// Rolling variable history, oldest first.
    pub fn history(&self) -> &VariableHistory {
        &self.history
    }

    /// The config this environment was built from.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Asset paths handed to the engine.
    pub fn asset_paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// The active scenario.
    pub fn scenario(&self) -> &dyn ScenarioPolicy {
        self.scenario.as_ref()
    }

    /// Number of `reset` calls so far.
    pub fn episode_count(&self) -> u64 {
        self.episode_count
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Environment id, `"<task>-v0"`.
    pub fn spec_id(&self) -> String {
        format!("{}-v0", self.config.task_name())
    }
}

impl<E: GameEngine> Drop for DoomEnv<E> {
    fn drop(&mut self) {
        if self.lifecycle != Lifecycle::Closed {
            self.engine.close();
            self.lifecycle = Lifecycle::Closed;
        }
    }
}
