//! Benchmark profiles and a synthetic engine for doomsuite.
//!
//! - [`SyntheticEngine`]: a seeded, engine-free [`GameEngine`] that plays
//!   out plausible episodes for any [`ScenarioKind`]
//! - [`random_walk_history`]: a deterministic, full variable history
//! - [`reference_env`]: a ready-to-step environment over the synthetic engine

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use doomsuite_core::{
    EngineError, Frame, GameEngine, GameState, ScreenResolution, VariableHistory,
    VariableLayout, VariableSnapshot,
};
use doomsuite_env::{DoomEnv, EnvConfig, EnvError};
use doomsuite_scenarios::{ScenarioKind, ScenarioParams};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const START_HEALTH: f64 = 100.0;
const START_AMMO: f64 = 50.0;

/// Engine stand-in that simulates a scenario's game variables.
///
/// Each tic the player may score a kill or take a hit; pressing the last
/// button fires, any other button moves. Episodes end when health runs
/// out or after `episode_tics` tics. Runs are reproducible per seed.
pub struct SyntheticEngine {
    layout: VariableLayout,
    buttons: usize,
    height: usize,
    width: usize,
    episode_tics: u32,
    seed: u64,
    rng: ChaCha8Rng,
    variables: Vec<f64>,
    action: Vec<f64>,
    tics: u32,
    running: bool,
}

impl SyntheticEngine {
    /// Synthetic engine matching `kind`'s variable layout and buttons.
    pub fn new(kind: ScenarioKind, seed: u64) -> Self {
        let policy = kind.build(&ScenarioParams::default());
        let layout = policy.variable_layout();
        let buttons = policy.available_actions().arity().unwrap_or(0);
        let res = ScreenResolution::Res160x120;
        Self {
            layout,
            buttons,
            height: res.height(),
            width: res.width(),
            episode_tics: 2100,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            variables: vec![0.0; layout.required_len()],
            action: vec![0.0; buttons],
            tics: 0,
            running: false,
        }
    }

    /// Tics per episode before the time limit ends it.
    pub fn with_episode_tics(mut self, tics: u32) -> Self {
        self.episode_tics = tics;
        self
    }

    fn start_episode(&mut self) {
        self.variables.iter_mut().for_each(|v| *v = 0.0);
        self.variables[self.layout.health] = START_HEALTH;
        self.variables[self.layout.ammo] = START_AMMO;
        self.tics = 0;
    }

    fn tic(&mut self) {
        let firing = self.action.last().is_some_and(|&b| b > 0.0);
        let moving = self.action.iter().rev().skip(1).any(|&b| b > 0.0);
        let l = self.layout;

        if firing && self.variables[l.ammo] > 0.0 {
            self.variables[l.ammo] -= 1.0;
            if self.rng.random_bool(0.05) {
                self.variables[l.kills] += 1.0;
            }
        }
        if self.rng.random_bool(0.01) {
            self.variables[l.health] = (self.variables[l.health] - 10.0).max(0.0);
        }
        if let (Some((x, y)), true) = (l.position, moving) {
            self.variables[x] += self.rng.random_range(-8.0..8.0);
            self.variables[y] += self.rng.random_range(-8.0..8.0);
        }
        self.tics += 1;
    }

    fn dead(&self) -> bool {
        self.variables[self.layout.health] <= 0.0
    }

    fn timed_out(&self) -> bool {
        self.tics >= self.episode_tics
    }
}

impl GameEngine for SyntheticEngine {
    fn load_config(&mut self, _path: &Path) -> Result<(), EngineError> {
        Ok(())
    }

    fn set_scenario_path(&mut self, _path: &Path) -> Result<(), EngineError> {
        Ok(())
    }

    fn set_window_visible(&mut self, _visible: bool) {}

    fn set_screen_resolution(&mut self, resolution: ScreenResolution) {
        self.height = resolution.height();
        self.width = resolution.width();
    }

    fn init(&mut self) -> Result<(), EngineError> {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.running = true;
        self.start_episode();
        Ok(())
    }

    fn new_episode(&mut self) -> Result<(), EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        self.start_episode();
        Ok(())
    }

    fn set_action(&mut self, action: &[f64]) -> Result<(), EngineError> {
        if action.len() != self.buttons {
            return Err(EngineError::InvalidControl {
                len: action.len(),
                expected: self.buttons,
            });
        }
        self.action.clear();
        self.action.extend_from_slice(action);
        Ok(())
    }

    fn advance_action(&mut self, tics: u32) -> Result<(), EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        for _ in 0..tics {
            if self.dead() || self.timed_out() {
                break;
            }
            self.tic();
        }
        Ok(())
    }

    fn state(&self) -> Option<GameState> {
        if !self.running || self.is_episode_finished() {
            return None;
        }
        let shade = (self.tics % 256) as u8;
        Some(GameState {
            frame: Frame::new(self.height, self.width, vec![shade; self.height * self.width])?,
            variables: VariableSnapshot::new(self.variables.iter().copied()),
        })
    }

    fn screen_height(&self) -> usize {
        self.height
    }

    fn screen_width(&self) -> usize {
        self.width
    }

    fn button_count(&self) -> usize {
        self.buttons
    }

    fn is_player_dead(&self) -> bool {
        self.dead()
    }

    fn is_episode_finished(&self) -> bool {
        self.dead() || self.timed_out()
    }

    fn close(&mut self) {
        self.running = false;
    }
}

/// A full history of `capacity` snapshots following a seeded random walk
/// in `kind`'s layout.
pub fn random_walk_history(kind: ScenarioKind, capacity: usize, seed: u64) -> VariableHistory {
    let layout = kind.build(&ScenarioParams::default()).variable_layout();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut vars = vec![0.0; layout.required_len()];
    vars[layout.health] = START_HEALTH;
    vars[layout.ammo] = START_AMMO;

    let mut history = VariableHistory::new(capacity);
    for _ in 0..capacity {
        if rng.random_bool(0.3) {
            vars[layout.kills] += 1.0;
        }
        vars[layout.health] -= rng.random_range(0.0..5.0f64).floor();
        vars[layout.ammo] -= rng.random_range(0.0..2.0f64).floor();
        if let Some((x, y)) = layout.position {
            vars[x] += rng.random_range(-16.0..16.0);
            vars[y] += rng.random_range(-16.0..16.0);
        }
        history.push(VariableSnapshot::new(vars.iter().copied()));
    }
    history
}

/// Environment for `kind` over a [`SyntheticEngine`] seeded with `seed`.
pub fn reference_env(kind: ScenarioKind, seed: u64) -> Result<DoomEnv<SyntheticEngine>, EnvError> {
    DoomEnv::new(SyntheticEngine::new(kind, seed), EnvConfig::new(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_engine_matches_every_scenario() {
        for kind in ScenarioKind::ALL {
            let env = reference_env(kind, 7).unwrap();
            assert_eq!(env.observation_space().shape(), (120, 160));
        }
    }

    #[test]
    fn episodes_terminate() {
        let engine = SyntheticEngine::new(ScenarioKind::RunAndGunV1, 3).with_episode_tics(40);
        let mut env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::RunAndGunV1)).unwrap();
        env.reset().unwrap();
        let mut steps = 0;
        while !env.step(11).unwrap().done {
            steps += 1;
            assert!(steps <= 10, "episode overran its tic budget");
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let rollout = |seed| {
            let mut env = reference_env(ScenarioKind::DefendTheCenterV1, seed).unwrap();
            env.reset().unwrap();
            (0..50).map(|_| env.step(1).unwrap().reward).collect::<Vec<_>>()
        };
        assert_eq!(rollout(11), rollout(11));
    }

    #[test]
    fn random_walk_history_is_full() {
        let h = random_walk_history(ScenarioKind::RunAndGun, 5, 42);
        assert!(h.is_full());
        assert_eq!(h.latest().map(|s| s.len()), Some(5));
        assert_eq!(
            h.latest().map(|s| s.as_slice().to_vec()),
            random_walk_history(ScenarioKind::RunAndGun, 5, 42)
                .latest()
                .map(|s| s.as_slice().to_vec())
        );
    }
}
