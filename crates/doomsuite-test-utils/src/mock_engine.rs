//! A scripted, call-recording engine.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use doomsuite_core::{
    EngineError, Frame, GameEngine, GameState, ScreenResolution, VariableSnapshot,
};

/// Every engine call, in the order the adapter made it.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    LoadConfig(PathBuf),
    SetScenarioPath(PathBuf),
    SetWindowVisible(bool),
    SetScreenResolution(ScreenResolution),
    Init,
    NewEpisode,
    SetAction(Vec<f64>),
    Advance(u32),
    Close,
}

/// Where the mock should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailPoint {
    LoadConfig,
    Init,
    NewEpisode,
    Advance,
}

/// Outcome of one `advance_action` call.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedStep {
    pub variables: VariableSnapshot,
    pub dead: bool,
    /// The episode ends and the engine stops providing state.
    pub finished: bool,
}

impl ScriptedStep {
    pub fn alive(variables: impl Into<VariableSnapshot>) -> Self {
        Self {
            variables: variables.into(),
            dead: false,
            finished: false,
        }
    }

    pub fn dead(variables: impl Into<VariableSnapshot>) -> Self {
        Self {
            variables: variables.into(),
            dead: true,
            finished: false,
        }
    }

    pub fn finished(variables: impl Into<VariableSnapshot>) -> Self {
        Self {
            variables: variables.into(),
            dead: false,
            finished: true,
        }
    }
}

/// Engine whose state follows a fixed script.
///
/// Each `advance_action` consumes the next [`ScriptedStep`]; once the
/// script runs out the episode finishes. `new_episode` rewinds the
/// script. Frames are filled with the current step number so tests can
/// tell them apart.
pub struct MockEngine {
    height: usize,
    width: usize,
    buttons: usize,
    initial: VariableSnapshot,
    script: Vec<ScriptedStep>,
    cursor: usize,
    current: VariableSnapshot,
    dead: bool,
    finished: bool,
    initialised: bool,
    closed: bool,
    fail_at: Option<FailPoint>,
    frame_shape: Option<(usize, usize)>,
    calls: Vec<EngineCall>,
    closes: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new(height: usize, width: usize, buttons: usize) -> Self {
        Self {
            height,
            width,
            buttons,
            initial: VariableSnapshot::from(Vec::new()),
            script: Vec::new(),
            cursor: 0,
            current: VariableSnapshot::from(Vec::new()),
            dead: false,
            finished: false,
            initialised: false,
            closed: false,
            fail_at: None,
            frame_shape: None,
            calls: Vec::new(),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Variables reported right after `init` and `new_episode`.
    pub fn with_initial(mut self, variables: impl Into<VariableSnapshot>) -> Self {
        self.initial = variables.into();
        self
    }

    pub fn with_script(mut self, steps: Vec<ScriptedStep>) -> Self {
        self.script = steps;
        self
    }

    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail_at = Some(point);
        self
    }

    /// Render frames at `height` x `width` regardless of the reported
    /// screen size.
    pub fn with_frame_shape(mut self, height: usize, width: usize) -> Self {
        self.frame_shape = Some((height, width));
        self
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Control vectors submitted so far.
    pub fn actions(&self) -> Vec<Vec<f64>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::SetAction(a) => Some(a.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Close))
            .count()
    }

    /// Shared close counter that outlives the engine, for checking
    /// cleanup after the adapter has taken ownership.
    pub fn close_probe(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check(&self, point: FailPoint) -> Result<(), EngineError> {
        if self.fail_at == Some(point) {
            return Err(EngineError::Fault {
                reason: format!("scripted failure at {point:?}"),
            });
        }
        Ok(())
    }

    fn running(&self) -> Result<(), EngineError> {
        if !self.initialised || self.closed {
            return Err(EngineError::NotRunning);
        }
        Ok(())
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.current = self.initial.clone();
        self.dead = false;
        self.finished = false;
    }
}

impl GameEngine for MockEngine {
    fn load_config(&mut self, path: &Path) -> Result<(), EngineError> {
        self.calls.push(EngineCall::LoadConfig(path.to_path_buf()));
        if self.fail_at == Some(FailPoint::LoadConfig) {
            return Err(EngineError::ConfigLoad {
                path: path.to_path_buf(),
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }

    fn set_scenario_path(&mut self, path: &Path) -> Result<(), EngineError> {
        self.calls.push(EngineCall::SetScenarioPath(path.to_path_buf()));
        Ok(())
    }

    fn set_window_visible(&mut self, visible: bool) {
        self.calls.push(EngineCall::SetWindowVisible(visible));
    }

    fn set_screen_resolution(&mut self, resolution: ScreenResolution) {
        self.calls.push(EngineCall::SetScreenResolution(resolution));
        self.height = resolution.height();
        self.width = resolution.width();
    }

    fn init(&mut self) -> Result<(), EngineError> {
        self.calls.push(EngineCall::Init);
        if self.fail_at == Some(FailPoint::Init) {
            return Err(EngineError::InitFailed {
                reason: "scripted failure".into(),
            });
        }
        self.initialised = true;
        self.rewind();
        Ok(())
    }

    fn new_episode(&mut self) -> Result<(), EngineError> {
        self.calls.push(EngineCall::NewEpisode);
        self.running()?;
        self.check(FailPoint::NewEpisode)?;
        self.rewind();
        Ok(())
    }

    fn set_action(&mut self, action: &[f64]) -> Result<(), EngineError> {
        self.calls.push(EngineCall::SetAction(action.to_vec()));
        self.running()?;
        if action.len() != self.buttons {
            return Err(EngineError::InvalidControl {
                len: action.len(),
                expected: self.buttons,
            });
        }
        Ok(())
    }

    fn advance_action(&mut self, tics: u32) -> Result<(), EngineError> {
        self.calls.push(EngineCall::Advance(tics));
        self.running()?;
        self.check(FailPoint::Advance)?;
        if self.finished || self.dead {
            return Ok(());
        }
        match self.script.get(self.cursor) {
            Some(step) => {
                self.current = step.variables.clone();
                self.dead = step.dead;
                self.finished = step.finished;
                self.cursor += 1;
            }
            None => self.finished = true,
        }
        Ok(())
    }

    fn state(&self) -> Option<GameState> {
        if !self.initialised || self.closed || self.finished {
            return None;
        }
        let fill = (self.cursor % 256) as u8;
        let (height, width) = self.frame_shape.unwrap_or((self.height, self.width));
        Some(GameState {
            frame: Frame::new(height, width, vec![fill; height * width])?,
            variables: self.current.clone(),
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
        self.dead
    }

    fn is_episode_finished(&self) -> bool {
        self.finished || self.dead
    }

    fn close(&mut self) {
        self.calls.push(EngineCall::Close);
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
    }
}
