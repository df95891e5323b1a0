//! Integration tests: full episodes driven through `DoomEnv` against a
//! scripted engine.

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use doomsuite_core::{EngineError, GameEngine, ScreenResolution};
use doomsuite_env::{
    AssetPaths, AssetSource, ConfigError, DoomEnv, EnvConfig, EnvError, Lifecycle,
};
use doomsuite_scenarios::ScenarioKind;
use doomsuite_test_utils::{EngineCall, FailPoint, MockEngine, ScriptedStep};

// ── Fixtures ────────────────────────────────────────────────────────

const HEIGHT: usize = 12;
const WIDTH: usize = 16;

/// DefendTheCenter layout: kills, health, ammo. Three buttons.
fn defend_engine(script: Vec<ScriptedStep>) -> MockEngine {
    MockEngine::new(HEIGHT, WIDTH, 3)
        .with_initial([0.0, 100.0, 26.0])
        .with_script(script)
}

/// RunAndGun layout: health, kills, ammo, x, y. Four buttons.
fn run_engine(script: Vec<ScriptedStep>) -> MockEngine {
    MockEngine::new(HEIGHT, WIDTH, 4)
        .with_initial([100.0, 0.0, 50.0, 0.0, 0.0])
        .with_script(script)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn construction_configures_engine_in_order() {
    let env = DoomEnv::new(
        defend_engine(vec![]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();

    assert_eq!(
        env.engine().calls(),
        [
            EngineCall::LoadConfig(PathBuf::from("maps/DefendTheCenter/DefendTheCenter.cfg")),
            EngineCall::SetScenarioPath(PathBuf::from("maps/DefendTheCenter/default.wad")),
            EngineCall::SetWindowVisible(false),
            EngineCall::Init,
        ]
    );
    assert_eq!(env.lifecycle(), Lifecycle::Ready);
    assert_eq!(env.observation_space().shape(), (HEIGHT, WIDTH));
    assert_eq!(env.action_space().n, 6);
    assert_eq!(env.spec_id(), "default-v0");
}

#[test]
fn history_prefilled_from_initial_state() {
    let env = DoomEnv::new(
        defend_engine(vec![]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();

    let history = env.history();
    assert!(history.is_full());
    assert_eq!(history.len(), 5);
    assert!(history.iter().all(|s| s.as_slice() == [0.0, 100.0, 26.0]));
}

#[test]
fn visible_window_sets_resolution() {
    let mut cfg = EnvConfig::new(ScenarioKind::RunAndGun).with_task("obstacles");
    cfg.visible = true;
    cfg.screen_resolution = ScreenResolution::Res640x480;
    let env = DoomEnv::new(run_engine(vec![]), cfg).unwrap();

    let calls = env.engine().calls();
    assert_eq!(calls[2], EngineCall::SetWindowVisible(true));
    assert_eq!(
        calls[3],
        EngineCall::SetScreenResolution(ScreenResolution::Res640x480)
    );
    assert_eq!(env.observation_space().shape(), (480, 640));
    assert_eq!(env.spec_id(), "obstacles-v0");
}

#[test]
fn refined_variant_uses_own_assets() {
    let cfg = EnvConfig::new(ScenarioKind::RunAndGunV1).with_task("obstacles");
    let env = DoomEnv::new(run_engine(vec![]), cfg).unwrap();
    assert_eq!(
        env.engine().calls()[..2],
        [
            EngineCall::LoadConfig(PathBuf::from("maps/RunAndGunV1/RunAndGunV1.cfg")),
            EngineCall::SetScenarioPath(PathBuf::from("maps/RunAndGunV1/obstacles.wad")),
        ]
    );
    assert_eq!(env.scenario().name(), "RunAndGunV1");
}

#[test]
fn refined_variant_can_share_base_maps_explicitly() {
    let shared = AssetPaths::resolve(Path::new("maps"), "DefendTheCenter", "default");
    let cfg = EnvConfig::new(ScenarioKind::DefendTheCenterV1)
        .with_assets(AssetSource::Explicit(shared.clone()));
    let env = DoomEnv::new(defend_engine(vec![]), cfg).unwrap();
    assert_eq!(env.asset_paths(), &shared);
    assert_eq!(
        env.engine().calls()[0],
        EngineCall::LoadConfig(PathBuf::from("maps/DefendTheCenter/DefendTheCenter.cfg"))
    );
}

#[test]
fn explicit_asset_paths_passed_through() {
    let paths = AssetPaths {
        cfg: PathBuf::from("/srv/doom/custom.cfg"),
        wad: PathBuf::from("/srv/doom/custom.wad"),
    };
    let cfg = EnvConfig::new(ScenarioKind::DefendTheCenter)
        .with_assets(AssetSource::Explicit(paths.clone()));
    let env = DoomEnv::new(defend_engine(vec![]), cfg).unwrap();
    assert_eq!(env.engine().calls()[0], EngineCall::LoadConfig(paths.cfg));
    assert_eq!(env.engine().calls()[1], EngineCall::SetScenarioPath(paths.wad));
}

#[test]
fn invalid_config_rejected_before_engine_use() {
    let mut cfg = EnvConfig::new(ScenarioKind::DefendTheCenter);
    cfg.history_len = 0;
    let engine = defend_engine(vec![]);
    let probe = engine.close_probe();
    match DoomEnv::new(engine, cfg) {
        Err(EnvError::Config(ConfigError::HistoryTooShort { configured: 0 })) => {}
        other => panic!("expected HistoryTooShort, got {:?}", other.err()),
    }
    assert_eq!(probe.load(Ordering::SeqCst), 0);
}

#[test]
fn init_failure_is_engine_init_error() {
    let engine = defend_engine(vec![]).failing_at(FailPoint::Init);
    match DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)) {
        Err(EnvError::EngineInit(EngineError::InitFailed { .. })) => {}
        other => panic!("expected EngineInit, got {:?}", other.err()),
    }
}

#[test]
fn config_load_failure_is_engine_init_error() {
    let engine = defend_engine(vec![]).failing_at(FailPoint::LoadConfig);
    match DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)) {
        Err(EnvError::EngineInit(EngineError::ConfigLoad { path, .. })) => {
            assert!(path.ends_with("DefendTheCenter.cfg"));
        }
        other => panic!("expected EngineInit, got {:?}", other.err()),
    }
}

#[test]
fn button_mismatch_closes_engine() {
    let engine = MockEngine::new(HEIGHT, WIDTH, 2).with_initial([0.0, 100.0, 26.0]);
    let probe = engine.close_probe();
    match DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)) {
        Err(EnvError::Config(ConfigError::ActionArityMismatch {
            scenario: "DefendTheCenter",
            arity: Some(3),
            buttons: 2,
        })) => {}
        other => panic!("expected ActionArityMismatch, got {:?}", other.err()),
    }
    assert_eq!(probe.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_variables_rejected_and_engine_closed() {
    // Health, kills, ammo but no position.
    let engine = MockEngine::new(HEIGHT, WIDTH, 4).with_initial([100.0, 0.0, 50.0]);
    let probe = engine.close_probe();
    match DoomEnv::new(engine, EnvConfig::new(ScenarioKind::RunAndGunV1)) {
        Err(EnvError::Config(ConfigError::VariableCountMismatch {
            scenario: "RunAndGunV1",
            required: 5,
            exposed: 3,
        })) => {}
        other => panic!("expected VariableCountMismatch, got {:?}", other.err()),
    }
    assert_eq!(probe.load(Ordering::SeqCst), 1);
}

#[test]
fn extra_variables_accepted() {
    let engine = MockEngine::new(HEIGHT, WIDTH, 3).with_initial([0.0, 100.0, 26.0, 7.0]);
    let env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)).unwrap();
    assert_eq!(env.history().latest().map(|s| s.len()), Some(4));
}

#[test]
fn empty_screen_rejected() {
    let engine = MockEngine::new(0, WIDTH, 3).with_initial([0.0, 100.0, 26.0]);
    match DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)) {
        Err(EnvError::Config(ConfigError::EmptyScreen { height: 0, .. })) => {}
        other => panic!("expected EmptyScreen, got {:?}", other.err()),
    }
}

#[test]
fn action_space_matches_table_for_every_scenario() {
    for kind in ScenarioKind::ALL {
        let engine = match kind {
            ScenarioKind::DefendTheCenter | ScenarioKind::DefendTheCenterV1 => {
                defend_engine(vec![])
            }
            ScenarioKind::RunAndGun | ScenarioKind::RunAndGunV1 => run_engine(vec![]),
        };
        let env = DoomEnv::new(engine, EnvConfig::new(kind)).unwrap();
        let table = env.scenario().available_actions();
        assert_eq!(env.action_space().n, table.len(), "{kind}");
        assert_eq!(table.arity(), Some(env.engine().button_count()), "{kind}");
    }
}

// ── Episodes ────────────────────────────────────────────────────────

#[test]
fn step_before_reset_rejected() {
    let mut env = DoomEnv::new(
        defend_engine(vec![ScriptedStep::alive([0.0, 100.0, 26.0])]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    assert_eq!(env.step(0).unwrap_err(), EnvError::EpisodeNotStarted);
}

#[test]
fn invalid_action_not_sent_to_engine() {
    let mut env = DoomEnv::new(
        defend_engine(vec![ScriptedStep::alive([0.0, 100.0, 26.0])]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    env.reset().unwrap();
    assert_eq!(
        env.step(6).unwrap_err(),
        EnvError::InvalidAction {
            index: 6,
            action_count: 6,
        }
    );
    assert!(env.engine().actions().is_empty());
    assert_eq!(env.lifecycle(), Lifecycle::Running);
}

#[test]
fn step_submits_mapped_control_with_frame_skip() {
    let mut cfg = EnvConfig::new(ScenarioKind::RunAndGun);
    cfg.frame_skip = 2;
    let mut env = DoomEnv::new(
        run_engine(vec![ScriptedStep::alive([100.0, 0.0, 50.0, 0.0, 0.0])]),
        cfg,
    )
    .unwrap();
    env.reset().unwrap();
    // turn left (2), forward (1), shoot (1) → 2 * 4 + 1 * 2 + 1
    env.step(11).unwrap();

    let calls = env.engine().calls();
    let n = calls.len();
    assert_eq!(calls[n - 2], EngineCall::SetAction(vec![1.0, 0.0, 1.0, 1.0]));
    assert_eq!(calls[n - 1], EngineCall::Advance(2));
}

#[test]
fn defend_the_center_v1_episode() {
    let script = vec![
        ScriptedStep::alive([1.0, 100.0, 25.0]),
        ScriptedStep::alive([1.0, 80.0, 24.0]),
        ScriptedStep::dead([1.0, 0.0, 24.0]),
    ];
    let mut env = DoomEnv::new(
        defend_engine(script),
        EnvConfig::new(ScenarioKind::DefendTheCenterV1),
    )
    .unwrap();

    let obs = env.reset().unwrap();
    assert_eq!(obs.shape(), (HEIGHT, WIDTH));
    assert_eq!(env.episode_count(), 1);

    let first = env.step(1).unwrap();
    assert!(!first.done);
    assert_close(first.reward, 0.9);
    assert_eq!(first.info["kills"], 1.0);
    assert_eq!(first.info["ammo"], 25.0);
    assert_eq!(first.observation.pixel(0, 0), Some(1));

    let second = env.step(0).unwrap();
    assert!(!second.done);
    assert_close(second.reward, -0.2);

    let last = env.step(0).unwrap();
    assert!(last.done);
    assert_close(last.reward, -0.1);
    assert_eq!(env.lifecycle(), Lifecycle::EpisodeEnded);

    // The terminal snapshot is scored but never stored.
    assert_eq!(env.history().len(), 5);
    assert_eq!(
        env.history().latest().map(|s| s.as_slice().to_vec()),
        Some(vec![1.0, 80.0, 24.0])
    );
}

#[test]
fn finished_episode_yields_zero_frame() {
    let mut env = DoomEnv::new(
        defend_engine(vec![ScriptedStep::finished([0.0, 100.0, 26.0])]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    env.reset().unwrap();
    let before: Vec<_> = env.history().iter().cloned().collect();

    let result = env.step(0).unwrap();
    assert!(result.done);
    assert_eq!(result.reward, 0.0);
    assert!(result.observation.as_bytes().iter().all(|&b| b == 0));
    assert!(env.observation_space().contains(&result.observation));

    let after: Vec<_> = env.history().iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn stepping_after_death_leaves_history_alone() {
    let script = vec![
        ScriptedStep::alive([1.0, 90.0, 25.0]),
        ScriptedStep::dead([1.0, 0.0, 25.0]),
    ];
    let mut env = DoomEnv::new(
        defend_engine(script),
        EnvConfig::new(ScenarioKind::DefendTheCenterV1),
    )
    .unwrap();
    env.reset().unwrap();
    assert!(!env.step(1).unwrap().done);
    assert!(env.step(1).unwrap().done);
    let before: Vec<_> = env.history().iter().cloned().collect();

    for _ in 0..3 {
        let again = env.step(1).unwrap();
        assert!(again.done);
        assert_eq!(env.lifecycle(), Lifecycle::EpisodeEnded);
        let after: Vec<_> = env.history().iter().cloned().collect();
        assert_eq!(after, before);
        assert_eq!(env.history().len(), env.history().capacity());
    }
}

#[test]
fn stepping_after_finish_leaves_history_alone() {
    let mut env = DoomEnv::new(
        defend_engine(vec![
            ScriptedStep::alive([1.0, 100.0, 25.0]),
            ScriptedStep::finished([1.0, 100.0, 25.0]),
        ]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    env.reset().unwrap();
    env.step(1).unwrap();
    assert!(env.step(1).unwrap().done);
    let before: Vec<_> = env.history().iter().cloned().collect();

    for _ in 0..3 {
        let again = env.step(0).unwrap();
        assert!(again.done);
        assert_eq!(again.reward, 0.0);
        let after: Vec<_> = env.history().iter().cloned().collect();
        assert_eq!(after, before);
        assert_eq!(env.history().len(), env.history().capacity());
    }
}

#[test]
fn mis_sized_frame_rejected_on_reset() {
    let engine = defend_engine(vec![]).with_frame_shape(HEIGHT, WIDTH + 1);
    let mut env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)).unwrap();
    assert_eq!(
        env.reset().unwrap_err(),
        EnvError::FrameShape {
            expected: (HEIGHT, WIDTH),
            actual: (HEIGHT, WIDTH + 1),
        }
    );
    assert_eq!(env.episode_count(), 0);
}

#[test]
fn run_and_gun_v1_tallies_and_resets() {
    let script = vec![
        ScriptedStep::alive([100.0, 0.0, 49.0, 3.0, 4.0]),
        ScriptedStep::alive([90.0, 1.0, 48.0, 6.0, 8.0]),
    ];
    let mut env = DoomEnv::new(
        run_engine(script),
        EnvConfig::new(ScenarioKind::RunAndGunV1),
    )
    .unwrap();

    env.reset().unwrap();
    let first = env.step(3).unwrap();
    assert_close(first.reward, 0.005);

    let second = env.step(3).unwrap();
    assert_close(second.reward, 1.01);
    let info = &second.info;
    let keys: Vec<&str> = info.keys().copied().collect();
    assert_eq!(keys, ["health", "kills", "ammo", "movement", "hits_taken"]);
    assert_eq!(info["health"], 90.0);
    assert_eq!(info["kills"], 1.0);
    assert_eq!(info["ammo"], 2.0);
    assert_eq!(info["movement"], 7.5);
    assert_eq!(info["hits_taken"], 1.0);

    // A new episode starts from clean tallies and a refilled history.
    env.reset().unwrap();
    assert_eq!(env.episode_count(), 2);
    assert!(env
        .history()
        .iter()
        .all(|s| s.as_slice() == [100.0, 0.0, 50.0, 0.0, 0.0]));
    let again = env.step(3).unwrap();
    assert_close(again.reward, 0.005);
    assert_eq!(again.info["movement"], 5.0);
    assert_eq!(again.info["hits_taken"], 0.0);
}

#[test]
fn engine_fault_propagates() {
    let mut env = DoomEnv::new(
        defend_engine(vec![]).failing_at(FailPoint::Advance),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    env.reset().unwrap();
    match env.step(0) {
        Err(EnvError::Engine(EngineError::Fault { .. })) => {}
        other => panic!("expected Engine fault, got {other:?}"),
    }
}

#[test]
fn reset_failure_propagates() {
    let mut env = DoomEnv::new(
        defend_engine(vec![]).failing_at(FailPoint::NewEpisode),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    match env.reset() {
        Err(EnvError::Engine(EngineError::Fault { .. })) => {}
        other => panic!("expected Engine fault, got {other:?}"),
    }
    assert_eq!(env.episode_count(), 0);
}

// ── Shutdown ────────────────────────────────────────────────────────

#[test]
fn second_close_is_an_error() {
    let mut env = DoomEnv::new(
        defend_engine(vec![]),
        EnvConfig::new(ScenarioKind::DefendTheCenter),
    )
    .unwrap();
    env.close().unwrap();
    assert_eq!(env.close().unwrap_err(), EnvError::Closed);
    assert_eq!(env.engine().close_count(), 1);
    assert_eq!(env.lifecycle(), Lifecycle::Closed);
    assert_eq!(env.reset().unwrap_err(), EnvError::Closed);
    assert_eq!(env.step(0).unwrap_err(), EnvError::Closed);
}

#[test]
fn drop_closes_open_engine_once() {
    let engine = defend_engine(vec![]);
    let probe = engine.close_probe();
    let env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)).unwrap();
    drop(env);
    assert_eq!(probe.load(Ordering::SeqCst), 1);

    let engine = defend_engine(vec![]);
    let probe = engine.close_probe();
    let mut env = DoomEnv::new(engine, EnvConfig::new(ScenarioKind::DefendTheCenter)).unwrap();
    env.close().unwrap();
    drop(env);
    assert_eq!(probe.load(Ordering::SeqCst), 1);
}

#[test]
fn env_is_send_with_send_engine() {
    fn assert_send<T: Send>() {}
    assert_send::<DoomEnv<MockEngine>>();
}
