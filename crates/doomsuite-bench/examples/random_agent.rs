//! Random agent over every scenario.
//!
//! Demonstrates: config → DoomEnv → sample actions → step until done →
//! read statistics → reset → repeat. Runs against the synthetic engine,
//! so no game install is needed.

use doomsuite_bench::SyntheticEngine;
use doomsuite_env::{DoomEnv, EnvConfig};
use doomsuite_scenarios::ScenarioKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPISODES: u32 = 2;

fn main() {
    tracing_subscriber::fmt::init();
    println!("=== doomsuite random agent ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for kind in ScenarioKind::ALL {
        let engine = SyntheticEngine::new(kind, 42).with_episode_tics(400);
        let mut env = DoomEnv::new(engine, EnvConfig::new(kind)).unwrap();
        println!(
            "{kind} ({}): observation {:?}, {} actions",
            env.spec_id(),
            env.observation_space().shape(),
            env.action_space().n
        );

        for episode in 1..=EPISODES {
            env.reset().unwrap();
            let mut total = 0.0;
            let mut steps = 0;
            let info = loop {
                let action = env.action_space().sample(&mut rng).unwrap();
                let result = env.step(action).unwrap();
                total += result.reward;
                steps += 1;
                if result.done {
                    break result.info;
                }
            };
            println!("  episode {episode}: reward {total:>7.3} over {steps:>3} steps, info {info:?}");
        }
        env.close().unwrap();
        println!();
    }
}
