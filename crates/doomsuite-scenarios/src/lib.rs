//! Scenario policies for doomsuite environments.
//!
//! Each scenario fixes three things: the discrete actions offered to the
//! agent, the reward computed from the rolling variable history, and the
//! statistics reported per step.
//!
//! # Reward pipelines
//!
//! | Scenario | Terms, in order |
//! |----------|-----------------|
//! | [`DefendTheCenter`] | [`KillBonus`] |
//! | [`DefendTheCenterV1`] | [`KillBonus`] → [`HealthLossPenalty`] → [`AmmoUsedPenalty`] |
//! | [`RunAndGun`] | [`KillBonus`] |
//! | [`RunAndGunV1`] | [`KillBonus`] → [`TraversalBonus`] |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod defend_the_center;
pub mod kind;
pub mod params;
pub mod policy;
pub mod reward;
pub mod run_and_gun;
pub mod terms;

pub use defend_the_center::{DefendTheCenter, DefendTheCenterV1};
pub use kind::{ScenarioKind, UnknownScenario};
pub use params::{ParamsError, ScenarioParams};
pub use policy::ScenarioPolicy;
pub use reward::{RewardPipeline, RewardTerm, RewardWindow};
pub use run_and_gun::{EpisodeTally, RunAndGun, RunAndGunV1};
pub use terms::{AmmoUsedPenalty, HealthLossPenalty, KillBonus, TraversalBonus};
