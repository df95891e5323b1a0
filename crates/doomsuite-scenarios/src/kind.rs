//! Name-based scenario selection.
//!
//! [`ScenarioKind`] is the closed set of scenario variants. It maps the
//! names used in task catalogs and configs to a boxed
//! [`ScenarioPolicy`].

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::defend_the_center::{DefendTheCenter, DefendTheCenterV1};
use crate::params::ScenarioParams;
use crate::policy::ScenarioPolicy;
use crate::run_and_gun::{RunAndGun, RunAndGunV1};

/// A known scenario variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// Stationary agent, kill reward.
    DefendTheCenter,
    /// Stationary agent, kill reward with health and ammo penalties.
    DefendTheCenterV1,
    /// Mobile agent, kill reward.
    RunAndGun,
    /// Mobile agent, kill reward with movement shaping and tallies.
    RunAndGunV1,
}

impl ScenarioKind {
    /// Every variant, in declaration order.
    pub const ALL: [ScenarioKind; 4] = [
        Self::DefendTheCenter,
        Self::DefendTheCenterV1,
        Self::RunAndGun,
        Self::RunAndGunV1,
    ];

    /// Variant name. Also names the variant's asset directory.
    pub fn name(self) -> &'static str {
        match self {
            Self::DefendTheCenter => DefendTheCenter::NAME,
            Self::DefendTheCenterV1 => DefendTheCenterV1::NAME,
            Self::RunAndGun => RunAndGun::NAME,
            Self::RunAndGunV1 => RunAndGunV1::NAME,
        }
    }

    /// Construct the policy for this variant.
    pub fn build(self, params: &ScenarioParams) -> Box<dyn ScenarioPolicy> {
        match self {
            Self::DefendTheCenter => Box::new(DefendTheCenter::new(params)),
            Self::DefendTheCenterV1 => Box::new(DefendTheCenterV1::new(params)),
            Self::RunAndGun => Box::new(RunAndGun::new(params)),
            Self::RunAndGunV1 => Box::new(RunAndGunV1::new(params)),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownScenario { name: s.to_string() })
    }
}

/// A scenario name that matches no [`ScenarioKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownScenario {
    /// The name that was looked up.
    pub name: String,
}

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scenario '{}'", self.name)
    }
}

impl Error for UnknownScenario {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ScenarioKind::ALL {
            assert_eq!(kind.name().parse::<ScenarioKind>(), Ok(kind));
            assert_eq!(kind.build(&ScenarioParams::default()).name(), kind.name());
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "HealthGathering".parse::<ScenarioKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown scenario 'HealthGathering'");
    }

    #[test]
    fn every_action_table_is_uniform() {
        for kind in ScenarioKind::ALL {
            let policy = kind.build(&ScenarioParams::default());
            let table = policy.available_actions();
            assert!(!table.is_empty(), "{kind} has no actions");
            assert!(table.arity().is_some(), "{kind} has ragged actions");
        }
    }
}
