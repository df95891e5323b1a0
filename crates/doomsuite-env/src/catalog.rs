//! Task catalogs: which tasks make up a difficulty level or a
//! continual-learning sequence.
//!
//! A catalog is two JSON documents. `levels.json` maps scenario name to
//! `"Level<N>"` to a task list:
//!
//! ```json
//! { "DefendTheCenter": { "Level0": ["default"], "Level1": ["gloomy", "mossy"] } }
//! ```
//!
//! `sequences.json` maps a sequence name to an ordered scenario → task
//! list mapping:
//!
//! ```json
//! { "CD4": { "DefendTheCenter": ["default", "gloomy"], "RunAndGun": ["default"] } }
//! ```
//!
//! Key order is preserved, so sequences replay in the order written.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use doomsuite_scenarios::{ScenarioKind, UnknownScenario};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;

/// File holding the per-scenario level table.
pub const LEVELS_FILE: &str = "levels.json";

/// File holding the named sequences.
pub const SEQUENCES_FILE: &str = "sequences.json";

/// Scenario name → task names.
pub type ScenarioTasks = IndexMap<String, Vec<String>>;

// ── CatalogError ───────────────────────────────────────────────────

/// Errors from loading or querying a [`TaskCatalog`].
#[derive(Debug)]
pub enum CatalogError {
    /// A catalog file could not be read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A catalog document is not valid JSON of the expected shape.
    Parse {
        /// Which document failed.
        document: &'static str,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The catalog names a scenario that does not exist.
    UnknownScenario(UnknownScenario),
    /// No such level for the scenario.
    UnknownLevel {
        /// Scenario looked up.
        scenario: String,
        /// Level number looked up.
        level: u32,
    },
    /// No such sequence.
    UnknownSequence {
        /// Sequence looked up.
        name: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading '{}': {source}", path.display()),
            Self::Parse { document, source } => write!(f, "parsing {document}: {source}"),
            Self::UnknownScenario(e) => write!(f, "{e}"),
            Self::UnknownLevel { scenario, level } => {
                write!(f, "scenario '{scenario}' has no Level{level}")
            }
            Self::UnknownSequence { name } => write!(f, "unknown sequence '{name}'"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::UnknownScenario(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownScenario> for CatalogError {
    fn from(e: UnknownScenario) -> Self {
        Self::UnknownScenario(e)
    }
}

// ── TaskCatalog ────────────────────────────────────────────────────

/// Level and sequence tables for external training drivers.
///
/// The environment itself never reads a catalog; drivers load one
/// explicitly and pass it where needed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCatalog {
    /// Scenario → `"Level<N>"` → tasks.
    #[serde(default)]
    pub levels: IndexMap<String, IndexMap<String, Vec<String>>>,
    /// Sequence → scenario → tasks.
    #[serde(default)]
    pub sequences: IndexMap<String, ScenarioTasks>,
}

impl TaskCatalog {
    /// Parse the two catalog documents.
    ///
    /// Every scenario named in either document must be a known
    /// [`ScenarioKind`].
    pub fn from_json(levels: &str, sequences: &str) -> Result<Self, CatalogError> {
        let catalog = Self {
            levels: serde_json::from_str(levels).map_err(|source| CatalogError::Parse {
                document: LEVELS_FILE,
                source,
            })?,
            sequences: serde_json::from_str(sequences).map_err(|source| {
                CatalogError::Parse {
                    document: SEQUENCES_FILE,
                    source,
                }
            })?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load [`LEVELS_FILE`] and [`SEQUENCES_FILE`] from `dir`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };
        Self::from_json(&read(LEVELS_FILE)?, &read(SEQUENCES_FILE)?)
    }

    /// Check that every scenario name resolves.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let names = self
            .levels
            .keys()
            .chain(self.sequences.values().flat_map(|s| s.keys()));
        for name in names {
            name.parse::<ScenarioKind>()?;
        }
        Ok(())
    }

    /// Tasks at difficulty `level` of `scenario`.
    pub fn tasks_by_level(&self, scenario: &str, level: u32) -> Result<&[String], CatalogError> {
        self.levels
            .get(scenario)
            .and_then(|levels| levels.get(&format!("Level{level}")))
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownLevel {
                scenario: scenario.to_string(),
                level,
            })
    }

    /// Ordered scenario → task mapping for sequence `name`.
    pub fn tasks_by_sequence(&self, name: &str) -> Result<&ScenarioTasks, CatalogError> {
        self.sequences
            .get(name)
            .ok_or_else(|| CatalogError::UnknownSequence {
                name: name.to_string(),
            })
    }

    /// One config per task of sequence `name`, in play order.
    ///
    /// Each config is `base` with its scenario and task replaced.
    pub fn sequence_configs(
        &self,
        name: &str,
        base: &EnvConfig,
    ) -> Result<Vec<EnvConfig>, CatalogError> {
        let mut configs = Vec::new();
        for (scenario, tasks) in self.tasks_by_sequence(name)? {
            let kind: ScenarioKind = scenario.parse()?;
            for task in tasks {
                let mut cfg = base.clone();
                cfg.scenario = kind;
                cfg.task = Some(task.clone());
                configs.push(cfg);
            }
        }
        Ok(configs)
    }
}
