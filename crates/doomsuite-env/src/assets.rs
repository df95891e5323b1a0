//! Scenario asset resolution.
//!
//! Every scenario ships one configuration file and one level file per
//! task, laid out as:
//!
//! ```text
//! <maps_root>/<scenario>/<scenario>.cfg
//! <maps_root>/<scenario>/<task>.wad
//! ```

use std::path::{Path, PathBuf};

/// Directory searched when no maps root is configured.
pub const DEFAULT_MAPS_ROOT: &str = "maps";

/// Task used when none is given.
pub const DEFAULT_TASK: &str = "default";

/// Resolved configuration and level paths handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    /// Scenario configuration (`.cfg`).
    pub cfg: PathBuf,
    /// Level asset (`.wad`).
    pub wad: PathBuf,
}

impl AssetPaths {
    /// Apply the naming convention under `maps_root`.
    pub fn resolve(maps_root: &Path, scenario: &str, task: &str) -> Self {
        let dir = maps_root.join(scenario);
        Self {
            cfg: dir.join(format!("{scenario}.cfg")),
            wad: dir.join(format!("{task}.wad")),
        }
    }
}

/// How an environment finds its assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetSource {
    /// Resolve by convention under a maps directory.
    Convention {
        /// Root holding one directory per scenario.
        maps_root: PathBuf,
    },
    /// Use these paths as given.
    Explicit(AssetPaths),
}

impl Default for AssetSource {
    fn default() -> Self {
        Self::Convention {
            maps_root: PathBuf::from(DEFAULT_MAPS_ROOT),
        }
    }
}

impl AssetSource {
    /// Paths for `scenario`/`task` under this source.
    pub fn paths(&self, scenario: &str, task: &str) -> AssetPaths {
        match self {
            Self::Convention { maps_root } => AssetPaths::resolve(maps_root, scenario, task),
            Self::Explicit(paths) => paths.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convention_layout() {
        let paths = AssetPaths::resolve(Path::new("/opt/maps"), "RunAndGun", "obstacles");
        assert_eq!(paths.cfg, PathBuf::from("/opt/maps/RunAndGun/RunAndGun.cfg"));
        assert_eq!(paths.wad, PathBuf::from("/opt/maps/RunAndGun/obstacles.wad"));
    }

    #[test]
    fn explicit_paths_ignore_names() {
        let explicit = AssetPaths {
            cfg: PathBuf::from("a.cfg"),
            wad: PathBuf::from("b.wad"),
        };
        let source = AssetSource::Explicit(explicit.clone());
        assert_eq!(source.paths("DefendTheCenter", "default"), explicit);
    }

    #[test]
    fn default_source_uses_maps_dir() {
        let paths = AssetSource::default().paths("DefendTheCenter", DEFAULT_TASK);
        assert_eq!(
            paths.wad,
            PathBuf::from("maps/DefendTheCenter/default.wad")
        );
    }
}
