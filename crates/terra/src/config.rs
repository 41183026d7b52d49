//! Configuration file loading for terra.
//!
//! Reads `terra.config.json` from the project root and works out what every
//! command needs from it: the flavor and the wdio root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use terra_canon::{detect_flavor, locate_wdio_root};
use terra_carton::{Flavor, Settings, SettingsHandle};

/// Name of the configuration file in the project root.
pub const CONFIG_FILE_NAME: &str = "terra.config.json";

/// Load `terra.config.json` from the given directory.
///
/// A missing file yields the defaults; an unreadable or invalid one yields the
/// defaults and a warning.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                Settings::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            Settings::default()
        }
    }
}

/// Everything a command knows about the project it runs in.
pub struct Project {
    pub root: PathBuf,
    pub settings: Arc<Settings>,
    pub flavor: Flavor,
    /// First configured wdio root that exists
    pub wdio_root: Option<PathBuf>,
}

impl Project {
    /// Load the project at `dir`, or at the current directory.
    pub fn load(dir: Option<&Path>) -> Self {
        let root = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

        let handle = SettingsHandle::new(load_settings(&root));
        let settings = handle.snapshot();
        let flavor = settings.flavor.unwrap_or_else(|| detect_flavor(&root));
        let wdio_root = locate_wdio_root(&root, &settings.wdio_root_paths);

        tracing::debug!(
            "Project {} ({:?}), wdio root {:?}",
            root.display(),
            flavor,
            wdio_root
        );

        Self {
            root,
            settings,
            flavor,
            wdio_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "maxMismatchTolerance": 1.5, "inspections": { "unusedScreenshots": false } }"#,
        )
        .unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings.max_mismatch_tolerance, 1.5);
        assert!(!settings.inspections.unused_screenshots);
        assert!(settings.inspections.missing_screenshots);
    }

    #[test]
    fn test_invalid_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_project() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tests/wdio")).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "flavor": "functional-testing" }"#,
        )
        .unwrap();

        let project = Project::load(Some(dir.path()));
        assert_eq!(project.flavor, Flavor::FunctionalTesting);
        assert_eq!(project.wdio_root, Some(dir.path().join("tests/wdio")));
    }
}
