//! Configuration for Terra analysis.
//!
//! A [`Settings`] value is read-only once built. Analysis passes take an
//! `Arc<Settings>` snapshot from a [`SettingsHandle`]; applying new settings
//! swaps the whole snapshot and never touches one that is already handed out.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Terra testing library a project is built on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// `terra-toolkit`
    #[default]
    Toolkit,
    /// `@cerner/terra-functional-testing`
    FunctionalTesting,
}

impl Flavor {
    /// Package name whose presence in `package.json` selects [`Flavor::FunctionalTesting`].
    pub const FUNCTIONAL_TESTING_PACKAGE: &'static str = "@cerner/terra-functional-testing";

    /// Name of the mismatch tolerance option in validation calls.
    #[inline]
    pub const fn tolerance_property(self) -> &'static str {
        match self {
            Flavor::Toolkit => "misMatchTolerance",
            Flavor::FunctionalTesting => "mismatchTolerance",
        }
    }

    /// Whether screenshot contexts start with a theme directory.
    #[inline]
    pub const fn has_theme_segment(self) -> bool {
        matches!(self, Flavor::FunctionalTesting)
    }

    /// Whether a validation without a name still produces a screenshot file.
    #[inline]
    pub const fn supports_default_name(self) -> bool {
        matches!(self, Flavor::Toolkit)
    }
}

/// Per-check switches. Every check is on unless turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionToggles {
    pub empty_viewports: bool,
    pub unsupported_viewports: bool,
    pub duplicate_viewports: bool,
    pub viewports_ascending_order: bool,
    pub non_array_viewports: bool,
    pub mismatch_tolerance_range: bool,
    pub mismatch_tolerance_numeric: bool,
    pub mismatch_tolerance_threshold: bool,
    pub missing_screenshots: bool,
    pub duplicate_screenshot_names: bool,
    pub unused_screenshots: bool,
}

impl Default for InspectionToggles {
    fn default() -> Self {
        Self {
            empty_viewports: true,
            unsupported_viewports: true,
            duplicate_viewports: true,
            viewports_ascending_order: true,
            non_array_viewports: true,
            mismatch_tolerance_range: true,
            mismatch_tolerance_numeric: true,
            mismatch_tolerance_threshold: true,
            missing_screenshots: true,
            duplicate_screenshot_names: true,
            unused_screenshots: true,
        }
    }
}

/// Terra configuration (`terra.config.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Candidate wdio root directories, relative to the project root
    pub wdio_root_paths: Vec<String>,
    /// Ask before deleting screenshots
    pub show_confirmation_before_screenshot_deletion: bool,
    /// Mismatch tolerance values above this are reported
    pub max_mismatch_tolerance: f64,
    /// Forced flavor; detected from `package.json` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<Flavor>,
    /// Individual check switches
    pub inspections: InspectionToggles,
}

impl Settings {
    /// Default wdio root candidates.
    pub const DEFAULT_WDIO_ROOT_PATHS: [&'static str; 2] = ["test/wdio", "tests/wdio"];
    /// Default maximum mismatch tolerance.
    pub const DEFAULT_MAX_MISMATCH_TOLERANCE: f64 = 0.5;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wdio_root_paths: Self::DEFAULT_WDIO_ROOT_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            show_confirmation_before_screenshot_deletion: true,
            max_mismatch_tolerance: Self::DEFAULT_MAX_MISMATCH_TOLERANCE,
            flavor: None,
            inspections: InspectionToggles::default(),
        }
    }
}

/// Shared holder of the current settings snapshot.
#[derive(Debug, Default)]
pub struct SettingsHandle {
    current: RwLock<Arc<Settings>>,
}

impl SettingsHandle {
    /// Create a handle holding `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Get the current snapshot.
    pub fn snapshot(&self) -> Arc<Settings> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the current snapshot. Snapshots already taken are unaffected.
    pub fn apply(&self, settings: Settings) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.wdio_root_paths, vec!["test/wdio", "tests/wdio"]);
        assert!(settings.show_confirmation_before_screenshot_deletion);
        assert_eq!(settings.max_mismatch_tolerance, 0.5);
        assert_eq!(settings.flavor, None);
        assert!(settings.inspections.duplicate_viewports);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "maxMismatchTolerance": 1.5,
                "flavor": "functional-testing",
                "inspections": { "viewportsAscendingOrder": false }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.max_mismatch_tolerance, 1.5);
        assert_eq!(settings.flavor, Some(Flavor::FunctionalTesting));
        assert!(!settings.inspections.viewports_ascending_order);
        assert!(settings.inspections.empty_viewports);
        assert_eq!(settings.wdio_root_paths.len(), 2);
    }

    #[test]
    fn test_apply_replaces_snapshot() {
        let handle = SettingsHandle::new(Settings::default());
        let before = handle.snapshot();

        handle.apply(Settings {
            wdio_root_paths: vec!["e2e".into()],
            ..Settings::default()
        });

        assert_eq!(before.wdio_root_paths.len(), 2);
        assert_eq!(handle.snapshot().wdio_root_paths, vec!["e2e"]);
    }

    #[test]
    fn test_flavor_properties() {
        assert_eq!(Flavor::Toolkit.tolerance_property(), "misMatchTolerance");
        assert_eq!(
            Flavor::FunctionalTesting.tolerance_property(),
            "mismatchTolerance"
        );
        assert!(Flavor::FunctionalTesting.has_theme_segment());
        assert!(Flavor::Toolkit.supports_default_name());
    }
}
