//! File operations on screenshot groups.
//!
//! All operations work on the files of one [`ScreenshotGroup`] and keep going
//! after a single file fails; failures are reported in the [`ActionReport`].

use std::fs;
use std::path::{Path, PathBuf};

use terra_carton::naming::SCREENSHOT_EXTENSION;

use crate::error::{ScreenshotError, ScreenshotResult};
use crate::folders::Variant;
use crate::index::ScreenshotGroup;

/// Outcome of a file operation over several screenshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Files the operation produced or removed
    pub succeeded: Vec<PathBuf>,
    /// Files the operation could not process
    pub failed: Vec<PathBuf>,
}

impl ActionReport {
    /// Check if every file was processed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validate a new screenshot name and append `.png` when missing.
pub fn validate_new_name(current: &str, new_name: &str) -> ScreenshotResult<String> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(ScreenshotError::BlankName);
    }

    let current_stem = current.strip_suffix(SCREENSHOT_EXTENSION).unwrap_or(current);
    let new_stem = new_name.strip_suffix(SCREENSHOT_EXTENSION).unwrap_or(new_name);
    if new_stem.is_empty() {
        return Err(ScreenshotError::BlankName);
    }
    if new_stem == current_stem {
        return Err(ScreenshotError::UnchangedName(current.to_string()));
    }

    Ok(format!("{new_stem}{SCREENSHOT_EXTENSION}"))
}

/// Rename every reference image of `group` to `new_name`.
///
/// Nothing is renamed unless all reference files are writable and no file
/// with the new name exists next to any of them.
pub fn rename_screenshots(group: &ScreenshotGroup<'_>, new_name: &str) -> ScreenshotResult<ActionReport> {
    let new_name = validate_new_name(group.name, new_name)?;

    if group.references.is_empty() {
        return Err(ScreenshotError::NothingToProcess {
            variant: Variant::Reference.dir_name(),
            name: group.name.to_string(),
        });
    }

    let non_writable: Vec<PathBuf> = group
        .references
        .iter()
        .filter(|f| !is_writable(&f.path))
        .map(|f| f.path.clone())
        .collect();
    if !non_writable.is_empty() {
        return Err(ScreenshotError::NonWritable(non_writable));
    }

    if let Some(existing) = group
        .references
        .iter()
        .map(|f| f.path.with_file_name(&new_name))
        .find(|target| target.exists())
    {
        return Err(ScreenshotError::TargetExists(existing));
    }

    let mut report = ActionReport::default();
    for reference in &group.references {
        let target = reference.path.with_file_name(&new_name);
        match fs::rename(&reference.path, &target) {
            Ok(()) => {
                tracing::info!("Renamed {} to {}", reference.path.display(), new_name);
                report.succeeded.push(target);
            }
            Err(e) => {
                tracing::warn!("Could not rename {}: {}", reference.path.display(), e);
                report.failed.push(reference.path.clone());
            }
        }
    }
    Ok(report)
}

/// Delete every reference image of `group`.
pub fn delete_screenshots(group: &ScreenshotGroup<'_>) -> ActionReport {
    let mut report = ActionReport::default();
    for reference in &group.references {
        match remove_if_exists(&reference.path) {
            Ok(()) => {
                tracing::info!("Deleted {}", reference.path.display());
                report.succeeded.push(reference.path.clone());
            }
            Err(e) => {
                tracing::warn!("Could not delete {}: {}", reference.path.display(), e);
                report.failed.push(reference.path.clone());
            }
        }
    }
    report
}

/// Replace reference images with their latest counterparts.
///
/// For each latest image with a reference at the same relative path, the
/// reference is removed, the latest image copied into its place and the
/// matching diff image deleted.
pub fn replace_reference_with_latest(group: &ScreenshotGroup<'_>) -> ScreenshotResult<ActionReport> {
    if group.latests.is_empty() {
        return Err(ScreenshotError::NothingToProcess {
            variant: Variant::Latest.dir_name(),
            name: group.name.to_string(),
        });
    }

    let mut report = ActionReport::default();
    for latest in &group.latests {
        let Some(reference) = group
            .references
            .iter()
            .find(|r| r.variant_relative_path() == latest.variant_relative_path())
        else {
            tracing::debug!("No reference for {}", latest.path.display());
            continue;
        };

        let replaced = remove_if_exists(&reference.path)
            .and_then(|()| fs::copy(&latest.path, &reference.path).map(|_| ()));
        if let Err(e) = replaced {
            tracing::warn!("Could not replace {}: {}", reference.path.display(), e);
            report.failed.push(reference.path.clone());
            continue;
        }
        tracing::info!(
            "Replaced {} with {}",
            reference.path.display(),
            latest.path.display()
        );
        report.succeeded.push(reference.path.clone());

        let diff = latest.counterpart_path(Variant::Diff);
        if let Err(e) = remove_if_exists(&diff) {
            tracing::warn!("Could not delete {}: {}", diff.display(), e);
            report.failed.push(diff);
        }
    }
    Ok(report)
}

fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
