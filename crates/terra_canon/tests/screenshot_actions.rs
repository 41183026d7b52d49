//! Screenshot file operation tests over a temporary wdio tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use terra_canon::{
    delete_screenshots, rename_screenshots, replace_reference_with_latest, ScreenshotError,
    ScreenshotIndex, Variant,
};
use terra_carton::Flavor;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Two contexts for `Button[default].png`, one of which has a newer run.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "__snapshots__/reference/en/chrome_huge/Button-spec/Button[default].png", "ref-huge");
    write(root, "__snapshots__/reference/en/chrome_tiny/Button-spec/Button[default].png", "ref-tiny");
    write(root, "__snapshots__/latest/en/chrome_huge/Button-spec/Button[default].png", "latest-huge");
    write(root, "__snapshots__/diff/en/chrome_huge/Button-spec/Button[default].png", "diff-huge");
    dir
}

#[test]
fn rename_moves_every_reference() {
    let dir = fixture();
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("Button-spec", "Button[default].png").unwrap();

    let report = rename_screenshots(&group, "Button[primary]").unwrap();
    assert!(report.is_complete());
    assert_eq!(report.succeeded.len(), 2);

    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let renamed = index.group("Button-spec", "Button[primary].png").unwrap();
    assert_eq!(renamed.references.len(), 2);
    // Latest and diff images keep their names
    let old = index.group("Button-spec", "Button[default].png").unwrap();
    assert!(old.references.is_empty());
    assert_eq!(old.latests.len(), 1);
}

#[test]
fn rename_rejects_unchanged_name() {
    let dir = fixture();
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("Button-spec", "Button[default].png").unwrap();

    let err = rename_screenshots(&group, "Button[default]").unwrap_err();
    assert!(matches!(err, ScreenshotError::UnchangedName(_)));
}

#[test]
fn rename_refuses_to_overwrite_existing_screenshot() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("__snapshots__/reference/en/chrome_huge/X-spec/a.png");
    let b = dir.path().join("__snapshots__/reference/en/chrome_huge/X-spec/b.png");
    write(dir.path(), "__snapshots__/reference/en/chrome_huge/X-spec/a.png", "AAAA");
    write(dir.path(), "__snapshots__/reference/en/chrome_huge/X-spec/b.png", "BBBB");

    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("X-spec", "a.png").unwrap();

    match rename_screenshots(&group, "b") {
        Err(ScreenshotError::TargetExists(path)) => assert_eq!(path, b),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs::read_to_string(&a).unwrap(), "AAAA");
    assert_eq!(fs::read_to_string(&b).unwrap(), "BBBB");
}

#[cfg(unix)]
#[test]
fn rename_requires_writable_files() {
    let dir = fixture();
    let readonly =
        dir.path().join("__snapshots__/reference/en/chrome_tiny/Button-spec/Button[default].png");
    let mut permissions = fs::metadata(&readonly).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&readonly, permissions).unwrap();

    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("Button-spec", "Button[default].png").unwrap();

    match rename_screenshots(&group, "Other") {
        Err(ScreenshotError::NonWritable(paths)) => assert_eq!(paths, vec![readonly]),
        other => panic!("unexpected result: {other:?}"),
    }
    // Nothing was renamed
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    assert!(index.group("Button-spec", "Other.png").is_none());
}

#[test]
fn delete_removes_references_only() {
    let dir = fixture();
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("Button-spec", "Button[default].png").unwrap();

    let report = delete_screenshots(&group);
    assert_eq!(report.succeeded.len(), 2);

    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let stats = index.statistics();
    assert_eq!(stats.reference_count, 0);
    assert_eq!(stats.latest_count, 1);
    assert_eq!(stats.diff_count, 1);
}

#[test]
fn replace_reference_with_latest_copies_and_drops_diff() {
    let dir = fixture();
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("Button-spec", "Button[default].png").unwrap();

    let report = replace_reference_with_latest(&group).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.succeeded.len(), 1);

    let huge = dir
        .path()
        .join("__snapshots__/reference/en/chrome_huge/Button-spec/Button[default].png");
    let tiny = dir
        .path()
        .join("__snapshots__/reference/en/chrome_tiny/Button-spec/Button[default].png");
    assert_eq!(fs::read_to_string(huge).unwrap(), "latest-huge");
    assert_eq!(fs::read_to_string(tiny).unwrap(), "ref-tiny");

    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    assert_eq!(index.statistics().diff_count, 0);
    // The latest image stays where it was
    assert_eq!(
        index
            .files()
            .iter()
            .filter(|f| f.variant == Variant::Latest)
            .count(),
        1
    );
}

#[test]
fn replace_without_latest_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "__snapshots__/reference/en/chrome_huge/A-spec/a.png", "ref");
    let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
    let group = index.group("A-spec", "a.png").unwrap();

    assert!(matches!(
        replace_reference_with_latest(&group),
        Err(ScreenshotError::NothingToProcess { .. })
    ));
}
