//! Spec and screenshot reconciliation over a temporary wdio tree.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use terra_canon::{CollectMode, ScreenshotIndex};
use terra_carton::{Flavor, Settings};
use terra_patina::{
    find_unused_screenshots, navigate_to_usage, screenshot_usages, Linter, NavigationError,
    RuleRegistry, UnusedReason,
};

const BUTTON_SPEC: &str = "describe('Button', () => {
  it('default', () => {
    Terra.validates.element();
    Terra.validates.element('hovered');
  });
});
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn reference(root: &Path, spec_folder: &str, name: &str) {
    write(
        root,
        &format!("__snapshots__/reference/en/chrome_huge/{spec_folder}/{name}"),
        "png",
    );
}

/// `tests/wdio` with one spec, two used screenshots, one stale one and an orphan.
fn fixture() -> (TempDir, ScreenshotIndex) {
    let dir = TempDir::new().unwrap();
    let wdio = dir.path().join("tests/wdio");
    write(&wdio, "Button-spec.js", BUTTON_SPEC);
    reference(&wdio, "Button-spec", "Button[default].png");
    reference(&wdio, "Button-spec", "Button[hovered].png");
    reference(&wdio, "Button-spec", "Button[stale].png");
    reference(&wdio, "Orphan-spec", "Orphan[default].png");
    write(
        &wdio,
        "__snapshots__/latest/en/chrome_huge/Button-spec/Button[hovered].png",
        "png",
    );
    let index = ScreenshotIndex::scan(&wdio, Flavor::Toolkit);
    (dir, index)
}

#[test]
fn resolved_names_collect_their_screenshots() {
    let (_dir, index) = fixture();
    let usages = screenshot_usages(BUTTON_SPEC, "Button-spec.js", Flavor::Toolkit);
    assert_eq!(usages.len(), 2);

    for usage in &usages {
        let references = index.collect("Button-spec", &usage.name, CollectMode::ReferenceOnly);
        assert_eq!(references.len(), 1, "{}", usage.name);
    }
    let all = index.collect("Button-spec", "Button[hovered].png", CollectMode::AllVariants);
    assert_eq!(all.len(), 2);
}

#[test]
fn unused_screenshots() {
    let (_dir, index) = fixture();
    let unused = find_unused_screenshots(&index, &Settings::default());
    let found: Vec<(&str, &str, UnusedReason)> = unused
        .iter()
        .map(|u| (u.spec_id, u.name, u.reason))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Button-spec", "Button[stale].png", UnusedReason::NoLinkedValidation),
            ("Orphan-spec", "Orphan[default].png", UnusedReason::NoSpecFile),
        ]
    );
}

#[test]
fn unused_screenshots_can_be_turned_off() {
    let (_dir, index) = fixture();
    let mut settings = Settings::default();
    settings.inspections.unused_screenshots = false;
    assert!(find_unused_screenshots(&index, &settings).is_empty());
}

#[test]
fn navigate_to_validation() {
    let (dir, index) = fixture();
    let screenshot = index
        .collect("Button-spec", "Button[hovered].png", CollectMode::ReferenceOnly)[0]
        .clone();

    let target = navigate_to_usage(&index, &screenshot).unwrap();
    assert_eq!(target.spec_file, dir.path().join("tests/wdio/Button-spec.js"));
    assert_eq!((target.line, target.column), (4, 29));
    assert_eq!(
        &BUTTON_SPEC[target.start as usize..target.end as usize],
        "'hovered'"
    );
}

#[test]
fn navigate_errors() {
    let (_dir, index) = fixture();
    let stale = index
        .collect("Button-spec", "Button[stale].png", CollectMode::ReferenceOnly)[0]
        .clone();
    assert_eq!(
        navigate_to_usage(&index, &stale).unwrap_err(),
        NavigationError::NoLinkedValidation {
            name: "Button[stale].png".to_string()
        }
    );

    let orphan = index
        .collect("Orphan-spec", "Orphan[default].png", CollectMode::ReferenceOnly)[0]
        .clone();
    let err = navigate_to_usage(&index, &orphan).unwrap_err();
    assert_eq!(
        err.to_string(),
        "There is no spec file available to navigate to for Orphan-spec."
    );
}

#[test]
fn missing_screenshot_against_scanned_tree() {
    let (_dir, index) = fixture();
    let source = format!("{BUTTON_SPEC}describe('Button', () => {{ Terra.validates.element('gone'); }});\n");

    let mut registry = RuleRegistry::new();
    registry.register(Box::new(terra_patina::rules::screenshot::MissingScreenshot));
    let linter = Linter::with_registry(registry).with_screenshots(Some(Arc::new(index)));

    let result = linter.lint_spec(&source, "Button-spec.js");
    assert_eq!(result.error_count, 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(
        &source[diagnostic.start as usize..diagnostic.end as usize],
        "'gone'"
    );
}

#[test]
fn default_name_round_trip() {
    let dir = TempDir::new().unwrap();
    let wdio = dir.path().join("test/wdio");
    reference(&wdio, "MySpec-spec", "My_Spec[default].png");
    let index = ScreenshotIndex::scan(&wdio, Flavor::Toolkit);

    let source = "describe('My Spec', () => { Terra.validates.screenshot(); });";
    let usages = screenshot_usages(source, "MySpec-spec.js", Flavor::Toolkit);
    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].name, "My_Spec[default].png");

    let matches = index.collect("MySpec-spec", &usages[0].name, CollectMode::AllVariants);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].path.ends_with("MySpec-spec/My_Spec[default].png"));
}
