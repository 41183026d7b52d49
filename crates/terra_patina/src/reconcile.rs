//! Screenshot to spec reconciliation.
//!
//! The rules go from a validation call to its screenshot. This module goes
//! the other way: from screenshots on disk to the calls that produce them,
//! to find unused screenshots and to navigate to a screenshot's validation.

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use terra_canon::{spec_file_for, ScreenshotFile, ScreenshotIndex};
use terra_carton::{Flavor, FxHashSet, LineIndex, Settings};

use crate::error::{NavigationError, NavigationResult};
use crate::matcher::first_string_literal;
use crate::resolver::ScreenshotNameResolver;
use crate::visitor::SpecModel;

/// A validation call and the screenshot name it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotUsage {
    pub name: String,
    /// Start of the name literal, or of the callee for default names
    pub start: u32,
    pub end: u32,
}

/// Every resolvable screenshot validation of a spec source, in source order.
pub fn screenshot_usages(source: &str, filename: &str, flavor: Flavor) -> Vec<ScreenshotUsage> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(filename).unwrap_or_default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Vec::new();
    }
    let program = allocator.alloc(ret.program);
    let spec = SpecModel::build(program);
    let resolver = ScreenshotNameResolver::new(flavor, source);

    spec.calls
        .iter()
        .filter(|call| call.kind.is_screenshot_validation() && call.statement.is_some())
        .filter_map(|call| {
            let name = resolver.resolve(call)?;
            let span = first_string_literal(call.call).map_or_else(|| call.method_span(), |lit| lit.span);
            Some(ScreenshotUsage {
                name,
                start: span.start,
                end: span.end,
            })
        })
        .collect()
}

fn read_usages(spec_file: &Path, flavor: Flavor) -> Option<Vec<ScreenshotUsage>> {
    match std::fs::read_to_string(spec_file) {
        Ok(source) => Some(screenshot_usages(
            &source,
            &spec_file.to_string_lossy(),
            flavor,
        )),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", spec_file.display(), e);
            None
        }
    }
}

/// Why a screenshot is considered unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedReason {
    /// The spec the screenshot belongs to does not exist
    NoSpecFile,
    /// No validation of the spec resolves to the screenshot's name
    NoLinkedValidation,
}

/// Reference screenshots nothing uses.
#[derive(Debug, Clone)]
pub struct UnusedScreenshot<'a> {
    pub spec_id: &'a str,
    pub name: &'a str,
    pub references: Vec<&'a ScreenshotFile>,
    pub reason: UnusedReason,
}

/// Find reference screenshots whose spec is gone, or that no validation of
/// their spec resolves to.
pub fn find_unused_screenshots<'a>(
    index: &'a ScreenshotIndex,
    settings: &Settings,
) -> Vec<UnusedScreenshot<'a>> {
    if !settings.inspections.unused_screenshots {
        return Vec::new();
    }

    let mut unused = Vec::new();
    for spec in index.specs() {
        let used: Option<FxHashSet<String>> = match &spec.spec_file {
            Some(spec_file) => match read_usages(spec_file, index.flavor()) {
                Some(usages) => Some(usages.into_iter().map(|u| u.name).collect()),
                // Unreadable specs are not reported
                None => continue,
            },
            None => None,
        };

        for group in spec.screenshots.into_iter().filter(|g| !g.references.is_empty()) {
            let reason = match &used {
                None => UnusedReason::NoSpecFile,
                Some(names) if !names.contains(group.name) => UnusedReason::NoLinkedValidation,
                Some(_) => continue,
            };
            unused.push(UnusedScreenshot {
                spec_id: spec.spec_id,
                name: group.name,
                references: group.references,
                reason,
            });
        }
    }

    tracing::debug!("Found {} unused screenshots", unused.len());
    unused
}

/// Position of the validation producing a screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageTarget {
    pub spec_file: PathBuf,
    pub start: u32,
    pub end: u32,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

/// Find the first validation in the screenshot's spec file that produces it.
pub fn navigate_to_usage(
    index: &ScreenshotIndex,
    screenshot: &ScreenshotFile,
) -> NavigationResult<UsageTarget> {
    let no_spec_file = || NavigationError::NoSpecFile {
        spec_id: screenshot.spec_id.clone(),
    };

    let spec_file = spec_file_for(index.wdio_root(), &screenshot.spec_id).ok_or_else(no_spec_file)?;
    let source = std::fs::read_to_string(&spec_file).map_err(|e| {
        tracing::warn!("Failed to read {}: {}", spec_file.display(), e);
        no_spec_file()
    })?;

    let usage = screenshot_usages(&source, &spec_file.to_string_lossy(), index.flavor())
        .into_iter()
        .find(|usage| usage.name == screenshot.name)
        .ok_or_else(|| NavigationError::NoLinkedValidation {
            name: screenshot.name.clone(),
        })?;

    let (line, column) = LineIndex::new(&source).line_col(usage.start);
    Ok(UsageTarget {
        spec_file,
        start: usage.start,
        end: usage.end,
        line,
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usages() {
        let source = r#"
describe('Button', () => {
  it('a', () => {
    Terra.validates.element();
    Terra.validates.screenshot('hovered');
    Terra.validates.accessibility();
  });
});
Terra.validates.element('unresolvable');
"#;
        let usages = screenshot_usages(source, "Button-spec.js", Flavor::Toolkit);
        let found: Vec<(&str, &str)> = usages
            .iter()
            .map(|u| (u.name.as_str(), &source[u.start as usize..u.end as usize]))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Button[default].png", "Terra.validates.element"),
                ("Button[hovered].png", "'hovered'"),
            ]
        );
    }
}
