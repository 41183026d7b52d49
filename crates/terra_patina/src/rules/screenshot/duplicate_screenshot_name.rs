//! terra/duplicate-screenshot-name
//!
//! Disallow validations in one spec file that resolve to the same screenshot.
//! Every member of a duplicate group is reported.
//!
//! terra-functional-testing rejects duplicate names, so they are errors there
//! and only `Terra.validates.*` calls take part. With terra-toolkit the later
//! screenshot silently overwrites the earlier one, which is reported as a
//! warning.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! describe('Button', () => {
//!   it('a', () => { Terra.validates.element('default'); });
//!   it('b', () => { Terra.validates.element('default'); });
//! });
//! ```

use oxc_span::Span;
use terra_carton::{Flavor, FxHashMap, SmallVec};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::first_string_literal;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/duplicate-screenshot-name",
    description: "Disallow validations resolving to the same screenshot",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Warning,
};

const TOOLKIT_MESSAGE: &str = "There is more than one assertion specified with this screenshot name.";
const FUNCTIONAL_TESTING_MESSAGE: &str = "There is more than one assertion specified with this screenshot name. That is not allowed in terra-functional-testing.";

/// Disallow duplicate screenshot names
pub struct DuplicateScreenshotName;

impl DuplicateScreenshotName {
    fn takes_part(flavor: Flavor, call: &TerraCall<'_>) -> bool {
        if call.statement.is_none() || !call.kind.is_screenshot_validation() {
            return false;
        }
        match flavor {
            Flavor::Toolkit => true,
            Flavor::FunctionalTesting => call.kind.is_terra_validates(),
        }
    }

    /// The name literal when present, the callee otherwise.
    fn anchor(call: &TerraCall<'_>) -> Span {
        first_string_literal(call.call).map_or_else(|| call.method_span(), |lit| lit.span)
    }
}

impl Rule for DuplicateScreenshotName {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_spec(&self, ctx: &mut LintContext<'_>, spec: &SpecModel<'_>) {
        if !ctx.inspections().duplicate_screenshot_names {
            return;
        }
        let resolver = ctx.resolver();
        let flavor = ctx.flavor;

        let mut groups: FxHashMap<String, SmallVec<[Span; 2]>> = FxHashMap::default();
        let mut order: Vec<String> = Vec::new();
        for call in spec.calls.iter().filter(|c| Self::takes_part(flavor, c)) {
            let Some(name) = resolver.resolve(call) else {
                continue;
            };
            let spans = groups.entry(name.clone()).or_default();
            if spans.is_empty() {
                order.push(name);
            }
            spans.push(Self::anchor(call));
        }

        let (severity, message) = match flavor {
            Flavor::Toolkit => (Severity::Warning, TOOLKIT_MESSAGE),
            Flavor::FunctionalTesting => (Severity::Error, FUNCTIONAL_TESTING_MESSAGE),
        };
        for name in &order {
            let Some(spans) = groups.get(name).filter(|spans| spans.len() > 1) else {
                continue;
            };
            tracing::debug!("Screenshot name {} is used {} times", name, spans.len());
            for span in spans {
                ctx.report_with_severity(severity, message, *span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str, flavor: Flavor) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(DuplicateScreenshotName));
        Linter::with_registry(registry)
            .with_flavor(flavor)
            .lint_spec(source, "test-spec.js")
    }

    fn reported<'s>(source: &'s str, result: &LintResult) -> Vec<&'s str> {
        result
            .diagnostics
            .iter()
            .map(|d| &source[d.start as usize..d.end as usize])
            .collect()
    }

    #[test]
    fn test_toolkit_groups_by_resolved_name() {
        let source = r#"
describe('Button', () => {
  Terra.it.matchesScreenshot();
  it('a', () => {
    Terra.validates.element('[default] state');
    Terra.validates.element('hovered');
  });
  describe('Nested', () => {
    Terra.validates.element('hovered');
  });
  Terra.validates.screenshot('hovered');
});
"#;
        let result = lint(source, Flavor::Toolkit);
        assert_eq!(result.warning_count, 4);
        assert_eq!(
            reported(source, &result),
            vec![
                "Terra.it.matchesScreenshot",
                "'[default] state'",
                "'hovered'",
                "'hovered'",
            ]
        );
        assert!(result.diagnostics.iter().all(|d| d.message == TOOLKIT_MESSAGE));
    }

    #[test]
    fn test_functional_testing_ignores_terra_it() {
        let source = r#"
describe('Button', () => {
  Terra.it.matchesScreenshot('same');
  it('a', () => {
    Terra.validates.element('same');
    Terra.validates.screenshot('other');
  });
  describe('Elsewhere', () => {
    Terra.validates.screenshot('other');
  });
});
"#;
        let result = lint(source, Flavor::FunctionalTesting);
        assert_eq!(result.error_count, 2);
        assert_eq!(reported(source, &result), vec!["'other'", "'other'"]);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message == FUNCTIONAL_TESTING_MESSAGE));
    }

    #[test]
    fn test_unique_names() {
        let result = lint(
            "describe('A', () => { Terra.validates.element('x'); Terra.validates.element('y'); });",
            Flavor::Toolkit,
        );
        assert!(!result.has_diagnostics());
    }
}
