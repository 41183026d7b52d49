//! terra/require-screenshot-name
//!
//! terra-functional-testing has no default screenshot name, so
//! `Terra.validates.element` and `Terra.validates.screenshot` must be given a
//! name literal. Only applies to terra-functional-testing projects.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.validates.element({ selector: '#root' });
//! ```
//!
//! ### Valid
//! ```js
//! Terra.validates.element('default', { selector: '#root' });
//! ```

use terra_carton::Flavor;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::{first_string_literal, CallKind};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/require-screenshot-name",
    description: "Require a name for terra-functional-testing validations",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Error,
};

/// Require a screenshot name argument
pub struct RequireScreenshotName;

impl Rule for RequireScreenshotName {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if ctx.flavor != Flavor::FunctionalTesting || call.statement.is_none() {
            return;
        }
        if !matches!(
            call.kind,
            CallKind::ValidatesElement | CallKind::ValidatesScreenshot
        ) {
            return;
        }
        if first_string_literal(call.call).is_none() {
            ctx.error("The name argument must be specified.", call.method_span());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter(flavor: Flavor) -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(RequireScreenshotName));
        Linter::with_registry(registry).with_flavor(flavor)
    }

    const SOURCE: &str = r#"
it('case', () => {
  Terra.validates.element();
  Terra.validates.screenshot({ selector: '#root' });
  Terra.validates.element('named');
  Terra.validates.accessibility();
  Terra.it.validatesElement();
});
"#;

    #[test]
    fn test_functional_testing() {
        let result = create_linter(Flavor::FunctionalTesting).lint_spec(SOURCE, "test-spec.js");
        let reported: Vec<&str> = result
            .diagnostics
            .iter()
            .map(|d| &SOURCE[d.start as usize..d.end as usize])
            .collect();
        assert_eq!(
            reported,
            vec!["Terra.validates.element", "Terra.validates.screenshot"]
        );
    }

    #[test]
    fn test_toolkit_has_default_names() {
        let result = create_linter(Flavor::Toolkit).lint_spec(SOURCE, "test-spec.js");
        assert_eq!(result.error_count, 0);
    }
}
