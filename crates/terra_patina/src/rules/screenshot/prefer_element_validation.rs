//! terra/prefer-element-validation
//!
//! Prefer element validations over screenshot-only ones. An element
//! validation also runs the accessibility checks.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.validates.screenshot('default');
//! Terra.it.matchesScreenshot('default');
//! ```
//!
//! ### Valid
//! ```js
//! Terra.validates.element('default');
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::CallKind;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/prefer-element-validation",
    description: "Prefer element validation over screenshot validation",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Warning,
};

/// Prefer element validation over screenshot validation
pub struct PreferElementValidation;

impl Rule for PreferElementValidation {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if call.statement.is_none() {
            return;
        }
        let message = match call.kind {
            CallKind::ItMatchesScreenshot => {
                "Terra.it.validatesElement is preferred over Terra.it.matchesScreenshot."
            }
            CallKind::ValidatesScreenshot => {
                "Terra.validates.element is preferred over Terra.validates.screenshot."
            }
            _ => return,
        };
        ctx.warn(message, call.function_name_span());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(PreferElementValidation));
        Linter::with_registry(registry)
    }

    #[test]
    fn test_screenshot_validations() {
        let source = r#"
describe('Test', () => {
  Terra.it.matchesScreenshot();
  Terra.it.validatesElement();
  it('case', () => {
    Terra.validates.screenshot('name');
    Terra.validates.element('name');
  });
});
"#;
        let result = create_linter().lint_spec(source, "test-spec.js");
        let reported: Vec<&str> = result
            .diagnostics
            .iter()
            .map(|d| &source[d.start as usize..d.end as usize])
            .collect();
        assert_eq!(reported, vec!["matchesScreenshot", "screenshot"]);
    }
}
