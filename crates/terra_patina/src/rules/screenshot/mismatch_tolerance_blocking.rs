//! terra/mismatch-tolerance-blocking
//!
//! Report mismatch tolerances Terra rejects: numbers above 100, negated
//! values, and anything that is not a number.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! it('button', () => {
//!   Terra.validates.element('a', { misMatchTolerance: 101 });
//!   Terra.validates.element('b', { misMatchTolerance: -1 });
//!   Terra.validates.element('c', { misMatchTolerance: '0.5' });
//! });
//! ```

use oxc_ast::ast::Expression;
use oxc_span::GetSpan;
use oxc_syntax::operator::UnaryOperator;

use super::options::tolerance_property;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};
use terra_carton::Flavor;

static META: RuleMeta = RuleMeta {
    name: "terra/mismatch-tolerance-blocking",
    description: "Disallow mismatch tolerances outside of 0-100 and non-numeric ones",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Error,
};

const OUT_OF_RANGE: &str = "The mismatch tolerance should be a number between 0 and 100.";

fn non_numeric_message(flavor: Flavor) -> String {
    format!(
        "The {} property accepts only numeric value between 0 and 100.",
        flavor.tolerance_property()
    )
}

/// Disallow mismatch tolerances Terra rejects
pub struct MismatchToleranceBlocking;

impl Rule for MismatchToleranceBlocking {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(property) = tolerance_property(call, ctx.flavor) else {
            return;
        };
        let inspections = ctx.inspections();
        let value = &property.value;

        match value {
            Expression::NumericLiteral(literal) => {
                if inspections.mismatch_tolerance_range && literal.value > 100.0 {
                    ctx.error(OUT_OF_RANGE, literal.span);
                }
            }
            Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
                if inspections.mismatch_tolerance_range {
                    ctx.error(OUT_OF_RANGE, unary.span);
                }
                let negated_number = matches!(unary.argument, Expression::NumericLiteral(_));
                if inspections.mismatch_tolerance_numeric && !negated_number {
                    ctx.error(non_numeric_message(ctx.flavor), unary.span);
                }
            }
            other => {
                if inspections.mismatch_tolerance_numeric {
                    ctx.error(non_numeric_message(ctx.flavor), other.span());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;
    use terra_carton::Settings;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(MismatchToleranceBlocking));
        Linter::with_registry(registry)
    }

    fn lint_value(linter: &Linter, value: &str) -> LintResult {
        let source = format!(
            "it('case', () => {{\n  Terra.validates.element('a', {{ misMatchTolerance: {value} }});\n}});\n"
        );
        linter.lint_spec(&source, "test-spec.js")
    }

    fn messages(result: &LintResult) -> Vec<&str> {
        result.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_valid_values() {
        let linter = create_linter();
        for value in ["0", "0.5", "100", "50.25"] {
            assert_eq!(lint_value(&linter, value).error_count, 0, "{value}");
        }
    }

    #[test]
    fn test_out_of_range() {
        let linter = create_linter();
        assert_eq!(messages(&lint_value(&linter, "100.1")), vec![OUT_OF_RANGE]);
        assert_eq!(messages(&lint_value(&linter, "-1")), vec![OUT_OF_RANGE]);
    }

    #[test]
    fn test_non_numeric() {
        let linter = create_linter();
        let non_numeric = non_numeric_message(Flavor::Toolkit);
        for value in ["'0.5'", "true", "null", "tolerance", "getTolerance()", "`1`"] {
            assert_eq!(
                messages(&lint_value(&linter, value)),
                vec![non_numeric.as_str()],
                "{value}"
            );
        }
        assert_eq!(
            messages(&lint_value(&linter, "-tolerance")),
            vec![OUT_OF_RANGE, non_numeric.as_str()]
        );
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        settings.inspections.mismatch_tolerance_numeric = false;
        let linter = create_linter().with_settings(settings);
        assert_eq!(lint_value(&linter, "'0.5'").error_count, 0);
        assert_eq!(lint_value(&linter, "101").error_count, 1);
    }

    #[test]
    fn test_functional_testing_property_name() {
        let linter = create_linter().with_flavor(Flavor::FunctionalTesting);
        let result = linter.lint_spec(
            "it('case', () => {\n  Terra.validates.element('a', { mismatchTolerance: '0.5' });\n});\n",
            "test-spec.js",
        );
        assert_eq!(
            messages(&result),
            vec!["The mismatchTolerance property accepts only numeric value between 0 and 100."]
        );
    }
}
