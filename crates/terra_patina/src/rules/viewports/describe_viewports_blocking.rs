//! terra/describe-viewports-blocking
//!
//! Report viewports arguments Terra cannot run with.
//!
//! - An empty list, or one holding only blank values, is reported on the list.
//! - Every value outside the supported vocabulary is reported on its own.
//! - A viewports argument that is certainly not an array is reported.
//!   Identifiers and calls that may produce an array are left alone.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.describeViewports('Button', [], () => {});
//! Terra.describeViewports('Button', ['tiny', 'wide'], () => {});
//! Terra.describeViewports('Button', 'tiny', () => {});
//! ```
//!
//! ### Valid
//! ```js
//! const VIEWPORTS = ['tiny', 'huge'];
//! Terra.describeViewports('Button', VIEWPORTS, () => {});
//! ```

use oxc_ast::ast::Expression;
use oxc_span::GetSpan;

use super::checks::{
    check_empty, check_unsupported, is_non_array, values, viewports_of, NON_ARRAY_VIEWPORTS,
};
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/describe-viewports-blocking",
    description: "Disallow empty, unsupported and non-array viewports",
    category: RuleCategory::Viewports,
    fixable: false,
    default_severity: Severity::Error,
};

/// Disallow viewports Terra cannot run with
pub struct DescribeViewportsBlocking;

impl Rule for DescribeViewportsBlocking {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(argument) = viewports_of(call) else {
            return;
        };
        let inspections = ctx.inspections();

        match argument {
            Expression::ArrayExpression(array) => {
                let values = values(array);
                let reported_empty = inspections.empty_viewports && check_empty(ctx, array, &values);
                if inspections.unsupported_viewports && !reported_empty {
                    check_unsupported(ctx, &values);
                }
            }
            other => {
                if inspections.non_array_viewports && is_non_array(spec, other) {
                    ctx.error(NON_ARRAY_VIEWPORTS, other.span());
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

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(DescribeViewportsBlocking));
        Linter::with_registry(registry)
    }

    fn lint(source: &str) -> LintResult {
        create_linter().lint_spec(source, "test-spec.js")
    }

    fn reported_texts<'s>(source: &'s str, result: &LintResult) -> Vec<&'s str> {
        result
            .diagnostics
            .iter()
            .map(|d| &source[d.start as usize..d.end as usize])
            .collect()
    }

    #[test]
    fn test_empty_lists() {
        for viewports in ["[]", "['']", "['', '  ']", "[1]"] {
            let source = format!("Terra.describeViewports('Test', {viewports}, () => {{}});");
            let result = lint(&source);
            assert_eq!(result.error_count, 1, "{viewports}");
            assert_eq!(
                result.diagnostics[0].message,
                "There is no actual viewport specified."
            );
            assert_eq!(reported_texts(&source, &result), vec![viewports]);
        }
    }

    #[test]
    fn test_unsupported_values() {
        let source = "Terra.describeViewports('Test', ['tiny', 'wide', 'huge', 'Huge'], () => {});";
        let result = lint(source);
        assert_eq!(result.error_count, 2);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message == "This viewport is not supported by Terra."));
        assert_eq!(reported_texts(source, &result), vec!["'wide'", "'Huge'"]);
    }

    #[test]
    fn test_blank_value_among_real_ones_is_unsupported() {
        let source = "Terra.describeViewports('Test', ['tiny', ''], () => {});";
        let result = lint(source);
        assert_eq!(reported_texts(source, &result), vec!["''"]);
    }

    #[test]
    fn test_non_array_arguments() {
        let source = r#"
const VIEWPORTS = ['small', 'huge', 'enormous'];
Terra.describeViewports('Test', VIEWPORTS, () => {});
const REFERENCE = VIEWPORTS;
Terra.describeViewports('Test', REFERENCE, () => {});
function aFunction() {}
const FUNCTION = aFunction();
Terra.describeViewports('Test', FUNCTION, () => {});
Terra.describeViewports('Test', aFunction(), () => {});
let NOT_INITIALIZED;
Terra.describeViewports('Test', NOT_INITIALIZED, () => {});
let NON_VIEWPORTS_LET = 2;
Terra.describeViewports('Test', NON_VIEWPORTS_LET, () => {});

Terra.describeViewports('Test', 'tiny', () => {});
Terra.describeViewports('Test', { }, () => {});
Terra.describeViewports('Test', false, () => {});
Terra.describeViewports('Test', 8.4, () => {});
const NON_VIEWPORTS = 2;
Terra.describeViewports('Test', NON_VIEWPORTS, () => {});
"#;
        let result = lint(source);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message == "Non-array-type values are not allowed for the viewports argument."));
        assert_eq!(
            reported_texts(source, &result),
            vec!["'tiny'", "{ }", "false", "8.4", "NON_VIEWPORTS"]
        );
    }

    #[test]
    fn test_single_argument_is_ignored() {
        let result = lint("Terra.describeViewports('Test');");
        assert!(!result.has_diagnostics());
    }
}
