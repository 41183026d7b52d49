//! terra/no-nested-describe-viewports
//!
//! Disallow `Terra.describeViewports` inside another `Terra.describeViewports`.
//!
//! Terra runs the outer block once per viewport; a nested block would resize
//! the browser in the middle of it. Plain `describe` blocks in between do not
//! make the nesting valid.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.describeViewports('Outer', ['tiny'], () => {
//!   describe('group', () => {
//!     Terra.describeViewports('Inner', ['huge'], () => {});
//!   });
//! });
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::CallKind;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/no-nested-describe-viewports",
    description: "Disallow nested `Terra.describeViewports` blocks",
    category: RuleCategory::Viewports,
    fixable: false,
    default_severity: Severity::Error,
};

/// Disallow nested Terra.describeViewports blocks
pub struct NoNestedDescribeViewports;

impl Rule for NoNestedDescribeViewports {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if call.kind == CallKind::DescribeViewports && call.viewports_depth > 0 {
            ctx.error(
                "Nested Terra.describeViewports blocks are not allowed.",
                call.method_span(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoNestedDescribeViewports));
        Linter::with_registry(registry)
    }

    #[test]
    fn test_nested_blocks() {
        let source = r#"
Terra.describeViewports('Test', ['tiny', 'small'], () => {
  Terra.describeViewports('Nested', ['huge', 'large'], () => {});
  describe('A describe block', () => {
    Terra.describeViewports('More nested', ['medium', 'enormous'], () => {});
    it('an it block', () => {
      Terra.validates.element();
    });
  });
});
Terra.describeViewports('Other', ['tiny', 'large'], () => {});
"#;
        let result = create_linter().lint_spec(source, "test-spec.js");
        assert_eq!(result.error_count, 2);
        for diagnostic in &result.diagnostics {
            assert_eq!(
                &source[diagnostic.start as usize..diagnostic.end as usize],
                "Terra.describeViewports"
            );
        }
    }

    #[test]
    fn test_sibling_blocks_are_valid() {
        let result = create_linter().lint_spec(
            "Terra.describeViewports('A', ['tiny'], () => {});\nTerra.describeViewports('B', ['huge'], () => {});",
            "test-spec.js",
        );
        assert_eq!(result.error_count, 0);
    }
}
