//! terra/no-nested-describe-helpers
//!
//! Disallow `Terra.describeViewports` and `Terra.describeTests` inside one
//! another. A `Terra.describeViewports` directly inside another one is left
//! to `terra/no-nested-describe-viewports`.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.describeTests('Outer', { formFactors: ['tiny'] }, () => {
//!   Terra.describeViewports('Inner', ['huge'], () => {});
//! });
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::CallKind;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/no-nested-describe-helpers",
    description: "Disallow nested Terra describe helpers",
    category: RuleCategory::Helpers,
    fixable: false,
    default_severity: Severity::Error,
};

/// Disallow nested Terra describe helpers
pub struct NoNestedDescribeHelpers;

impl Rule for NoNestedDescribeHelpers {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if !call.kind.is_describe_helper() || call.helper_depth == 0 {
            return;
        }
        // Only viewports blocks around a viewports block
        if call.kind == CallKind::DescribeViewports && call.helper_depth == call.viewports_depth {
            return;
        }
        ctx.error(
            "Nested Terra.describe helper blocks are not allowed.",
            call.method_span(),
        );
    }
}
