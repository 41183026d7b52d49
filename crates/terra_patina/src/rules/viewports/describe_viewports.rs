//! terra/describe-viewports
//!
//! Keep the viewports of a `Terra.describeViewports` block unique and ordered.
//!
//! Only supported viewport values take part in both checks, and lists with
//! fewer than two values are never reported. A duplicate is reported once per
//! block, on the `describeViewports` name, however many values repeat.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.describeViewports('Button', ['small', 'small'], () => {});
//! Terra.describeViewports('Button', ['huge', 'tiny'], () => {});
//! ```
//!
//! ### Valid
//! ```js
//! Terra.describeViewports('Button', ['tiny', 'small', 'huge'], () => {});
//! ```

use oxc_ast::ast::Expression;

use super::checks::{check_ascending, check_duplicates, values, viewports_of};
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/describe-viewports",
    description: "Disallow duplicate and unordered viewports in `Terra.describeViewports`",
    category: RuleCategory::Viewports,
    fixable: false,
    default_severity: Severity::Warning,
};

/// Disallow duplicate and unordered viewports
pub struct DescribeViewports;

impl Rule for DescribeViewports {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(Expression::ArrayExpression(array)) = viewports_of(call) else {
            return;
        };
        let values = values(array);
        let inspections = ctx.inspections();

        if inspections.duplicate_viewports {
            check_duplicates(ctx, call, &values);
        }
        if inspections.viewports_ascending_order {
            check_ascending(ctx, array, &values);
        }
    }
}
