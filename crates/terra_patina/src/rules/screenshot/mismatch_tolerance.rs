//! terra/mismatch-tolerance
//!
//! Warn when the mismatch tolerance of a validation is above the configured
//! `maxMismatchTolerance`. Values outside `0..=100` are left to
//! `terra/mismatch-tolerance-blocking`.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! it('button', () => {
//!   Terra.validates.element('default', { misMatchTolerance: 5 });
//! });
//! ```
//!
//! ### Valid
//! ```js
//! it('button', () => {
//!   Terra.validates.element('default', { misMatchTolerance: 0.1 });
//! });
//! ```

use oxc_ast::ast::Expression;

use super::options::tolerance_property;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/mismatch-tolerance",
    description: "Warn about mismatch tolerances above the configured threshold",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Warning,
};

/// Warn about mismatch tolerances above the threshold
pub struct MismatchTolerance;

impl Rule for MismatchTolerance {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if !ctx.inspections().mismatch_tolerance_threshold {
            return;
        }
        let Some(property) = tolerance_property(call, ctx.flavor) else {
            return;
        };
        let Expression::NumericLiteral(literal) = &property.value else {
            return;
        };

        let max = ctx.settings.max_mismatch_tolerance;
        if literal.value > max && literal.value <= 100.0 {
            ctx.warn(
                format!("The mismatch tolerance is above the max threshold ({max})"),
                literal.span,
            );
        }
    }
}
