//! terra/missing-screenshot
//!
//! Report element and screenshot validations that have no reference
//! screenshot in any context. Needs the screenshot index of the project;
//! without a wdio root this rule is a no-op.
//!
//! Calls whose name cannot be resolved, e.g. outside of any describe block,
//! are skipped.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! // no tests/wdio/__snapshots__/reference/*/*/Button-spec/Button[hovered].png
//! describe('Button', () => {
//!   it('hovered', () => {
//!     Terra.validates.element('hovered');
//!   });
//! });
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::first_string_literal;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/missing-screenshot",
    description: "Require a reference screenshot for every validation",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Error,
};

/// Require reference screenshots for validations
pub struct MissingScreenshot;

impl Rule for MissingScreenshot {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        if !ctx.inspections().missing_screenshots
            || !call.kind.is_screenshot_validation()
            || call.statement.is_none()
        {
            return;
        }
        let Some(scope) = ctx.screenshots else {
            return;
        };
        let resolver = ctx.resolver();

        match first_string_literal(call.call) {
            Some(name) => {
                let Some(resolved) = resolver.resolve_name(call, name) else {
                    return;
                };
                if !scope.index.has_reference(scope.spec_folder, &resolved) {
                    tracing::debug!("No reference screenshot for {}", resolved);
                    ctx.error(
                        "No reference screenshot exists for any context, for the name specified.",
                        name.span,
                    );
                }
            }
            None => {
                let Some(resolved) = resolver.resolve_default_name(call) else {
                    return;
                };
                if !scope.index.has_reference(scope.spec_folder, &resolved) {
                    tracing::debug!("No reference screenshot for {}", resolved);
                    ctx.error(
                        "No reference screenshot exists for any context, for the default screenshot.",
                        call.method_span(),
                    );
                }
            }
        }
    }
}
