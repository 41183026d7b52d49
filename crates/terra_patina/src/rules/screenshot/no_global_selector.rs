//! terra/no-global-selector
//!
//! Warn when a validation's `selector` repeats the global `terra.selector` of
//! `wdio.conf.js`. Terra already falls back to the global one.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! // wdio.conf.js: terra: { selector: '#root' }
//! it('button', () => {
//!   Terra.validates.element('default', { selector: '#root' });
//! });
//! ```

use oxc_span::GetSpan;

use super::options::screenshot_options;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::{find_property, string_value};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/no-global-selector",
    description: "Disallow selectors that equal the global Terra selector",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Warning,
};

/// Disallow selectors equal to the global one
pub struct NoGlobalSelector;

impl Rule for NoGlobalSelector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(global) = ctx.global_selector else {
            return;
        };
        let Some(selector) = screenshot_options(call).and_then(|o| find_property(o, &["selector"]))
        else {
            return;
        };
        if string_value(&selector.value) == Some(global) {
            ctx.warn(
                "This selector is the same as the global selector in wdio.conf.js, it can be omitted.",
                selector.value.span(),
            );
        }
    }
}
