//! terra/valid-validation-properties
//!
//! Disallow options a validation call does not understand. The accepted names
//! depend on the validation and on the Terra library in use:
//!
//! | Validation | terra-toolkit | terra-functional-testing |
//! |------------|---------------|--------------------------|
//! | screenshot | `misMatchTolerance`, `selector`, `viewports` | `mismatchTolerance`, `selector` |
//! | element | `selector`, `misMatchTolerance`, `axeRules` | `selector`, `mismatchTolerance`, `rules` |
//! | accessibility | `axeRules` | `rules` |
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! it('button', () => {
//!   Terra.validates.accessibility({ selector: '#root' });
//! });
//! ```

use oxc_span::GetSpan;

use super::options::allowed_properties;
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::{properties, property_name, validation_properties};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/valid-validation-properties",
    description: "Disallow unknown options in Terra validation calls",
    category: RuleCategory::Screenshots,
    fixable: false,
    default_severity: Severity::Error,
};

/// Disallow unknown validation options
pub struct ValidValidationProperties;

impl Rule for ValidValidationProperties {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(validation) = call.kind.validation_type() else {
            return;
        };
        if call.statement.is_none() {
            return;
        }
        let Some(object) = validation_properties(call.call) else {
            return;
        };

        let allowed = allowed_properties(ctx.flavor, validation);
        for property in properties(object) {
            let known = property_name(property).is_some_and(|name| allowed.contains(&name.as_ref()));
            if !known {
                ctx.error(
                    format!("Invalid property. Valid properties are: {}", allowed.join(", ")),
                    property.key.span(),
                );
            }
        }
    }
}
