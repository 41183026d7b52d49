//! Options object of validation calls.

use oxc_ast::ast::{ObjectExpression, ObjectProperty};
use terra_carton::Flavor;

use crate::matcher::{find_property, validation_properties, ValidationType};
use crate::visitor::TerraCall;

/// Options object of an element or screenshot validation statement.
///
/// Only validations nested in a block count; a validation at the top level
/// of the file never runs.
pub(super) fn screenshot_options<'b, 'a>(
    call: &'b TerraCall<'a>,
) -> Option<&'b ObjectExpression<'a>> {
    if !call.kind.is_screenshot_validation() || !call.is_nested_statement() {
        return None;
    }
    validation_properties(call.call)
}

/// The mismatch tolerance property, under the name the flavor uses.
pub(super) fn tolerance_property<'b, 'a>(
    call: &'b TerraCall<'a>,
    flavor: Flavor,
) -> Option<&'b ObjectProperty<'a>> {
    find_property(screenshot_options(call)?, &[flavor.tolerance_property()])
}

/// Option names each validation accepts.
pub(super) fn allowed_properties(flavor: Flavor, validation: ValidationType) -> &'static [&'static str] {
    match (flavor, validation) {
        (Flavor::Toolkit, ValidationType::Screenshot) => &["misMatchTolerance", "selector", "viewports"],
        (Flavor::Toolkit, ValidationType::Element) => &["selector", "misMatchTolerance", "axeRules"],
        (Flavor::Toolkit, ValidationType::Accessibility) => &["axeRules"],
        (Flavor::FunctionalTesting, ValidationType::Screenshot) => &["mismatchTolerance", "selector"],
        (Flavor::FunctionalTesting, ValidationType::Element) => &["selector", "mismatchTolerance", "rules"],
        (Flavor::FunctionalTesting, ValidationType::Accessibility) => &["rules"],
    }
}
