//! Checks over the viewports argument of `Terra.describeViewports`.
//!
//! Both viewport rules share these; each rule picks its own subset.

use oxc_ast::ast::{ArrayExpression, ArrayExpressionElement, Expression, VariableDeclarationKind};
use oxc_span::{GetSpan, Span};
use terra_carton::viewport::{is_ascending_by_width, is_supported_viewport};
use terra_carton::SmallVec;

use crate::context::LintContext;
use crate::matcher::{string_value, viewports_argument, CallKind};
use crate::visitor::{SpecModel, TerraCall};

pub(super) const EMPTY_VIEWPORTS: &str = "There is no actual viewport specified.";
pub(super) const UNSUPPORTED_VIEWPORT: &str = "This viewport is not supported by Terra.";
pub(super) const DUPLICATE_VIEWPORTS: &str = "There are duplicate viewport values in this block.";
pub(super) const NOT_ASCENDING: &str = "Viewports are not in ascending order by their widths.";
pub(super) const NON_ARRAY_VIEWPORTS: &str =
    "Non-array-type values are not allowed for the viewports argument.";

/// One element of a viewports array: its span and string value, if any.
pub(super) type ViewportValues<'b> = SmallVec<[(Span, Option<&'b str>); 6]>;

/// Viewports argument of a top-level `Terra.describeViewports` statement.
pub(super) fn viewports_of<'b, 'a>(call: &'b TerraCall<'a>) -> Option<&'b Expression<'a>> {
    if call.kind != CallKind::DescribeViewports || !call.is_top_level_statement() {
        return None;
    }
    viewports_argument(call.call)
}

/// Values of an array literal, skipping holes.
pub(super) fn values<'b>(array: &'b ArrayExpression<'_>) -> ViewportValues<'b> {
    array
        .elements
        .iter()
        .filter(|element| !matches!(element, ArrayExpressionElement::Elision(_)))
        .map(|element| (element.span(), element.as_expression().and_then(string_value)))
        .collect()
}

#[inline]
fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[inline]
fn is_supported(value: Option<&str>) -> bool {
    value.is_some_and(is_supported_viewport)
}

/// Report an empty list, or one whose every element is blank.
///
/// Returns whether a problem was reported.
pub(super) fn check_empty(
    ctx: &mut LintContext<'_>,
    array: &ArrayExpression<'_>,
    values: &ViewportValues<'_>,
) -> bool {
    if values.iter().all(|(_, value)| is_blank(*value)) {
        ctx.error(EMPTY_VIEWPORTS, array.span);
        return true;
    }
    false
}

/// Report every element that is not a supported viewport.
pub(super) fn check_unsupported(ctx: &mut LintContext<'_>, values: &ViewportValues<'_>) {
    for (span, value) in values {
        if !is_supported(*value) {
            ctx.error(UNSUPPORTED_VIEWPORT, *span);
        }
    }
}

/// Report the first repeated supported viewport, once per call.
pub(super) fn check_duplicates(
    ctx: &mut LintContext<'_>,
    call: &TerraCall<'_>,
    values: &ViewportValues<'_>,
) {
    if values.len() < 2 {
        return;
    }
    let mut seen: SmallVec<[&str; 6]> = SmallVec::new();
    for value in values.iter().filter_map(|(_, value)| *value) {
        if !is_supported_viewport(value) {
            continue;
        }
        if seen.contains(&value) {
            ctx.warn(DUPLICATE_VIEWPORTS, call.function_name_span());
            return;
        }
        seen.push(value);
    }
}

/// Report a fully supported list that is not ordered by width.
pub(super) fn check_ascending(
    ctx: &mut LintContext<'_>,
    array: &ArrayExpression<'_>,
    values: &ViewportValues<'_>,
) {
    if values.len() < 2 || !values.iter().all(|(_, value)| is_supported(*value)) {
        return;
    }
    let viewports: SmallVec<[&str; 6]> = values.iter().filter_map(|(_, value)| *value).collect();
    if !is_ascending_by_width(&viewports) {
        ctx.warn(NOT_ASCENDING, array.span);
    }
}

/// Whether a non-array viewports argument is certainly not an array.
///
/// Calls and identifiers that may hold an array are given the benefit of the
/// doubt: an identifier is only reported when it names a single `const`
/// initialized with something other than an array, identifier or call.
pub(super) fn is_non_array(spec: &SpecModel<'_>, argument: &Expression<'_>) -> bool {
    match argument {
        Expression::ArrayExpression(_) | Expression::CallExpression(_) => false,
        Expression::Identifier(id) => {
            let Some(binding) = spec.binding(id.name.as_str()) else {
                return false;
            };
            if binding.kind != VariableDeclarationKind::Const || !binding.single_declarator {
                return false;
            }
            binding.init.is_some_and(|init| {
                !matches!(
                    init,
                    Expression::ArrayExpression(_)
                        | Expression::Identifier(_)
                        | Expression::CallExpression(_)
                )
            })
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("  ")));
        assert!(!is_blank(Some("tiny")));
        assert!(!is_blank(Some("asd")));
    }
}
