//! Pattern matchers for Terra call shapes.
//!
//! Every function here is total: an argument list, literal or property that
//! does not have the expected shape yields `None`, never a panic. The engine
//! runs over arbitrary spec files, most of which contain plenty of calls that
//! have nothing to do with Terra.

use std::borrow::Cow;

use oxc_ast::ast::{
    Argument, CallExpression, Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind,
    StringLiteral,
};
use oxc_span::{GetSpan, Span};
use phf::phf_map;

/// Terra call kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `Terra.describeViewports`
    DescribeViewports,
    /// `Terra.describeTests`
    DescribeTests,
    /// `describe`, `describe.only`, `describe.skip`
    Describe,
    /// `Terra.validates.screenshot`
    ValidatesScreenshot,
    /// `Terra.validates.element`
    ValidatesElement,
    /// `Terra.validates.accessibility`
    ValidatesAccessibility,
    /// `Terra.it.matchesScreenshot`
    ItMatchesScreenshot,
    /// `Terra.it.validatesElement`
    ItValidatesElement,
    /// `Terra.it.isAccessible`
    ItIsAccessible,
    /// Anything else
    Other,
}

/// What a validation call checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationType {
    Screenshot,
    Element,
    Accessibility,
}

static CALL_KINDS: phf::Map<&'static str, CallKind> = phf_map! {
    "Terra.describeViewports" => CallKind::DescribeViewports,
    "Terra.describeTests" => CallKind::DescribeTests,
    "describe" => CallKind::Describe,
    "describe.only" => CallKind::Describe,
    "describe.skip" => CallKind::Describe,
    "Terra.validates.screenshot" => CallKind::ValidatesScreenshot,
    "Terra.validates.element" => CallKind::ValidatesElement,
    "Terra.validates.accessibility" => CallKind::ValidatesAccessibility,
    "Terra.it.matchesScreenshot" => CallKind::ItMatchesScreenshot,
    "Terra.it.validatesElement" => CallKind::ItValidatesElement,
    "Terra.it.isAccessible" => CallKind::ItIsAccessible,
};

impl CallKind {
    /// Classify a dotted callee path such as `Terra.validates.element`.
    #[inline]
    pub fn classify(path: &str) -> Self {
        CALL_KINDS.get(path).copied().unwrap_or(CallKind::Other)
    }

    /// Calls that produce screenshot files.
    #[inline]
    pub fn is_screenshot_validation(self) -> bool {
        matches!(
            self,
            CallKind::ValidatesScreenshot
                | CallKind::ValidatesElement
                | CallKind::ItMatchesScreenshot
                | CallKind::ItValidatesElement
        )
    }

    /// `Terra.validates.*` calls.
    #[inline]
    pub fn is_terra_validates(self) -> bool {
        matches!(
            self,
            CallKind::ValidatesScreenshot | CallKind::ValidatesElement | CallKind::ValidatesAccessibility
        )
    }

    /// `Terra.it.*` calls.
    #[inline]
    pub fn is_terra_it(self) -> bool {
        matches!(
            self,
            CallKind::ItMatchesScreenshot | CallKind::ItValidatesElement | CallKind::ItIsAccessible
        )
    }

    /// `Terra.describeViewports` and `Terra.describeTests`.
    #[inline]
    pub fn is_describe_helper(self) -> bool {
        matches!(self, CallKind::DescribeViewports | CallKind::DescribeTests)
    }

    /// Blocks whose name takes part in screenshot naming.
    #[inline]
    pub fn is_describe_like(self) -> bool {
        matches!(self, CallKind::Describe | CallKind::DescribeViewports)
    }

    /// What the call validates, for validation calls.
    #[inline]
    pub fn validation_type(self) -> Option<ValidationType> {
        match self {
            CallKind::ValidatesScreenshot | CallKind::ItMatchesScreenshot => {
                Some(ValidationType::Screenshot)
            }
            CallKind::ValidatesElement | CallKind::ItValidatesElement => {
                Some(ValidationType::Element)
            }
            CallKind::ValidatesAccessibility | CallKind::ItIsAccessible => {
                Some(ValidationType::Accessibility)
            }
            _ => None,
        }
    }

    /// `Terra.validates.*` counterpart of a `Terra.it.*` call.
    #[inline]
    pub fn replacement(self) -> Option<&'static str> {
        match self {
            CallKind::ItValidatesElement => Some("Terra.validates.element"),
            CallKind::ItMatchesScreenshot => Some("Terra.validates.screenshot"),
            CallKind::ItIsAccessible => Some("Terra.validates.accessibility"),
            _ => None,
        }
    }
}

/// Dotted path of a callee made of identifiers and static member accesses.
pub fn callee_path(callee: &Expression<'_>) -> Option<String> {
    match callee {
        Expression::Identifier(id) => Some(id.name.to_string()),
        Expression::StaticMemberExpression(member) => {
            let mut path = callee_path(&member.object)?;
            path.push('.');
            path.push_str(member.property.name.as_str());
            Some(path)
        }
        _ => None,
    }
}

/// Span of the function name: `element` in `Terra.validates.element`.
pub fn function_name_span(callee: &Expression<'_>) -> Span {
    match callee {
        Expression::StaticMemberExpression(member) => member.property.span,
        other => other.span(),
    }
}

/// The `index`-th argument, when it is an expression.
#[inline]
pub fn argument<'b, 'a>(call: &'b CallExpression<'a>, index: usize) -> Option<&'b Expression<'a>> {
    call.arguments.get(index).and_then(Argument::as_expression)
}

/// The viewports argument of a `describeViewports` call.
///
/// Requires more than one argument, since the first one is the block name.
#[inline]
pub fn viewports_argument<'b, 'a>(call: &'b CallExpression<'a>) -> Option<&'b Expression<'a>> {
    if call.arguments.len() > 1 {
        argument(call, 1)
    } else {
        None
    }
}

/// The first argument, when it is a string literal.
#[inline]
pub fn first_string_literal<'b, 'a>(call: &'b CallExpression<'a>) -> Option<&'b StringLiteral<'a>> {
    match argument(call, 0)? {
        Expression::StringLiteral(lit) => Some(lit),
        _ => None,
    }
}

/// Value of a string literal or a template literal without substitutions.
pub fn string_value<'b>(expr: &'b Expression<'_>) -> Option<&'b str> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.as_str()),
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.value.cooked.as_ref())
            .map(|cooked| cooked.as_str()),
        _ => None,
    }
}

/// Options object of a validation call: the last of one or two arguments.
pub fn validation_properties<'b, 'a>(
    call: &'b CallExpression<'a>,
) -> Option<&'b ObjectExpression<'a>> {
    if !(1..=2).contains(&call.arguments.len()) {
        return None;
    }
    match call.arguments.last()?.as_expression()? {
        Expression::ObjectExpression(object) => Some(object),
        _ => None,
    }
}

/// Iterate the plain `key: value` properties of an object literal.
pub fn properties<'b, 'a>(
    object: &'b ObjectExpression<'a>,
) -> impl Iterator<Item = &'b ObjectProperty<'a>> + 'b {
    object.properties.iter().filter_map(|kind| match kind {
        ObjectPropertyKind::ObjectProperty(prop) => Some(&**prop),
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

/// Static name of a property key.
#[inline]
pub fn property_name<'b>(prop: &'b ObjectProperty<'_>) -> Option<Cow<'b, str>> {
    if prop.computed {
        return None;
    }
    prop.key.static_name()
}

/// First property named one of `names`.
pub fn find_property<'b, 'a>(
    object: &'b ObjectExpression<'a>,
    names: &[&str],
) -> Option<&'b ObjectProperty<'a>> {
    properties(object).find(|prop| {
        property_name(prop).is_some_and(|name| names.contains(&name.as_ref()))
    })
}

/// Source text of a string literal without its quotes.
#[inline]
pub fn unquoted_text<'s>(source: &'s str, span: Span) -> &'s str {
    let start = span.start as usize + 1;
    let end = (span.end as usize).saturating_sub(1);
    source.get(start..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            CallKind::classify("Terra.describeViewports"),
            CallKind::DescribeViewports
        );
        assert_eq!(CallKind::classify("describe.only"), CallKind::Describe);
        assert_eq!(
            CallKind::classify("Terra.it.isAccessible"),
            CallKind::ItIsAccessible
        );
        assert_eq!(CallKind::classify("Terra.validates"), CallKind::Other);
        assert_eq!(CallKind::classify("terra.validates.element"), CallKind::Other);
        assert_eq!(CallKind::classify(""), CallKind::Other);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(CallKind::ItMatchesScreenshot.is_screenshot_validation());
        assert!(!CallKind::ValidatesAccessibility.is_screenshot_validation());
        assert!(CallKind::ItIsAccessible.is_terra_it());
        assert!(CallKind::DescribeTests.is_describe_helper());
        assert!(!CallKind::DescribeTests.is_describe_like());
        assert_eq!(
            CallKind::ItValidatesElement.replacement(),
            Some("Terra.validates.element")
        );
        assert_eq!(CallKind::ValidatesElement.replacement(), None);
        assert_eq!(
            CallKind::ItIsAccessible.validation_type(),
            Some(ValidationType::Accessibility)
        );
    }

    #[test]
    fn test_unquoted_text() {
        let source = "x('with name')";
        assert_eq!(unquoted_text(source, Span::new(2, 13)), "with name");
        assert_eq!(unquoted_text(source, Span::new(2, 2)), "");
    }
}
