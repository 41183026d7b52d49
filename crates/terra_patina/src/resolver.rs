//! Screenshot name resolution.
//!
//! Maps a validation call to the file name Terra's runner gives its
//! screenshot. With terra-toolkit the name is built from the nearest
//! enclosing `describe`/`Terra.describeViewports` block and the validation's
//! own name, falling back to `default`. terra-functional-testing only uses the
//! validation's name and has no default.

use oxc_ast::ast::StringLiteral;
use terra_carton::naming::{
    functional_testing_screenshot_name, toolkit_screenshot_name, DEFAULT_PARTIAL_NAME,
};
use terra_carton::Flavor;

use crate::matcher::{first_string_literal, unquoted_text};
use crate::visitor::TerraCall;

/// Resolves screenshot names for the calls of one spec file.
#[derive(Debug, Clone, Copy)]
pub struct ScreenshotNameResolver<'s> {
    flavor: Flavor,
    source: &'s str,
}

impl<'s> ScreenshotNameResolver<'s> {
    pub fn new(flavor: Flavor, source: &'s str) -> Self {
        Self { flavor, source }
    }

    #[inline]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Resolve the name of a call with an explicit name literal.
    ///
    /// Returns `None` when the name cannot be correlated with a file, e.g.
    /// when there is no enclosing describe block with a literal name.
    pub fn resolve_name(&self, call: &TerraCall<'_>, name: &StringLiteral<'_>) -> Option<String> {
        match self.flavor {
            Flavor::Toolkit => {
                let describe = self.describe_name(call)?;
                Some(toolkit_screenshot_name(
                    describe,
                    unquoted_text(self.source, name.span),
                ))
            }
            Flavor::FunctionalTesting => {
                functional_testing_screenshot_name(unquoted_text(self.source, name.span))
            }
        }
    }

    /// Resolve the name of a call without a name literal.
    pub fn resolve_default_name(&self, call: &TerraCall<'_>) -> Option<String> {
        if !self.flavor.supports_default_name() {
            return None;
        }
        let describe = self.describe_name(call)?;
        Some(toolkit_screenshot_name(describe, DEFAULT_PARTIAL_NAME))
    }

    /// Resolve from the name literal when present, or the default name.
    pub fn resolve(&self, call: &TerraCall<'_>) -> Option<String> {
        match first_string_literal(call.call) {
            Some(name) => self.resolve_name(call, name),
            None => self.resolve_default_name(call),
        }
    }

    fn describe_name<'a>(&self, call: &TerraCall<'a>) -> Option<&'a str> {
        let describe = call.describe?;
        first_string_literal(describe).map(|lit| lit.value.as_str())
    }
}
