//! Screenshot naming convention.
//!
//! Terra's test runner derives the file name of every screenshot from the
//! enclosing `describe` block name and the name passed to the validation call.
//! The output of this module must match those file names byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Name used when a validation call has no explicit name argument.
pub const DEFAULT_PARTIAL_NAME: &str = "default";

/// File extension of screenshot images.
pub const SCREENSHOT_EXTENSION: &str = ".png";

/// Whitespace runs, dots and plus signs become underscores.
static DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u:\s)+|\.|\+").unwrap());

/// Characters not allowed in file names become dashes.
static FORBIDDEN_CHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[?<>/|*:+"]"#).unwrap());

/// `[test id]` section of a screenshot name.
static TEST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(?P<test_id>[^)]+)\]").unwrap());

/// Spec files are the only files Terra rules apply to.
static SPEC_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r".*-spec\.(jsx?|ts)$").unwrap());

/// Normalize `text` into its on-disk form.
///
/// ```
/// use terra_carton::naming::normalize;
///
/// assert_eq!(normalize("a b.c+d"), "a_b_c_d");
/// assert_eq!(normalize("what?"), "what-");
/// ```
pub fn normalize(text: &str) -> String {
    let delimited = DELIMITERS.replace_all(text, "_");
    FORBIDDEN_CHARACTERS.replace_all(&delimited, "-").into_owned()
}

/// Extract the test id from a `[...]` section, or return the whole input.
pub fn parse_test_id(partial_name: &str) -> &str {
    TEST_ID
        .captures(partial_name)
        .and_then(|caps| caps.name("test_id"))
        .map_or(partial_name, |m| m.as_str())
}

/// Screenshot file name used by terra-toolkit.
///
/// `describe` is the name of the nearest enclosing describe block and
/// `partial` the validation's own name (or [`DEFAULT_PARTIAL_NAME`]).
pub fn toolkit_screenshot_name(describe: &str, partial: &str) -> String {
    let mut name = normalize(&format!(
        "{}[{}]",
        describe.trim(),
        parse_test_id(partial).trim()
    ));
    name.push_str(SCREENSHOT_EXTENSION);
    name
}

/// Screenshot file name used by terra-functional-testing.
///
/// Returns `None` when the name normalizes to nothing.
pub fn functional_testing_screenshot_name(name: &str) -> Option<String> {
    let mut normalized = normalize(parse_test_id(name));
    if normalized.is_empty() {
        return None;
    }
    normalized.push_str(SCREENSHOT_EXTENSION);
    Some(normalized)
}

/// Check whether `file_name` follows the `*-spec.{js,jsx,ts}` convention.
#[inline]
pub fn is_spec_file_name(file_name: &str) -> bool {
    SPEC_FILE.is_match(file_name)
}
