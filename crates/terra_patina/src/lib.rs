//! # terra_patina
//!
//! Patina - The convention checker for Terra visual regression specs.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the layer that forms on bronze over time and
//! tells a trained eye whether a piece is authentic. `terra_patina` reads
//! Terra spec files the same way: it checks that viewports, validation
//! options and screenshot names follow the conventions Terra relies on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use terra_patina::{format_results, Linter, OutputFormat, RuleRegistry};
//!
//! let linter = Linter::with_registry(RuleRegistry::with_all());
//! let source = "Terra.describeViewports('Button', ['huge', 'tiny'], () => {});";
//! let result = linter.lint_spec(source, "Button-spec.js");
//!
//! let sources = [("Button-spec.js".to_string(), source.to_string())];
//! println!("{}", format_results(&[result], &sources, OutputFormat::Text));
//! ```
//!
//! ## Rules
//!
//! ### Viewports
//! - `terra/describe-viewports` - Disallow duplicate and unordered viewports
//! - `terra/describe-viewports-blocking` - Disallow empty, unsupported and non-array viewports
//! - `terra/no-duplicate-describe-viewports` - Detect mergeable describeViewports blocks
//! - `terra/no-nested-describe-viewports` - Disallow nested describeViewports blocks
//!
//! ### Helpers
//! - `terra/no-nested-describe-helpers` - Disallow nested Terra describe helpers
//!
//! ### Screenshots
//! - `terra/mismatch-tolerance` - Warn about tolerances above the threshold
//! - `terra/mismatch-tolerance-blocking` - Disallow tolerances outside of 0-100 and non-numeric ones
//! - `terra/valid-validation-properties` - Disallow unknown validation options
//! - `terra/no-global-selector` - Disallow selectors equal to the global one
//! - `terra/require-screenshot-name` - Require names in terra-functional-testing
//! - `terra/missing-screenshot` - Require a reference screenshot for every validation
//! - `terra/duplicate-screenshot-name` - Disallow validations sharing a screenshot
//! - `terra/prefer-element-validation` - Prefer element validation over screenshot validation
//!
//! ### Migration
//! - `terra/replace-terra-it` - Replace `Terra.it` helpers with `Terra.validates` (fixable)

pub mod context;
pub mod diagnostic;
mod error;
pub mod linter;
pub mod matcher;
pub mod output;
pub mod reconcile;
pub mod resolver;
pub mod rule;
pub mod rules;
pub mod visitor;
pub mod wdio_conf;

pub use context::{LintContext, ScreenshotScope};
pub use diagnostic::{apply_fixes, Fix, LintDiagnostic, LintSummary, Severity, TextEdit};
pub use error::{NavigationError, NavigationResult};
pub use linter::{LintResult, Linter};
pub use output::{format_results, format_summary, format_text, OutputFormat};
pub use reconcile::{
    find_unused_screenshots, navigate_to_usage, screenshot_usages, ScreenshotUsage,
    UnusedReason, UnusedScreenshot, UsageTarget,
};
pub use resolver::ScreenshotNameResolver;
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry};
pub use wdio_conf::{find_global_selector, load_global_selector};
