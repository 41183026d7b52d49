//! Rules for validation calls and the screenshots they produce.

mod options;

// Validation options
mod mismatch_tolerance;
mod mismatch_tolerance_blocking;
mod no_global_selector;
mod valid_validation_properties;

// Screenshot names and files
mod duplicate_screenshot_name;
mod missing_screenshot;
mod prefer_element_validation;
mod require_screenshot_name;

pub use duplicate_screenshot_name::DuplicateScreenshotName;
pub use mismatch_tolerance::MismatchTolerance;
pub use mismatch_tolerance_blocking::MismatchToleranceBlocking;
pub use missing_screenshot::MissingScreenshot;
pub use no_global_selector::NoGlobalSelector;
pub use prefer_element_validation::PreferElementValidation;
pub use require_screenshot_name::RequireScreenshotName;
pub use valid_validation_properties::ValidValidationProperties;
