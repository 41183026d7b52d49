//! Errors of user-initiated actions.
//!
//! Rule evaluation never fails; a rule that cannot decide reports nothing.
//! Navigation is different: the user asked for a target, so a missing one is
//! an error they need to see.

use thiserror::Error;

/// Why navigating from a screenshot to its validation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The screenshot's spec file does not exist.
    #[error("There is no spec file available to navigate to for {spec_id}.")]
    NoSpecFile { spec_id: String },

    /// The spec file exists but no validation in it produces this screenshot.
    #[error("There is no validation linked to the screenshot {name}.")]
    NoLinkedValidation { name: String },
}

pub type NavigationResult<T> = Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let no_spec = NavigationError::NoSpecFile {
            spec_id: "nested/Button-spec".to_string(),
        };
        let no_validation = NavigationError::NoLinkedValidation {
            name: "Button[default].png".to_string(),
        };
        assert_eq!(
            no_spec.to_string(),
            "There is no spec file available to navigate to for nested/Button-spec."
        );
        assert_eq!(
            no_validation.to_string(),
            "There is no validation linked to the screenshot Button[default].png."
        );
    }
}
