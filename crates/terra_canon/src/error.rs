//! Error types for screenshot operations.

use std::path::PathBuf;

/// Error type for screenshot filesystem operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walkdir error.
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A new screenshot name was blank.
    #[error("The new screenshot name must not be blank")]
    BlankName,

    /// A new screenshot name is the same as the current one.
    #[error("The new screenshot name is the same as the current one: {0}")]
    UnchangedName(String),

    /// Some files of a screenshot group cannot be modified.
    #[error("The following files are not writable: {}", display_paths(.0))]
    NonWritable(Vec<PathBuf>),

    /// A file with the new screenshot name already exists.
    #[error("A screenshot with this name already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// A screenshot group has no files of the requested variant.
    #[error("No {variant} screenshot exists for {name}")]
    NothingToProcess { variant: &'static str, name: String },
}

/// Result type for screenshot operations.
pub type ScreenshotResult<T> = Result<T, ScreenshotError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
