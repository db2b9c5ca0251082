use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for pyforge operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// No builder is registered under the requested template name.
    #[error("Invalid template name '{0}'")]
    UnknownTemplate(String),

    /// External command exited non-zero or could not be spawned.
    #[error("Command failed running '{command}': {details}")]
    CommandFailed { command: String, details: String },

    /// Dependency pin is not a MAJOR.MINOR.PATCH version.
    #[error("Invalid version '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    /// Project name is not usable as a directory name.
    #[error("Invalid project name '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidProjectName(String),

    /// Target directory does not exist.
    #[error("Project directory not found: {}", .0.display())]
    ProjectPathNotFound(PathBuf),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },
}

impl AppError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
