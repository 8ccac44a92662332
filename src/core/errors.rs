//! Shared error types for the engine
//!
//! Evaluation never fails: missing data is carried as `None` all the way to
//! the report. Everything in here is raised while building the inputs
//! (loading configuration, merging overrides, reading import files).

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
///
/// - E001-E009: I/O errors
/// - E020-E029: Configuration errors
/// - E050-E059: Validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - file not found
    pub const IO_FILE_NOT_FOUND: ErrorCode = ErrorCode("E001");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - referenced identifier does not exist
    pub const CONFIG_UNKNOWN_ID: ErrorCode = ErrorCode("E021");
    /// Config error - threshold mode differs from the metric's mode
    pub const CONFIG_MODE_MISMATCH: ErrorCode = ErrorCode("E022");
    /// Config error - file could not be parsed
    pub const CONFIG_PARSE: ErrorCode = ErrorCode("E023");

    /// Validation error - generic
    pub const VALIDATION_GENERIC: ErrorCode = ErrorCode("E050");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for farmkpi operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors with the offending field, if known
    #[error("Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    /// Validation errors (may contain multiple issues)
    #[error("Validation failed with {} error(s): {}", .errors.len(), .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Wrap an I/O error, keeping the path it happened on
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{}: {}", path.display(), err),
            path: Some(path),
            source: Some(err),
        }
    }

    pub fn config_with_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_INVALID,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn unknown_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::Config {
            code: ErrorCode::CONFIG_UNKNOWN_ID,
            message: format!("unknown indicator '{}'", id),
            field: Some(id),
        }
    }

    pub fn mode_mismatch(id: impl Into<String>, expected: &str, found: &str) -> Self {
        let id = id.into();
        Self::Config {
            code: ErrorCode::CONFIG_MODE_MISMATCH,
            message: format!(
                "thresholds for '{}' use interpretation '{}' but the metric is '{}'",
                id, found, expected
            ),
            field: Some(id),
        }
    }

    pub fn validations(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileSystem { source, .. } => match source.as_ref().map(|e| e.kind()) {
                Some(std::io::ErrorKind::NotFound) => ErrorCode::IO_FILE_NOT_FOUND,
                _ => ErrorCode::IO_GENERIC,
            },
            Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::IO_FILE_NOT_FOUND
            }
            Self::Io(_) => ErrorCode::IO_GENERIC,
            Self::Config { code, .. } => *code,
            Self::Validation { .. } => ErrorCode::VALIDATION_GENERIC,
            Self::Toml(_) => ErrorCode::CONFIG_PARSE,
        }
    }
}

/// Result type alias for farmkpi operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_mismatch_carries_code_and_field() {
        let err = Error::mode_mismatch("eua", "lower_is_better", "percentage");
        assert_eq!(err.code(), ErrorCode::CONFIG_MODE_MISMATCH);
        assert!(err.to_string().contains("eua"));
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = Error::validations(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed with 2 error(s): a; b");
        assert_eq!(err.code().as_str(), "E050");
    }

    #[test]
    fn test_io_not_found_code() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_io(io, "/tmp/missing.csv");
        assert_eq!(err.code(), ErrorCode::IO_FILE_NOT_FOUND);
    }
}
