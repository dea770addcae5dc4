//! Custom error types for finsight
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::ai::AiErrorKind;

/// The main error type for finsight operations
#[derive(Error, Debug)]
pub enum FinsightError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Chat completion provider errors
    #[error("AI provider error ({kind}): {message}")]
    Ai { kind: AiErrorKind, message: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinsightError {
    /// Create a "not found" error for input files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Create an AI provider error
    pub fn ai(kind: AiErrorKind, message: impl Into<String>) -> Self {
        Self::Ai {
            kind,
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the error comes from the input data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Csv(_) | Self::Validation(_) | Self::NotFound { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinsightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinsightError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for finsight operations
pub type FinsightResult<T> = Result<T, FinsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinsightError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinsightError::file_not_found("statement.csv");
        assert_eq!(err.to_string(), "File not found: statement.csv");
        assert!(err.is_not_found());
        assert!(err.is_data_error());
    }

    #[test]
    fn test_ai_error_display() {
        let err = FinsightError::ai(AiErrorKind::RateLimit, "slow down");
        assert_eq!(err.to_string(), "AI provider error (rate limit): slow down");
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinsightError = io_err.into();
        assert!(matches!(err, FinsightError::Io(_)));
    }
}
