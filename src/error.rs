//! Custom error types for WattBook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for WattBook operations
#[derive(Error, Debug)]
pub enum WattbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A store or backup file whose contents cannot be decoded as records
    #[error("Corrupt data: {0}")]
    Corrupt(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl WattbookError {
    /// Create a "not found" error for clients
    pub fn client_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Client",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
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

    /// Check if this error came from the filesystem or from unreadable file contents
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Corrupt(_) | Self::Storage(_))
    }
}

impl From<std::io::Error> for WattbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WattbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for WattBook operations
pub type WattbookResult<T> = Result<T, WattbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WattbookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = WattbookError::client_not_found("42");
        assert_eq!(err.to_string(), "Client not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_bill_not_found_error() {
        let err = WattbookError::bill_not_found("7");
        assert_eq!(err.to_string(), "Bill not found: 7");
    }

    #[test]
    fn test_io_class() {
        assert!(WattbookError::Corrupt("short".into()).is_io());
        assert!(WattbookError::Io("denied".into()).is_io());
        assert!(!WattbookError::Validation("bad".into()).is_io());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WattbookError = io_err.into();
        assert!(matches!(err, WattbookError::Io(_)));
    }
}
