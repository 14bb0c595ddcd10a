//! Error types and handling for tree formatting operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Weave operations
#[derive(Debug, Error)]
pub enum WeaveError {
    /// A counted loop whose header has no control parenthesis, so clause
    /// alignment cannot be computed
    #[error("Malformed loop header, expected a control section in: {header:?}")]
    MalformedLoopHeader { header: String },

    /// Style values that cannot drive the indentation engine
    #[error("Invalid style setting '{field}': {message}")]
    InvalidStyle { field: String, message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Style,
    Config,
    Io,
}

impl WeaveError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeaveError::MalformedLoopHeader { .. } => ErrorKind::Format,
            WeaveError::InvalidStyle { .. } => ErrorKind::Style,
            WeaveError::ConfigError { .. } => ErrorKind::Config,
            WeaveError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error is recoverable (processing can continue with the
    /// next compilation unit)
    ///
    /// A malformed loop header aborts its own unit but never the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Format)
    }

    /// Create a malformed loop header error
    pub fn malformed_loop_header(header: impl Into<String>) -> Self {
        Self::MalformedLoopHeader {
            header: header.into(),
        }
    }

    /// Create an invalid style error
    pub fn invalid_style(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStyle {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_loop_header_is_recoverable() {
        let err = WeaveError::malformed_loop_header("for x");
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("for x"));
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = WeaveError::config_error("bad yaml");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Configuration error: bad yaml");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = WeaveError::io_error("weave.yaml", source);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("weave.yaml"));
    }
}
