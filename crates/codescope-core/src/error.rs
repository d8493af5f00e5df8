//! Centralized error types for CodeScope.

use thiserror::Error;

/// Main error type for CodeScope operations.
#[derive(Error, Debug)]
pub enum CodeScopeError {
    /// Rejected locally, before any request is made.
    #[error("{0}")]
    Validation(String),

    /// The server answered with an `error` field.
    #[error("{0}")]
    Application(String),

    #[error("{operation} failed: {reason}")]
    Status {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for CodeScope operations.
pub type CodeScopeResult<T> = Result<T, CodeScopeError>;

impl CodeScopeError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_operation_and_reason() {
        let err = CodeScopeError::Status {
            operation: "Format",
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "Format failed: Internal Server Error");
    }

    #[test]
    fn test_application_message_is_verbatim() {
        let err = CodeScopeError::Application("Analysis failed: bad syntax".to_string());
        assert_eq!(err.to_string(), "Analysis failed: bad syntax");
    }
}
