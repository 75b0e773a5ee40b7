//! Error types for the assent library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`AssentError`]. Configuration problems (malformed keyword tables, bad
//! thresholds, unusable context rules) surface at load time; the only
//! per-call errors are invalid input and an unavailable fallback model.
//! A short or ambiguous utterance is never an error — it is a legitimate
//! `Uncertain` classification.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for assent operations.
#[derive(Error, Debug)]
pub enum AssentError {
    /// Raw input is not classifiable text (e.g. embedded NUL, invalid UTF-8
    /// from a batch file). Rejected before normalization, never coerced.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed keyword set, context-rule list, or threshold at load time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The statistical fallback cannot load or invoke its model artifact.
    /// The pipeline fails closed rather than guessing a label.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// I/O errors (config files, model artifacts, batch files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`AssentError`].
pub type Result<T> = std::result::Result<T, AssentError>;

impl AssentError {
    /// Create a new invalid-input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        AssentError::InvalidInput(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        AssentError::Configuration(msg.into())
    }

    /// Create a new model-unavailable error.
    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        AssentError::ModelUnavailable(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        AssentError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AssentError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssentError::configuration("duplicate keyword");
        assert_eq!(err.to_string(), "Configuration error: duplicate keyword");

        let err = AssentError::model_unavailable("artifact missing");
        assert_eq!(err.to_string(), "Model unavailable: artifact missing");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: AssentError = io_err.into();
        assert!(matches!(err, AssentError::Io(_)));
    }
}
