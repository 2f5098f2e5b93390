//! Error types for configuration loading and validation.

use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field held a value outside its valid range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// JSON parsing failed while loading configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
