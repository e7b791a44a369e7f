//! Parser error types

use adaptivity_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Rule document could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown operator, malformed condition or invalid typed value
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Invalid expression syntax
    #[error("Invalid expression syntax at {position}: {message}")]
    InvalidExpression { position: usize, message: String },

    /// Unsupported document format
    #[error("Unsupported rule document: {0}")]
    UnsupportedDocument(String),
}

impl ParseError {
    pub(crate) fn expression(position: usize, message: impl Into<String>) -> Self {
        ParseError::InvalidExpression {
            position,
            message: message.into(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
