//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Core error (invalid shape, unknown operator, malformed condition)
    #[error(transparent)]
    CoreError(#[from] adaptivity_core::CoreError),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] adaptivity_parser::ParseError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] adaptivity_runtime::RuntimeError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid rule file
    #[error("Invalid rule file: {0}")]
    InvalidRuleFile(String),

    /// Result could not be encoded for transport
    #[error("Encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),

    /// Encoded result is not valid base64
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
