//! Error types for the adaptivity core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A value cannot be coerced to its declared type
    #[error("Invalid shape for '{key}': expected {expected}, got {raw}")]
    InvalidShape {
        key: String,
        expected: String,
        raw: String,
    },

    /// A condition leaf names an operator that is not registered
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// A condition node is neither `all`, `any`, nor a valid leaf
    #[error("Malformed condition: {0}")]
    MalformedCondition(String),

    /// Attempt to write a read-only variable
    #[error("Variable is read-only: {0}")]
    ReadOnly(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl CoreError {
    pub(crate) fn invalid_shape(
        key: impl Into<String>,
        expected: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        CoreError::InvalidShape {
            key: key.into(),
            expected: expected.into(),
            raw: raw.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
