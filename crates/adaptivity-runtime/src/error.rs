//! Runtime error types

use adaptivity_core::CoreError;
use adaptivity_parser::ParseError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Invalid shape, read-only write or other typed-value failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Script expression could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Scope handle does not belong to the environment
    #[error("Unknown scope: {0}")]
    UnknownScope(usize),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
