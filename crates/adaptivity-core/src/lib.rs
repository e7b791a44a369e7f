//! Adaptivity Core - Core types and definitions for the adaptive activity rules engine
//!
//! This crate provides the fundamental types used across the adaptivity crates:
//! - Runtime `Value` and typed variables (`TypedValue`, `VariableType`)
//! - Rule, condition and action AST definitions
//! - The condition-node parser that validates authored condition trees
//! - Error types

pub mod ast;
pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{
    Action, ArithmeticOperator, Condition, ConditionNode, ConditionOperator, EventParams,
    Expression, FeedbackAction, MutateOperator, MutateStateAction, NavigationAction, PartLayout,
    Rule, RuleEvent,
};
pub use error::CoreError;
pub use types::{FlattenedState, TypedValue, Value, VariableType};
