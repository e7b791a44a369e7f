//! Adaptivity Runtime - operators, scripting and state for adaptive activities
//!
//! This crate provides:
//! - the operator library used by condition leaves
//! - the scripting environment: scoped typed variables, expression
//!   evaluation, templating, assignment scripts and state mutations
//! - the state snapshot service (flatten/unflatten, localized snapshots)
//! - the condition tree evaluator

pub mod engine;
pub mod error;
pub mod operators;
pub mod scripting;
pub mod state;

// Re-export main types
pub use engine::ConditionEvaluator;
pub use error::{Result, RuntimeError};
pub use operators::{apply_operator, operator_fn, OperatorFn};
pub use scripting::{
    apply_state, eval_assign_script, evaluate_expression, evaluate_str, evaluate_value,
    resolve_value, templatize_text, AssignResult, Environment, Lookup, ScopeId, ScopeView,
};
pub use state::{
    flatten, get_env_state, get_layered_state_snapshot, get_localized_state_snapshot, unflatten,
    ActivityLayer,
};
