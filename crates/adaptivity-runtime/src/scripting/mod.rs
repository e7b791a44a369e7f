//! Scripting environment
//!
//! Typed variable scopes, the expression evaluator and the assignment
//! entry points that mutate them.

mod assign;
mod environment;
mod evaluator;

pub use assign::{apply_state, eval_assign_script, AssignResult};
pub use environment::{Environment, ScopeId, ScopeView};
pub use evaluator::{
    evaluate_expression, evaluate_str, evaluate_value, resolve_value, templatize_text, Lookup,
};
