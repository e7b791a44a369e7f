//! Evaluation engine module
//!
//! Evaluates authored condition trees against state.

pub mod condition_evaluator;

pub use condition_evaluator::ConditionEvaluator;
