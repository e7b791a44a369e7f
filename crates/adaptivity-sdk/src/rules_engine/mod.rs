//! RulesEngine - checks learner state against authored adaptivity rules
//!
//! The module is organized into:
//! - `types`: ScoringContext, CheckResult, CheckOutput
//! - `selection`: which rule fires, and the built-in default-wrong event
//! - `scoring`: attempt-decay and trap-state score policies
//! - `encoding`: base64 transport form of a result
//! - `engine`: Core RulesEngine implementation
//! - `tests`: Unit tests (test-only)

mod encoding;
mod engine;
mod scoring;
mod selection;
mod types;

pub use encoding::{decode_result, encode_result};
pub use engine::RulesEngine;
pub use scoring::{attempt_decay_score, finalize_score, trap_state_score};
pub use selection::{
    default_wrong_event, select_rule, Selection, DEFAULT_WRONG_EVENT_TYPE, DEFAULT_WRONG_RULE_ID,
};
pub use types::{CheckOutput, CheckResult, ScoringContext};

#[cfg(test)]
mod tests;
