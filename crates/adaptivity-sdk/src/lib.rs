//! Adaptivity Rules Engine SDK
//!
//! High-level API for checking learner state against adaptivity rules:
//! rule selection, scoring and the encoded transport form of a result.

pub mod builder;
pub mod config;
pub mod error;
pub mod rules_engine;

// Re-export main types
pub use builder::RulesEngineBuilder;
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use rules_engine::{CheckOutput, CheckResult, RulesEngine, ScoringContext};

// Re-export commonly used types from dependencies
pub use adaptivity_core::{Action, FlattenedState, Rule, RuleEvent, Value};
pub use adaptivity_runtime::{Environment, ScopeId};
