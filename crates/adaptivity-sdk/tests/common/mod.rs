//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use adaptivity_core::FlattenedState;
use adaptivity_sdk::{CheckResult, Rule, RulesEngine, RulesEngineBuilder, ScoringContext};

/// Test helper that builds a RulesEngine from inline rule documents
pub struct TestEngine {
    contents: Vec<String>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
        }
    }

    /// Add a JSON or YAML rule document
    pub fn with_rules(mut self, document: &str) -> Self {
        self.contents.push(document.trim().to_string());
        self
    }

    pub fn build(&self) -> RulesEngine {
        self.contents
            .iter()
            .enumerate()
            .fold(RulesEngineBuilder::new(), |builder, (i, content)| {
                builder.add_rule_content(format!("doc-{}", i), content.clone())
            })
            .build()
            .expect("Failed to build engine")
    }

    /// Check the loaded rules against a state
    pub fn check(&self, state: FlattenedState, ctx: ScoringContext) -> CheckResult {
        self.build().check_loaded(&state, &ctx).expect("Check failed")
    }
}

/// Helper to create a flattened state from key-value pairs
#[macro_export]
macro_rules! state {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = adaptivity_core::FlattenedState::new();
        $(
            map.insert($key.to_string(), adaptivity_core::Value::from($value));
        )*
        map
    }};
}

/// Parse rules from a JSON fixture
pub fn rules(json: serde_json::Value) -> Vec<Rule> {
    adaptivity_parser::RuleParser::parse_value(&json).expect("Invalid rule fixture")
}

/// Assertion helpers for CheckResult
pub trait CheckAssertions {
    fn assert_single_event(&self, event_type: &str);
    fn assert_score(&self, score: f64, out_of: f64);
    fn assert_correct(&self, correct: bool);
}

impl CheckAssertions for CheckResult {
    fn assert_single_event(&self, event_type: &str) {
        assert_eq!(self.results.len(), 1, "expected exactly one event, got {:?}", self.results);
        assert_eq!(self.results[0].event_type, event_type);
    }

    fn assert_score(&self, score: f64, out_of: f64) {
        assert_eq!(self.score, score, "score");
        assert_eq!(self.out_of, out_of, "out_of");
    }

    fn assert_correct(&self, correct: bool) {
        assert_eq!(self.is_correct(), correct);
    }
}
