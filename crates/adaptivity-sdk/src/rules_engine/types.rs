//! Request/Response types for RulesEngine

use adaptivity_core::{RuleEvent, Value};
use serde::{Deserialize, Serialize, Serializer};

/// Scoring parameters for one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringContext {
    /// Points available for the question
    #[serde(default)]
    pub max_score: f64,

    /// Attempts over which the score decays to zero; 0 disables decay
    #[serde(default)]
    pub max_attempt: u32,

    /// 1-based attempt number of this check
    #[serde(default = "default_attempt")]
    pub current_attempt_number: u32,

    #[serde(default)]
    pub negative_score_allowed: bool,

    /// Score comes from the fired rule's score mutation instead of attempt decay
    #[serde(default)]
    pub trap_state_score_scheme: bool,
}

fn default_attempt() -> u32 {
    1
}

impl ScoringContext {
    /// Attempt-decay context on the first attempt
    pub fn new(max_score: f64, max_attempt: u32) -> Self {
        Self {
            max_score,
            max_attempt,
            current_attempt_number: 1,
            negative_score_allowed: false,
            trap_state_score_scheme: false,
        }
    }

    /// Trap-state context
    pub fn trap_state(max_score: f64) -> Self {
        Self {
            trap_state_score_scheme: true,
            ..Self::new(max_score, 0)
        }
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.current_attempt_number = attempt;
        self
    }

    pub fn with_negative_score_allowed(mut self, allowed: bool) -> Self {
        self.negative_score_allowed = allowed;
        self
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::new(0.0, 0)
    }
}

/// Outcome of one check: the fired event plus the score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Fired events; exactly one for every check
    pub results: Vec<RuleEvent>,

    #[serde(serialize_with = "whole_number")]
    pub score: f64,

    #[serde(serialize_with = "whole_number")]
    pub out_of: f64,
}

impl CheckResult {
    /// Whether the fired rule marks the answer correct
    pub fn is_correct(&self) -> bool {
        self.results.iter().any(|event| event.params.correct)
    }

    /// Type of the first fired event
    pub fn event_type(&self) -> Option<&str> {
        self.results.first().map(|event| event.event_type.as_str())
    }
}

/// Check output in the form the caller asked for
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutput {
    Plain(CheckResult),
    /// base64 of the JSON text of the plain result
    Encoded(String),
}

impl CheckOutput {
    pub fn as_plain(&self) -> Option<&CheckResult> {
        match self {
            CheckOutput::Plain(result) => Some(result),
            CheckOutput::Encoded(_) => None,
        }
    }

    pub fn as_encoded(&self) -> Option<&str> {
        match self {
            CheckOutput::Encoded(text) => Some(text),
            CheckOutput::Plain(_) => None,
        }
    }
}

// scores print as `7`, not `7.0`
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Value::Number(*value).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scoring_context_wire_names() {
        let ctx: ScoringContext = serde_json::from_value(json!({
            "maxScore": 10,
            "maxAttempt": 10,
            "currentAttemptNumber": 4,
            "negativeScoreAllowed": false,
            "trapStateScoreScheme": false
        }))
        .unwrap();
        assert_eq!(ctx, ScoringContext::new(10.0, 10).with_attempt(4));
    }

    #[test]
    fn test_scoring_context_defaults() {
        let ctx: ScoringContext = serde_json::from_value(json!({"maxScore": 5})).unwrap();
        assert_eq!(ctx.current_attempt_number, 1);
        assert_eq!(ctx.max_attempt, 0);
        assert!(!ctx.trap_state_score_scheme);
    }

    #[test]
    fn test_check_result_serializes_whole_scores() {
        let result = CheckResult {
            results: vec![RuleEvent::new("correct")],
            score: 7.0,
            out_of: 10.0,
        };
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains(r#""score":7,"out_of":10"#));

        let fractional = CheckResult {
            score: 6.67,
            ..result
        };
        assert!(serde_json::to_string(&fractional).unwrap().contains(r#""score":6.67"#));
    }

    #[test]
    fn test_check_output_accessors() {
        let output = CheckOutput::Encoded("e30=".to_string());
        assert_eq!(output.as_encoded(), Some("e30="));
        assert!(output.as_plain().is_none());
    }
}
