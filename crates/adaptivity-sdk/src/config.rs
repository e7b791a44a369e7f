//! Configuration types for RulesEngine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key a trap-state rule writes its score to, unless configured otherwise
pub const DEFAULT_SCORE_KEY: &str = "session.currentQuestionScore";

/// Feedback shown by the built-in default-wrong event
pub const DEFAULT_WRONG_FEEDBACK: &str = "Incorrect, please try again.";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule file path(s)
    pub rule_files: Vec<PathBuf>,

    /// Rule contents (id, content) - alternative to file paths
    #[serde(skip)]
    pub rule_contents: Vec<(String, String)>,

    /// Decimal places scores are rounded to
    pub score_precision: u32,

    /// State key trap-state rules assign their score to
    pub score_key: String,

    /// Emit a debug event for every evaluated rule
    pub enable_tracing: bool,

    /// Text of the built-in default-wrong feedback
    pub default_wrong_feedback: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            rule_files: Vec::new(),
            rule_contents: Vec::new(),
            score_precision: 2,
            score_key: DEFAULT_SCORE_KEY.to_string(),
            enable_tracing: false,
            default_wrong_feedback: DEFAULT_WRONG_FEEDBACK.to_string(),
        }
    }

    /// Parse a configuration from YAML text; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    /// Set score precision
    pub fn with_score_precision(mut self, precision: u32) -> Self {
        self.score_precision = precision;
        self
    }

    /// Set the trap-state score key
    pub fn with_score_key(mut self, key: impl Into<String>) -> Self {
        self.score_key = key.into();
        self
    }

    /// Set the default-wrong feedback text
    pub fn with_default_wrong_feedback(mut self, text: impl Into<String>) -> Self {
        self.default_wrong_feedback = text.into();
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.score_precision, 2);
        assert_eq!(config.score_key, "session.currentQuestionScore");
        assert!(!config.enable_tracing);
        assert!(config.rule_files.is_empty());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = EngineConfig::from_yaml_str(
            r#"
rule_files:
  - rules/q1.json
score_precision: 0
enable_tracing: true
"#,
        )
        .unwrap();
        assert_eq!(config.rule_files, vec![PathBuf::from("rules/q1.json")]);
        assert_eq!(config.score_precision, 0);
        assert!(config.enable_tracing);
        assert_eq!(config.default_wrong_feedback, DEFAULT_WRONG_FEEDBACK);
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = EngineConfig::from_yaml_str("score_precision: [1]").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_rule_file(PathBuf::from("a.yaml"))
            .with_score_precision(1)
            .with_score_key("session.trapScore")
            .with_default_wrong_feedback("Try again")
            .enable_tracing(true);
        assert_eq!(config.rule_files.len(), 1);
        assert_eq!(config.score_key, "session.trapScore");
        assert_eq!(config.default_wrong_feedback, "Try again");
        assert!(config.enable_tracing);
    }
}
