//! Builder pattern for RulesEngine

use crate::config::EngineConfig;
use crate::error::Result;
use crate::rules_engine::RulesEngine;
use std::path::PathBuf;

/// Builder for RulesEngine
///
/// # Example
///
/// ```rust,ignore
/// use adaptivity_sdk::RulesEngineBuilder;
///
/// let engine = RulesEngineBuilder::new()
///     .add_rule_file("rules/question-1.json")
///     .score_precision(1)
///     .build()?;
/// ```
pub struct RulesEngineBuilder {
    config: EngineConfig,
}

impl RulesEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        let contents = std::mem::take(&mut self.config.rule_contents);
        self.config = config;
        self.config.rule_contents.extend(contents);
        self
    }

    /// Add a rule file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add multiple rule files
    pub fn add_rule_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.rule_files.extend(paths);
        self
    }

    /// Add rule content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `id` - Name used in log messages
    /// * `content` - JSON or YAML rule document
    pub fn add_rule_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.config.rule_contents.push((id.into(), content.into()));
        self
    }

    /// Set score precision
    pub fn score_precision(mut self, precision: u32) -> Self {
        self.config.score_precision = precision;
        self
    }

    /// Set the trap-state score key
    pub fn score_key(mut self, key: impl Into<String>) -> Self {
        self.config.score_key = key.into();
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the rules engine, parsing every configured rule document
    pub fn build(self) -> Result<RulesEngine> {
        RulesEngine::new(self.config)
    }
}

impl Default for RulesEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
