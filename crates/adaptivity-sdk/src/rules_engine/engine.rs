//! Core RulesEngine implementation

use super::encoding::encode_result;
use super::scoring::{attempt_decay_score, finalize_score, trap_state_score};
use super::selection::{default_wrong_event, select_rule, Selection};
use super::types::{CheckOutput, CheckResult, ScoringContext};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use adaptivity_core::{Action, FlattenedState, MutateStateAction, Rule};
use adaptivity_parser::RuleParser;
use adaptivity_runtime::{apply_state, Environment, RuntimeError, ScopeId};
use std::collections::HashSet;

pub struct RulesEngine {
    /// Rules loaded from the configured documents
    rules: Vec<Rule>,

    /// Configuration
    config: EngineConfig,
}

impl RulesEngine {
    /// Create a rules engine, loading every configured rule document
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut rules = Vec::new();

        for path in &config.rule_files {
            let loaded = RuleParser::from_file(path)
                .map_err(|e| SdkError::InvalidRuleFile(format!("{}: {}", path.display(), e)))?;
            tracing::info!("✓ Loaded {} rules from {}", loaded.len(), path.display());
            rules.extend(loaded);
        }

        for (id, content) in &config.rule_contents {
            let loaded = RuleParser::parse_auto(content)?;
            tracing::info!("✓ Loaded {} rules from content '{}'", loaded.len(), id);
            rules.extend(loaded);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                tracing::warn!("Rule id '{}' is loaded more than once", rule.id);
            }
        }

        Ok(Self { rules, config })
    }

    /// Create a rules engine around rules that are already parsed
    pub fn with_rules(rules: Vec<Rule>, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    /// Rules loaded at construction
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check a state snapshot against a rule set
    ///
    /// Mutations of the fired rule are applied to a private environment built
    /// from `state`; use [`RulesEngine::check_in`] to keep them.
    pub fn check(
        &self,
        state: &FlattenedState,
        rules: &[Rule],
        ctx: &ScoringContext,
    ) -> Result<CheckResult> {
        let mut env = Environment::from_state(state);
        self.check_in(&mut env, ScopeId::ROOT, rules, ctx)
    }

    /// Check against the rules loaded at construction
    pub fn check_loaded(
        &self,
        state: &FlattenedState,
        ctx: &ScoringContext,
    ) -> Result<CheckResult> {
        self.check(state, &self.rules, ctx)
    }

    /// Check and return the base64 transport form of the result
    pub fn check_encoded(
        &self,
        state: &FlattenedState,
        rules: &[Rule],
        ctx: &ScoringContext,
    ) -> Result<String> {
        encode_result(&self.check(state, rules, ctx)?)
    }

    /// Check, encoding the result when `encode` is set
    pub fn evaluate(
        &self,
        state: &FlattenedState,
        rules: &[Rule],
        ctx: &ScoringContext,
        encode: bool,
    ) -> Result<CheckOutput> {
        let result = self.check(state, rules, ctx)?;
        if encode {
            Ok(CheckOutput::Encoded(encode_result(&result)?))
        } else {
            Ok(CheckOutput::Plain(result))
        }
    }

    /// Check against a shared environment
    ///
    /// Conditions read `scope` and its ancestors; the fired rule's mutations
    /// are written through `scope`, so layers sharing the environment see
    /// them.
    pub fn check_in(
        &self,
        env: &mut Environment,
        scope: ScopeId,
        rules: &[Rule],
        ctx: &ScoringContext,
    ) -> Result<CheckResult> {
        if env.scope_name(scope).is_none() {
            return Err(RuntimeError::UnknownScope(scope.index()).into());
        }

        let span = tracing::debug_span!("check", rules = rules.len());
        let _enter = span.enter();

        let selection = select_rule(rules, &env.view(scope), self.config.enable_tracing);

        let (event, mutations) = match selection.rule() {
            Some(rule) => {
                let operations: Vec<MutateStateAction> = rule
                    .actions()
                    .iter()
                    .filter_map(Action::as_mutation)
                    .cloned()
                    .collect();
                let mutations = apply_state(&operations, env, scope);
                if let Selection::Default(_) = selection {
                    tracing::debug!("No conditional rule matched, using default rule {}", rule.id);
                }
                (rule.fired_event(), mutations)
            }
            None => {
                tracing::debug!("No eligible rule, emitting built-in default-wrong event");
                (default_wrong_event(&self.config.default_wrong_feedback), Vec::new())
            }
        };

        let raw = if ctx.trap_state_score_scheme {
            trap_state_score(&mutations, &self.config.score_key)
        } else {
            attempt_decay_score(ctx)
        };
        let score = finalize_score(raw, ctx, self.config.score_precision);

        tracing::debug!(
            "Fired {} (correct={}), score {} / {}",
            event.event_type,
            event.params.correct,
            score,
            ctx.max_score
        );

        Ok(CheckResult {
            results: vec![event],
            score,
            out_of: ctx.max_score,
        })
    }
}
