//! Rule selection: which single rule fires for a state

use adaptivity_core::{Action, PartLayout, Rule, RuleEvent, Value};
use adaptivity_runtime::{ConditionEvaluator, Lookup};
use std::collections::BTreeMap;

/// Rule id and event type of the built-in fallback event
pub const DEFAULT_WRONG_RULE_ID: &str = "builtin.defaultWrong";
pub const DEFAULT_WRONG_EVENT_TYPE: &str = "defaultWrong";

/// How the fired rule was chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// A conditional rule whose conditions held
    Matched(&'a Rule),
    /// No conditional rule held; an enabled default rule was used
    Default(&'a Rule),
    /// Nothing was eligible
    Fallback,
}

impl<'a> Selection<'a> {
    pub fn rule(&self) -> Option<&'a Rule> {
        match self {
            Selection::Matched(rule) | Selection::Default(rule) => Some(*rule),
            Selection::Fallback => None,
        }
    }
}

/// Pick the rule that fires
///
/// Disabled rules are dropped, the rest are visited in ascending priority
/// (stable, so ties keep authored order). The first non-default rule whose
/// conditions hold wins. Otherwise an enabled default rule is used, the
/// `correct` one first.
pub fn select_rule<'a>(rules: &'a [Rule], vars: &dyn Lookup, trace: bool) -> Selection<'a> {
    let mut ordered: Vec<&Rule> = rules.iter().filter(|rule| !rule.disabled).collect();
    ordered.sort_by_key(|rule| rule.priority);

    for rule in ordered.iter().copied().filter(|rule| !rule.default) {
        let matched = ConditionEvaluator::evaluate(&rule.conditions, vars);
        if trace {
            tracing::debug!(rule = %rule.id, priority = rule.priority, matched, "evaluated rule");
        }
        if matched {
            return Selection::Matched(rule);
        }
    }

    let defaults: Vec<&Rule> = ordered
        .iter()
        .copied()
        .filter(|rule| rule.default && ConditionEvaluator::evaluate(&rule.conditions, vars))
        .collect();

    defaults
        .iter()
        .find(|rule| rule.correct)
        .or_else(|| defaults.first())
        .map(|rule| Selection::Default(*rule))
        .unwrap_or(Selection::Fallback)
}

/// The built-in event emitted when no rule is eligible
pub fn default_wrong_event(feedback_text: &str) -> RuleEvent {
    let mut custom = BTreeMap::new();
    custom.insert("text".to_string(), Value::from(feedback_text));
    let feedback = PartLayout::new(format!("{}.feedback", DEFAULT_WRONG_RULE_ID), "janus-text-flow")
        .with_custom(Value::Object(custom));

    let mut event = RuleEvent::new(DEFAULT_WRONG_EVENT_TYPE);
    event.params.actions = vec![Action::feedback(vec![feedback])];
    event.params.default = true;
    event.params.rule_id = Some(DEFAULT_WRONG_RULE_ID.to_string());
    event
}
