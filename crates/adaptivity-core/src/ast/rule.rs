//! Rule AST definitions

use super::action::Action;
use super::condition::ConditionNode;
use serde::{Deserialize, Serialize};

/// Authored adaptivity rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Unique rule ID
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Evaluation order; lower fires first, ties keep authored order
    #[serde(default)]
    pub priority: i64,

    /// Disabled rules never fire
    #[serde(default)]
    pub disabled: bool,

    /// Fallback rule used when no conditional rule matches
    #[serde(default)]
    pub default: bool,

    /// Whether firing this rule means the learner answered correctly
    #[serde(default)]
    pub correct: bool,

    /// Condition tree; `{all: []}` always holds
    #[serde(default)]
    pub conditions: ConditionNode,

    /// Event emitted when the rule fires
    pub event: RuleEvent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_progress: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_score: Option<f64>,
}

impl Rule {
    /// Create a new enabled, non-default, incorrect rule
    pub fn new(id: impl Into<String>, name: impl Into<String>, conditions: ConditionNode) -> Self {
        let name = name.into();
        Rule {
            id: id.into(),
            event: RuleEvent::new(name.clone()),
            name,
            priority: 0,
            disabled: false,
            default: false,
            correct: false,
            conditions,
            force_progress: None,
            additional_score: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_correct(mut self, correct: bool) -> Self {
        self.correct = correct;
        self
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.event.params.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.event.params.actions = actions;
        self
    }

    /// Actions of this rule's event, in authored order
    pub fn actions(&self) -> &[Action] {
        &self.event.params.actions
    }

    /// The event this rule emits when it fires, stamped with the rule's outcome flags
    pub fn fired_event(&self) -> RuleEvent {
        let mut event = self.event.clone();
        event.params.correct = self.correct;
        event.params.default = self.default;
        event.params.rule_id = Some(self.id.clone());
        if self.force_progress.is_some() {
            event.params.force_progress = self.force_progress;
        }
        if self.additional_score.is_some() {
            event.params.additional_score = self.additional_score;
        }
        event
    }
}

/// Event emitted by a fired rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub params: EventParams,
}

impl RuleEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            params: EventParams::default(),
        }
    }
}

/// Event parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_progress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_score: Option<f64>,
}
