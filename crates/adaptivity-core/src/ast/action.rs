//! Actions carried by a rule's event
//!
//! Wire shape: `{"type": "mutateState", "params": {...}}`. All actions of the
//! fired rule are delivered together, in authored order.

use crate::types::{Value, VariableType};
use serde::{Deserialize, Serialize};

/// Rule action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "camelCase")]
pub enum Action {
    /// Move the learner to another screen
    Navigation(NavigationAction),
    /// Change a variable in the scripting environment
    MutateState(MutateStateAction),
    /// Show feedback content
    Feedback(FeedbackAction),
}

impl Action {
    pub fn navigation(target: impl Into<String>) -> Self {
        Action::Navigation(NavigationAction {
            target: target.into(),
        })
    }

    pub fn mutate(
        target: impl Into<String>,
        operator: MutateOperator,
        value: impl Into<Value>,
    ) -> Self {
        Action::MutateState(MutateStateAction {
            target: target.into(),
            operator,
            value: value.into(),
            target_type: None,
        })
    }

    pub fn feedback(parts_layout: Vec<PartLayout>) -> Self {
        Action::Feedback(FeedbackAction {
            id: None,
            parts_layout,
        })
    }

    pub fn as_mutation(&self) -> Option<&MutateStateAction> {
        match self {
            Action::MutateState(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationAction {
    pub target: String,
}

/// State mutation applied through the scripting environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateStateAction {
    /// Fully-qualified key of the variable to change
    pub target: String,
    pub operator: MutateOperator,
    /// Literal, or a script expression such as `"50 * {variables.scoreFactor}"`
    pub value: Value,
    /// Declared type used when the target does not exist yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<VariableType>,
}

impl MutateStateAction {
    pub fn with_target_type(mut self, target_type: VariableType) -> Self {
        self.target_type = Some(target_type);
        self
    }
}

/// How a mutation combines with the target's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutateOperator {
    /// Replace the value
    #[serde(rename = "=", alias = "setting to")]
    Assign,
    /// Add to the current value
    #[serde(rename = "adding")]
    Adding,
    /// Subtract from the current value
    #[serde(rename = "subtracting")]
    Subtracting,
    /// Make the target follow another variable
    #[serde(rename = "bind to")]
    BindTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub parts_layout: Vec<PartLayout>,
}

/// A rendering part declared by a screen or feedback layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLayout {
    pub id: String,
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub custom: Value,
}

impl PartLayout {
    pub fn new(id: impl Into<String>, part_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            part_type: part_type.into(),
            custom: Value::Null,
        }
    }

    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = custom;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutate_state_wire_shape() {
        let raw = json!({
            "type": "mutateState",
            "params": {
                "target": "session.currentQuestionScore",
                "operator": "=",
                "value": "50 * {variables.scoreFactor}",
                "targetType": 1
            }
        });
        let action: Action = serde_json::from_value(raw.clone()).unwrap();
        let mutation = action.as_mutation().unwrap();
        assert_eq!(mutation.operator, MutateOperator::Assign);
        assert_eq!(mutation.target_type, Some(VariableType::Number));
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn test_setting_to_alias() {
        let op: MutateOperator = serde_json::from_str("\"setting to\"").unwrap();
        assert_eq!(op, MutateOperator::Assign);
        let op: MutateOperator = serde_json::from_str("\"bind to\"").unwrap();
        assert_eq!(op, MutateOperator::BindTo);
    }

    #[test]
    fn test_feedback_and_navigation() {
        let raw = json!([
            {"type": "navigation", "params": {"target": "next"}},
            {"type": "feedback", "params": {"partsLayout": [
                {"id": "fb-text", "type": "janus-text-flow"}
            ]}}
        ]);
        let actions: Vec<Action> = serde_json::from_value(raw).unwrap();
        assert_eq!(actions[0], Action::navigation("next"));
        match &actions[1] {
            Action::Feedback(fb) => assert_eq!(fb.parts_layout[0].id, "fb-text"),
            other => panic!("Expected feedback, got {:?}", other),
        }
    }
}
