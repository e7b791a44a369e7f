//! Condition node parser
//!
//! Parses JSON condition nodes such as:
//! - `{"all": [...]}`
//! - `{"any": [...]}`
//! - `{"fact": "stage.a.value", "operator": "equal", "value": 3}`

use crate::ast::{Condition, ConditionNode, ConditionOperator};
use crate::error::{CoreError, Result};
use crate::types::Value;
use serde_json::{Map, Value as JsonValue};

/// Keys a leaf may carry besides `fact`, `operator` and `value`
const IGNORED_LEAF_KEYS: &[&str] = &["id", "type", "path", "params", "priority"];

/// Condition parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a condition node from its JSON form
    pub fn parse(raw: &JsonValue) -> Result<ConditionNode> {
        let object = raw.as_object().ok_or_else(|| {
            CoreError::MalformedCondition(format!("expected an object, got {}", raw))
        })?;

        let has_all = object.contains_key("all");
        let has_any = object.contains_key("any");
        let has_leaf = object.contains_key("fact") || object.contains_key("operator");

        match (has_all, has_any, has_leaf) {
            (true, false, false) => Ok(ConditionNode::All(Self::parse_children(object, "all")?)),
            (false, true, false) => Ok(ConditionNode::Any(Self::parse_children(object, "any")?)),
            (false, false, true) => Ok(ConditionNode::Leaf(Self::parse_leaf(object)?)),
            (false, false, false) => Err(CoreError::MalformedCondition(format!(
                "node is neither all, any, nor a leaf: {}",
                raw
            ))),
            _ => Err(CoreError::MalformedCondition(format!(
                "node mixes more than one shape: {}",
                raw
            ))),
        }
    }

    /// Parse a condition node from JSON text
    pub fn parse_str(json: &str) -> Result<ConditionNode> {
        let raw: JsonValue = serde_json::from_str(json)
            .map_err(|e| CoreError::MalformedCondition(e.to_string()))?;
        Self::parse(&raw)
    }

    fn parse_children(object: &Map<String, JsonValue>, key: &str) -> Result<Vec<ConditionNode>> {
        let children = object.get(key).and_then(JsonValue::as_array).ok_or_else(|| {
            CoreError::MalformedCondition(format!("'{}' must be a list of conditions", key))
        })?;

        children.iter().map(Self::parse).collect()
    }

    fn parse_leaf(object: &Map<String, JsonValue>) -> Result<Condition> {
        let fact = match object.get("fact") {
            Some(JsonValue::String(fact)) if !fact.trim().is_empty() => fact.clone(),
            other => {
                return Err(CoreError::MalformedCondition(format!(
                    "leaf 'fact' must be a non-empty string, got {:?}",
                    other
                )))
            }
        };

        let operator = match object.get("operator") {
            Some(JsonValue::String(name)) => name.parse::<ConditionOperator>()?,
            other => {
                return Err(CoreError::MalformedCondition(format!(
                    "leaf '{}' has no operator name: {:?}",
                    fact, other
                )))
            }
        };

        let value = object.get("value").cloned().ok_or_else(|| {
            CoreError::MalformedCondition(format!("leaf '{}' has no value", fact))
        })?;

        for key in object.keys() {
            if !matches!(key.as_str(), "fact" | "operator" | "value")
                && !IGNORED_LEAF_KEYS.contains(&key.as_str())
            {
                log::debug!("Ignoring unexpected key '{}' on condition '{}'", key, fact);
            }
        }

        Ok(Condition {
            fact,
            operator,
            value: Value::from(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_leaf() {
        let node = ConditionParser::parse(&json!({
            "fact": "stage.slider.value",
            "operator": "inRange",
            "value": [1, 9]
        }))
        .unwrap();

        match node {
            ConditionNode::Leaf(c) => {
                assert_eq!(c.fact, "stage.slider.value");
                assert_eq!(c.operator, ConditionOperator::InRange);
                assert_eq!(c.value, Value::from(vec![1, 9]));
            }
            other => panic!("Expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_groups() {
        let node = ConditionParser::parse_str(
            r#"{"all": [
                {"fact": "a", "operator": "equal", "value": 1},
                {"any": [
                    {"fact": "b", "operator": "contains", "value": "x"},
                    {"all": []}
                ]}
            ]}"#,
        )
        .unwrap();

        match node {
            ConditionNode::All(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], ConditionNode::Any(_)));
            }
            other => panic!("Expected all group, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operator_fails_fast() {
        let err = ConditionParser::parse(&json!({
            "all": [{"fact": "a", "operator": "approximately", "value": 1}]
        }))
        .unwrap_err();
        assert_eq!(err, CoreError::UnknownOperator("approximately".to_string()));
    }

    #[test]
    fn test_malformed_nodes() {
        let cases = vec![
            json!([]),
            json!({}),
            json!({"all": {}}),
            json!({"all": [], "any": []}),
            json!({"all": [], "fact": "a", "operator": "equal", "value": 1}),
            json!({"fact": "a", "operator": "equal"}),
            json!({"fact": "", "operator": "equal", "value": 1}),
            json!({"fact": "a", "operator": 3, "value": 1}),
        ];

        for raw in cases {
            let result = ConditionParser::parse(&raw);
            assert!(
                matches!(result, Err(CoreError::MalformedCondition(_))),
                "expected MalformedCondition for {}, got {:?}",
                raw,
                result
            );
        }
    }
}
