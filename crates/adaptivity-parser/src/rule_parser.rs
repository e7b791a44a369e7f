//! Rule parser
//!
//! Parses authored rule documents (JSON or YAML) into Rule AST nodes.
//!
//! Accepted document shapes:
//! - a single rule object
//! - an array of rules
//! - `{rules: [...]}`
//!
//! YAML input may hold several `---` separated documents; their rules are
//! concatenated in document order.

use crate::error::{ParseError, Result};
use adaptivity_core::condition::ConditionParser;
use adaptivity_core::{ConditionNode, Rule};
use serde::Deserialize as _;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use std::path::Path;

/// Rule parser
pub struct RuleParser;

impl RuleParser {
    /// Parse rules from JSON text
    pub fn parse_json(json: &str) -> Result<Vec<Rule>> {
        let raw: JsonValue = serde_json::from_str(json)?;
        Self::parse_value(&raw)
    }

    /// Parse rules from YAML text, possibly multi-document
    pub fn parse_yaml(yaml: &str) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        for document in serde_yaml::Deserializer::from_str(yaml) {
            let raw = JsonValue::deserialize(document)?;
            if raw.is_null() {
                continue;
            }
            rules.extend(Self::parse_value(&raw)?);
        }
        Self::warn_duplicate_ids(&rules);
        Ok(rules)
    }

    /// Parse rules from a JSON document value
    pub fn parse_value(raw: &JsonValue) -> Result<Vec<Rule>> {
        let rules = match raw {
            JsonValue::Array(items) => {
                items.iter().map(Self::parse_rule).collect::<Result<Vec<_>>>()?
            }
            JsonValue::Object(object) => match object.get("rules") {
                Some(JsonValue::Array(items)) => {
                    items.iter().map(Self::parse_rule).collect::<Result<Vec<_>>>()?
                }
                Some(other) => {
                    return Err(ParseError::InvalidValue {
                        field: "rules".to_string(),
                        message: format!("expected a list of rules, got {}", other),
                    })
                }
                None => vec![Self::parse_rule(raw)?],
            },
            other => {
                return Err(ParseError::UnsupportedDocument(format!(
                    "expected a rule, a list of rules or {{rules: [...]}}, got {}",
                    other
                )))
            }
        };

        Self::warn_duplicate_ids(&rules);
        Ok(rules)
    }

    /// Parse a single rule object
    ///
    /// The condition tree is parsed first so unknown operators and malformed
    /// nodes surface as their own error kinds instead of a serde message.
    pub fn parse_rule(raw: &JsonValue) -> Result<Rule> {
        let object = raw.as_object().ok_or_else(|| ParseError::InvalidValue {
            field: "rule".to_string(),
            message: format!("expected an object, got {}", raw),
        })?;

        Self::require_string(object, "id")?;
        if !object.contains_key("event") {
            return Err(ParseError::MissingField {
                field: "event".to_string(),
            });
        }

        let mut fields: Map<String, JsonValue> = object.clone();
        let conditions = match fields.remove("conditions") {
            Some(node) => ConditionParser::parse(&node)?,
            None => ConditionNode::unconditional(),
        };

        let mut rule: Rule = serde_json::from_value(JsonValue::Object(fields))?;
        rule.conditions = conditions;

        log::debug!(
            "Parsed rule '{}' (priority {}, {} condition leaves, {} actions)",
            rule.id,
            rule.priority,
            rule.conditions.leaves().len(),
            rule.actions().len()
        );

        Ok(rule)
    }

    /// Load rules from a file, choosing the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&content),
            Some("yaml") | Some("yml") => Self::parse_yaml(&content),
            _ => Err(ParseError::UnsupportedDocument(format!(
                "{} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Parse content whose format is unknown: JSON first, then YAML
    pub fn parse_auto(content: &str) -> Result<Vec<Rule>> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    fn require_string(object: &Map<String, JsonValue>, field: &str) -> Result<()> {
        match object.get(field) {
            Some(JsonValue::String(s)) if !s.is_empty() => Ok(()),
            Some(other) => Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a non-empty string, got {}", other),
            }),
            None => Err(ParseError::MissingField {
                field: field.to_string(),
            }),
        }
    }

    fn warn_duplicate_ids(rules: &[Rule]) {
        let mut seen = HashSet::new();
        for rule in rules {
            if !seen.insert(rule.id.as_str()) {
                log::warn!("Duplicate rule id '{}'", rule.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptivity_core::{Action, ConditionOperator, CoreError, MutateOperator};
    use serde_json::json;

    #[test]
    fn test_parse_single_rule() {
        let raw = json!({
            "id": "r.correct",
            "name": "correct",
            "priority": 1,
            "correct": true,
            "conditions": {"all": [
                {"fact": "stage.input.value", "operator": "equal", "value": 42}
            ]},
            "event": {
                "type": "r.correct",
                "params": {"actions": [{"type": "navigation", "params": {"target": "next"}}]}
            }
        });

        let rules = RuleParser::parse_value(&raw).unwrap();
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.id, "r.correct");
        assert!(rule.correct);
        assert_eq!(rule.priority, 1);
        assert_eq!(rule.conditions.leaves()[0].operator, ConditionOperator::Equal);
        assert_eq!(rule.actions(), &[Action::navigation("next")]);
    }

    #[test]
    fn test_missing_conditions_is_unconditional() {
        let rules = RuleParser::parse_json(
            r#"[{"id": "d", "name": "defaultWrong", "default": true, "event": {"type": "d"}}]"#,
        )
        .unwrap();
        assert!(rules[0].conditions.is_unconditional());
    }

    #[test]
    fn test_rules_document() {
        let rules = RuleParser::parse_json(
            r#"{"rules": [
                {"id": "a", "event": {"type": "a"}},
                {"id": "b", "event": {"type": "b"}, "disabled": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules[1].disabled);
    }

    #[test]
    fn test_parse_yaml_multi_document() {
        let yaml = r#"
id: trap
name: trap
correct: true
conditions:
  any:
    - fact: stage.dropdown.selectedIndex
      operator: equal
      value: 2
event:
  type: trap
  params:
    actions:
      - type: mutateState
        params:
          target: session.currentQuestionScore
          operator: "="
          value: "50 * {variables.scoreFactor}"
---
rules:
  - id: fallback
    default: true
    event:
      type: fallback
"#;
        let rules = RuleParser::parse_yaml(yaml).unwrap();
        assert_eq!(rules.len(), 2);
        let mutation = rules[0].actions()[0].as_mutation().unwrap();
        assert_eq!(mutation.operator, MutateOperator::Assign);
        assert_eq!(mutation.value.as_str(), Some("50 * {variables.scoreFactor}"));
        assert!(rules[1].default);
    }

    #[test]
    fn test_unknown_operator_keeps_its_kind() {
        let err = RuleParser::parse_json(
            r#"{"id": "x", "event": {"type": "x"},
                "conditions": {"all": [{"fact": "a", "operator": "nearly", "value": 1}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Core(CoreError::UnknownOperator(ref name)) if name == "nearly"
        ));
    }

    #[test]
    fn test_malformed_condition_keeps_its_kind() {
        let err = RuleParser::parse_json(
            r#"{"id": "x", "event": {"type": "x"}, "conditions": {"all": [], "any": []}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Core(CoreError::MalformedCondition(_))));
    }

    #[test]
    fn test_missing_fields() {
        let err = RuleParser::parse_json(r#"{"event": {"type": "x"}}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { ref field } if field == "id"));

        let err = RuleParser::parse_json(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { ref field } if field == "event"));
    }

    #[test]
    fn test_unsupported_document() {
        assert!(matches!(
            RuleParser::parse_json("42"),
            Err(ParseError::UnsupportedDocument(_))
        ));
        assert!(matches!(
            RuleParser::parse_json(r#"{"rules": 3}"#),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_auto() {
        let json = RuleParser::parse_auto(r#"[{"id": "j", "event": {"type": "j"}}]"#).unwrap();
        assert_eq!(json[0].id, "j");
        assert_eq!(RuleParser::parse_auto("id: y\nevent:\n  type: y\n").unwrap()[0].id, "y");
    }
}
