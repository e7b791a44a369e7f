//! Condition tree definitions
//!
//! A condition node is exactly one of `{all: [...]}`, `{any: [...]}` or a
//! leaf `{fact, operator, value}`. Deserialization goes through
//! [`ConditionParser`](crate::condition::ConditionParser), so unknown
//! operators and malformed nodes are rejected while loading content.

use super::operator::ConditionOperator;
use crate::condition::ConditionParser;
use crate::types::Value;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition leaf: compare a fact against a value with an operator
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// State key (or `{...}` expression) the subject is read from
    pub fact: String,
    /// Registered operator
    pub operator: ConditionOperator,
    /// Comparand; strings containing `{...}` are resolved against the environment
    pub value: Value,
}

impl Condition {
    pub fn new(
        fact: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            fact: fact.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Condition tree node
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    /// Every child must hold (empty list holds)
    All(Vec<ConditionNode>),
    /// At least one child must hold (empty list fails)
    Any(Vec<ConditionNode>),
    /// Single comparison
    Leaf(Condition),
}

impl ConditionNode {
    pub fn all(children: Vec<ConditionNode>) -> Self {
        ConditionNode::All(children)
    }

    pub fn any(children: Vec<ConditionNode>) -> Self {
        ConditionNode::Any(children)
    }

    pub fn leaf(
        fact: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<Value>,
    ) -> Self {
        ConditionNode::Leaf(Condition::new(fact, operator, value))
    }

    /// `{all: []}`: the node holds regardless of state
    pub fn unconditional() -> Self {
        ConditionNode::All(Vec::new())
    }

    pub fn is_unconditional(&self) -> bool {
        matches!(self, ConditionNode::All(children) if children.is_empty())
    }

    /// Every leaf in the tree, depth first
    pub fn leaves(&self) -> Vec<&Condition> {
        let mut result = Vec::new();
        self.collect_leaves(&mut result);
        result
    }

    fn collect_leaves<'a>(&'a self, result: &mut Vec<&'a Condition>) {
        match self {
            ConditionNode::All(children) | ConditionNode::Any(children) => {
                for child in children {
                    child.collect_leaves(result);
                }
            }
            ConditionNode::Leaf(condition) => result.push(condition),
        }
    }
}

impl Default for ConditionNode {
    fn default() -> Self {
        Self::unconditional()
    }
}

impl Serialize for ConditionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConditionNode::All(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("all", children)?;
                map.end()
            }
            ConditionNode::Any(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("any", children)?;
                map.end()
            }
            ConditionNode::Leaf(condition) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("fact", &condition.fact)?;
                map.serialize_entry("operator", condition.operator.name())?;
                map.serialize_entry("value", &condition.value)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConditionNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        ConditionParser::parse(&raw).map_err(D::Error::custom)
    }
}
