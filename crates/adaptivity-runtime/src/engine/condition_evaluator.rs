//! Condition tree evaluation

use crate::operators::apply_operator;
use crate::scripting::{evaluate_expression, resolve_value, templatize_text, Lookup};
use adaptivity_core::{Condition, ConditionNode, Value};
use adaptivity_parser::ExpressionParser;

/// Evaluates condition trees against a variable source
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition node
    ///
    /// `all` holds when every child holds (vacuously for `[]`), `any` when at
    /// least one does (never for `[]`). Both stop at the first decisive child.
    pub fn evaluate(node: &ConditionNode, vars: &dyn Lookup) -> bool {
        match node {
            ConditionNode::All(children) => {
                for child in children {
                    if !Self::evaluate(child, vars) {
                        tracing::debug!("all-group failed at {:?}", child);
                        return false;
                    }
                }
                true
            }
            ConditionNode::Any(children) => {
                for child in children {
                    if Self::evaluate(child, vars) {
                        return true;
                    }
                }
                false
            }
            ConditionNode::Leaf(condition) => Self::evaluate_leaf(condition, vars),
        }
    }

    /// Evaluate a single leaf
    pub fn evaluate_leaf(condition: &Condition, vars: &dyn Lookup) -> bool {
        let subject = Self::resolve_fact(&condition.fact, vars);
        let comparand = resolve_value(&condition.value, vars);
        let result = apply_operator(condition.operator, &subject, &comparand);

        tracing::debug!(
            "Condition {} {} {:?} => {}",
            condition.fact,
            condition.operator,
            condition.value,
            result
        );
        result
    }

    /// Subject of a leaf: a state key, or an expression when it carries `{...}`
    pub fn resolve_fact(fact: &str, vars: &dyn Lookup) -> Value {
        if !fact.contains('{') {
            return vars.lookup(fact.trim());
        }

        match ExpressionParser::try_parse(fact) {
            Some(expr) => evaluate_expression(&expr, vars).unwrap_or_else(|e| {
                tracing::debug!("Fact expression '{}' failed ({}), treating as null", fact, e);
                Value::Null
            }),
            None => Value::String(templatize_text(fact, vars)),
        }
    }
}
