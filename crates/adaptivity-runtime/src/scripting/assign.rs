//! Assignment scripts and state mutations
//!
//! Both entry points apply their operations in order, so later operations
//! observe earlier ones. A failing operation is reported in its own result
//! and does not stop the rest.

use super::environment::{Environment, ScopeId};
use super::evaluator::evaluate_value;
use crate::error::{Result, RuntimeError};
use adaptivity_core::{MutateOperator, MutateStateAction, Value, VariableType};

/// Outcome of one assignment or mutation
#[derive(Debug)]
pub struct AssignResult {
    /// Target key
    pub key: String,
    /// Stored value, or why the operation was skipped
    pub result: Result<Value>,
}

impl AssignResult {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&Value> {
        self.result.as_ref().ok()
    }
}

/// Evaluate `key = value` assignments against the environment
///
/// Values that parse as script expressions are evaluated first; the result
/// is coerced into the target's declared type and stored.
pub fn eval_assign_script<I, K, V>(
    assignments: I,
    env: &mut Environment,
    scope: ScopeId,
) -> Vec<AssignResult>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    assignments
        .into_iter()
        .map(|(key, raw)| {
            let key = key.into();
            let result = assign(env, scope, &key, &raw.into(), None);
            report(&key, &result);
            AssignResult { key, result }
        })
        .collect()
}

/// Apply `mutateState` operations in order
pub fn apply_state(
    operations: &[MutateStateAction],
    env: &mut Environment,
    scope: ScopeId,
) -> Vec<AssignResult> {
    operations
        .iter()
        .map(|op| {
            let result = match op.operator {
                MutateOperator::Assign => assign(env, scope, &op.target, &op.value, op.target_type),
                MutateOperator::Adding => adjust(env, scope, op, false),
                MutateOperator::Subtracting => adjust(env, scope, op, true),
                MutateOperator::BindTo => bind(env, scope, op),
            };
            report(&op.target, &result);
            AssignResult {
                key: op.target.clone(),
                result,
            }
        })
        .collect()
}

fn report(key: &str, result: &Result<Value>) {
    match result {
        Ok(value) => tracing::debug!("Assigned {} = {}", key, value),
        Err(e) => tracing::warn!("Skipping assignment to '{}': {}", key, e),
    }
}

/// Declared type of the target, or the type requested for a new target
fn target_type(
    env: &Environment,
    scope: ScopeId,
    key: &str,
    requested: Option<VariableType>,
) -> Option<VariableType> {
    env.variable(scope, key)
        .map(|var| var.declared_type)
        .or(requested)
}

fn assign(
    env: &mut Environment,
    scope: ScopeId,
    key: &str,
    raw: &Value,
    requested: Option<VariableType>,
) -> Result<Value> {
    let literal_text = target_type(env, scope, key, requested)
        .map(VariableType::is_textual)
        .unwrap_or(false);
    let value = evaluate_value(raw, &env.view(scope), literal_text)?;
    env.set_typed(scope, key, value, requested)
}

/// `adding` / `subtracting`: arithmetic on numbers, append/remove on arrays
fn adjust(
    env: &mut Environment,
    scope: ScopeId,
    op: &MutateStateAction,
    subtract: bool,
) -> Result<Value> {
    let operand = evaluate_value(&op.value, &env.view(scope), false)?;
    let current = env.get(scope, &op.target);

    let updated = match (&current, &operand) {
        (Value::Array(items), _) => {
            let mut items = items.clone();
            let additions = match &operand {
                Value::Array(values) => values.clone(),
                other => vec![other.clone()],
            };
            if subtract {
                items.retain(|item| !additions.contains(item));
            } else {
                items.extend(additions);
            }
            Value::Array(items)
        }
        _ => {
            let base = match current {
                Value::Null => 0.0,
                ref other => other.to_number().ok_or_else(|| {
                    RuntimeError::TypeError(format!(
                        "'{}' holds {}, not a number",
                        op.target, other
                    ))
                })?,
            };
            let delta = operand.to_number().ok_or_else(|| {
                RuntimeError::TypeError(format!("cannot add {} to '{}'", operand, op.target))
            })?;
            Value::Number(if subtract { base - delta } else { base + delta })
        }
    };

    env.set_typed(scope, &op.target, updated, op.target_type)
}

fn bind(env: &mut Environment, scope: ScopeId, op: &MutateStateAction) -> Result<Value> {
    let target = match &op.value {
        Value::String(key) => key
            .trim()
            .trim_start_matches('{')
            .trim_end_matches('}')
            .trim()
            .to_string(),
        other => {
            return Err(RuntimeError::InvalidOperation(format!(
                "'bind to' expects a variable key, got {}",
                other
            )))
        }
    };
    env.bind(scope, &op.target, &target)?;
    Ok(env.get(scope, &op.target))
}
