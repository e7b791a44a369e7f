//! Expression evaluation and text templating

use crate::error::{Result, RuntimeError};
use adaptivity_core::{ArithmeticOperator, Expression, FlattenedState, Value};
use adaptivity_parser::{ExpressionParser, TemplateParser, TemplateSegment};

/// Source of variable values for expressions and templates
pub trait Lookup {
    /// Value of `key`, `Null` when missing
    fn lookup(&self, key: &str) -> Value;
}

impl Lookup for FlattenedState {
    fn lookup(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

/// Evaluate an expression tree
///
/// A `Null` operand (usually a missing variable) makes the whole operation
/// `Null` instead of failing.
pub fn evaluate_expression(expr: &Expression, vars: &dyn Lookup) -> Result<Value> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),
        Expression::Variable(key) => Ok(vars.lookup(key)),
        Expression::Negate(operand) => {
            let value = evaluate_expression(operand, vars)?;
            match value {
                Value::Null => Ok(Value::Null),
                other => other
                    .to_number()
                    .map(|n| Value::Number(-n))
                    .ok_or_else(|| RuntimeError::TypeError(format!("cannot negate {}", other))),
            }
        }
        Expression::Binary { left, op, right } => {
            let left = evaluate_expression(left, vars)?;
            let right = evaluate_expression(right, vars)?;
            execute_binary_op(&left, *op, &right)
        }
    }
}

fn execute_binary_op(left: &Value, op: ArithmeticOperator, right: &Value) -> Result<Value> {
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null in binary operation: {} {} {}, returning Null",
            left,
            op.symbol(),
            right
        );
        return Ok(Value::Null);
    }

    if op == ArithmeticOperator::Add
        && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!(
            "{}{}",
            left.to_display_string(),
            right.to_display_string()
        )));
    }

    let (l, r) = match (left.to_number(), right.to_number()) {
        (Some(l), Some(r)) => (l, r),
        _ => {
            return Err(RuntimeError::TypeError(format!(
                "cannot apply '{}' to {} and {}",
                op.symbol(),
                left.type_name(),
                right.type_name()
            )))
        }
    };

    match op {
        ArithmeticOperator::Add => Ok(Value::Number(l + r)),
        ArithmeticOperator::Sub => Ok(Value::Number(l - r)),
        ArithmeticOperator::Mul => Ok(Value::Number(l * r)),
        ArithmeticOperator::Div => {
            if r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
    }
}

/// Parse and evaluate expression text
pub fn evaluate_str(text: &str, vars: &dyn Lookup) -> Result<Value> {
    let expr = ExpressionParser::parse(text)?;
    evaluate_expression(&expr, vars)
}

/// Replace every `{key}` in `text` with the variable's display form
///
/// References to missing variables are left in place.
pub fn templatize_text(text: &str, vars: &dyn Lookup) -> String {
    TemplateParser::segments(text)
        .into_iter()
        .map(|segment| match segment {
            TemplateSegment::Text(text) => text,
            TemplateSegment::Variable(key) => match vars.lookup(&key) {
                Value::Null => format!("{{{}}}", key),
                value => value.to_display_string(),
            },
        })
        .collect()
}

/// Resolve a condition comparand
///
/// Strings carrying `{...}` are evaluated as an expression when they parse as
/// one and templated otherwise; array elements are resolved the same way.
/// Everything else is returned unchanged.
pub fn resolve_value(raw: &Value, vars: &dyn Lookup) -> Value {
    match raw {
        Value::String(text) if text.contains('{') => resolve_text(text, vars),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| resolve_value(item, vars)).collect())
        }
        other => other.clone(),
    }
}

fn resolve_text(text: &str, vars: &dyn Lookup) -> Value {
    match ExpressionParser::try_parse(text) {
        Some(expr) => evaluate_expression(&expr, vars).unwrap_or_else(|e| {
            tracing::debug!("Expression '{}' failed ({}), treating as null", text, e);
            Value::Null
        }),
        None => Value::String(templatize_text(text, vars)),
    }
}

/// Evaluate an assignment or mutation value
///
/// Any string that parses as an expression is evaluated (`"50 * {x}"`,
/// `"3"`, `"'text'"`); other strings with `{...}` are templated; plain text
/// is kept literally. With `literal_text` set, strings without `{` are
/// always kept as written.
pub fn evaluate_value(raw: &Value, vars: &dyn Lookup, literal_text: bool) -> Result<Value> {
    match raw {
        Value::String(text) if literal_text && !text.contains('{') => Ok(raw.clone()),
        Value::String(text) => match ExpressionParser::try_parse(text) {
            Some(expr) => evaluate_expression(&expr, vars),
            None if text.contains('{') => Ok(Value::String(templatize_text(text, vars))),
            None => Ok(raw.clone()),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| evaluate_value(item, vars, literal_text))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}
