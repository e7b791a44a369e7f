//! Typed variables
//!
//! A `TypedValue` is a keyed variable with a declared type. Every write goes
//! through [`coerce`] so the stored value always has the declared shape;
//! textual input goes through [`parse`], which is the inverse of
//! [`serialize`] for every supported type.

use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared type of a variable (serialized as its integer code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VariableType {
    Number = 1,
    String = 2,
    Array = 3,
    Boolean = 4,
    Enum = 5,
    MathExpr = 6,
    ArrayPoint = 7,
    Unknown = 99,
}

impl VariableType {
    /// Choose a declared type for a value seen for the first time
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => VariableType::Boolean,
            Value::Number(_) => VariableType::Number,
            Value::String(_) => VariableType::String,
            Value::Array(items) if !items.is_empty() && items.iter().all(is_point) => {
                VariableType::ArrayPoint
            }
            Value::Array(_) => VariableType::Array,
            Value::Null | Value::Object(_) => VariableType::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VariableType::Number => "number",
            VariableType::String => "string",
            VariableType::Array => "array",
            VariableType::Boolean => "boolean",
            VariableType::Enum => "enum",
            VariableType::MathExpr => "math expression",
            VariableType::ArrayPoint => "point array",
            VariableType::Unknown => "unknown",
        }
    }

    /// Types whose raw text must never be interpreted as a script expression
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            VariableType::String | VariableType::Enum | VariableType::MathExpr
        )
    }
}

impl TryFrom<u8> for VariableType {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(VariableType::Number),
            2 => Ok(VariableType::String),
            3 => Ok(VariableType::Array),
            4 => Ok(VariableType::Boolean),
            5 => Ok(VariableType::Enum),
            6 => Ok(VariableType::MathExpr),
            7 => Ok(VariableType::ArrayPoint),
            99 => Ok(VariableType::Unknown),
            other => Err(CoreError::InvalidValue(format!(
                "unknown variable type code {}",
                other
            ))),
        }
    }
}

impl From<VariableType> for u8 {
    fn from(ty: VariableType) -> u8 {
        ty as u8
    }
}

/// A keyed variable with a declared type and access flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedValue {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub declared_type: VariableType,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub write_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_to: Option<String>,
}

impl TypedValue {
    /// Create a variable, coercing `value` into `declared_type`
    pub fn new(key: impl Into<String>, value: Value, declared_type: VariableType) -> Result<Self> {
        let key = key.into();
        let value = coerce(&key, &value, declared_type, None)?;
        Ok(Self::from_parts(key, value, declared_type))
    }

    /// Create a variable whose type is inferred from the value
    pub fn inferred(key: impl Into<String>, value: Value) -> Self {
        let declared_type = VariableType::infer(&value);
        Self::from_parts(key.into(), value, declared_type)
    }

    /// Parse raw text into a variable of the declared type
    pub fn parse(key: impl Into<String>, raw: &str, declared_type: VariableType) -> Result<Self> {
        let key = key.into();
        let value = parse(raw, declared_type).map_err(|e| rekey(e, &key))?;
        Ok(Self::from_parts(key, value, declared_type))
    }

    fn from_parts(key: String, value: Value, declared_type: VariableType) -> Self {
        Self {
            key,
            value,
            declared_type,
            read_only: false,
            write_only: false,
            allowed_values: None,
            bind_to: None,
        }
    }

    /// Restrict the variable to a closed set of values (re-validates the current value)
    pub fn with_allowed_values(mut self, allowed: Vec<String>) -> Result<Self> {
        self.value = coerce(&self.key, &self.value, self.declared_type, Some(&allowed))?;
        self.allowed_values = Some(allowed);
        Ok(self)
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn write_only(mut self, write_only: bool) -> Self {
        self.write_only = write_only;
        self
    }

    pub fn bound_to(mut self, key: impl Into<String>) -> Self {
        self.bind_to = Some(key.into());
        self
    }

    /// Replace the value, coercing it into the declared type
    pub fn assign(&mut self, value: &Value) -> Result<()> {
        if self.read_only {
            return Err(CoreError::ReadOnly(self.key.clone()));
        }
        self.value = coerce(
            &self.key,
            value,
            self.declared_type,
            self.allowed_values.as_deref(),
        )?;
        Ok(())
    }

    /// Textual form of the value; `parse` of this text yields the same value
    pub fn to_raw(&self) -> String {
        serialize(&self.value, self.declared_type)
    }
}

/// Parse raw text into a value of the declared type
///
/// - numbers accept any text `f64` parses to a finite value
/// - booleans accept `true`/`false` and `1`/`0`
/// - arrays accept JSON arrays or comma-separated text; numeric elements become numbers
/// - point arrays accept JSON `[{"x":..,"y":..}]` or `[[x, y]]`
pub fn parse(raw: &str, declared_type: VariableType) -> Result<Value> {
    let shape_err = || CoreError::invalid_shape("", declared_type.name(), raw);
    match declared_type {
        VariableType::Number => Value::from(raw)
            .to_number()
            .map(Value::Number)
            .ok_or_else(shape_err),
        VariableType::Boolean => Value::from(raw).to_bool().map(Value::Bool).ok_or_else(shape_err),
        VariableType::String
        | VariableType::Enum
        | VariableType::MathExpr
        | VariableType::Unknown => Ok(Value::String(raw.to_string())),
        VariableType::Array => parse_array_text(raw).ok_or_else(shape_err),
        VariableType::ArrayPoint => {
            let json: serde_json::Value =
                serde_json::from_str(raw.trim()).map_err(|_| shape_err())?;
            coerce_points(&Value::from(json)).ok_or_else(shape_err)
        }
    }
}

/// Textual form of a value of the declared type
pub fn serialize(value: &Value, declared_type: VariableType) -> String {
    match declared_type {
        VariableType::Array | VariableType::ArrayPoint => {
            serde_json::to_string(value).unwrap_or_default()
        }
        _ => value.to_display_string(),
    }
}

/// Coerce a runtime value into the declared type
pub fn coerce(
    key: &str,
    value: &Value,
    declared_type: VariableType,
    allowed_values: Option<&[String]>,
) -> Result<Value> {
    let shape_err = || CoreError::invalid_shape(key, declared_type.name(), value.to_string());

    let coerced = match (declared_type, value) {
        (VariableType::Unknown, v) => v.clone(),
        (_, Value::Null) => return Err(shape_err()),

        (VariableType::Number, Value::Bool(b)) => Value::Number(if *b { 1.0 } else { 0.0 }),
        (VariableType::Number, v) => v.to_number().map(Value::Number).ok_or_else(shape_err)?,

        (VariableType::Boolean, v) => v.to_bool().map(Value::Bool).ok_or_else(shape_err)?,

        (VariableType::String | VariableType::MathExpr | VariableType::Enum, v) => match v {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                Value::String(v.to_display_string())
            }
            _ => return Err(shape_err()),
        },

        (VariableType::Array, Value::String(s)) => parse_array_text(s).ok_or_else(shape_err)?,
        (VariableType::Array, Value::Array(items)) if items.iter().all(is_scalar) => value.clone(),
        (VariableType::Array, _) => return Err(shape_err()),

        (VariableType::ArrayPoint, Value::String(s)) => {
            parse(s, VariableType::ArrayPoint).map_err(|_| shape_err())?
        }
        (VariableType::ArrayPoint, v) => coerce_points(v).ok_or_else(shape_err)?,
    };

    if declared_type == VariableType::Enum {
        if let (Some(allowed), Value::String(s)) = (allowed_values, &coerced) {
            if !allowed.iter().any(|a| a == s) {
                log::debug!("value '{}' for '{}' is not one of {:?}", s, key, allowed);
                return Err(CoreError::invalid_shape(
                    key,
                    format!("one of {:?}", allowed),
                    s.clone(),
                ));
            }
        }
    }

    Ok(coerced)
}

/// Parse array text: a JSON array of scalars, or comma-separated values
pub fn parse_array_text(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Value::Array(Vec::new()));
    }

    if trimmed.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(trimmed) {
            let items: Vec<Value> = items.into_iter().map(Value::from).collect();
            return items.iter().all(is_scalar).then_some(Value::Array(items));
        }
        if !trimmed.ends_with(']') {
            return None;
        }
        let inner = &trimmed[1..trimmed.len() - 1];
        return Some(split_csv(inner));
    }

    Some(split_csv(trimmed))
}

fn split_csv(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Array(Vec::new());
    }
    let items = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => Value::String(part.trim_matches(|c| c == '"' || c == '\'').to_string()),
            }
        })
        .collect();
    Value::Array(items)
}

fn coerce_points(value: &Value) -> Option<Value> {
    let items = value.as_array()?;
    let mut points = Vec::with_capacity(items.len());
    for item in items {
        let (x, y) = match item {
            Value::Object(map) => (map.get("x")?.to_number()?, map.get("y")?.to_number()?),
            Value::Array(pair) if pair.len() == 2 => (pair[0].to_number()?, pair[1].to_number()?),
            _ => return None,
        };
        let mut point = BTreeMap::new();
        point.insert("x".to_string(), Value::Number(x));
        point.insert("y".to_string(), Value::Number(y));
        points.push(Value::Object(point));
    }
    Some(Value::Array(points))
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_) | Value::Bool(_))
}

fn is_point(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.len() == 2 && map.contains_key("x") && map.contains_key("y"),
        _ => false,
    }
}

fn rekey(err: CoreError, key: &str) -> CoreError {
    match err {
        CoreError::InvalidShape { expected, raw, .. } => CoreError::InvalidShape {
            key: key.to_string(),
            expected,
            raw,
        },
        other => other,
    }
}
