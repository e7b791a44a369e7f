//! Operand coercion shared by the operator implementations
//!
//! Facts arrive from rendering components as loosely typed values: numbers
//! may be numeric strings, arrays may be stringified (`"[1,2]"` or `"1,2"`).
//! Operators normalize both sides through these helpers before comparing.

use adaptivity_core::types::variable::parse_array_text;
use adaptivity_core::Value;

/// Loose scalar equality
///
/// Numeric if both sides read as numbers, boolean if either side is a
/// boolean and the other reads as one, string comparison otherwise.
pub(crate) fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| loose_eq(a, b))
        }
        (Value::Object(_), _) | (_, Value::Object(_)) => left == right,
        _ => {
            if let (Some(l), Some(r)) = (left.to_number(), right.to_number()) {
                return l == r;
            }
            if matches!(left, Value::Bool(_)) || matches!(right, Value::Bool(_)) {
                return match (left.to_bool(), right.to_bool()) {
                    (Some(l), Some(r)) => l == r,
                    _ => false,
                };
            }
            left.to_display_string().trim() == right.to_display_string().trim()
        }
    }
}

/// Whether a string is a stringified JSON array (`"[...]"`)
pub(crate) fn is_bracketed(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Array view of a subject: real arrays, or bracketed array strings
pub(crate) fn as_list(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(s) if is_bracketed(s) => match parse_array_text(s) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Set view of a comparand: arrays, stringified arrays, CSV text, or a single scalar
pub(crate) fn to_set(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        Value::String(s) => match parse_array_text(s) {
            Some(Value::Array(items)) if is_bracketed(s) || s.contains(',') => items,
            _ => vec![value.clone()],
        },
        other => vec![other.clone()],
    }
}

/// Whether `needle` loosely equals any element of `haystack`
pub(crate) fn member(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| loose_eq(item, needle))
}

/// Two numbers from a `[a, b]` comparand (array or stringified array)
pub(crate) fn number_pair(value: &Value) -> Option<(f64, f64)> {
    let items = to_set(value);
    match items.as_slice() {
        [a, b] => Some((a.to_number()?, b.to_number()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&Value::from(3), &Value::from("3")));
        assert!(loose_eq(&Value::from("3.0"), &Value::from(3)));
        assert!(loose_eq(&Value::Bool(true), &Value::from("true")));
        assert!(loose_eq(&Value::Bool(false), &Value::from(0)));
        assert!(loose_eq(&Value::from(" cat "), &Value::from("cat")));
        assert!(!loose_eq(&Value::from("cat"), &Value::from("dog")));
        assert!(!loose_eq(&Value::Null, &Value::Null));
    }

    #[test]
    fn test_to_set() {
        assert_eq!(to_set(&Value::from("[1, 2]")), vec![Value::from(1), Value::from(2)]);
        assert_eq!(to_set(&Value::from("a,b")), vec![Value::from("a"), Value::from("b")]);
        assert_eq!(to_set(&Value::from("single")), vec![Value::from("single")]);
        assert_eq!(to_set(&Value::from(4)), vec![Value::from(4)]);
        assert!(to_set(&Value::Null).is_empty());
    }

    #[test]
    fn test_as_list_only_accepts_arrays() {
        assert!(as_list(&Value::from("a,b")).is_none());
        assert_eq!(as_list(&Value::from("[3]")), Some(vec![Value::from(3)]));
    }

    #[test]
    fn test_number_pair() {
        assert_eq!(number_pair(&Value::from(vec![1, 9])), Some((1.0, 9.0)));
        assert_eq!(number_pair(&Value::from("[10, 20]")), Some((10.0, 20.0)));
        assert_eq!(number_pair(&Value::from(vec![1])), None);
    }
}
