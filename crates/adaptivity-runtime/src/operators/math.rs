//! Math expression operators
//!
//! Operands are math expressions authored as text (`"x^2 + 1"`). They are
//! compared as normalized strings; no algebraic simplification is attempted.

use adaptivity_core::Value;

fn operands(subject: &Value, comparand: &Value) -> Option<(String, String)> {
    if subject.is_null() || comparand.is_null() {
        return None;
    }
    Some((subject.to_display_string(), comparand.to_display_string()))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub(crate) fn is_exactly_math(subject: &Value, comparand: &Value) -> bool {
    match operands(subject, comparand) {
        Some((left, right)) => left.trim() == right.trim(),
        None => false,
    }
}

pub(crate) fn not_exactly_math(subject: &Value, comparand: &Value) -> bool {
    !is_exactly_math(subject, comparand)
}

pub(crate) fn is_equivalent_of_math(subject: &Value, comparand: &Value) -> bool {
    match operands(subject, comparand) {
        Some((left, right)) => strip_whitespace(&left) == strip_whitespace(&right),
        None => false,
    }
}

pub(crate) fn has_same_terms_math(subject: &Value, comparand: &Value) -> bool {
    is_equivalent_of_math(subject, comparand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert!(is_exactly_math(&Value::from("x^2+1"), &Value::from(" x^2+1 ")));
        assert!(!is_exactly_math(&Value::from("x^2 + 1"), &Value::from("x^2+1")));
        assert!(not_exactly_math(&Value::from("x^2 + 1"), &Value::from("x^2+1")));
    }

    #[test]
    fn test_equivalent_ignores_whitespace() {
        assert!(is_equivalent_of_math(&Value::from("x^2 + 1"), &Value::from("x^2+1")));
        assert!(has_same_terms_math(&Value::from("2 x"), &Value::from("2x")));
        assert!(!is_equivalent_of_math(&Value::from("1 + x^2"), &Value::from("x^2+1")));
    }
}
