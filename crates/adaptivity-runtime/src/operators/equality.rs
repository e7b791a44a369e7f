//! Equality operators: equal, equalWithTolerance, isAnyOf, isNaN

use super::coercion::{as_list, loose_eq, member, number_pair, to_set};
use adaptivity_core::Value;

/// Arrays must match in length and order; scalars compare after coercion
pub(crate) fn equal(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }
    match (as_list(subject), as_list(comparand)) {
        (Some(left), Some(right)) => {
            left.len() == right.len() && left.iter().zip(&right).all(|(a, b)| loose_eq(a, b))
        }
        (Some(_), None) | (None, Some(_)) => false,
        (None, None) => loose_eq(subject, comparand),
    }
}

pub(crate) fn not_equal(subject: &Value, comparand: &Value) -> bool {
    !equal(subject, comparand)
}

/// `|value - target| <= |target| * tolerance / 100`, comparand `[target, tolerancePercent]`
pub(crate) fn equal_with_tolerance(subject: &Value, comparand: &Value) -> bool {
    let value = match subject.to_number() {
        Some(v) => v,
        None => return false,
    };
    match number_pair(comparand) {
        Some((target, tolerance)) => (value - target).abs() <= target.abs() * tolerance / 100.0,
        None => {
            tracing::debug!("equalWithTolerance expects [target, percent], got {}", comparand);
            false
        }
    }
}

pub(crate) fn is_any_of(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }
    member(&to_set(comparand), subject)
}

pub(crate) fn not_is_any_of(subject: &Value, comparand: &Value) -> bool {
    !is_any_of(subject, comparand)
}

/// True iff "subject is not a finite number" equals the expected flag
pub(crate) fn is_nan(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() {
        return false;
    }
    match comparand.to_bool() {
        Some(expected) => subject.to_number().is_none() == expected,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_scalars() {
        assert!(equal(&Value::from(3), &Value::from("3")));
        assert!(equal(&Value::from("blue"), &Value::from("blue")));
        assert!(!equal(&Value::from("blue"), &Value::from("red")));
        assert!(equal(&Value::Bool(true), &Value::from("true")));
    }

    #[test]
    fn test_equal_arrays_need_same_order_and_length() {
        assert!(equal(&Value::from(vec![1, 2, 3]), &Value::from(vec![1, 2, 3])));
        assert!(equal(&Value::from("[1,2,3]"), &Value::from(vec![1, 2, 3])));
        assert!(!equal(&Value::from(vec![1, 2, 3]), &Value::from(vec![3, 2, 1])));
        assert!(!equal(&Value::from(vec![1, 2]), &Value::from(vec![1, 2, 3])));
        assert!(!equal(&Value::from(vec![1]), &Value::from(1)));
    }

    #[test]
    fn test_equal_with_tolerance() {
        let comparand = Value::from(vec![100, 5]);
        assert!(equal_with_tolerance(&Value::from(105), &comparand));
        assert!(equal_with_tolerance(&Value::from(95), &comparand));
        assert!(!equal_with_tolerance(&Value::from(105.5), &comparand));

        // negative targets use the magnitude for the allowed band
        let negative = Value::from(vec![-10, 10]);
        assert!(equal_with_tolerance(&Value::from(-11), &negative));
        assert!(!equal_with_tolerance(&Value::from(-12), &negative));
    }

    #[test]
    fn test_is_any_of() {
        let set = Value::from(vec!["red", "green"]);
        assert!(is_any_of(&Value::from("green"), &set));
        assert!(!is_any_of(&Value::from("blue"), &set));
        assert!(not_is_any_of(&Value::from("blue"), &set));
        assert!(is_any_of(&Value::from(2), &Value::from("[1, 2]")));
    }

    #[test]
    fn test_is_nan() {
        assert!(is_nan(&Value::from("abc"), &Value::Bool(true)));
        assert!(!is_nan(&Value::from("12"), &Value::Bool(true)));
        assert!(is_nan(&Value::from(12), &Value::from("false")));
        assert!(!is_nan(&Value::Null, &Value::Bool(true)));
    }
}
