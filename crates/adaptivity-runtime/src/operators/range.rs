//! Numeric range, ordering and list-membership operators

use super::coercion::{member, number_pair, to_set};
use adaptivity_core::Value;

/// Inclusive on both ends, comparand `[lo, hi]`
pub(crate) fn in_range(subject: &Value, comparand: &Value) -> bool {
    match (subject.to_number(), number_pair(comparand)) {
        (Some(value), Some((lo, hi))) => lo <= value && value <= hi,
        _ => false,
    }
}

pub(crate) fn not_in_range(subject: &Value, comparand: &Value) -> bool {
    !in_range(subject, comparand)
}

fn compare(subject: &Value, comparand: &Value, predicate: fn(f64, f64) -> bool) -> bool {
    match (subject.to_number(), comparand.to_number()) {
        (Some(left), Some(right)) => predicate(left, right),
        _ => false,
    }
}

pub(crate) fn less_than(subject: &Value, comparand: &Value) -> bool {
    compare(subject, comparand, |l, r| l < r)
}

pub(crate) fn less_than_inclusive(subject: &Value, comparand: &Value) -> bool {
    compare(subject, comparand, |l, r| l <= r)
}

pub(crate) fn greater_than(subject: &Value, comparand: &Value) -> bool {
    compare(subject, comparand, |l, r| l > r)
}

pub(crate) fn greater_than_inclusive(subject: &Value, comparand: &Value) -> bool {
    compare(subject, comparand, |l, r| l >= r)
}

/// The fact is one of the comparand's elements
pub(crate) fn is_in(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }
    member(&to_set(comparand), subject)
}

pub(crate) fn not_in(subject: &Value, comparand: &Value) -> bool {
    !is_in(subject, comparand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_inclusive() {
        assert!(in_range(&Value::from(9), &Value::from(vec![1, 9])));
        assert!(in_range(&Value::from(1), &Value::from(vec![1, 9])));
        assert!(!in_range(&Value::from(9), &Value::from(vec![10, 20])));
        assert!(in_range(&Value::from("4.5"), &Value::from("[4, 5]")));
        assert!(not_in_range(&Value::from(0), &Value::from(vec![1, 9])));
    }

    #[test]
    fn test_ordering() {
        assert!(less_than(&Value::from(2), &Value::from("3")));
        assert!(!less_than(&Value::from(3), &Value::from(3)));
        assert!(less_than_inclusive(&Value::from(3), &Value::from(3)));
        assert!(greater_than(&Value::from(4), &Value::from(3)));
        assert!(greater_than_inclusive(&Value::from(3), &Value::from(3)));
        assert!(!greater_than(&Value::from("abc"), &Value::from(3)));
    }

    #[test]
    fn test_in() {
        assert!(is_in(&Value::from("b"), &Value::from(vec!["a", "b"])));
        assert!(not_in(&Value::from("c"), &Value::from(vec!["a", "b"])));
    }
}
