//! Containment operators
//!
//! Subjects are either text (substring tests) or arrays, including arrays
//! that arrive stringified as `"[...]"`. Comparands may be scalars, arrays,
//! stringified arrays or comma-separated text.

use super::coercion::{as_list, is_bracketed, loose_eq, member, to_set};
use adaptivity_core::Value;

fn is_list_like(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::String(s) => is_bracketed(s),
        _ => false,
    }
}

/// Substring test for text; membership test for arrays
pub(crate) fn contains(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }

    if let Some(items) = as_list(subject) {
        return if is_list_like(comparand) {
            to_set(comparand).iter().all(|needle| member(&items, needle))
        } else {
            member(&items, comparand)
        };
    }

    let text = subject.to_display_string();
    match comparand {
        Value::Array(needles) => needles
            .iter()
            .all(|needle| text.contains(needle.to_display_string().as_str())),
        other => text.contains(other.to_display_string().as_str()),
    }
}

pub(crate) fn not_contains(subject: &Value, comparand: &Value) -> bool {
    !contains(subject, comparand)
}

/// At least one element of the comparand set appears in the subject
pub(crate) fn contains_any_of(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }

    let needles = to_set(comparand);
    match as_list(subject) {
        Some(items) => needles.iter().any(|needle| member(&items, needle)),
        None => {
            let text = subject.to_display_string();
            needles
                .iter()
                .any(|needle| text.contains(needle.to_display_string().as_str()))
        }
    }
}

pub(crate) fn not_contains_any_of(subject: &Value, comparand: &Value) -> bool {
    !contains_any_of(subject, comparand)
}

/// Unordered multiset equality of subject and comparand
pub(crate) fn contains_only(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }

    let items = to_set(subject);
    let mut remaining = to_set(comparand);
    if items.len() != remaining.len() {
        return false;
    }

    for item in &items {
        match remaining.iter().position(|candidate| loose_eq(candidate, item)) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => return false,
        }
    }
    remaining.is_empty()
}

/// Ordered exact equality of array or text content
pub(crate) fn contains_exactly(subject: &Value, comparand: &Value) -> bool {
    if subject.is_null() || comparand.is_null() {
        return false;
    }

    match (as_list(subject), as_list(comparand)) {
        (Some(left), Some(right)) => {
            left.len() == right.len() && left.iter().zip(&right).all(|(a, b)| loose_eq(a, b))
        }
        (None, None) => subject.to_display_string() == comparand.to_display_string(),
        _ => false,
    }
}

pub(crate) fn not_contains_exactly(subject: &Value, comparand: &Value) -> bool {
    !contains_exactly(subject, comparand)
}
