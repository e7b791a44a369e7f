//! Conversion between flattened key maps and nested trees
//!
//! Keys split on `.`. A path segment followed by a numeric segment becomes
//! an array, anything else an object: `stage.list.0` builds
//! `{stage: {list: [..]}}`. The `|` activity separator is not special here,
//! so `q:1|stage.a.value` nests under the `q:1|stage` segment.

use adaptivity_core::{FlattenedState, Value};
use std::collections::BTreeMap;

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn empty_container(next_segment: &str) -> Value {
    if is_index(next_segment) {
        Value::Array(Vec::new())
    } else {
        Value::Object(BTreeMap::new())
    }
}

/// Largest run of `Null` padding an index may open past the end of an array
const MAX_SPARSE_GAP: usize = 1024;

/// Array position for `segment`, if it is an index within reach of `len`
fn array_index(segment: &str, len: usize) -> Option<usize> {
    if !is_index(segment) {
        return None;
    }
    let index: usize = segment.parse().ok()?;
    let limit = len.checked_add(MAX_SPARSE_GAP)?;
    (index <= limit).then_some(index)
}

/// Arrays addressed by a non-numeric or out-of-reach segment turn into
/// objects keyed by index
fn ensure_addressable(node: &mut Value, segment: &str) {
    if let Value::Array(items) = node {
        if array_index(segment, items.len()).is_none() {
            if is_index(segment) {
                tracing::debug!("index '{}' is out of reach, storing it as an object key", segment);
            }
            let map = std::mem::take(items)
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect();
            *node = Value::Object(map);
        }
    }
}

/// Mutable slot for `segment` inside a container, created as `Null` when missing
fn slot<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    ensure_addressable(node, segment);
    match node {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = array_index(segment, items.len())?;
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Build a nested tree from a flattened map
///
/// When a key is both a leaf and a prefix of other keys (`a` and `a.b`),
/// the container wins and the scalar is dropped.
pub fn unflatten(flat: &FlattenedState) -> Value {
    let mut root = Value::Object(BTreeMap::new());

    for (key, value) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        let mut node = &mut root;

        for (i, segment) in segments.iter().enumerate() {
            let current = match slot(node, segment) {
                Some(current) => current,
                None => break,
            };

            match segments.get(i + 1) {
                Some(next) => {
                    if !is_container(current) {
                        if !current.is_null() {
                            tracing::debug!("'{}' is a value and a path prefix", key);
                        }
                        *current = empty_container(next);
                    }
                    node = current;
                }
                None => {
                    let populated = match current {
                        Value::Object(map) => !map.is_empty(),
                        Value::Array(items) => !items.is_empty(),
                        _ => false,
                    };
                    if populated {
                        tracing::debug!("'{}' is a value and a path prefix, keeping the path", key);
                    } else {
                        *current = value.clone();
                    }
                    break;
                }
            }
        }
    }

    root
}

/// Flatten a nested tree into dotted keys; empty objects and arrays are kept as leaves
pub fn flatten(nested: &Value) -> FlattenedState {
    let mut flat = FlattenedState::new();
    match nested {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(key.clone(), value, &mut flat);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_into(index.to_string(), value, &mut flat);
            }
        }
        _ => {}
    }
    flat
}

fn flatten_into(prefix: String, value: &Value, flat: &mut FlattenedState) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(format!("{}.{}", prefix, key), child, flat);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(format!("{}.{}", prefix, index), child, flat);
            }
        }
        leaf => {
            flat.insert(prefix, leaf.clone());
        }
    }
}
