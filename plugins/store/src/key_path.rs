//! Deep get/set over a JSON document addressed by key paths
//!
//! A segment addresses an object key, or an array element when it is a
//! canonical non-negative integer (`"0"`, `"12"`, but not `"01"` or `"+1"`)
//! no greater than [`MAX_ARRAY_INDEX`]. Larger numbers are plain object keys.

use serde_json::{Map, Value};

/// Largest segment treated as an array index
///
/// Setting an index pads the array with `null`s up to it, so this bounds
/// how much a single save can grow the document.
pub const MAX_ARRAY_INDEX: usize = 65_535;

/// Value at `path`, or `None` if any segment is missing
///
/// The empty path addresses nothing.
pub fn get<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.iter()
        .try_fold(root, |node, segment| child(node, segment.as_ref()))
}

/// Set `value` at `path`, creating intermediate containers on the way
///
/// A missing or scalar intermediate becomes an array when the following
/// segment is an index and an object otherwise. Returns `false` (and leaves
/// `root` untouched) for the empty path.
pub fn set<S: AsRef<str>>(root: &mut Value, path: &[S], value: Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };

    let mut node = root;
    for (segment, next) in parents.iter().zip(&path[1..]) {
        let slot = slot_mut(node, segment.as_ref());
        if !(slot.is_object() || slot.is_array()) {
            *slot = container_for(next.as_ref());
        }
        node = slot;
    }

    *slot_mut(node, last.as_ref()) = value;
    true
}

/// Keys of the object at `path` (the root object for the empty path)
pub fn keys<S: AsRef<str>>(root: &Value, path: &[S]) -> Vec<String> {
    let node = if path.is_empty() {
        Some(root)
    } else {
        get(root, path)
    };

    node.and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Mutable slot for `segment` inside `node`, inserted as `null` if missing
///
/// Anything other than an array indexed by position is coerced to an object.
fn slot_mut<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    match array_index(segment) {
        Some(i) if node.is_array() => {
            if let Some(items) = node.as_array_mut()
                && let Some(len) = i.checked_add(1)
                && items.len() < len
            {
                items.resize(len, Value::Null);
            }
            &mut node[i]
        }
        _ => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            &mut node[segment]
        }
    }
}

fn container_for(next_segment: &str) -> Value {
    if array_index(next_segment).is_some() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));

    if !canonical {
        return None;
    }
    segment.parse().ok().filter(|&i| i <= MAX_ARRAY_INDEX)
}
