//! Deep merge with delete and replace markers
//!
//! Configuration layers and expected file shapes are both expressed as
//! partial JSON documents that get merged into a target. The merge is
//! recursive for objects, with two marker keys that change how a single key
//! is treated:
//!
//! - `{"key": {"__delete": null}}` removes `key` from the target.
//! - `{"key": {"__replace": true, ...}}` sets `key` to the rest of the
//!   object wholesale instead of merging into it.
//!
//! An object merged into a missing key only creates the key when something
//! is left after merging, so `{"key": {}}` never adds an empty `key`.
//!
//! Everything else follows "source beats target": objects merge key by key,
//! anything else (scalars, arrays, nulls) overwrites.
//!
//! ## Example
//!
//! ```
//! use devlint::merge::deep_merge;
//! use serde_json::json;
//!
//! let mut target = json!({"name": "widget", "author": "someone", "scripts": {"test": "jest"}});
//! deep_merge(&mut target, &json!({"author": {"__delete": null}, "scripts": {"lint": "eslint"}}));
//! assert_eq!(target, json!({"name": "widget", "scripts": {"test": "jest", "lint": "eslint"}}));
//! ```

pub mod json;

use serde_json::{Map, Value};

/// Marker key that removes the enclosing key from the target.
pub const DELETE_MARKER: &str = "__delete";

/// Marker key that replaces the enclosing key instead of merging into it.
pub const REPLACE_MARKER: &str = "__replace";

/// Merge `source` into `target` in place.
///
/// When `source` is an object and `target` is not, `target` becomes an
/// empty object first. When `source` is not an object it simply overwrites
/// `target`.
pub fn deep_merge(target: &mut Value, source: &Value) {
    let Value::Object(source_map) = source else {
        *target = source.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        merge_maps(target_map, source_map);
    }
}

/// Merge `source` into a clone of `target` and return the result.
pub fn merged(target: &Value, source: &Value) -> Value {
    let mut result = target.clone();
    deep_merge(&mut result, source);
    result
}

fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match value {
            Value::Object(inner) if inner.contains_key(DELETE_MARKER) => {
                target.retain(|k, _| k != key);
            }
            Value::Object(inner) if inner.contains_key(REPLACE_MARKER) => {
                target.insert(key.clone(), Value::Object(without_marker(inner, REPLACE_MARKER)));
            }
            Value::Object(inner) => match target.get_mut(key) {
                Some(Value::Object(existing)) => merge_maps(existing, inner),
                Some(existing) => {
                    let mut fresh = Map::new();
                    merge_maps(&mut fresh, inner);
                    *existing = Value::Object(fresh);
                }
                None => {
                    let mut fresh = Map::new();
                    merge_maps(&mut fresh, inner);
                    // Empty objects and marker-only fragments are no-ops.
                    if !fresh.is_empty() {
                        target.insert(key.clone(), Value::Object(fresh));
                    }
                }
            },
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn without_marker(map: &Map<String, Value>, marker: &str) -> Map<String, Value> {
    let mut stripped = map.clone();
    stripped.retain(|k, _| k != marker);
    stripped
}
