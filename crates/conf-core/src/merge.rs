//! Deep merge of composite configuration values
//!
//! Objects merge key by key, recursively, with the overlay winning every
//! conflict. Scalars and arrays are never merged: the overlay replaces them.

use serde_json::{Map, Value};

/// Merge `overlay` into `base`.
///
/// If both values are objects, merge them recursively with `overlay` taking precedence.
/// Otherwise, `overlay` replaces `base`.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            deep_merge_maps(base_map, overlay_map);
        }
        (base, overlay) => {
            *base = overlay;
        }
    }
}

/// Merge the entries of `overlay` into `base`, recursing into nested objects.
pub fn deep_merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_val) in overlay {
        match base.get_mut(&key) {
            Some(base_val) => deep_merge(base_val, overlay_val),
            None => {
                base.insert(key, overlay_val);
            }
        }
    }
}

/// Merge two precedence layers into a new map, `higher` winning conflicts.
pub fn merge_layers(lower: Map<String, Value>, higher: Map<String, Value>) -> Map<String, Value> {
    let mut merged = lower;
    deep_merge_maps(&mut merged, higher);
    merged
}

/// Insert `value` at a nested `path`, creating intermediate objects.
///
/// An intermediate that already holds a non-object value is replaced by an
/// object, so the deeper path wins. An empty path is ignored.
pub fn insert_path(target: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = target;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }

    match current.get_mut(last) {
        // keep nested contributions already collected under this key
        Some(Value::Object(_)) if !value.is_object() => {}
        Some(existing) => deep_merge(existing, value),
        None => {
            current.insert(last.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deep_merge_objects() {
        let mut base = json!({
            "a": 1,
            "b": { "x": 10, "y": 20 }
        });
        let other = json!({
            "b": { "y": 25, "z": 30 },
            "c": 3
        });

        deep_merge(&mut base, other);

        assert_eq!(base, json!({ "a": 1, "b": { "x": 10, "y": 25, "z": 30 }, "c": 3 }));
    }

    #[test]
    fn test_arrays_are_replaced() {
        let mut base = json!({ "list": [1, 2], "nested": { "list": [5] } });
        deep_merge(&mut base, json!({ "list": [3, 4], "nested": { "list": [] } }));
        assert_eq!(base, json!({ "list": [3, 4], "nested": { "list": [] } }));
    }

    #[test]
    fn test_null_overlay_replaces() {
        let mut base = json!({ "x": { "deep": true } });
        deep_merge(&mut base, json!({ "x": null }));
        assert_eq!(base, json!({ "x": null }));
    }

    #[test]
    fn test_merge_layers_higher_wins() {
        let lower = json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap();
        let higher = json!({ "b": 3, "c": 4 }).as_object().cloned().unwrap();
        assert_eq!(
            Value::Object(merge_layers(lower, higher)),
            json!({ "a": 1, "b": 3, "c": 4 })
        );
    }

    #[test]
    fn test_insert_path_builds_nested_objects() {
        let mut map = Map::new();
        insert_path(&mut map, &["c".into(), "aa".into()], json!("aa"));
        insert_path(&mut map, &["c".into(), "bb".into()], json!("bb"));
        insert_path(&mut map, &["d".into()], json!("d"));
        insert_path(&mut map, &[], json!("ignored"));

        assert_eq!(
            Value::Object(map),
            json!({ "c": { "aa": "aa", "bb": "bb" }, "d": "d" })
        );
    }

    #[test]
    fn test_insert_path_deeper_path_wins() {
        let mut map = Map::new();
        insert_path(&mut map, &["a".into()], json!("flat"));
        insert_path(&mut map, &["a".into(), "b".into()], json!("nested"));
        insert_path(&mut map, &["a".into()], json!("late flat"));

        assert_eq!(Value::Object(map), json!({ "a": { "b": "nested" } }));
    }
}
