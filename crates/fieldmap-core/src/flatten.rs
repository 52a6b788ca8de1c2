//! Payload flattening and its lossy inverse.
//!
//! `flatten` reduces an arbitrarily nested document to an ordered sequence
//! of dotted-path leaves. Objects recurse member by member in insertion
//! order. Arrays are collapsed: only the first element is visited, at the
//! same path prefix as the array itself, so sibling elements beyond index 0
//! never appear in the flattened view. An empty array yields a single
//! sentinel leaf at the array's own path.

use serde_json::Value;

use fieldmap_model::{FieldPath, FlatField, LeafValue};

/// Flattens a document into ordered `(path, leaf)` pairs.
///
/// Output order follows the document's own member order; no sorting is
/// applied. Running twice over the same document produces identical output.
pub fn flatten(document: &Value) -> Vec<FlatField> {
    let mut out = Vec::new();
    walk(document, None, false, &mut out);
    out
}

fn walk(node: &Value, prefix: Option<&FieldPath>, collapsed: bool, out: &mut Vec<FlatField>) {
    match node {
        Value::Object(members) => {
            // Empty objects produce no leaves at all: there is no scalar
            // to record. Duplicate keys cannot survive serde_json's map.
            for (key, child) in members {
                let path = match prefix {
                    Some(parent) => parent.child(key),
                    None => match FieldPath::new(key.as_str()) {
                        Ok(path) => path,
                        Err(_) => {
                            tracing::debug!(key, "skipping member with unusable key");
                            continue;
                        }
                    },
                };
                walk(child, Some(&path), collapsed, out);
            }
        }
        Value::Array(items) => match items.first() {
            // The index is never appended to the path; everything below the
            // first element is marked as coming from a collapsed array.
            Some(first) => walk(first, prefix, true, out),
            None => {
                if let Some(path) = prefix {
                    out.push(FlatField {
                        path: path.clone(),
                        value: LeafValue::EmptyArray,
                        collapsed,
                    });
                }
            }
        },
        scalar => {
            if let Some(path) = prefix {
                out.push(FlatField {
                    path: path.clone(),
                    value: LeafValue::from_scalar(scalar),
                    collapsed,
                });
            }
        }
    }
}

/// Entry-point normalization for operator-supplied documents.
///
/// A top-level array is replaced by its first element (or treated as absent
/// when empty). This happens once, here, never inside the recursion.
pub fn normalize_document(document: Value) -> Option<Value> {
    match document {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
}

/// Rebuilds a nested object from dotted paths.
///
/// Lossy with respect to arrays: only nested objects are ever produced.
/// When an intermediate segment collides with an existing scalar, the
/// scalar is replaced by an object (last write wins).
pub fn unflatten<I>(entries: I) -> Value
where
    I: IntoIterator<Item = (FieldPath, Value)>,
{
    let mut root = Value::Object(serde_json::Map::new());
    for (path, value) in entries {
        let segments: Vec<&str> = path.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };
        let mut current = &mut root;
        for segment in parents {
            let map = ensure_object(current);
            current = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
        }
        ensure_object(current).insert((*last).to_string(), value);
    }
    root
}

fn ensure_object(value: &mut Value) -> &mut serde_json::Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(serde_json::Map::new());
    }
    value.as_object_mut().expect("just replaced with an object")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(fields: &[FlatField]) -> Vec<&str> {
        fields.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn scalar_leaf() {
        let fields = flatten(&json!({"a": {"b": "x"}}));
        assert_eq!(paths(&fields), ["a.b"]);
        assert_eq!(fields[0].value, LeafValue::Text("x".to_string()));
        assert!(!fields[0].collapsed);
    }

    #[test]
    fn empty_array_sentinel() {
        let fields = flatten(&json!({"a": []}));
        assert_eq!(paths(&fields), ["a"]);
        assert_eq!(fields[0].value, LeafValue::EmptyArray);
        assert_eq!(fields[0].value.to_string(), "[]");
    }

    #[test]
    fn array_collapses_to_first_element() {
        let fields = flatten(&json!({"a": [{"b": 1}, {"b": 2}]}));
        assert_eq!(paths(&fields), ["a.b"]);
        assert_eq!(fields[0].value, LeafValue::Integer(1));
        assert!(fields[0].collapsed);
    }

    #[test]
    fn null_passes_through_as_null() {
        let fields = flatten(&json!({"a": null}));
        assert_eq!(fields[0].value, LeafValue::Null);
    }

    #[test]
    fn empty_objects_produce_no_fields() {
        let fields = flatten(&json!({"a": {"b": {}}}));
        assert!(fields.is_empty());
    }

    #[test]
    fn member_order_is_preserved() {
        let doc: Value =
            serde_json::from_str(r#"{"z": 1, "a": {"y": 2, "b": 3}, "m": 4}"#).unwrap();
        assert_eq!(paths(&flatten(&doc)), ["z", "a.y", "a.b", "m"]);
    }

    #[test]
    fn normalize_takes_first_element_of_top_level_array() {
        assert_eq!(
            normalize_document(json!([{"a": 1}, {"a": 2}])),
            Some(json!({"a": 1}))
        );
        assert_eq!(normalize_document(json!([])), None);
        assert_eq!(normalize_document(json!({"a": 1})), Some(json!({"a": 1})));
    }

    #[test]
    fn unflatten_rebuilds_nested_objects() {
        let entries = vec![
            (FieldPath::new("a.b").unwrap(), json!("x")),
            (FieldPath::new("a.c").unwrap(), json!(1)),
            (FieldPath::new("d").unwrap(), json!(true)),
        ];
        assert_eq!(
            unflatten(entries),
            json!({"a": {"b": "x", "c": 1}, "d": true})
        );
    }

    #[test]
    fn unflatten_never_reconstructs_arrays() {
        let doc = json!({"items": [{"sku": "A"}]});
        let fields = flatten(&doc);
        let rebuilt = unflatten(
            fields
                .into_iter()
                .map(|f| (f.path, Value::String(f.value.to_string()))),
        );
        // Array structure is gone; the collapsed leaf lives under an object.
        assert_eq!(rebuilt, json!({"items": {"sku": "A"}}));
    }
}
