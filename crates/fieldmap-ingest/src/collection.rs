//! API-collection import (Postman v2.1 style).
//!
//! Walks the folder/item tree; leaf items (those carrying a `request`)
//! become endpoint shells. A raw JSON request body and the first stored
//! response example are flattened and type-annotated to seed the two
//! mapping tables. Items without a parseable JSON body still produce an
//! endpoint shell with empty field metadata.

use std::collections::BTreeMap;

use serde_json::Value;

use fieldmap_core::{flatten, infer_leaf_type, normalize_document};
use fieldmap_model::{DirectionState, Endpoint, FieldMetadata, Project, StatusTag};

use crate::error::{IngestError, Result};

/// Parses a collection document into endpoints keyed by item name.
pub fn import_collection(collection: &Value) -> Result<BTreeMap<String, Endpoint>> {
    let items = collection
        .get("item")
        .and_then(Value::as_array)
        .ok_or(IngestError::NotACollection)?;
    let mut endpoints = BTreeMap::new();
    walk_items(items, &mut endpoints);
    tracing::info!(endpoints = endpoints.len(), "parsed collection");
    Ok(endpoints)
}

/// Merges imported endpoints into a project. Existing endpoints are never
/// overwritten. Returns how many were added.
pub fn merge_endpoints(project: &mut Project, imported: BTreeMap<String, Endpoint>) -> usize {
    let mut added = 0;
    for (name, endpoint) in imported {
        if !project.endpoints.contains_key(&name) {
            project.endpoints.insert(name, endpoint);
            added += 1;
        }
    }
    added
}

fn walk_items(items: &[Value], out: &mut BTreeMap<String, Endpoint>) {
    for item in items {
        if let Some(children) = item.get("item").and_then(Value::as_array) {
            walk_items(children, out);
        } else if let Some(request) = item.get("request") {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unnamed")
                .to_string();
            let method = request
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or("GET");
            let mut endpoint = Endpoint::new(method);

            if let Some(body) = raw_request_body(request) {
                seed_direction(body, &mut endpoint.request);
            }
            if let Some(body) = first_response_body(item) {
                seed_direction(body, &mut endpoint.response);
            }
            out.insert(name, endpoint);
        }
    }
}

fn raw_request_body(request: &Value) -> Option<&str> {
    let body = request.get("body")?;
    if body.get("mode").and_then(Value::as_str) != Some("raw") {
        return None;
    }
    body.get("raw").and_then(Value::as_str)
}

fn first_response_body(item: &Value) -> Option<&str> {
    item.get("response")?
        .as_array()?
        .first()?
        .get("body")?
        .as_str()
}

/// Flattens a raw JSON body into seed metadata. Non-JSON or malformed
/// bodies are skipped silently; the endpoint shell survives.
fn seed_direction(raw: &str, state: &mut DirectionState) {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return;
    }
    let Ok(document) = serde_json::from_str::<Value>(trimmed) else {
        tracing::debug!("collection item body is not parseable JSON, leaving shell empty");
        return;
    };
    let Some(document) = normalize_document(document) else {
        return;
    };
    for field in flatten(&document) {
        let mut metadata = FieldMetadata::seeded(
            infer_leaf_type(field.path.as_str(), &field.value).to_string(),
            field.example(),
        );
        metadata.status_tag = StatusTag::CollectionImported;
        state.field_metadata.insert(field.path.to_string(), metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> Value {
        json!({
            "info": {"name": "Courier API"},
            "item": [
                {
                    "name": "Orders",
                    "item": [
                        {
                            "name": "CreateOrder",
                            "request": {
                                "method": "POST",
                                "body": {"mode": "raw", "raw": "{\"order\": {\"id\": \"A1\"}}"}
                            },
                            "response": [
                                {"body": "[{\"status\": \"created\", \"eta_dt\": null}]"}
                            ]
                        },
                        {
                            "name": "Ping",
                            "request": {"method": "GET"}
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn leaf_items_become_endpoints() {
        let endpoints = import_collection(&collection()).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints["CreateOrder"].method, "POST");
        assert_eq!(endpoints["Ping"].method, "GET");
        assert!(endpoints["Ping"].request.is_empty());
    }

    #[test]
    fn bodies_seed_field_metadata() {
        let endpoints = import_collection(&collection()).unwrap();
        let create = &endpoints["CreateOrder"];

        let request_meta = &create.request.field_metadata["order.id"];
        assert_eq!(request_meta.status_tag, StatusTag::CollectionImported);
        assert_eq!(request_meta.type_label, "String");
        assert_eq!(request_meta.example_value, "A1");

        // Top-level response array is normalized to its first element.
        assert!(create.response.field_metadata.contains_key("status"));
        assert_eq!(create.response.field_metadata["eta_dt"].type_label, "DateTime?");
    }

    #[test]
    fn merge_never_overwrites_existing_endpoints() {
        let mut project = Project::new("acme");
        project
            .endpoints
            .insert("CreateOrder".to_string(), Endpoint::new("PUT"));

        let added = merge_endpoints(&mut project, import_collection(&collection()).unwrap());
        assert_eq!(added, 1);
        assert_eq!(project.endpoints["CreateOrder"].method, "PUT");
        assert!(project.endpoints.contains_key("Ping"));
    }

    #[test]
    fn missing_item_tree_is_an_error() {
        assert!(matches!(
            import_collection(&json!({"info": {}})),
            Err(IngestError::NotACollection)
        ));
    }
}
