//! Schema-version migration.
//!
//! Project documents carry an explicit `schema_version`; documents written
//! before the field existed are version 0. Migration runs as a linear chain
//! of total upgrade steps over the raw JSON tree, before the typed
//! deserialize. Each step is independently testable.
//!
//! Version 0 covers two legacy shapes: the single-table document (flat
//! `mapping_rules`/`field_metadata` at top level, one implicit endpoint)
//! and the endpoint document predating the request/response split and the
//! DTO library.

use serde_json::{Map, Value, json};

use fieldmap_model::{CURRENT_SCHEMA_VERSION, Requirement, StatusTag};

use crate::error::{PersistenceError, Result};

/// Reads the document's schema version; absent means 0.
pub fn detect_version(document: &Value) -> u32 {
    document
        .get("schema_version")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Upgrades a raw project document to the current schema version.
pub fn migrate(document: Value) -> Result<Value> {
    let found = detect_version(&document);
    if found > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }
    let mut document = document;
    let mut version = found;
    while version < CURRENT_SCHEMA_VERSION {
        document = match version {
            0 => upgrade_v0_to_v1(document)?,
            _ => unreachable!("no upgrade step from version {version}"),
        };
        version += 1;
        tracing::info!(version, "migrated project document");
    }
    Ok(document)
}

/// v0 -> v1: normalize every pre-versioning shape.
///
/// - Wraps a top-level flat mapping table into a single request-side
///   endpoint.
/// - Synthesizes `dto_library` from a legacy `internal_standard_snapshot`.
/// - Splits flat endpoints into `request` + empty `response`, defaults
///   `method` to GET and seeds `extra_metadata`.
/// - Rewrites legacy decorated status labels and requirement strings.
pub fn upgrade_v0_to_v1(document: Value) -> Result<Value> {
    let Value::Object(mut root) = document else {
        return Err(PersistenceError::InvalidDocument {
            reason: "top level is not an object".to_string(),
        });
    };

    if !root.contains_key("endpoints")
        && (root.contains_key("mapping_rules") || root.contains_key("field_metadata"))
    {
        wrap_flat_document(&mut root);
    }

    if !root.contains_key("dto_library") {
        let library = match root.remove("internal_standard_snapshot") {
            Some(Value::Object(snapshot)) if !snapshot.is_empty() => {
                json!({"MainDTO": Value::Object(snapshot)})
            }
            _ => json!({}),
        };
        root.insert("dto_library".to_string(), library);
    }

    if let Some(Value::Object(endpoints)) = root.get_mut("endpoints") {
        for endpoint in endpoints.values_mut() {
            let Some(endpoint) = endpoint.as_object_mut() else {
                continue;
            };
            if !endpoint.contains_key("request") {
                let rules = endpoint.remove("mapping_rules").unwrap_or_else(|| json!({}));
                let metadata = endpoint
                    .remove("field_metadata")
                    .unwrap_or_else(|| json!({}));
                endpoint.insert(
                    "request".to_string(),
                    json!({"mapping_rules": rules, "field_metadata": metadata}),
                );
                endpoint.insert(
                    "response".to_string(),
                    json!({"mapping_rules": {}, "field_metadata": {}}),
                );
            }
            if !endpoint.contains_key("method") {
                endpoint.insert("method".to_string(), json!("GET"));
            }
            if !endpoint.contains_key("extra_metadata") {
                endpoint.insert("extra_metadata".to_string(), json!({}));
            }
            for direction in ["request", "response"] {
                if let Some(state) = endpoint.get_mut(direction) {
                    rewrite_legacy_metadata(state);
                }
            }
        }
    } else {
        root.insert("endpoints".to_string(), json!({}));
    }

    root.remove("progress_stats");
    root.insert(
        "schema_version".to_string(),
        json!(CURRENT_SCHEMA_VERSION),
    );
    Ok(Value::Object(root))
}

/// Wraps the oldest document shape (one implicit mapping table) into a
/// request-side endpoint named after the legacy `endpoint` field.
fn wrap_flat_document(root: &mut Map<String, Value>) {
    let name = match root.remove("endpoint") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => "imported".to_string(),
    };
    let rules = root.remove("mapping_rules").unwrap_or_else(|| json!({}));
    let metadata = root.remove("field_metadata").unwrap_or_else(|| json!({}));
    let endpoint = json!({
        "method": "GET",
        "extra_metadata": {},
        "request": {"mapping_rules": rules, "field_metadata": metadata},
        "response": {"mapping_rules": {}, "field_metadata": {}}
    });
    let mut endpoints = Map::new();
    endpoints.insert(name, endpoint);
    root.insert("endpoints".to_string(), Value::Object(endpoints));
}

/// Rewrites legacy decorated status labels and requirement strings inside
/// one direction's `field_metadata`.
fn rewrite_legacy_metadata(state: &mut Value) {
    let Some(metadata) = state
        .get_mut("field_metadata")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    for record in metadata.values_mut() {
        let Some(record) = record.as_object_mut() else {
            continue;
        };
        let tag = record
            .get("status_tag")
            .and_then(Value::as_str)
            .map(StatusTag::from_legacy);
        if let Some(tag) = tag {
            record.insert("status_tag".to_string(), json!(tag.wire_name()));
        }
        let required = record
            .get("required")
            .and_then(Value::as_str)
            .map(Requirement::from_legacy);
        if let Some(required) = required {
            record.insert("required".to_string(), json!(required.label()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_documents_pass_through() {
        let doc = json!({"schema_version": 1, "courier_name": "acme", "endpoints": {}});
        assert_eq!(migrate(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn newer_documents_are_rejected() {
        let doc = json!({"schema_version": 99});
        assert!(matches!(
            migrate(doc),
            Err(PersistenceError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn flat_endpoint_moves_to_request_side() {
        let doc = json!({
            "courier_name": "acme",
            "endpoints": {
                "CreateOrder": {
                    "mapping_rules": {"[MainDTO] id": "order_id"},
                    "field_metadata": {"order_id": {"status_tag": "✅ Valor Confirmado", "required": "Sí"}}
                }
            }
        });
        let migrated = migrate(doc).unwrap();
        let endpoint = &migrated["endpoints"]["CreateOrder"];
        assert_eq!(endpoint["method"], "GET");
        assert_eq!(
            endpoint["request"]["mapping_rules"]["[MainDTO] id"],
            "order_id"
        );
        assert_eq!(
            endpoint["request"]["field_metadata"]["order_id"]["status_tag"],
            "confirmed"
        );
        assert_eq!(
            endpoint["request"]["field_metadata"]["order_id"]["required"],
            "yes"
        );
        assert_eq!(endpoint["response"]["mapping_rules"], json!({}));
    }

    #[test]
    fn dto_library_seeded_from_legacy_snapshot() {
        let doc = json!({
            "internal_standard_snapshot": {"order": {"id": "String"}},
            "endpoints": {}
        });
        let migrated = migrate(doc).unwrap();
        assert_eq!(
            migrated["dto_library"]["MainDTO"]["order"]["id"],
            "String"
        );
    }

    #[test]
    fn single_table_document_becomes_one_endpoint() {
        let doc = json!({
            "courier_name": "acme",
            "endpoint": "TrackShipment",
            "mapping_rules": {"[MainDTO] status": "shipment_status"},
            "field_metadata": {"shipment_status": {"status_tag": "⚪ Sin Estado", "required": "?"}},
            "progress_stats": {"total": 1, "done": 0}
        });
        let migrated = migrate(doc).unwrap();
        assert!(migrated.get("progress_stats").is_none());
        let endpoint = &migrated["endpoints"]["TrackShipment"];
        assert_eq!(
            endpoint["request"]["mapping_rules"]["[MainDTO] status"],
            "shipment_status"
        );
        assert_eq!(
            endpoint["request"]["field_metadata"]["shipment_status"]["status_tag"],
            "no-status"
        );
        assert_eq!(
            endpoint["request"]["field_metadata"]["shipment_status"]["required"],
            "unknown"
        );
    }
}
