//! Canonical-model import.
//!
//! A DTO can arrive as a full nested document (stored and flattened as-is)
//! or as a flat schema-description array: one record per field, carrying an
//! identifier, and optionally a documentation string, a nullability
//! indicator and a type string. Schema records have no example values; the
//! import seeds per-field metadata instead.

use std::collections::BTreeMap;

use serde_json::Value;

use fieldmap_core::unflatten;
use fieldmap_model::{FieldMetadata, FieldPath, Requirement};

use crate::error::{IngestError, Result};

/// Keys accepted as the field identifier, in lookup order.
const IDENTIFIER_KEYS: [&str; 4] = ["id", "name", "key", "campo"];
/// Keys accepted as the nullability indicator.
const NULLABLE_KEYS: [&str; 3] = ["opcional", "optional", "nullable"];
/// Keys accepted as the documentation string.
const DOC_KEYS: [&str; 3] = ["doc", "description", "descripcion"];
/// Keys accepted as the type string.
const TYPE_KEYS: [&str; 2] = ["type", "tipo"];

/// Outcome of importing one canonical model.
#[derive(Debug, Clone)]
pub struct CanonicalImport {
    /// Nested document to store in the DTO library.
    pub document: Value,
    /// Per-field metadata seeds keyed by dotted path. Empty for nested
    /// documents, populated for schema-description arrays.
    pub metadata: BTreeMap<String, FieldMetadata>,
    /// Schema records skipped for lacking an identifier.
    pub skipped: usize,
}

/// Imports a canonical model from either accepted shape.
pub fn import_canonical(source: &Value) -> Result<CanonicalImport> {
    match source {
        Value::Object(_) => Ok(CanonicalImport {
            document: source.clone(),
            metadata: BTreeMap::new(),
            skipped: 0,
        }),
        Value::Array(records) => import_schema_records(records),
        _ => Err(IngestError::UnsupportedCanonicalShape),
    }
}

fn import_schema_records(records: &[Value]) -> Result<CanonicalImport> {
    let mut entries: Vec<(FieldPath, Value)> = Vec::new();
    let mut metadata = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(object) = record.as_object() else {
            skipped += 1;
            tracing::warn!("skipping non-object schema record");
            continue;
        };
        let Some(identifier) = lookup_identifier(object) else {
            skipped += 1;
            tracing::warn!("skipping schema record without an identifier key");
            continue;
        };
        let Ok(path) = FieldPath::new(identifier.as_str()) else {
            skipped += 1;
            tracing::warn!(identifier, "skipping schema record with empty identifier");
            continue;
        };

        let type_label = lookup_string(object, &TYPE_KEYS).unwrap_or_default();
        let doc_note = lookup_string(object, &DOC_KEYS).unwrap_or_default();
        let required = match lookup_nullable(object) {
            Some(true) => Requirement::No,
            Some(false) => Requirement::Yes,
            None => Requirement::Unknown,
        };

        entries.push((path.clone(), Value::String(type_label.clone())));
        metadata.insert(
            path.to_string(),
            FieldMetadata {
                required,
                type_label,
                doc_note,
                ..FieldMetadata::default()
            },
        );
    }

    Ok(CanonicalImport {
        document: unflatten(entries),
        metadata,
        skipped,
    })
}

fn lookup_identifier(object: &serde_json::Map<String, Value>) -> Option<String> {
    for key in IDENTIFIER_KEYS {
        match object.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            // Numeric identifiers are coerced to string segments.
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn lookup_string(object: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Reads the nullability indicator: booleans pass through, `1` and the
/// strings `1`/`true`/`yes` (case-insensitive) are truthy.
fn lookup_nullable(object: &serde_json::Map<String, Value>) -> Option<bool> {
    for key in NULLABLE_KEYS {
        match object.get(key) {
            Some(Value::Bool(b)) => return Some(*b),
            Some(Value::Number(n)) => return Some(n.as_i64() == Some(1)),
            Some(Value::String(s)) => {
                let lowered = s.trim().to_lowercase();
                return Some(matches!(lowered.as_str(), "1" | "true" | "yes"));
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_document_is_stored_as_is() {
        let source = json!({"order": {"id": "String"}});
        let import = import_canonical(&source).unwrap();
        assert_eq!(import.document, source);
        assert!(import.metadata.is_empty());
        assert_eq!(import.skipped, 0);
    }

    #[test]
    fn schema_records_build_document_and_metadata() {
        let source = json!([
            {"campo": "order.id", "tipo": "String", "opcional": "no"},
            {"name": "order.total", "type": "Decimal", "nullable": true, "doc": "grand total"},
            {"description": "no identifier here"}
        ]);
        let import = import_canonical(&source).unwrap();
        assert_eq!(import.skipped, 1);
        assert_eq!(
            import.document,
            json!({"order": {"id": "String", "total": "Decimal"}})
        );

        let id = &import.metadata["order.id"];
        assert_eq!(id.required, Requirement::Yes);
        assert_eq!(id.type_label, "String");

        let total = &import.metadata["order.total"];
        assert_eq!(total.required, Requirement::No);
        assert_eq!(total.doc_note, "grand total");
        assert!(total.example_value.is_empty());
    }

    #[test]
    fn truthy_nullability_spellings() {
        for truthy in [json!(1), json!("1"), json!("Yes"), json!("true"), json!(true)] {
            let source = json!([{"id": "f", "optional": truthy}]);
            let import = import_canonical(&source).unwrap();
            assert_eq!(import.metadata["f"].required, Requirement::No);
        }
    }

    #[test]
    fn scalar_source_is_rejected() {
        assert!(matches!(
            import_canonical(&json!("nope")),
            Err(IngestError::UnsupportedCanonicalShape)
        ));
    }
}
