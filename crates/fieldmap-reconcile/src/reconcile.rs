//! Merging a fresh flattened field list with persisted mapping state.

use fieldmap_core::infer_leaf_type;
use fieldmap_model::{
    DirectionState, FieldMetadata, FieldPath, FlatField, TargetSelection,
};

use crate::{MappingRow, OptionCatalog, SaveOutcome, TargetConflict};

/// Produces the editable row set for the current field list.
///
/// Every current field carries forward its previous target selection
/// (re-resolved against the current catalog), status tag and annotations.
/// Fields only present in persisted state are dropped; new fields start
/// unmapped with seeded defaults.
pub fn reconcile(
    fields: &[FlatField],
    state: &DirectionState,
    catalog: &OptionCatalog,
) -> Vec<MappingRow> {
    let mut rows = Vec::with_capacity(fields.len());
    let mut stale = 0usize;
    for field in fields {
        let target = lookup_target(field.path.as_str(), state, catalog);
        if matches!(target, TargetSelection::Stale(_)) {
            stale += 1;
        }
        let metadata = match state.field_metadata.get(field.path.as_str()) {
            Some(saved) => {
                let mut merged = saved.clone();
                // Annotations persist; blanks are backfilled from the
                // current flattening pass.
                if merged.example_value.is_empty() {
                    merged.example_value = field.example();
                }
                if merged.type_label.is_empty() {
                    merged.type_label =
                        infer_leaf_type(field.path.as_str(), &field.value).to_string();
                }
                merged
            }
            None => FieldMetadata::seeded(
                infer_leaf_type(field.path.as_str(), &field.value).to_string(),
                field.example(),
            ),
        };
        rows.push(MappingRow {
            courier_field: field.path.clone(),
            target,
            metadata,
        });
    }
    tracing::debug!(
        current = fields.len(),
        persisted = state.field_metadata.len(),
        stale,
        "reconciled field list"
    );
    rows
}

/// Rebuilds rows from persisted metadata alone, for resuming a session
/// without re-supplying a payload.
pub fn rows_from_state(state: &DirectionState, catalog: &OptionCatalog) -> Vec<MappingRow> {
    let mut rows = Vec::with_capacity(state.field_metadata.len());
    for (courier_field, metadata) in &state.field_metadata {
        let Ok(path) = FieldPath::new(courier_field.as_str()) else {
            tracing::warn!(courier_field, "skipping metadata entry with empty field path");
            continue;
        };
        rows.push(MappingRow {
            courier_field: path,
            target: lookup_target(courier_field, state, catalog),
            metadata: metadata.clone(),
        });
    }
    rows
}

/// Finds the persisted target for a courier field and re-resolves it
/// against the current catalog.
///
/// A stored target id that no longer resolves (the canonical field was
/// renamed or removed) is carried as `Stale` so the operator sees the
/// inconsistency instead of a silent reset.
fn lookup_target(
    courier_field: &str,
    state: &DirectionState,
    catalog: &OptionCatalog,
) -> TargetSelection {
    for (target_id, mapped_field) in &state.mapping_rules {
        if mapped_field == courier_field {
            return match catalog.resolve(target_id) {
                Some(option) => {
                    TargetSelection::canonical(option.dto_name.clone(), option.path.clone())
                }
                None => TargetSelection::Stale(target_id.clone()),
            };
        }
    }
    TargetSelection::Unselected
}

/// Transforms edited rows back into persisted state.
///
/// Mapped rows (canonical or stale) write `mapping_rules[target] = field`;
/// every row writes its full metadata record keyed by courier field, with
/// `is_done` recomputed from the target. Two rows claiming the same
/// canonical target are reported as a conflict; the first row in order
/// keeps the rule.
pub fn save_rows(rows: &[MappingRow]) -> SaveOutcome {
    let mut outcome = SaveOutcome::default();
    for row in rows {
        let courier_field = row.courier_field.to_string();
        if let Some(target_id) = row.target.id() {
            match outcome.state.mapping_rules.get(&target_id) {
                Some(kept) => {
                    tracing::warn!(
                        target = %target_id,
                        kept = %kept,
                        rejected = %courier_field,
                        "duplicate canonical target assignment"
                    );
                    outcome.conflicts.push(TargetConflict {
                        target_id,
                        kept: kept.clone(),
                        rejected: courier_field.clone(),
                    });
                }
                None => {
                    outcome
                        .state
                        .mapping_rules
                        .insert(target_id, courier_field.clone());
                }
            }
        }
        let mut metadata = row.metadata.clone();
        metadata.is_done = row.is_done();
        outcome.state.field_metadata.insert(courier_field, metadata);
    }
    outcome
}
