//! Editable row set produced by reconciliation.

use fieldmap_model::{FieldMetadata, FieldPath, TargetSelection};

use crate::OptionCatalog;

/// One row of operator work: a courier field, its target selection, and its
/// annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    /// Courier-side field path identifying the row.
    pub courier_field: FieldPath,
    pub target: TargetSelection,
    pub metadata: FieldMetadata,
}

impl MappingRow {
    /// Derived completion flag: done iff a target was chosen, including the
    /// explicit-ignore sentinel.
    pub fn is_done(&self) -> bool {
        !matches!(self.target, TargetSelection::Unselected)
    }

    /// Display text for the target column, resolved against the current
    /// canonical snapshot so examples are never stale. A `Stale` target
    /// renders its raw id and will not match any dropdown option.
    pub fn target_display(&self, catalog: &OptionCatalog) -> String {
        match &self.target {
            TargetSelection::Canonical { .. } => {
                let id = self.target.id().unwrap_or_default();
                catalog
                    .resolve(&id)
                    .map_or_else(|| self.target.to_string(), |opt| opt.display())
            }
            other => other.to_string(),
        }
    }
}

/// Two courier fields asked for the same canonical target during save.
///
/// The first writer (in row order) keeps the rule; the conflict is reported
/// instead of silently overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConflict {
    /// The contested canonical target id.
    pub target_id: String,
    /// Courier field whose rule was kept.
    pub kept: String,
    /// Courier field whose rule was rejected.
    pub rejected: String,
}

/// Result of transforming edited rows back into persisted state.
#[derive(Debug, Clone, Default)]
pub struct SaveOutcome {
    pub state: fieldmap_model::DirectionState,
    pub conflicts: Vec<TargetConflict>,
}
