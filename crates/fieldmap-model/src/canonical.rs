//! Canonical model (DTO) leaves and target selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FieldPath;

/// One addressable leaf inside a named canonical model.
///
/// Identity for matching purposes is `(dto_name, path)`, exposed through
/// [`CanonicalOption::id`]. The example value is carried for display only
/// and never participates in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOption {
    /// Name of the canonical model this leaf belongs to.
    pub dto_name: String,
    /// Dotted path within the model.
    pub path: FieldPath,
    /// Example value found while flattening the model, display only.
    pub example: String,
}

impl CanonicalOption {
    /// Stable identifier: model name plus path, without the example.
    pub fn id(&self) -> String {
        format!("[{}] {}", self.dto_name, self.path)
    }

    /// Display representation shown in dropdowns: id plus current example.
    pub fn display(&self) -> String {
        format!("[{}] {} | {}", self.dto_name, self.path, self.example)
    }
}

/// Where a courier field points.
///
/// `Stale` carries a persisted target id that no longer resolves against the
/// current canonical snapshot (the canonical field was renamed or removed).
/// It is surfaced to the operator as an inconsistency, never silently reset
/// to `Unselected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelection {
    /// No target chosen yet.
    Unselected,
    /// Operator explicitly marked the field as not mapped.
    Ignored,
    /// Mapped to a canonical leaf, identified by `(dto_name, path)`.
    Canonical { dto_name: String, path: FieldPath },
    /// Persisted target id that does not resolve anymore.
    Stale(String),
}

impl TargetSelection {
    pub fn canonical(dto_name: impl Into<String>, path: FieldPath) -> Self {
        Self::Canonical {
            dto_name: dto_name.into(),
            path,
        }
    }

    /// True when the selection points at a canonical leaf (stale or not).
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Canonical { .. } | Self::Stale(_))
    }

    /// Stable id for persistence, when one exists.
    pub fn id(&self) -> Option<String> {
        match self {
            Self::Unselected | Self::Ignored => None,
            Self::Canonical { dto_name, path } => Some(format!("[{dto_name}] {path}")),
            Self::Stale(raw) => Some(raw.clone()),
        }
    }
}

impl fmt::Display for TargetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unselected => f.write_str("(unselected)"),
            Self::Ignored => f.write_str("(ignored)"),
            Self::Canonical { dto_name, path } => write!(f, "[{dto_name}] {path}"),
            Self::Stale(raw) => write!(f, "{raw} (stale)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> CanonicalOption {
        CanonicalOption {
            dto_name: "OrderDTO".to_string(),
            path: FieldPath::new("order.id").unwrap(),
            example: "String".to_string(),
        }
    }

    #[test]
    fn id_excludes_example() {
        assert_eq!(option().id(), "[OrderDTO] order.id");
    }

    #[test]
    fn display_includes_example() {
        assert_eq!(option().display(), "[OrderDTO] order.id | String");
    }

    #[test]
    fn canonical_selection_id_matches_option_id() {
        let opt = option();
        let selection = TargetSelection::canonical(opt.dto_name.clone(), opt.path.clone());
        assert_eq!(selection.id().as_deref(), Some(opt.id().as_str()));
        assert!(selection.is_mapped());
        assert!(!TargetSelection::Ignored.is_mapped());
    }
}
