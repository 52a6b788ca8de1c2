//! Per-field annotation record.

use serde::{Deserialize, Serialize};

use crate::{Requirement, StatusTag};

/// Everything the operator records about one courier field, keyed by the
/// courier-side field path in [`crate::DirectionState::field_metadata`].
///
/// Wire keys keep the names used by earlier project files (`type`,
/// `doc_desc`, `comment_tl`, ...) so that migrated documents deserialize
/// directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Courier-declared requiredness.
    #[serde(default)]
    pub required: Requirement,
    /// Inferred or operator-overridden semantic type string.
    #[serde(rename = "type", default)]
    pub type_label: String,
    /// Example value, truncated for display.
    #[serde(default)]
    pub example_value: String,
    /// Derived flag: true iff the field has a target selected. Not
    /// independently authoritative; recomputed on every save.
    #[serde(default)]
    pub is_done: bool,
    /// Review state.
    #[serde(default)]
    pub status_tag: StatusTag,
    /// Free-text documentation note.
    #[serde(rename = "doc_desc", default)]
    pub doc_note: String,
    /// Tech-lead comment.
    #[serde(rename = "comment_tl", default)]
    pub comment_lead: String,
    /// Developer comment.
    #[serde(rename = "comment_dev", default)]
    pub comment_dev: String,
    /// Analyst comment.
    #[serde(rename = "comment_analyst", default)]
    pub comment_analyst: String,
}

impl FieldMetadata {
    /// Seed record for a field seen for the first time.
    pub fn seeded(type_label: impl Into<String>, example_value: impl Into<String>) -> Self {
        Self {
            type_label: type_label.into(),
            example_value: example_value.into(),
            ..Self::default()
        }
    }
}
