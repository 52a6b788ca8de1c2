//! Review-state and requiredness enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operator-assigned review state for one field mapping.
///
/// There is no enforced transition graph: any tag may be set from any tag.
/// `Confirmed` and `ValueOmitted` are conventionally treated as done, but
/// nothing downstream depends on that. `CollectionImported` is applied
/// automatically when a field is seeded from an API-collection import.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTag {
    #[default]
    NoStatus,
    NeedsAnalystReview,
    NeedsCourierReview,
    Confirmed,
    ValueOmitted,
    NeedsIntegrationReview,
    NeedsFrontendValidation,
    NeedsTechLeadVerification,
    CollectionImported,
}

impl StatusTag {
    /// All tags, in the order they are offered to the operator.
    pub const ALL: [Self; 9] = [
        Self::NoStatus,
        Self::NeedsAnalystReview,
        Self::NeedsCourierReview,
        Self::Confirmed,
        Self::ValueOmitted,
        Self::NeedsIntegrationReview,
        Self::NeedsFrontendValidation,
        Self::NeedsTechLeadVerification,
        Self::CollectionImported,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoStatus => "No status",
            Self::NeedsAnalystReview => "Review with analyst",
            Self::NeedsCourierReview => "Review with courier",
            Self::Confirmed => "Value confirmed",
            Self::ValueOmitted => "Value omitted",
            Self::NeedsIntegrationReview => "Review with integration",
            Self::NeedsFrontendValidation => "Validate in frontend",
            Self::NeedsTechLeadVerification => "Pending tech lead verification",
            Self::CollectionImported => "Imported from collection",
        }
    }

    /// Wire name used in persisted project files.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::NoStatus => "no-status",
            Self::NeedsAnalystReview => "needs-analyst-review",
            Self::NeedsCourierReview => "needs-courier-review",
            Self::Confirmed => "confirmed",
            Self::ValueOmitted => "value-omitted",
            Self::NeedsIntegrationReview => "needs-integration-review",
            Self::NeedsFrontendValidation => "needs-frontend-validation",
            Self::NeedsTechLeadVerification => "needs-tech-lead-verification",
            Self::CollectionImported => "collection-imported",
        }
    }

    /// Maps a legacy decorated label (emoji prefix plus Spanish text) to a
    /// tag by keyword. Unknown labels fall back to `NoStatus`.
    pub fn from_legacy(label: &str) -> Self {
        if let Ok(tag) = serde_json::from_value(serde_json::Value::String(label.to_string())) {
            return tag;
        }
        const KEYWORDS: [(&str, StatusTag); 8] = [
            ("Analista", StatusTag::NeedsAnalystReview),
            ("Courier", StatusTag::NeedsCourierReview),
            ("Confirmado", StatusTag::Confirmed),
            ("Omitido", StatusTag::ValueOmitted),
            ("ITX", StatusTag::NeedsIntegrationReview),
            ("Frontal", StatusTag::NeedsFrontendValidation),
            ("Postman", StatusTag::CollectionImported),
            ("TL", StatusTag::NeedsTechLeadVerification),
        ];
        for (keyword, tag) in KEYWORDS {
            if label.contains(keyword) {
                return tag;
            }
        }
        Self::NoStatus
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the courier declares a field as required.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Yes,
    No,
    Conditional,
    #[default]
    Unknown,
}

impl Requirement {
    pub const ALL: [Self; 4] = [Self::Yes, Self::No, Self::Conditional, Self::Unknown];

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Conditional => "conditional",
            Self::Unknown => "unknown",
        }
    }

    /// Maps legacy values (`Sí`, `No`, `Cond`, `?`).
    pub fn from_legacy(raw: &str) -> Self {
        match raw.trim() {
            "Sí" | "Si" | "yes" => Self::Yes,
            "No" | "no" => Self::No,
            "Cond" | "conditional" => Self::Conditional,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_kebab_case() {
        let json = serde_json::to_string(&StatusTag::NeedsTechLeadVerification).unwrap();
        assert_eq!(json, "\"needs-tech-lead-verification\"");
        let back: StatusTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StatusTag::NeedsTechLeadVerification);
    }

    #[test]
    fn legacy_labels_map_by_keyword() {
        assert_eq!(
            StatusTag::from_legacy("🔵 Revisar con Analista"),
            StatusTag::NeedsAnalystReview
        );
        assert_eq!(
            StatusTag::from_legacy("✅ Valor Confirmado"),
            StatusTag::Confirmed
        );
        assert_eq!(
            StatusTag::from_legacy("🧪 Postman"),
            StatusTag::CollectionImported
        );
        assert_eq!(StatusTag::from_legacy("whatever"), StatusTag::NoStatus);
    }

    #[test]
    fn legacy_requirement_values() {
        assert_eq!(Requirement::from_legacy("Sí"), Requirement::Yes);
        assert_eq!(Requirement::from_legacy("Cond"), Requirement::Conditional);
        assert_eq!(Requirement::from_legacy("?"), Requirement::Unknown);
    }
}
