//! Renderer-independent sheet model.
//!
//! The export contract is a flat table plus presentation hints: a key/value
//! preamble, a fixed column set, a per-row color derived from the status
//! tag, and constrained-choice validation lists for the status and target
//! columns. Renderers consume as much of this as their format can express;
//! the CSV renderer ignores colors and validations, a workbook renderer
//! would apply them.

use fieldmap_model::{Endpoint, StatusTag};
use fieldmap_reconcile::{MappingRow, OptionCatalog};

/// Fixed column set of the mapping table.
pub const COLUMNS: [&str; 10] = [
    "Status",
    "Courier field",
    "Canonical target",
    "Example",
    "Type",
    "Required",
    "Doc note",
    "Analyst comment",
    "Dev comment",
    "Lead comment",
];

/// Index of the status column, for validations and coloring.
pub const STATUS_COLUMN: usize = 0;
/// Index of the canonical-target column.
pub const TARGET_COLUMN: usize = 2;

/// Hex background color for a status tag, if the tag is colored.
pub fn status_color(tag: StatusTag) -> Option<&'static str> {
    match tag {
        StatusTag::NoStatus => None,
        StatusTag::NeedsAnalystReview => Some("#E3F2FD"),
        StatusTag::NeedsCourierReview => Some("#FFF9C4"),
        StatusTag::Confirmed => Some("#DCEDC8"),
        StatusTag::ValueOmitted => Some("#F5F5F5"),
        StatusTag::NeedsIntegrationReview => Some("#FFE0B2"),
        StatusTag::NeedsFrontendValidation => Some("#E1BEE7"),
        StatusTag::CollectionImported => Some("#FFFFE0"),
        StatusTag::NeedsTechLeadVerification => Some("#A5D6A7"),
    }
}

/// One data row with its presentation hint.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<String>,
    pub color: Option<&'static str>,
}

/// Constrained-choice list attached to one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValidation {
    pub column: usize,
    pub options: Vec<String>,
}

/// Complete export model for one endpoint direction.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingSheet {
    /// Worksheet title, e.g. `CreateOrder request`.
    pub title: String,
    /// Endpoint extra metadata, rendered before the table.
    pub preamble: Vec<(String, String)>,
    pub columns: Vec<&'static str>,
    pub rows: Vec<SheetRow>,
    pub validations: Vec<ColumnValidation>,
    /// Hint: freeze the header row.
    pub freeze_header: bool,
    /// Hint: span an auto-filter over the table.
    pub autofilter: bool,
}

/// Builds the sheet for one direction of an endpoint.
pub fn build_sheet(
    endpoint_name: &str,
    direction: fieldmap_model::Direction,
    endpoint: &Endpoint,
    rows: &[MappingRow],
    catalog: &OptionCatalog,
) -> MappingSheet {
    let mut preamble: Vec<(String, String)> = vec![("Method".to_string(), endpoint.method.clone())];
    preamble.extend(
        endpoint
            .extra_metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    let sheet_rows = rows
        .iter()
        .map(|row| SheetRow {
            cells: vec![
                row.metadata.status_tag.label().to_string(),
                row.courier_field.to_string(),
                row.target_display(catalog),
                row.metadata.example_value.clone(),
                row.metadata.type_label.clone(),
                row.metadata.required.label().to_string(),
                row.metadata.doc_note.clone(),
                row.metadata.comment_analyst.clone(),
                row.metadata.comment_dev.clone(),
                row.metadata.comment_lead.clone(),
            ],
            color: status_color(row.metadata.status_tag),
        })
        .collect();

    let mut target_options = vec![
        fieldmap_model::TargetSelection::Unselected.to_string(),
        fieldmap_model::TargetSelection::Ignored.to_string(),
    ];
    target_options.extend(catalog.display_options());

    MappingSheet {
        title: format!("{endpoint_name} {}", direction.as_str()),
        preamble,
        columns: COLUMNS.to_vec(),
        rows: sheet_rows,
        validations: vec![
            ColumnValidation {
                column: STATUS_COLUMN,
                options: StatusTag::ALL
                    .iter()
                    .map(|tag| tag.label().to_string())
                    .collect(),
            },
            ColumnValidation {
                column: TARGET_COLUMN,
                options: target_options,
            },
        ],
        freeze_header: true,
        autofilter: true,
    }
}
