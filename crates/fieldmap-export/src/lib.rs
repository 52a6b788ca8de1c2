#![deny(unsafe_code)]

//! Export of mapping tables to spreadsheet-shaped byte streams.
//!
//! [`sheet::build_sheet`] turns reconciled rows into a renderer-independent
//! [`MappingSheet`]; a [`SheetWriter`] then renders it. Only CSV ships
//! today, but styling and validation hints are carried in the model so a
//! richer workbook format can consume them.

pub mod error;
pub mod sheet;
pub mod writer;

pub use error::{ExportError, Result};
pub use sheet::{ColumnValidation, MappingSheet, SheetRow, build_sheet, status_color};
pub use writer::{CsvSheetWriter, SheetWriter};

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_model::{
        Direction, Endpoint, FieldMetadata, FieldPath, Requirement, StatusTag, TargetSelection,
    };
    use fieldmap_reconcile::{MappingRow, OptionCatalog};
    use std::collections::BTreeMap;

    fn catalog() -> OptionCatalog {
        let mut library = BTreeMap::new();
        library.insert(
            "OrderDTO".to_string(),
            serde_json::json!({"order": {"id": "ORD-1", "total": 12.5}}),
        );
        OptionCatalog::from_library(&library)
    }

    fn sample_rows() -> Vec<MappingRow> {
        vec![
            MappingRow {
                courier_field: FieldPath::new("shipment.code").unwrap(),
                target: TargetSelection::canonical(
                    "OrderDTO",
                    FieldPath::new("order.id").unwrap(),
                ),
                metadata: FieldMetadata {
                    required: Requirement::Yes,
                    type_label: "String".to_string(),
                    example_value: "SHP-9".to_string(),
                    is_done: true,
                    status_tag: StatusTag::Confirmed,
                    doc_note: "shipment identifier".to_string(),
                    ..FieldMetadata::default()
                },
            },
            MappingRow {
                courier_field: FieldPath::new("shipment.weight").unwrap(),
                target: TargetSelection::Unselected,
                metadata: FieldMetadata::seeded("Decimal", "1.25"),
            },
        ]
    }

    #[test]
    fn sheet_carries_rows_colors_and_validations() {
        let catalog = catalog();
        let mut endpoint = Endpoint::new("POST");
        endpoint
            .extra_metadata
            .insert("Base URL".to_string(), "https://api.acme.test".to_string());

        let sheet = build_sheet(
            "CreateOrder",
            Direction::Request,
            &endpoint,
            &sample_rows(),
            &catalog,
        );

        assert_eq!(sheet.title, "CreateOrder request");
        assert_eq!(
            sheet.preamble,
            vec![
                ("Method".to_string(), "POST".to_string()),
                ("Base URL".to_string(), "https://api.acme.test".to_string()),
            ]
        );
        assert_eq!(sheet.columns.len(), 10);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].cells[1], "shipment.code");
        assert_eq!(sheet.rows[0].cells[2], "[OrderDTO] order.id | ORD-1");
        assert_eq!(sheet.rows[0].color, Some("#DCEDC8"));
        assert_eq!(sheet.rows[1].color, None);

        let status = &sheet.validations[0];
        assert_eq!(status.options.len(), StatusTag::ALL.len());
        let target = &sheet.validations[1];
        assert_eq!(target.options[0], "(unselected)");
        assert_eq!(target.options[1], "(ignored)");
        assert!(
            target
                .options
                .iter()
                .any(|opt| opt.starts_with("[OrderDTO] order.id"))
        );
    }

    #[test]
    fn csv_render_places_header_after_preamble() {
        let catalog = catalog();
        let endpoint = Endpoint::new("POST");
        let sheet = build_sheet(
            "CreateOrder",
            Direction::Request,
            &endpoint,
            &sample_rows(),
            &catalog,
        );

        let bytes = CsvSheetWriter.render(&sheet).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CreateOrder request");
        assert_eq!(lines[1], "Method,POST");
        assert!(lines[2].starts_with("Status,Courier field,Canonical target"));
        assert!(lines[3].starts_with("Value confirmed,shipment.code"));
        assert!(lines[4].contains("shipment.weight"));
    }

    #[test]
    fn csv_quotes_cells_with_commas() {
        let catalog = OptionCatalog::from_library(&BTreeMap::new());
        let endpoint = Endpoint::default();
        let mut rows = sample_rows();
        rows[0].metadata.doc_note = "hello, world".to_string();
        let sheet = build_sheet("Track", Direction::Response, &endpoint, &rows, &catalog);

        let bytes = CsvSheetWriter.render(&sheet).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"hello, world\""));
    }
}
