//! Terminal table rendering.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;

use fieldmap_core::infer_leaf_type;
use fieldmap_model::FlatField;
use fieldmap_reconcile::{MappingRow, OptionCatalog};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Typed field table for `flatten`.
pub fn flat_field_table(fields: &[FlatField]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Type", "Example"]);
    apply_table_style(&mut table);
    for field in fields {
        let label = infer_leaf_type(field.path.as_str(), &field.value).to_string();
        table.add_row(vec![field.path.to_string(), label, field.example()]);
    }
    table
}

/// Mapping table for `show`.
pub fn mapping_row_table(rows: &[MappingRow], catalog: &OptionCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Done", "Courier field", "Target", "Type", "Example", "Status",
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            if row.is_done() { "x" } else { "" }.to_string(),
            row.courier_field.to_string(),
            row.target_display(catalog),
            row.metadata.type_label.clone(),
            row.metadata.example_value.clone(),
            row.metadata.status_tag.label().to_string(),
        ]);
    }
    table
}
