//! Sheet renderers.

use crate::error::{ExportError, Result};
use crate::sheet::MappingSheet;

/// Renders a [`MappingSheet`] into a byte stream in some concrete format.
pub trait SheetWriter {
    /// Preferred file extension for the produced bytes, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, sheet: &MappingSheet) -> Result<Vec<u8>>;
}

/// CSV renderer.
///
/// CSV has no cells outside the grid, so the title and preamble are written
/// as leading short rows before the header. Colors and validations are
/// dropped.
#[derive(Debug, Default)]
pub struct CsvSheetWriter;

impl SheetWriter for CsvSheetWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, sheet: &MappingSheet) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer
            .write_record([sheet.title.as_str()])
            .map_err(|err| ExportError::Render(err.to_string()))?;
        for (key, value) in &sheet.preamble {
            writer
                .write_record([key.as_str(), value.as_str()])
                .map_err(|err| ExportError::Render(err.to_string()))?;
        }

        writer
            .write_record(&sheet.columns)
            .map_err(|err| ExportError::Render(err.to_string()))?;
        for row in &sheet.rows {
            writer
                .write_record(&row.cells)
                .map_err(|err| ExportError::Render(err.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|err| ExportError::Render(err.to_string()))
    }
}
