//! CSV output.
//!
//! Captions come first, one quoted field per line, then the header titles and
//! one record per row. Quoting follows the cell type, not the content: integer
//! and float cells are written bare and without grouping, everything else is
//! quoted, so a string such as `"00501"` keeps its leading zeros.

use ::csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::cell::Cell;
use crate::error::{RenderError, TableError};
use crate::format::{cell_text, format_float};
use crate::render::TableRenderer;
use crate::table::Table;

/// Wraps a field in double quotes, doubling any quote inside it.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders a table as comma-separated values.
pub struct CsvRenderer {
    writer: Writer<Vec<u8>>,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRenderer {
    pub fn new() -> Self {
        let writer = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        Self { writer }
    }
}

impl TableRenderer for CsvRenderer {
    type Output = String;

    fn caption(&mut self, _key: &str, text: &str) -> Result<(), RenderError> {
        self.writer.write_record([quoted(text)])?;
        Ok(())
    }

    fn headers(&mut self, table: &Table) -> Result<(), RenderError> {
        self.writer
            .write_record(table.columns().iter().map(|c| quoted(c.title())))?;
        Ok(())
    }

    fn row(&mut self, table: &Table, row: usize) -> Result<(), RenderError> {
        let fields: Vec<String> = table.rows()[row]
            .cells()
            .iter()
            .zip(table.columns())
            .map(|(cell, col)| match cell {
                Cell::Int(v) => v.to_string(),
                Cell::Float(v) => format_float(*v, col.decimals(), None),
                other => quoted(&cell_text(other, col.decimals(), None, table.config())),
            })
            .collect();
        self.writer.write_record(&fields)?;
        Ok(())
    }

    fn no_columns(&mut self, _table: &Table, err: &TableError) -> Result<(), RenderError> {
        self.writer.write_record([quoted(&err.to_string())])?;
        Ok(())
    }

    fn no_rows(&mut self, _table: &Table, err: &TableError) -> Result<(), RenderError> {
        self.writer.write_record([quoted(&err.to_string())])?;
        Ok(())
    }

    fn finish(self, _table: &Table) -> Result<String, RenderError> {
        let bytes = self.writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}
