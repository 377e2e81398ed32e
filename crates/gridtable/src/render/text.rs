//! Fixed-width text output.
//!
//! ```text
//! Stock
//! Item      Qty
//! --------  ---
//! bolts     120
//! long        3
//! item
//! name
//! ```
//!
//! Headers are bottom-aligned across columns and followed by a hyphen rule.
//! String cells wrap within their column; every other value sits on the
//! row's first physical line.

use crate::cell::Cell;
use crate::column::Justify;
use crate::error::RenderError;
use crate::format::cell_text;
use crate::render::TableRenderer;
use crate::table::Table;
use crate::wrap::{pad_left, pad_right, wrap, Wrapped};

/// Renders a table as aligned, padded lines of text.
#[derive(Debug, Default)]
pub struct TextRenderer {
    spacing: usize,
    out: String,
}

impl TextRenderer {
    /// A renderer that puts `spacing` blanks between columns.
    pub fn new(spacing: usize) -> Self {
        Self {
            spacing,
            out: String::new(),
        }
    }

    fn push_line(&mut self, fields: &[String]) {
        self.out.push_str(&fields.join(&" ".repeat(self.spacing)));
        self.out.push('\n');
    }

    fn rule(&mut self, table: &Table) {
        let fields: Vec<String> = table
            .columns()
            .iter()
            .map(|col| "-".repeat(col.width()))
            .collect();
        self.push_line(&fields);
    }
}

impl TableRenderer for TextRenderer {
    type Output = String;

    fn caption(&mut self, _key: &str, text: &str) -> Result<(), RenderError> {
        self.out.push_str(text);
        if !text.ends_with('\n') {
            self.out.push('\n');
        }
        Ok(())
    }

    fn headers(&mut self, table: &Table) -> Result<(), RenderError> {
        let columns = table.columns();
        let depth = columns.iter().map(|c| c.header().len()).max().unwrap_or(0);

        for line in 0..depth {
            let fields: Vec<String> = columns
                .iter()
                .map(|col| {
                    let offset = depth - col.header().len();
                    let text = line
                        .checked_sub(offset)
                        .and_then(|i| col.header().get(i))
                        .map(String::as_str)
                        .unwrap_or("");
                    match col.justify() {
                        Justify::Left => pad_right(text, col.width()),
                        Justify::Right => pad_left(text, col.width()),
                    }
                })
                .collect();
            self.push_line(&fields);
        }
        self.rule(table);
        Ok(())
    }

    fn row(&mut self, table: &Table, row: usize) -> Result<(), RenderError> {
        if table.has_line_before(row) {
            self.rule(table);
        }

        let columns = table.columns();
        let cells = table.rows()[row].cells();
        let wrapped: Vec<Option<Wrapped>> = cells
            .iter()
            .zip(columns)
            .map(|(cell, col)| cell.as_str().map(|s| wrap(s, col.width())))
            .collect();
        let height = wrapped
            .iter()
            .flatten()
            .map(Wrapped::len)
            .max()
            .unwrap_or(0)
            .max(1);

        for line in 0..height {
            let fields: Vec<String> = cells
                .iter()
                .zip(columns)
                .zip(&wrapped)
                .map(|((cell, col), lines)| {
                    let format = match cell.cell_type() {
                        Some(t) => col.format_for(t),
                        None => col.format(),
                    };
                    match (cell, lines) {
                        (Cell::Str(_), Some(lines)) => format.apply(lines.line(line)),
                        (Cell::Empty, _) => format.blank(),
                        _ if line > 0 => format.blank(),
                        _ => format.apply(&cell_text(
                            cell,
                            col.decimals(),
                            Some(','),
                            table.config(),
                        )),
                    }
                })
                .collect();
            self.push_line(&fields);
        }

        if table.has_line_after(row) {
            self.rule(table);
        }
        Ok(())
    }

    fn finish(self, _table: &Table) -> Result<String, RenderError> {
        Ok(self.out)
    }
}
