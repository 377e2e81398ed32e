//! # Gridtable - Typed Tables for Reports
//!
//! `gridtable` builds a table of typed cells (integers, floats, strings,
//! dates and datetimes) under fixed-width column definitions, and renders it
//! as aligned text, CSV, a styled HTML page or a PDF.
//!
//! ## Core Concepts
//!
//! - [`Table`]: captions, [`ColumnDef`]s and rows of [`Cell`]s. Long strings
//!   wrap within their column; a single word wider than the column widens it.
//! - Rowsets: named groups of row indices that stay correct as rows are
//!   inserted and deleted, used for subtotals via [`Table::sum_rowset`].
//! - Separator lines before or after rows, sorting and summing over ranges.
//! - [`TableRenderer`]: one implementation per output format, all driven by
//!   [`render_with`].
//!
//! ## Quick Start
//!
//! ```rust
//! use gridtable::{CellType, Justify, Table};
//!
//! let mut t = Table::new();
//! t.set_title("Expenses");
//! t.add_column("What", 12, CellType::String, Justify::Left);
//! t.add_column("Amount", 10, CellType::Float, Justify::Right);
//!
//! for (what, amount) in [("rent", 1200.0), ("coffee beans", 31.5)] {
//!     let row = t.add_row();
//!     t.put_str(row, 0, what)?;
//!     t.put_float(row, 1, amount)?;
//! }
//! t.add_line_after(1)?;
//! let total = t.insert_sum_row(2, 0, 2, &[1])?;
//! t.put_str(total, 0, "total")?;
//!
//! let text = t.to_text().unwrap();
//! assert!(text.contains("total           1,231.50"));
//! # Ok::<(), gridtable::TableError>(())
//! ```
//!
//! A table that has columns but no rows still renders its captions and
//! headers. The call fails with [`RenderError::Incomplete`], which carries
//! that output so callers can show it next to the error.
//!
//! PDF output renders the HTML page and hands it to a [`Converter`];
//! [`Table::pdf_converter`] returns one driving `wkhtmltopdf`.

pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod format;
pub mod render;
pub mod style;
mod table;
pub mod wrap;

use std::fmt;

pub use cell::{Cell, CellType};
pub use column::{ColumnDef, Justify};
pub use config::{AssetSource, FontUnit, HtmlConfig, InsertMembership, TableConfig};
pub use error::{RenderError, Result, TableError};
pub use render::{render_with, CsvRenderer, HtmlRenderer, TableRenderer, TextRenderer};
pub use style::{CssProperty, StyleMap};
pub use table::{Row, RowsetId, Table};

pub use gridtable_pipe::{ConvertError, Converter, Orientation, WkHtmlToPdf};

/// Text output. A structural error prints whatever was rendered followed by
/// the error message.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(err) => {
                if let Some(partial) = err.partial() {
                    f.write_str(partial)?;
                }
                writeln!(f, "{}", err)
            }
        }
    }
}
