//! Column definitions: title, width, justification and the derived field layout.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::CellType;
use crate::format::FieldFormat;
use crate::wrap::{normalize_spaces, wrap};

/// Horizontal placement of values within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
}

impl Justify {
    /// The CSS `text-align` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Justify::Left => "left",
            Justify::Right => "right",
        }
    }
}

/// Layout metadata for one column.
///
/// The width only grows as titles and string values are written into the
/// column; [`Table::tighten_columns`](crate::Table::tighten_columns) is the
/// one operation that shrinks it.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    title: String,
    width: usize,
    justify: Justify,
    cell_type: CellType,
    decimals: usize,
    html_width: Option<u32>,
    header: Vec<String>,
    format: FieldFormat,
}

impl ColumnDef {
    /// Creates a column, wrapping the title into a multi-line header.
    ///
    /// If a single word of the title is wider than `width`, the column is
    /// widened to hold it.
    pub fn new(title: impl Into<String>, width: usize, cell_type: CellType, justify: Justify) -> Self {
        let mut col = ColumnDef {
            title: title.into(),
            width,
            justify,
            cell_type,
            decimals: 2,
            html_width: None,
            header: Vec::new(),
            format: FieldFormat::for_type(cell_type, width, justify),
        };
        col.adjust_header();
        col
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display width in characters; 0 means unbounded.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn justify(&self) -> Justify {
        self.justify
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Decimal digits shown for float values.
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Width override for HTML output, in characters.
    pub fn html_width(&self) -> Option<u32> {
        self.html_width
    }

    /// The title broken into lines that fit the column.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Field layout for the column's own cell type.
    pub fn format(&self) -> FieldFormat {
        self.format
    }

    /// Field layout for a value of `cell_type` placed in this column.
    pub fn format_for(&self, cell_type: CellType) -> FieldFormat {
        if cell_type == self.cell_type {
            self.format
        } else {
            FieldFormat::for_type(cell_type, self.width, self.justify)
        }
    }

    pub(crate) fn set_decimals(&mut self, decimals: usize) {
        self.decimals = decimals;
    }

    pub(crate) fn set_html_width(&mut self, width: u32) {
        self.html_width = Some(width);
    }

    fn adjust_header(&mut self) {
        let wrapped = wrap(&self.title, self.width);
        if let Some(widest) = wrapped.widest {
            if widest > self.width {
                self.set_width(widest);
            }
        }
        self.header = wrapped
            .lines
            .iter()
            .map(|line| normalize_spaces(line))
            .collect();
    }

    /// Widens the column so no word of `text` has to be cut.
    ///
    /// Returns true when the width changed.
    pub(crate) fn fit(&mut self, text: &str) -> bool {
        match wrap(text, self.width).widest {
            Some(widest) if widest > self.width => {
                debug!(
                    column = %self.title,
                    from = self.width,
                    to = widest,
                    "widening column"
                );
                self.set_width(widest);
                true
            }
            _ => false,
        }
    }

    /// Sets the width and regenerates the field layout.
    pub(crate) fn set_width(&mut self, width: usize) {
        self.width = width;
        self.format = FieldFormat::for_type(self.cell_type, width, self.justify);
    }
}
