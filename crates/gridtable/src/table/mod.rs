//! The table: column definitions, rows of typed cells, captions and the
//! bookkeeping renderers read.
//!
//! # Example
//!
//! ```rust
//! use gridtable::{CellType, Justify, Table};
//!
//! let mut t = Table::new();
//! t.set_title("Inventory");
//! t.add_column("Item", 10, CellType::String, Justify::Left);
//! t.add_column("Qty", 5, CellType::Int, Justify::Right);
//!
//! let row = t.add_row();
//! t.put_str(row, 0, "bolts").unwrap();
//! t.put_int(row, 1, 120).unwrap();
//!
//! assert_eq!(t.get_str(row, 0), "bolts");
//! assert_eq!(t.sum(1).as_int(), Some(120));
//! ```

mod aggregate;
mod rowset;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::cell::{Cell, CellType};
use crate::column::{ColumnDef, Justify};
use crate::config::{AssetSource, HtmlConfig, TableConfig};
use crate::error::{Result, TableError};
use crate::style::StyleMap;
use crate::wrap::{normalize_spaces, wrap};

pub use rowset::RowsetId;

static EMPTY_CELL: Cell = Cell::Empty;

/// One row of cells, always as long as the table has columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    fn blank(columns: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; columns],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Physical text lines needed to show the row: the most lines any of its
    /// string cells wraps into, and at least one.
    pub fn height(&self, columns: &[ColumnDef]) -> usize {
        self.cells
            .iter()
            .zip(columns)
            .filter_map(|(cell, col)| cell.as_str().map(|s| wrap(s, col.width()).len()))
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// A grid of typed cells with column layout, captions, rowsets and
/// separator markers.
#[derive(Clone, Debug, Default)]
pub struct Table {
    title: String,
    sections: [String; 3],
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    rowsets: Vec<Vec<usize>>,
    line_after: Vec<usize>,
    line_before: Vec<usize>,
    config: TableConfig,
    pub(crate) styles: StyleMap,
    html_template: Option<PathBuf>,
    html_stylesheet: Option<PathBuf>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn set_date_format(&mut self, pattern: impl Into<String>) {
        self.config.date_format = pattern.into();
    }

    pub fn set_datetime_format(&mut self, pattern: impl Into<String>) {
        self.config.datetime_format = pattern.into();
    }

    // captions

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    pub fn section1(&self) -> &str {
        &self.sections[0]
    }

    pub fn set_section1(&mut self, text: impl Into<String>) {
        self.sections[0] = text.into();
    }

    pub fn section2(&self) -> &str {
        &self.sections[1]
    }

    pub fn set_section2(&mut self, text: impl Into<String>) {
        self.sections[1] = text.into();
    }

    pub fn section3(&self) -> &str {
        &self.sections[2]
    }

    pub fn set_section3(&mut self, text: impl Into<String>) {
        self.sections[2] = text.into();
    }

    /// Title and sections in output order, as `(style key, text)` pairs.
    pub(crate) fn captions(&self) -> [(&'static str, &str); 4] {
        [
            (crate::style::TITLE_KEY, self.title.as_str()),
            (crate::style::SECTION_KEYS[0], self.sections[0].as_str()),
            (crate::style::SECTION_KEYS[1], self.sections[1].as_str()),
            (crate::style::SECTION_KEYS[2], self.sections[2].as_str()),
        ]
    }

    // columns

    /// Adds a column and returns its index.
    ///
    /// Rows that already exist get an empty cell in the new column.
    pub fn add_column(
        &mut self,
        title: impl Into<String>,
        width: usize,
        cell_type: CellType,
        justify: Justify,
    ) -> usize {
        self.columns.push(ColumnDef::new(title, width, cell_type, justify));
        for row in &mut self.rows {
            row.cells.push(Cell::Empty);
        }
        self.columns.len() - 1
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column(&self, col: usize) -> Option<&ColumnDef> {
        self.columns.get(col)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of decimal digits shown for floats in `col`.
    pub fn set_column_decimals(&mut self, col: usize, decimals: usize) -> Result<()> {
        self.check_column(col)?;
        self.columns[col].set_decimals(decimals);
        Ok(())
    }

    /// Column width used by HTML output instead of the text width.
    pub fn set_col_html_width(&mut self, col: usize, width: u32) -> Result<()> {
        self.check_column(col)?;
        self.columns[col].set_html_width(width);
        Ok(())
    }

    // rows

    /// Appends a row of empty cells and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row::blank(self.columns.len()));
        self.rows.len() - 1
    }

    /// Index of the last row, if any.
    pub fn last_row(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Physical text lines row `row` needs; 0 if it does not exist.
    pub fn row_height(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .map(|r| r.height(&self.columns))
            .unwrap_or(0)
    }

    // validation

    pub fn has_headers(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }

    /// `NoColumns` or `NoRows` when the table cannot be rendered in full.
    pub fn check_structure(&self) -> Result<()> {
        if !self.has_headers() {
            return Err(TableError::NoColumns);
        }
        if !self.has_data() {
            return Err(TableError::NoRows);
        }
        Ok(())
    }

    pub fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(TableError::RowOutOfRange {
                row,
                count: self.rows.len(),
            });
        }
        Ok(())
    }

    pub fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.columns.len() {
            return Err(TableError::ColumnOutOfRange {
                col,
                count: self.columns.len(),
            });
        }
        Ok(())
    }

    // getters: total, out of range reads give the zero value

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn get_int(&self, row: usize, col: usize) -> i64 {
        self.get(row, col).as_int().unwrap_or_default()
    }

    pub fn get_float(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).as_float().unwrap_or_default()
    }

    pub fn get_str(&self, row: usize, col: usize) -> &str {
        self.get(row, col).as_str().unwrap_or_default()
    }

    /// Date or datetime value; dates are taken at midnight.
    pub fn get_date(&self, row: usize, col: usize) -> Option<NaiveDateTime> {
        self.get(row, col).as_datetime()
    }

    pub fn cell_type(&self, row: usize, col: usize) -> Option<CellType> {
        self.get(row, col).cell_type()
    }

    // setters

    /// Stores `cell` at `row`, `col`.
    ///
    /// String values have whitespace runs collapsed within each line, and the
    /// column widens if a word would not fit.
    pub fn put(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        self.check_row(row)?;
        self.check_column(col)?;
        let cell = match cell {
            Cell::Str(s) => {
                let s = normalize_spaces(&s);
                self.columns[col].fit(&s);
                Cell::Str(s)
            }
            other => other,
        };
        self.rows[row].cells[col] = cell;
        Ok(())
    }

    pub fn put_int(&mut self, row: usize, col: usize, value: i64) -> Result<()> {
        self.put(row, col, Cell::Int(value))
    }

    pub fn put_float(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.put(row, col, Cell::Float(value))
    }

    pub fn put_str(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<()> {
        self.put(row, col, Cell::Str(value.into()))
    }

    pub fn put_date(&mut self, row: usize, col: usize, value: NaiveDate) -> Result<()> {
        self.put(row, col, Cell::Date(value))
    }

    pub fn put_datetime(&mut self, row: usize, col: usize, value: NaiveDateTime) -> Result<()> {
        self.put(row, col, Cell::DateTime(value))
    }

    // html assets

    /// Uses the template at `path` for HTML output.
    pub fn set_html_template(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.html_template = Some(valid_file(path.as_ref())?);
        Ok(())
    }

    /// Uses the stylesheet at `path` for HTML output.
    pub fn set_html_stylesheet(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.html_stylesheet = Some(valid_file(path.as_ref())?);
        Ok(())
    }

    /// The default HTML configuration with this table's template and
    /// stylesheet files, when set, tried first.
    pub fn html_config(&self) -> HtmlConfig {
        let mut config = HtmlConfig::default();
        if let Some(path) = &self.html_template {
            config.template.insert(0, AssetSource::File(path.clone()));
        }
        if let Some(path) = &self.html_stylesheet {
            config.stylesheet.insert(0, AssetSource::File(path.clone()));
        }
        config
    }
}

fn valid_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(TableError::InvalidPath(path.to_path_buf()))
    }
}
