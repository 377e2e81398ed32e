//! The typed value stored at a row/column intersection.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind of value a column is meant to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Int,
    Float,
    #[serde(alias = "str")]
    String,
    Date,
    DateTime,
}

/// One value in the table.
///
/// Freshly added rows are filled with [`Cell::Empty`]; the typed `put_*`
/// setters on [`Table`](crate::Table) replace it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// The cell's type tag, `None` for an empty cell.
    pub fn cell_type(&self) -> Option<CellType> {
        match self {
            Cell::Empty => None,
            Cell::Int(_) => Some(CellType::Int),
            Cell::Float(_) => Some(CellType::Float),
            Cell::Str(_) => Some(CellType::String),
            Cell::Date(_) => Some(CellType::Date),
            Cell::DateTime(_) => Some(CellType::DateTime),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Date or datetime value; a plain date is taken at midnight.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(d) => d.and_hms_opt(0, 0, 0),
            Cell::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Ordering used by [`Table::sort`](crate::Table::sort).
    ///
    /// The comparison is directed by `self`'s type: integers and floats compare
    /// numerically, strings case-insensitively, dates chronologically. A value
    /// of another type on the right-hand side compares as that type's zero
    /// value. An empty left-hand side never orders after anything.
    pub fn sort_cmp(&self, other: &Cell) -> Ordering {
        match self {
            Cell::Empty => Ordering::Less,
            Cell::Int(a) => a.cmp(&other.as_int().unwrap_or_default()),
            Cell::Float(a) => a
                .partial_cmp(&other.as_float().unwrap_or_default())
                .unwrap_or(Ordering::Equal),
            Cell::Str(a) => a
                .to_lowercase()
                .cmp(&other.as_str().unwrap_or_default().to_lowercase()),
            Cell::Date(_) | Cell::DateTime(_) => match (self.as_datetime(), other.as_datetime()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Greater,
                _ => Ordering::Equal,
            },
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

impl From<NaiveDate> for Cell {
    fn from(v: NaiveDate) -> Self {
        Cell::Date(v)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(v: NaiveDateTime) -> Self {
        Cell::DateTime(v)
    }
}
