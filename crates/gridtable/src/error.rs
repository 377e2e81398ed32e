//! Error types for table operations and rendering.
//!
//! [`TableError`] covers structural problems: missing columns or rows and
//! indices outside the table. [`RenderError`] covers everything that can go
//! wrong while producing output, keeping converter failures apart from
//! in-memory formatting failures.

use std::path::PathBuf;

use gridtable_pipe::ConvertError;
use thiserror::Error;

/// Structural errors reported by [`Table`](crate::Table) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table has no column definitions.
    #[error("there are no columns in the table")]
    NoColumns,

    /// The table has column definitions but no rows.
    #[error("there are no rows in the table")]
    NoRows,

    /// A row index is not below the row count.
    #[error("row {row} is out of range, the table has {count} rows")]
    RowOutOfRange { row: usize, count: usize },

    /// A column index is not below the column count.
    #[error("column {col} is out of range, the table has {count} columns")]
    ColumnOutOfRange { col: usize, count: usize },

    /// A rowset handle that was never created.
    #[error("rowset {id} does not exist, the table has {count} rowsets")]
    UnknownRowset { id: usize, count: usize },

    /// A template or stylesheet path that does not name a readable file.
    #[error("provided path {} is not a valid file", .0.display())]
    InvalidPath(PathBuf),
}

/// Error type for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rendering stopped at a structural check.
    ///
    /// `partial` holds what was produced up to that point: captions for a
    /// table without columns, captions and headers for a table without rows.
    /// CSV and HTML append the error message; text output stops bare.
    #[error("{source}")]
    Incomplete {
        #[source]
        source: TableError,
        partial: String,
    },

    /// I/O error (reading a template or stylesheet, writing output).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML page template failed to render.
    #[error("template error: {0}")]
    Template(String),

    /// CSV serialization failed.
    #[error("csv error: {0}")]
    Csv(String),

    /// Rendered bytes were not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The external converter failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl RenderError {
    /// The structural cause, if rendering stopped at a structural check.
    pub fn table_error(&self) -> Option<&TableError> {
        match self {
            RenderError::Incomplete { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Output produced before a structural check failed.
    pub fn partial(&self) -> Option<&str> {
        match self {
            RenderError::Incomplete { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// True when the table has columns but no rows.
    pub fn is_no_rows(&self) -> bool {
        matches!(self.table_error(), Some(TableError::NoRows))
    }

    /// True when the table has no columns.
    pub fn is_no_columns(&self) -> bool {
        matches!(self.table_error(), Some(TableError::NoColumns))
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        RenderError::Template(err.to_string())
    }
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        RenderError::Csv(err.to_string())
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RenderError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RenderError::Csv(err.to_string())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_bounds() {
        let err = TableError::RowOutOfRange { row: 7, count: 3 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_structural_messages() {
        assert!(TableError::NoColumns.to_string().contains("no columns"));
        assert!(TableError::NoRows.to_string().contains("no rows"));
    }

    #[test]
    fn test_incomplete_keeps_partial_output() {
        let err = RenderError::Incomplete {
            source: TableError::NoRows,
            partial: "Name  Age\n".to_string(),
        };
        assert!(err.is_no_rows());
        assert!(!err.is_no_columns());
        assert_eq!(err.partial(), Some("Name  Age\n"));
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::Io(_)));
        assert!(render_err.table_error().is_none());
    }
}
