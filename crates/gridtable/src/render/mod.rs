//! Output formats.
//!
//! Every format walks the table the same way, so the traversal lives in one
//! driver, [`render_with`], and each format implements [`TableRenderer`] to
//! supply only its markup:
//!
//! 1. captions (title, section1..3), skipping empty ones
//! 2. a structural check: no columns stops here, no rows stops after headers
//! 3. headers
//! 4. each row in order
//!
//! When the structural check fails the driver still finishes the renderer and
//! returns [`RenderError::Incomplete`] carrying what was produced.

mod assets;
mod csv;
mod html;
mod pdf;
mod text;

use std::io::Write;

use gridtable_pipe::{Converter, WkHtmlToPdf};

use crate::config::HtmlConfig;
use crate::error::{RenderError, TableError};
use crate::table::Table;

pub use self::assets::{DEFAULT_STYLESHEET, DEFAULT_TEMPLATE};
pub use self::csv::CsvRenderer;
pub use self::html::HtmlRenderer;
pub use self::text::TextRenderer;

/// One output format.
pub trait TableRenderer: Sized {
    /// Output of a finished rendering.
    type Output;

    /// A non-empty caption. `key` is its style key (`title`, `section1`, ...).
    fn caption(&mut self, key: &str, text: &str) -> Result<(), RenderError>;

    fn headers(&mut self, table: &Table) -> Result<(), RenderError>;

    /// Row `row`, which the driver guarantees exists.
    fn row(&mut self, table: &Table, row: usize) -> Result<(), RenderError>;

    /// Called instead of headers when the table has no columns.
    fn no_columns(&mut self, _table: &Table, _err: &TableError) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called after headers when the table has no rows.
    fn no_rows(&mut self, _table: &Table, _err: &TableError) -> Result<(), RenderError> {
        Ok(())
    }

    fn finish(self, table: &Table) -> Result<Self::Output, RenderError>;
}

/// Drives `renderer` over `table`.
pub fn render_with<R>(table: &Table, mut renderer: R) -> Result<R::Output, RenderError>
where
    R: TableRenderer,
    R::Output: Into<String>,
{
    for (key, text) in table.captions() {
        if !text.is_empty() {
            renderer.caption(key, text)?;
        }
    }

    if let Err(source) = table.check_structure() {
        match source {
            TableError::NoRows => {
                renderer.headers(table)?;
                renderer.no_rows(table, &source)?;
            }
            _ => renderer.no_columns(table, &source)?,
        }
        let partial = renderer.finish(table)?.into();
        return Err(RenderError::Incomplete { source, partial });
    }

    renderer.headers(table)?;
    for row in 0..table.row_count() {
        renderer.row(table, row)?;
    }
    renderer.finish(table)
}

impl Table {
    /// Renders as fixed-width text.
    pub fn to_text(&self) -> Result<String, RenderError> {
        render_with(self, TextRenderer::new(self.config().column_spacing))
    }

    pub fn to_csv(&self) -> Result<String, RenderError> {
        render_with(self, CsvRenderer::new())
    }

    /// Renders as a complete HTML page.
    pub fn to_html(&self, config: &HtmlConfig) -> Result<String, RenderError> {
        render_with(self, HtmlRenderer::new(config))
    }

    /// Renders to HTML and hands the page to `converter`.
    ///
    /// A table without columns or rows fails with
    /// [`RenderError::Incomplete`] and the converter is not called.
    pub fn to_pdf(
        &self,
        config: &HtmlConfig,
        converter: &dyn Converter,
    ) -> Result<Vec<u8>, RenderError> {
        pdf::render_pdf(self, config, converter)
    }

    /// A `wkhtmltopdf` converter with the table title in the page header.
    pub fn pdf_converter(&self) -> WkHtmlToPdf {
        WkHtmlToPdf::new().header_center(self.title())
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        out.write_all(self.to_text()?.as_bytes())?;
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        out.write_all(self.to_csv()?.as_bytes())?;
        Ok(())
    }

    pub fn write_html<W: Write>(&self, out: &mut W, config: &HtmlConfig) -> Result<(), RenderError> {
        out.write_all(self.to_html(config)?.as_bytes())?;
        Ok(())
    }

    pub fn write_pdf<W: Write>(
        &self,
        out: &mut W,
        config: &HtmlConfig,
        converter: &dyn Converter,
    ) -> Result<(), RenderError> {
        out.write_all(&self.to_pdf(config, converter)?)?;
        Ok(())
    }
}
