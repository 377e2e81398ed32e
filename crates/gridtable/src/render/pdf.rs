//! PDF output by way of the HTML page and a [`Converter`].

use gridtable_pipe::Converter;
use tracing::debug;

use crate::config::HtmlConfig;
use crate::error::RenderError;
use crate::table::Table;

pub(crate) fn render_pdf(
    table: &Table,
    config: &HtmlConfig,
    converter: &dyn Converter,
) -> Result<Vec<u8>, RenderError> {
    let html = table.to_html(config)?;
    debug!(bytes = html.len(), "converting html page");
    Ok(converter.convert(html.as_bytes())?)
}
