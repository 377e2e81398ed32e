//! Page template and stylesheet lookup for HTML output.
//!
//! Both are resolved from an ordered list of [`AssetSource`]s. A file that
//! does not exist, or a template that does not compile, falls through to the
//! next source; the built-in copies end every chain.

use std::fs;

use minijinja::{Environment, Value};
use tracing::{debug, warn};

use crate::config::AssetSource;
use crate::error::RenderError;

/// Built-in page template.
///
/// Receives `font_size`, `head_title`, `default_css`, `custom_css` and
/// `table_html`. The CSS values arrive wrapped in `<style>` elements.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/table.html.j2");

/// Built-in stylesheet.
pub const DEFAULT_STYLESHEET: &str = include_str!("../../assets/table.css");

/// Reads a source's text. `Ok(None)` when a file source does not exist.
fn read_source(source: &AssetSource, embedded: &str) -> Result<Option<String>, RenderError> {
    match source {
        AssetSource::File(path) if !path.is_file() => {
            warn!(path = %path.display(), "asset file not found, trying next source");
            Ok(None)
        }
        AssetSource::File(path) => Ok(Some(fs::read_to_string(path)?)),
        AssetSource::Inline(text) => Ok(Some(text.clone())),
        AssetSource::Embedded => Ok(Some(embedded.to_string())),
    }
}

/// The first stylesheet the chain yields.
pub(crate) fn load_stylesheet(chain: &[AssetSource]) -> Result<String, RenderError> {
    for source in chain {
        if let Some(css) = read_source(source, DEFAULT_STYLESHEET)? {
            debug!(?source, "using stylesheet");
            return Ok(css);
        }
    }
    Ok(DEFAULT_STYLESHEET.to_string())
}

/// Renders `ctx` with the first template in the chain that compiles.
pub(crate) fn render_page(chain: &[AssetSource], ctx: Value) -> Result<String, RenderError> {
    for source in chain {
        let Some(text) = read_source(source, DEFAULT_TEMPLATE)? else {
            continue;
        };
        let env = Environment::new();
        match env.template_from_str(&text) {
            Ok(template) => {
                debug!(?source, "using page template");
                return Ok(template.render(&ctx)?);
            }
            Err(err) => warn!(?source, error = %err, "page template does not compile, trying next source"),
        }
    }
    let env = Environment::new();
    Ok(env.template_from_str(DEFAULT_TEMPLATE)?.render(&ctx)?)
}
