use crate::shell::{run_capture, ShellError};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Converter error: {0}")]
    Shell(#[from] ShellError),
    #[error("Could not stage converter input: {0}")]
    Staging(#[source] std::io::Error),
    #[error("Converter produced no output")]
    EmptyOutput,
}

/// Turns an HTML document into another document format.
///
/// The PDF renderer only depends on this trait, so tests can hand it a closure
/// instead of a real converter binary.
pub trait Converter: Send + Sync {
    /// Convert the HTML bytes and return the resulting document bytes.
    fn convert(&self, html: &[u8]) -> Result<Vec<u8>, ConvertError>;
}

impl<F> Converter for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, ConvertError> + Send + Sync,
{
    fn convert(&self, html: &[u8]) -> Result<Vec<u8>, ConvertError> {
        self(html)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// Footer timestamp layout, e.g. ` 5 Mar 2024 3:04 PM`.
pub const FOOTER_TIME_FORMAT: &str = "%e %b %Y %-I:%M %p";

/// Converter backed by the `wkhtmltopdf` binary.
///
/// The HTML is staged in a temporary `.html` file (the binary keys its input
/// parser on the extension), the binary writes the PDF to stdout, and the
/// temporary file is removed once the call returns.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    program: String,
    timeout: Duration,
    margin_top: u32,
    margin_bottom: u32,
    header_center: String,
    header_spacing: u32,
    footer_spacing: u32,
    font_name: String,
    font_size: u32,
    footer_left: Option<String>,
    footer_right: String,
    page_size: String,
    orientation: Orientation,
}

impl Default for WkHtmlToPdf {
    fn default() -> Self {
        Self::new()
    }
}

impl WkHtmlToPdf {
    pub fn new() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
            timeout: Duration::from_secs(60),
            margin_top: 15,
            margin_bottom: 15,
            header_center: String::new(),
            header_spacing: 3,
            footer_spacing: 5,
            font_name: "opensans".to_string(),
            font_size: 8,
            footer_left: None,
            footer_right: "Page [page] of [toPage]".to_string(),
            page_size: "Letter".to_string(),
            orientation: Orientation::Portrait,
        }
    }

    /// Use a different executable (absolute path or name on `PATH`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Text centered in the page header, usually the table title.
    pub fn header_center(mut self, text: impl Into<String>) -> Self {
        self.header_center = text.into();
        self
    }

    /// Fixed footer-left text. When unset, the conversion time is used.
    pub fn footer_left(mut self, text: impl Into<String>) -> Self {
        self.footer_left = Some(text.into());
        self
    }

    pub fn footer_right(mut self, text: impl Into<String>) -> Self {
        self.footer_right = text.into();
        self
    }

    pub fn margins(mut self, top: u32, bottom: u32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    pub fn font(mut self, name: impl Into<String>, size: u32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    pub fn page_size(mut self, size: impl Into<String>) -> Self {
        self.page_size = size.into();
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Command-line arguments for converting `input`, writing the PDF to stdout.
    pub fn args(&self, input: &Path) -> Vec<String> {
        let footer_left = self
            .footer_left
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format(FOOTER_TIME_FORMAT).to_string());

        vec![
            "-T".to_string(),
            self.margin_top.to_string(),
            "--header-center".to_string(),
            self.header_center.clone(),
            "--header-font-size".to_string(),
            self.font_size.to_string(),
            "--header-font-name".to_string(),
            self.font_name.clone(),
            "--header-spacing".to_string(),
            self.header_spacing.to_string(),
            "-B".to_string(),
            self.margin_bottom.to_string(),
            "--footer-spacing".to_string(),
            self.footer_spacing.to_string(),
            "--footer-font-name".to_string(),
            self.font_name.clone(),
            "--footer-font-size".to_string(),
            self.font_size.to_string(),
            "--footer-left".to_string(),
            footer_left,
            "--footer-right".to_string(),
            self.footer_right.clone(),
            "--page-size".to_string(),
            self.page_size.clone(),
            "--orientation".to_string(),
            self.orientation.as_str().to_string(),
            input.to_string_lossy().into_owned(),
            "-".to_string(),
        ]
    }
}

impl Converter for WkHtmlToPdf {
    fn convert(&self, html: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let mut staged = tempfile::Builder::new()
            .prefix("gridtable_")
            .suffix(".html")
            .tempfile()
            .map_err(ConvertError::Staging)?;
        staged.write_all(html).map_err(ConvertError::Staging)?;
        staged.flush().map_err(ConvertError::Staging)?;
        debug!(path = %staged.path().display(), bytes = html.len(), "staged html for conversion");

        let args = self.args(staged.path());
        let pdf = run_capture(&self.program, &args, None, Some(self.timeout))?;
        if pdf.is_empty() {
            return Err(ConvertError::EmptyOutput);
        }
        Ok(pdf)
    }
}
