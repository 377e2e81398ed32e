//! # Gridtable Pipe - External Converter Plumbing
//!
//! `gridtable-pipe` holds the one part of `gridtable` that leaves the process:
//! handing a rendered HTML document to an external converter and collecting
//! the bytes it produces.
//!
//! - [`Converter`]: the capability the PDF renderer depends on. Any
//!   `Fn(&[u8]) -> Result<Vec<u8>, ConvertError>` closure is a converter, which
//!   keeps renderer tests free of real binaries.
//! - [`WkHtmlToPdf`]: the production converter, driving `wkhtmltopdf`.
//! - [`run_capture`]: bounded subprocess execution with captured stdout.
//!
//! ```rust,no_run
//! use gridtable_pipe::{Converter, WkHtmlToPdf};
//! use std::time::Duration;
//!
//! let converter = WkHtmlToPdf::new()
//!     .header_center("Monthly Report")
//!     .with_timeout(Duration::from_secs(30));
//! let pdf = converter.convert(b"<html><body>hi</body></html>")?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok::<(), gridtable_pipe::ConvertError>(())
//! ```

pub mod convert;
pub mod shell;

pub use convert::{ConvertError, Converter, Orientation, WkHtmlToPdf, FOOTER_TIME_FORMAT};
pub use shell::{run_capture, ShellError};
