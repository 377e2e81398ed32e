//! Table and HTML rendering configuration.
//!
//! Both structs deserialize from YAML with every field optional:
//!
//! ```rust
//! use gridtable::{HtmlConfig, InsertMembership, TableConfig};
//!
//! let config = TableConfig::from_yaml(r#"
//! date_format: "%Y-%m-%d"
//! insert_membership: all_rowsets
//! "#).unwrap();
//! assert_eq!(config.date_format, "%Y-%m-%d");
//! assert_eq!(config.column_spacing, 2);
//! assert_eq!(config.insert_membership, InsertMembership::AllRowsets);
//!
//! let html = HtmlConfig::from_yaml(r#"
//! stylesheet:
//!   - file: /etc/reports/table.css
//!   - embedded
//! font_unit: px
//! "#).unwrap();
//! assert_eq!(html.stylesheet.len(), 2);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Whether a row inserted in the middle of the table joins existing rowsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMembership {
    /// The new row belongs to no rowset until explicitly appended.
    #[default]
    None,
    /// The new row is appended to every rowset.
    AllRowsets,
}

/// Settings that shape a [`Table`](crate::Table) and its text output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// `strftime` pattern for date cells.
    pub date_format: String,
    /// `strftime` pattern for datetime cells.
    pub datetime_format: String,
    /// Spaces between columns in text output.
    pub column_spacing: usize,
    pub insert_membership: InsertMembership,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            date_format: "%m/%d/%Y".to_string(),
            datetime_format: "%m/%d/%Y %H:%M:%S".to_string(),
            column_spacing: 2,
            insert_membership: InsertMembership::None,
        }
    }
}

impl TableConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// Where an HTML template or stylesheet comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    /// Read from a file at render time.
    File(PathBuf),
    /// Given literally.
    Inline(String),
    /// The copy built into the crate.
    Embedded,
}

/// Unit for HTML column widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    /// Character widths, used as-is.
    #[default]
    Ch,
    /// Pixels: characters times the font size.
    Px,
}

impl FontUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontUnit::Ch => "ch",
            FontUnit::Px => "px",
        }
    }
}

/// Settings for HTML (and therefore PDF) output.
///
/// `template` and `stylesheet` are provider chains tried in order. The
/// embedded defaults are always tried last, even when not listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub template: Vec<AssetSource>,
    pub stylesheet: Vec<AssetSource>,
    pub font_unit: FontUnit,
    /// Base font size in pixels, passed to the page template.
    pub font_size: u32,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            template: vec![AssetSource::Embedded],
            stylesheet: vec![AssetSource::Embedded],
            font_unit: FontUnit::Ch,
            font_size: 14,
        }
    }
}

impl HtmlConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Puts a template file at the front of the chain.
    pub fn with_template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.template.insert(0, AssetSource::File(path.into()));
        self
    }

    /// Puts a stylesheet file at the front of the chain.
    pub fn with_stylesheet_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet.insert(0, AssetSource::File(path.into()));
        self
    }

    pub fn with_font_unit(mut self, unit: FontUnit) -> Self {
        self.font_unit = unit;
        self
    }
}
