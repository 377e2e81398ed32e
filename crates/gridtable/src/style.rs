//! CSS properties attached to parts of the table for HTML output.
//!
//! Styles are stored per logical element key: `title`, `section1`..`section3`,
//! `header-N` for header cell `N`, and `row:R-col:C` for a data cell. Setting
//! a property that already exists on a key replaces its value.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::table::Table;

/// One CSS declaration, `name: value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CssProperty {
    pub name: String,
    pub value: String,
}

impl CssProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for CssProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{};", self.name, self.value)
    }
}

pub const TITLE_KEY: &str = "title";
pub const SECTION_KEYS: [&str; 3] = ["section1", "section2", "section3"];

pub fn header_key(col: usize) -> String {
    format!("header-{}", col)
}

pub fn cell_key(row: usize, col: usize) -> String {
    format!("row:{}-col:{}", row, col)
}

/// Properties per element key, each kept sorted by property name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `props` into the properties stored under `key`.
    pub fn set(&mut self, key: impl Into<String>, props: &[CssProperty]) {
        let entry = self.entries.entry(key.into()).or_default();
        for prop in props {
            entry.insert(prop.name.clone(), prop.value.clone());
        }
    }

    /// Properties under `key`, sorted by name. `None` if nothing was set.
    pub fn get(&self, key: &str) -> Option<Vec<CssProperty>> {
        self.entries.get(key).map(|props| {
            props
                .iter()
                .map(|(name, value)| CssProperty::new(name.clone(), value.clone()))
                .collect()
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders a rule body: `.class{a:1;b:2;}`.
pub fn class_rule(class: &str, props: &[CssProperty]) -> String {
    let mut rule = format!(".{}{{", class);
    for prop in props {
        rule.push_str(&prop.to_string());
    }
    rule.push('}');
    rule
}

impl Table {
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn set_title_css(&mut self, props: &[CssProperty]) {
        self.styles.set(TITLE_KEY, props);
    }

    pub fn set_section1_css(&mut self, props: &[CssProperty]) {
        self.styles.set(SECTION_KEYS[0], props);
    }

    pub fn set_section2_css(&mut self, props: &[CssProperty]) {
        self.styles.set(SECTION_KEYS[1], props);
    }

    pub fn set_section3_css(&mut self, props: &[CssProperty]) {
        self.styles.set(SECTION_KEYS[2], props);
    }

    /// Applies `props` to every header cell.
    pub fn set_header_css(&mut self, props: &[CssProperty]) {
        for col in 0..self.column_count() {
            self.styles.set(header_key(col), props);
        }
    }

    pub fn set_header_cell_css(&mut self, col: usize, props: &[CssProperty]) -> Result<()> {
        self.check_column(col)?;
        self.styles.set(header_key(col), props);
        Ok(())
    }

    pub fn set_cell_css(&mut self, row: usize, col: usize, props: &[CssProperty]) -> Result<()> {
        self.check_row(row)?;
        self.check_column(col)?;
        self.styles.set(cell_key(row, col), props);
        Ok(())
    }

    /// Applies `props` to every cell of `row`.
    pub fn set_row_css(&mut self, row: usize, props: &[CssProperty]) -> Result<()> {
        self.check_row(row)?;
        for col in 0..self.column_count() {
            self.styles.set(cell_key(row, col), props);
        }
        Ok(())
    }

    /// Applies `props` to every cell of `col` that exists now.
    pub fn set_col_css(&mut self, col: usize, props: &[CssProperty]) -> Result<()> {
        self.check_column(col)?;
        for row in 0..self.row_count() {
            self.styles.set(cell_key(row, col), props);
        }
        Ok(())
    }

    pub fn set_all_cell_css(&mut self, props: &[CssProperty]) {
        for row in 0..self.row_count() {
            for col in 0..self.column_count() {
                self.styles.set(cell_key(row, col), props);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellType, Justify, TableError};

    fn two_by_two() -> Table {
        let mut t = Table::new();
        t.add_column("A", 5, CellType::String, Justify::Left);
        t.add_column("B", 5, CellType::Int, Justify::Right);
        t.add_row();
        t.add_row();
        t
    }

    #[test]
    fn test_properties_sorted_and_replaced() {
        let mut map = StyleMap::new();
        map.set(
            "title",
            &[CssProperty::new("font-weight", "bold"), CssProperty::new("color", "red")],
        );
        map.set("title", &[CssProperty::new("color", "blue")]);
        let props = map.get("title").unwrap();
        assert_eq!(
            props,
            vec![
                CssProperty::new("color", "blue"),
                CssProperty::new("font-weight", "bold")
            ]
        );
        assert!(map.get("section1").is_none());
    }

    #[test]
    fn test_class_rule() {
        let rule = class_rule("title", &[CssProperty::new("color", "red")]);
        assert_eq!(rule, ".title{color:red;}");
    }

    #[test]
    fn test_row_and_col_css_expand_to_cells() {
        let mut t = two_by_two();
        t.set_row_css(1, &[CssProperty::new("color", "red")]).unwrap();
        t.set_col_css(0, &[CssProperty::new("background", "gray")]).unwrap();
        assert!(t.styles().contains("row:1-col:0"));
        assert!(t.styles().contains("row:1-col:1"));
        assert!(t.styles().contains("row:0-col:0"));
        assert!(!t.styles().contains("row:0-col:1"));
        assert_eq!(t.styles().get("row:1-col:0").unwrap().len(), 2);
    }

    #[test]
    fn test_setters_validate_indices() {
        let mut t = two_by_two();
        let props = [CssProperty::new("color", "red")];
        assert_eq!(
            t.set_cell_css(2, 0, &props),
            Err(TableError::RowOutOfRange { row: 2, count: 2 })
        );
        assert_eq!(
            t.set_header_cell_css(3, &props),
            Err(TableError::ColumnOutOfRange { col: 3, count: 2 })
        );
        assert!(t.styles().is_empty());
    }

    #[test]
    fn test_header_css_covers_every_column() {
        let mut t = two_by_two();
        t.set_header_css(&[CssProperty::new("color", "navy")]);
        assert!(t.styles().contains("header-0"));
        assert!(t.styles().contains("header-1"));
    }
}
