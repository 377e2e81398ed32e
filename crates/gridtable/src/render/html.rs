//! HTML output: a styled table fragment placed into a page template.
//!
//! The fragment is a `div.rpt-table-container` holding caption paragraphs and
//! a `<table>`. Styles set on the table are emitted as class rules scoped to
//! the container and passed to the template as `custom_css`; the resolved
//! stylesheet arrives as `default_css`.

use minijinja::context;

use crate::cell::Cell;
use crate::config::{FontUnit, HtmlConfig};
use crate::error::{RenderError, TableError};
use crate::format::cell_text;
use crate::render::assets::{load_stylesheet, render_page};
use crate::render::TableRenderer;
use crate::style::{cell_key, class_rule, header_key, CssProperty};
use crate::table::Table;

pub const CONTAINER_CLASS: &str = "rpt-table-container";
pub const NO_HEADERS_CLASS: &str = "no-headers";
pub const NO_ROWS_CLASS: &str = "no-rows";

/// Escapes text for element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders a table as an HTML page.
pub struct HtmlRenderer<'a> {
    config: &'a HtmlConfig,
    captions: String,
    head: Option<String>,
    body: String,
    notice: String,
    css: String,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a HtmlConfig) -> Self {
        Self {
            config,
            captions: String::new(),
            head: None,
            body: String::new(),
            notice: String::new(),
            css: String::new(),
        }
    }

    fn rule(&mut self, selector: &str, class: &str, props: &[CssProperty]) {
        self.css.push_str(&format!("div.{} {}", CONTAINER_CLASS, selector));
        self.css.push_str(&class_rule(class, props));
    }

    fn column_width(&self, table: &Table, col: usize) -> String {
        let def = &table.columns()[col];
        let chars = def.html_width().map(|w| w as usize).unwrap_or(def.width());
        let width = match self.config.font_unit {
            FontUnit::Ch => chars,
            FontUnit::Px => chars * self.config.font_size as usize,
        };
        format!("{}{}", width, self.config.font_unit.as_str())
    }

    /// The container fragment, without the page around it.
    fn fragment(&self) -> String {
        let mut inner = self.captions.clone();
        match &self.head {
            Some(head) => {
                inner.push_str("<table>");
                inner.push_str(head);
                inner.push_str(&self.body);
                inner.push_str("</table>");
            }
            None => inner.push_str(&self.notice),
        }
        format!("<div class=\"{}\">{}</div>", CONTAINER_CLASS, inner)
    }
}

impl TableRenderer for HtmlRenderer<'_> {
    type Output = String;

    fn caption(&mut self, key: &str, text: &str) -> Result<(), RenderError> {
        self.captions
            .push_str(&format!("<p class=\"{}\">{}</p>", key, escape_html(text)));
        Ok(())
    }

    fn headers(&mut self, table: &Table) -> Result<(), RenderError> {
        let mut head = String::from("<thead><tr>");
        for (col, def) in table.columns().iter().enumerate() {
            let class = header_key(col);
            let align = CssProperty::new("text-align", def.justify().as_css());
            let width = CssProperty::new("width", self.column_width(table, col));

            let mut styles = table.styles().clone();
            styles.set(class.clone(), &[align.clone(), width]);
            let props = styles.get(&class).unwrap_or_default();
            self.rule("table thead tr th", &class, &props);
            self.rule("table tbody tr td", &format!("col-{}", col), &[align]);

            head.push_str(&format!(
                "<th class=\"{}\">{}</th>",
                class,
                escape_html(def.title())
            ));
        }
        head.push_str("</tr></thead>");
        self.head = Some(head);
        Ok(())
    }

    fn row(&mut self, table: &Table, row: usize) -> Result<(), RenderError> {
        let mut classes = Vec::new();
        if table.has_line_before(row) {
            classes.push("top-line");
        }
        if table.has_line_after(row) {
            classes.push("bottom-line");
        }

        let mut tr = if classes.is_empty() {
            String::from("<tr>")
        } else {
            format!("<tr class=\"{}\">", classes.join(" "))
        };

        let cells = table.rows()[row].cells();
        for (col, (cell, def)) in cells.iter().zip(table.columns()).enumerate() {
            let mut class = format!("col-{}", col);
            if let Some(props) = table.styles().get(&cell_key(row, col)) {
                let cell_class = format!("cell-row-{}-col-{}", row, col);
                self.rule("table tbody tr td", &cell_class, &props);
                class.push(' ');
                class.push_str(&cell_class);
            }
            let text = match cell {
                Cell::Empty => String::new(),
                other => cell_text(other, def.decimals(), Some(','), table.config()),
            };
            tr.push_str(&format!("<td class=\"{}\">{}</td>", class, escape_html(&text)));
        }
        tr.push_str("</tr>");

        if self.body.is_empty() {
            self.body.push_str("<tbody>");
        }
        self.body.push_str(&tr);
        Ok(())
    }

    fn no_columns(&mut self, table: &Table, err: &TableError) -> Result<(), RenderError> {
        if let Some(props) = table.styles().get(NO_HEADERS_CLASS) {
            self.rule("p", NO_HEADERS_CLASS, &props);
        }
        self.notice = format!(
            "<p class=\"{}\">{}</p>",
            NO_HEADERS_CLASS,
            escape_html(&err.to_string())
        );
        Ok(())
    }

    fn no_rows(&mut self, table: &Table, err: &TableError) -> Result<(), RenderError> {
        if let Some(props) = table.styles().get(NO_ROWS_CLASS) {
            self.rule("table tbody tr td", NO_ROWS_CLASS, &props);
        }
        self.body = format!(
            "<tbody><tr><td colspan=\"{}\" class=\"{}\">{}</td></tr>",
            table.column_count(),
            NO_ROWS_CLASS,
            escape_html(&err.to_string())
        );
        Ok(())
    }

    fn finish(mut self, table: &Table) -> Result<String, RenderError> {
        if !self.body.is_empty() {
            self.body.push_str("</tbody>");
        }
        for (key, text) in table.captions() {
            if text.is_empty() {
                continue;
            }
            if let Some(props) = table.styles().get(key) {
                self.rule("p", key, &props);
            }
        }

        let stylesheet = load_stylesheet(&self.config.stylesheet)?;
        let ctx = context! {
            font_size => self.config.font_size,
            head_title => escape_html(table.title()),
            default_css => format!("<style>{}</style>", stylesheet),
            custom_css => format!("<style>{}</style>", self.css),
            table_html => self.fragment(),
        };
        render_page(&self.config.template, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetSource;
    use crate::{CellType, Justify};

    fn bare_config() -> HtmlConfig {
        HtmlConfig {
            template: vec![AssetSource::Inline(
                "{{ custom_css }}|{{ table_html }}".into(),
            )],
            stylesheet: vec![AssetSource::Inline(String::new())],
            ..HtmlConfig::default()
        }
    }

    fn render(t: &Table) -> (String, String) {
        let out = t.to_html(&bare_config()).unwrap();
        split(&out)
    }

    fn split(out: &str) -> (String, String) {
        let (css, html) = out.split_once('|').unwrap();
        (css.to_string(), html.to_string())
    }

    fn accounts() -> Table {
        let mut t = Table::new();
        t.add_column("Name", 10, CellType::String, Justify::Left);
        t.add_column("Balance", 10, CellType::Float, Justify::Right);
        t
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_fragment_structure() {
        let mut t = accounts();
        t.set_title("Q&A");
        let r = t.add_row();
        t.put_str(r, 0, "<Ann>").unwrap();
        t.put_float(r, 1, 1234.5).unwrap();
        let (_, html) = render(&t);
        assert_eq!(
            html,
            "<div class=\"rpt-table-container\"><p class=\"title\">Q&amp;A</p><table>\
             <thead><tr><th class=\"header-0\">Name</th><th class=\"header-1\">Balance</th></tr></thead>\
             <tbody><tr><td class=\"col-0\">&lt;Ann&gt;</td><td class=\"col-1\">1,234.50</td></tr></tbody>\
             </table></div>"
        );
    }

    #[test]
    fn test_header_rules_sorted() {
        let mut t = accounts();
        t.add_row();
        t.set_header_cell_css(0, &[CssProperty::new("color", "navy")])
            .unwrap();
        let (css, _) = render(&t);
        assert!(css.contains(
            "div.rpt-table-container table thead tr th.header-0{color:navy;text-align:left;width:10ch;}"
        ));
        assert!(css.contains("div.rpt-table-container table tbody tr td.col-1{text-align:right;}"));
    }

    #[test]
    fn test_px_widths_and_html_width() {
        let mut t = accounts();
        t.add_row();
        t.set_col_html_width(1, 20).unwrap();
        let config = HtmlConfig {
            font_unit: FontUnit::Px,
            ..bare_config()
        };
        let (css, _) = split(&t.to_html(&config).unwrap());
        assert!(css.contains("th.header-0{text-align:left;width:140px;}"));
        assert!(css.contains("th.header-1{text-align:right;width:280px;}"));
    }

    #[test]
    fn test_cell_css_and_row_lines() {
        let mut t = accounts();
        for _ in 0..3 {
            t.add_row();
        }
        t.set_cell_css(1, 0, &[CssProperty::new("color", "red")])
            .unwrap();
        t.add_line_before(0).unwrap();
        t.add_line_after(0).unwrap();
        t.add_line_after(2).unwrap();
        let (css, html) = render(&t);
        assert!(css.contains("td.cell-row-1-col-0{color:red;}"));
        assert!(html.contains("<td class=\"col-0 cell-row-1-col-0\">"));
        assert!(html.contains("<tr class=\"top-line bottom-line\">"));
        assert!(html.contains("<tr class=\"bottom-line\">"));
    }

    #[test]
    fn test_caption_css() {
        let mut t = accounts();
        t.add_row();
        t.set_title("T");
        t.set_title_css(&[CssProperty::new("font-size", "20px")]);
        t.set_section1_css(&[CssProperty::new("color", "gray")]);
        let (css, html) = render(&t);
        assert!(css.contains("div.rpt-table-container p.title{font-size:20px;}"));
        // section1 is empty, so its rule is not emitted
        assert!(!css.contains("section1"));
        assert!(!html.contains("section1"));
    }

    #[test]
    fn test_no_rows_message() {
        let t = accounts();
        let err = t.to_html(&bare_config()).unwrap_err();
        assert!(err.is_no_rows());
        let (_, html) = split(err.partial().unwrap());
        assert!(html.contains("<thead>"));
        assert!(html.contains(
            "<tbody><tr><td colspan=\"2\" class=\"no-rows\">there are no rows in the table</td></tr></tbody>"
        ));
    }

    #[test]
    fn test_no_columns_message() {
        let t = Table::new();
        let err = t.to_html(&bare_config()).unwrap_err();
        assert!(err.is_no_columns());
        let (_, html) = split(err.partial().unwrap());
        assert_eq!(
            html,
            "<div class=\"rpt-table-container\"><p class=\"no-headers\">there are no columns in the table</p></div>"
        );
    }

    #[test]
    fn test_full_page_uses_default_assets() {
        let mut t = accounts();
        t.set_title("Balances");
        t.add_row();
        let page = t.to_html(&HtmlConfig::default()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Balances</title>"));
        assert!(page.contains("rpt-table-container"));
        assert!(page.contains("border-collapse"));
    }
}
