//! Value formatting: grouped floats, dates, and fixed-width fields.

use std::fmt::Write;

use crate::cell::{Cell, CellType};
use crate::column::Justify;
use crate::config::TableConfig;
use crate::wrap::{clip, pad_left, pad_right};

const ROUNDERS: [f64; 10] = [
    0.5,
    0.05,
    0.005,
    0.0005,
    0.00005,
    0.000005,
    0.0000005,
    0.00000005,
    0.000000005,
    0.0000000005,
];

const MULTIPLIERS: [f64; 10] = [
    1.0,
    10.0,
    100.0,
    1000.0,
    10000.0,
    100000.0,
    1000000.0,
    10000000.0,
    100000000.0,
    1000000000.0,
];

/// Largest supported number of decimal digits.
pub const MAX_DECIMALS: usize = 9;

/// Formats a float with `decimals` fixed decimal digits and an optional
/// thousands separator, using `#,###.##`-style pattern semantics: half a unit
/// in the last place is added and the result truncated, magnitudes below 1e-9
/// print as zero, and the fraction is always zero-padded to full length.
///
/// ```rust
/// use gridtable::format::format_float;
///
/// assert_eq!(format_float(1234567.891, 2, Some(',')), "1,234,567.89");
/// assert_eq!(format_float(-0.5, 2, Some(',')), "-0.50");
/// assert_eq!(format_float(1234.5, 0, None), "1235");
/// ```
pub fn format_float(n: f64, decimals: usize, thousands: Option<char>) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == f64::INFINITY {
        return "Infinity".to_string();
    }
    if n == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    let precision = decimals.min(MAX_DECIMALS);

    let (sign, n) = if n >= 0.000000001 {
        ("", n)
    } else if n <= -0.000000001 {
        ("-", -n)
    } else {
        ("", 0.0)
    };

    let shifted = n + ROUNDERS[precision];
    let int_part = shifted.trunc();
    let frac_part = shifted - int_part;

    let mut int_str = (int_part as i64).to_string();
    if let Some(sep) = thousands {
        let mut i = int_str.len();
        while i > 3 {
            i -= 3;
            int_str.insert(i, sep);
        }
    }

    if precision == 0 {
        return format!("{}{}", sign, int_str);
    }

    let frac = (frac_part * MULTIPLIERS[precision]) as i64;
    format!("{}{}.{:0>width$}", sign, int_str, frac, width = precision)
}

/// Comma-grouped float, as shown in text and HTML output.
pub fn group_float(n: f64, decimals: usize) -> String {
    format_float(n, decimals, Some(','))
}

/// `None` when the pattern contains an unsupported specifier.
fn format_chrono<T: std::fmt::Display>(value: T) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value).ok().map(|_| out)
}

/// Unpadded text for a cell, shared by every renderer.
///
/// `decimals` applies to floats; `thousands` selects grouping.
pub fn cell_text(
    cell: &Cell,
    decimals: usize,
    thousands: Option<char>,
    config: &TableConfig,
) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Int(v) => v.to_string(),
        Cell::Float(v) => format_float(*v, decimals, thousands),
        Cell::Str(s) => s.clone(),
        Cell::Date(d) => {
            format_chrono(d.format(&config.date_format)).unwrap_or_else(|| format!("{:?}", d))
        }
        Cell::DateTime(dt) => format_chrono(dt.format(&config.datetime_format))
            .unwrap_or_else(|| format!("{:?}", dt)),
    }
}

/// A fixed-width field: how one value is laid into a column of text.
///
/// This is the column's "format string". It is regenerated whenever the
/// column's width changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldFormat {
    /// Field width in display columns; 0 means unbounded.
    pub width: usize,
    pub justify: Justify,
    /// Whether values wider than the field are cut to fit.
    pub clip: bool,
}

impl FieldFormat {
    /// The field layout used for values of `cell_type` in a column of the
    /// given width and justification.
    ///
    /// Integers and strings honor the column's justification; floats and
    /// dates are always right-aligned. Everything but integers is cut to the
    /// field width.
    pub fn for_type(cell_type: CellType, width: usize, justify: Justify) -> Self {
        match cell_type {
            CellType::Int => FieldFormat {
                width,
                justify,
                clip: false,
            },
            CellType::String => FieldFormat {
                width,
                justify,
                clip: true,
            },
            CellType::Float | CellType::Date | CellType::DateTime => FieldFormat {
                width,
                justify: Justify::Right,
                clip: true,
            },
        }
    }

    /// Lays `value` into the field.
    pub fn apply(&self, value: &str) -> String {
        if self.width == 0 {
            return value.to_string();
        }
        let value = if self.clip {
            clip(value, self.width)
        } else {
            value.to_string()
        };
        match self.justify {
            Justify::Left => pad_right(&value, self.width),
            Justify::Right => pad_left(&value, self.width),
        }
    }

    /// An empty field.
    pub fn blank(&self) -> String {
        " ".repeat(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn grouping_inserts_commas() {
        assert_eq!(group_float(0.0, 2), "0.00");
        assert_eq!(group_float(999.0, 2), "999.00");
        assert_eq!(group_float(1000.0, 2), "1,000.00");
        assert_eq!(group_float(1234567.0, 2), "1,234,567.00");
        assert_eq!(group_float(-1234567.25, 2), "-1,234,567.25");
    }

    #[test]
    fn rounding_adds_half_unit_then_truncates() {
        assert_eq!(group_float(1.5, 2), "1.50");
        assert_eq!(group_float(2.25, 2), "2.25");
        assert_eq!(group_float(0.004, 2), "0.00");
        assert_eq!(group_float(0.005, 2), "0.01");
        assert_eq!(group_float(9.999, 2), "10.00");
    }

    #[test]
    fn tiny_magnitudes_are_zero_without_sign() {
        assert_eq!(group_float(-0.0000000001, 2), "0.00");
        assert_eq!(group_float(-0.001, 2), "-0.00");
    }

    #[test]
    fn fraction_is_zero_padded() {
        assert_eq!(group_float(3.05, 2), "3.05");
        assert_eq!(format_float(1.001, 3, None), "1.001");
    }

    #[test]
    fn special_values() {
        assert_eq!(group_float(f64::NAN, 2), "NaN");
        assert_eq!(group_float(f64::INFINITY, 2), "Infinity");
        assert_eq!(group_float(f64::NEG_INFINITY, 2), "-Infinity");
    }

    #[test]
    fn precision_is_capped() {
        assert_eq!(format_float(1.0, 20, None), "1.000000000");
    }

    #[test]
    fn field_pads_and_clips() {
        let f = FieldFormat::for_type(CellType::String, 5, Justify::Left);
        assert_eq!(f.apply("ab"), "ab   ");
        assert_eq!(f.apply("abcdefg"), "abcde");

        let f = FieldFormat::for_type(CellType::Int, 3, Justify::Right);
        assert_eq!(f.apply("7"), "  7");
        assert_eq!(f.apply("12345"), "12345");

        let f = FieldFormat::for_type(CellType::Float, 6, Justify::Left);
        assert_eq!(f.apply("1.50"), "  1.50");
    }

    #[test]
    fn zero_width_field_is_unbounded() {
        let f = FieldFormat::for_type(CellType::String, 0, Justify::Left);
        assert_eq!(f.apply("anything"), "anything");
        assert_eq!(f.blank(), "");
    }

    #[test]
    fn dates_use_configured_patterns() {
        let config = TableConfig::default();
        let d = NaiveDate::from_ymd_opt(2017, 2, 21).unwrap();
        assert_eq!(cell_text(&Cell::Date(d), 2, None, &config), "02/21/2017");
        let dt = d.and_hms_opt(15, 4, 5).unwrap();
        assert_eq!(
            cell_text(&Cell::DateTime(dt), 2, None, &config),
            "02/21/2017 15:04:05"
        );
    }

    #[test]
    fn bad_date_pattern_does_not_panic() {
        let config = TableConfig {
            date_format: "%Q".to_string(),
            ..TableConfig::default()
        };
        let d = NaiveDate::from_ymd_opt(2017, 2, 21).unwrap();
        assert!(!cell_text(&Cell::Date(d), 2, None, &config).is_empty());
    }
}
