//! Word wrapping and width-aware padding.
//!
//! Widths are display widths: ANSI escape codes count as zero columns and
//! wide characters (CJK, most emoji) count as two, matching how the text
//! renderer's output lines up in a terminal.

use console::{measure_text_width, pad_str, truncate_str, Alignment};

/// Lines produced by [`wrap`] and the width of the widest one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wrapped {
    /// The physical lines, in order.
    pub lines: Vec<String>,
    /// Display width of the widest line, or `None` when wrapping was
    /// unbounded (target width 0).
    pub widest: Option<usize>,
}

impl Wrapped {
    /// Number of physical lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `i`, or `""` past the end.
    pub fn line(&self, i: usize) -> &str {
        self.lines.get(i).map(String::as_str).unwrap_or("")
    }
}

/// Wraps `text` into lines no wider than `width`, breaking only between words.
///
/// - Embedded newlines are hard breaks; each line is wrapped on its own.
/// - Words are joined by a single space; runs of whitespace collapse.
/// - A word wider than `width` gets a line to itself and is not cut, so
///   `widest` can exceed `width`. Callers use that to widen the column.
/// - A `width` of 0 means unbounded: `text` comes back as one line and
///   `widest` is `None`.
/// - Empty or whitespace-only text yields no lines.
///
/// # Example
///
/// ```rust
/// use gridtable::wrap::wrap;
///
/// let w = wrap("hello world foo bar", 11);
/// assert_eq!(w.lines, vec!["hello world", "foo bar"]);
/// assert_eq!(w.widest, Some(11));
/// ```
pub fn wrap(text: &str, width: usize) -> Wrapped {
    if width == 0 {
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
        return Wrapped {
            lines,
            widest: None,
        };
    }

    let mut lines: Vec<String> = Vec::new();
    if !text.trim().is_empty() {
        for hard_line in text.split('\n') {
            wrap_line(hard_line, width, &mut lines);
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);

    let widest = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
    Wrapped {
        lines,
        widest: Some(widest),
    }
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split_whitespace() {
        let word_width = display_width(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    // A blank hard line stays as an empty physical line.
    out.push(current);
}

/// Collapses whitespace runs inside each line and trims the line ends,
/// keeping the newlines themselves.
pub fn normalize_spaces(text: &str) -> String {
    text.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the display width of a string, ignoring ANSI escape codes.
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Pads on the left (right-aligns) to `width`. Never truncates.
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Pads on the right (left-aligns) to `width`. Never truncates.
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Cuts `s` to at most `width` display columns without any marker.
pub fn clip(s: &str, width: usize) -> String {
    truncate_str(s, width, "").into_owned()
}
