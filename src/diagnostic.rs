//! Lint diagnostics and their presentation.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// One reported problem in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the rule that produced it, or `parse-error`.
    pub rule: &'static str,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    pub message: String,
    /// The offending line with the culprit highlighted, followed by the
    /// message, as ANSI-colored text.
    #[serde(skip)]
    pub colorized_message: Option<String>,
    /// Records sharing a key collapse to the first one.
    #[serde(skip)]
    pub dedup_key: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(rule: &'static str, line: usize, message: impl Into<String>) -> Self {
        Self {
            rule,
            line,
            col: None,
            message: message.into(),
            colorized_message: None,
            dedup_key: None,
        }
    }

    #[must_use]
    pub const fn at_column(mut self, col: usize) -> Self {
        self.col = Some(col);
        self
    }

    #[must_use]
    pub fn with_colorized(mut self, colorized: Option<String>) -> Self {
        self.colorized_message = colorized;
        self
    }

    #[must_use]
    pub fn with_dedup_key(mut self, key: impl Into<String>) -> Self {
        self.dedup_key = Some(key.into());
        self
    }

    /// Message to show on a color terminal, falling back to the plain one.
    #[must_use]
    pub fn display_message(&self, color: bool) -> &str {
        match &self.colorized_message {
            Some(colorized) if color => colorized,
            _ => &self.message,
        }
    }
}

/// Drop every diagnostic whose non-empty `dedup_key` was already seen,
/// keeping the order of the rest.
#[must_use]
pub fn dedup(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    diagnostics
        .into_iter()
        .filter(|diag| match diag.dedup_key.as_deref() {
            Some(key) if !key.is_empty() => seen.insert(key.to_owned()),
            _ => true,
        })
        .collect()
}

/// Render `` `line` message `` with `line[start..end]` (byte range) in
/// magenta and the message in grey.
///
/// Out-of-range or non-boundary ranges leave the line unhighlighted.
#[must_use]
pub fn highlight_range(line: &str, start: usize, end: usize, message: &str) -> Option<String> {
    let (head, mark, tail) = match (line.get(..start), line.get(start..end), line.get(end..)) {
        (Some(head), Some(mark), Some(tail)) => (head, mark, tail),
        _ => (line, "", ""),
    };
    render(head, mark, tail, message).ok()
}

/// Byte offset of the 1-based character column `col` in `line`.
#[must_use]
pub fn column_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col.saturating_sub(1))
        .map_or(line.len(), |(idx, _)| idx)
}

fn render(head: &str, mark: &str, tail: &str, message: &str) -> std::io::Result<String> {
    let mut buffer = Buffer::ansi();

    write!(buffer, "`{head}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(buffer, "{mark}")?;
    buffer.reset()?;
    write!(buffer, "{tail}` ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Ansi256(8))))?;
    write!(buffer, "{message}")?;
    buffer.reset()?;

    String::from_utf8(buffer.into_inner())
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(line: usize, key: &str) -> Diagnostic {
        Diagnostic::new("test", line, "msg").with_dedup_key(key)
    }

    #[test]
    fn dedup_keeps_first_per_key() {
        let diags = vec![
            keyed(1, "a"),
            keyed(2, "b"),
            keyed(3, "a"),
            Diagnostic::new("test", 4, "msg"),
            Diagnostic::new("test", 5, "msg"),
        ];
        let lines: Vec<_> = dedup(diags).iter().map(|d| d.line).collect();
        assert_eq!(lines, [1, 2, 4, 5]);
    }

    #[test]
    fn empty_key_never_collapses() {
        let diags = vec![keyed(1, ""), keyed(2, "")];
        assert_eq!(dedup(diags).len(), 2);
    }

    #[test]
    fn highlight_wraps_range() {
        let colored = highlight_range("width: 0px;", 7, 10, "Values of 0").expect("should render");
        assert!(colored.starts_with("`width: "));
        assert!(colored.contains("0px"));
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("Values of 0"));
    }

    #[test]
    fn column_offset_counts_chars() {
        assert_eq!(column_offset("ab", 1), 0);
        assert_eq!(column_offset("éa", 2), 2);
        assert_eq!(column_offset("ab", 9), 2);
    }

    #[test]
    fn serializes_without_presentation_fields() {
        let diag = Diagnostic::new("zero-unit", 3, "m")
            .at_column(7)
            .with_dedup_key("k");
        let json = serde_json::to_string(&diag).expect("should serialize");
        assert_eq!(json, r#"{"rule":"zero-unit","line":3,"col":7,"message":"m"}"#);
    }
}
