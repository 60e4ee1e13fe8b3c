//! Helpers for looking inside declaration values.
//!
//! Values are never evaluated; rules only need to split them into parts,
//! read numeric prefixes, and find arithmetic operators with their
//! operands.

/// Split `value` at top-level occurrences of any of `separators`, the way
/// CSS list splitting works: separators inside quotes or parentheses do
/// not count, and empty parts are dropped.
///
/// Each part is returned with its byte offset in `value`.
#[must_use]
pub fn split<'a>(value: &'a str, separators: &[char]) -> Vec<(usize, &'a str)> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            _ if quote == Some(ch) => quote = None,
            _ if quote.is_some() => {}
            '"' | '\'' => quote = Some(ch),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && separators.contains(&ch) => {
                push_part(&mut parts, value, start, idx);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_part(&mut parts, value, start, value.len());
    parts
}

fn push_part<'a>(parts: &mut Vec<(usize, &'a str)>, value: &'a str, start: usize, end: usize) {
    let raw = &value[start..end];
    let trimmed = raw.trim_start();
    let offset = start + raw.len() - trimmed.len();
    let trimmed = trimmed.trim_end();
    if !trimmed.is_empty() {
        parts.push((offset, trimmed));
    }
}

/// Split a value at top-level whitespace.
#[must_use]
pub fn split_space(value: &str) -> Vec<(usize, &str)> {
    split(value, &[' ', '\n', '\t', '\r', '\x0c'])
}

/// Split a value at top-level commas.
#[must_use]
pub fn split_comma(value: &str) -> Vec<(usize, &str)> {
    split(value, &[','])
}

/// Parse the longest numeric prefix of `text`, like JavaScript's
/// `parseFloat`: `"0.5em"` is `0.5`, `".5"` is `0.5`, `"-0px"` is `-0`,
/// `"px"` is `None`.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        } else if digits > 0 {
            end = frac_start;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Replace the contents of quoted strings and `url(...)` arguments with
/// spaces, keeping byte offsets intact, so that patterns searched in the
/// result cannot match inside literals.
#[must_use]
pub fn mask_literals(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some((idx, ch)) = rest
        .char_indices()
        .find(|&(idx, ch)| matches!(ch, '"' | '\'') || starts_url(&rest[idx..]))
    {
        out.push_str(&rest[..idx]);
        let literal_end = if ch == '"' || ch == '\'' {
            closing_quote(&rest[idx..], ch).map_or(rest.len(), |close| idx + close + 1)
        } else {
            rest[idx..].find(')').map_or(rest.len(), |close| idx + close + 1)
        };
        out.extend(std::iter::repeat_n(' ', literal_end - idx));
        rest = &rest[literal_end..];
    }
    out.push_str(rest);
    out
}

fn starts_url(text: &str) -> bool {
    text.get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("url("))
}

/// Byte index of the quote closing the string that starts at `text[0]`.
fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some(idx);
        }
    }
    None
}

/// What an [`Item`] of a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Unsigned number, optionally followed by a unit (`12px`, `.5`, `50%`).
    Number,
    /// `@name` or `@{name}` reference.
    Variable,
    /// Identifier, keyword, hex color, or any other bare text.
    Word,
    /// Quoted string.
    String,
    /// `url(...)` including its argument.
    Url,
    /// One of `+ - * /`.
    Operator,
    OpenParen,
    CloseParen,
    Comma,
}

/// A lexical piece of a declaration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub kind: ItemKind,
    pub text: &'a str,
    /// Unit suffix of a `Number`; empty otherwise.
    pub unit: &'a str,
    /// Byte offset of `text` in the scanned value.
    pub offset: usize,
}

impl Item<'_> {
    /// Byte offset just past the item.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    #[must_use]
    pub fn is_operator(&self, op: char) -> bool {
        self.kind == ItemKind::Operator && self.text.starts_with(op)
    }
}

/// Whether the `+` or `-` at `items[idx]` is a sign rather than a binary
/// operator: it starts the value, follows another operator, `(` or `,`,
/// or it is a `-` after whitespace glued to a number or variable, as in
/// `0 -1px` or `1px -@gap`.
#[must_use]
pub fn is_sign(value: &str, items: &[Item<'_>], idx: usize) -> bool {
    let item = &items[idx];
    if !(item.is_operator('-') || item.is_operator('+')) {
        return false;
    }

    let Some(prev) = idx.checked_sub(1).map(|i| &items[i]) else {
        return true;
    };
    if matches!(
        prev.kind,
        ItemKind::Operator | ItemKind::OpenParen | ItemKind::Comma
    ) {
        return true;
    }

    let spaced_before = value[..item.offset].ends_with(char::is_whitespace);
    let glued_operand = items.get(idx + 1).is_some_and(|next| {
        next.offset == item.end() && matches!(next.kind, ItemKind::Number | ItemKind::Variable)
    });
    item.is_operator('-') && spaced_before && glued_operand
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

/// Break a value into numbers, variables, words, literals, operators, and
/// punctuation. Whitespace separates items and is not returned; use the
/// offsets to inspect it.
///
/// A `-` directly followed by a letter or another `-` starts a word
/// (`-webkit-box`, `--x`); any other `-` is an operator. Signs are never
/// folded into numbers.
#[must_use]
pub fn scan(value: &str) -> Vec<Item<'_>> {
    let bytes = value.as_bytes();
    let mut items = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let b = bytes[pos];

        let kind = match b {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => {
                pos += 1;
                continue;
            }
            b'"' | b'\'' => {
                pos = closing_quote(&value[pos..], char::from(b)).map_or(bytes.len(), |c| pos + c + 1);
                ItemKind::String
            }
            b'(' => {
                pos += 1;
                ItemKind::OpenParen
            }
            b')' => {
                pos += 1;
                ItemKind::CloseParen
            }
            b',' => {
                pos += 1;
                ItemKind::Comma
            }
            b'+' | b'*' | b'/' => {
                pos += 1;
                ItemKind::Operator
            }
            b'-' if bytes
                .get(pos + 1)
                .is_some_and(|&n| n.is_ascii_alphabetic() || n == b'-' || n == b'_') =>
            {
                pos = scan_word(bytes, pos + 1);
                ItemKind::Word
            }
            b'-' => {
                pos += 1;
                ItemKind::Operator
            }
            b'@' => {
                pos = scan_variable(bytes, pos);
                ItemKind::Variable
            }
            b'.' | b'0'..=b'9'
                if b != b'.' || bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) =>
            {
                let (number_end, unit_end) = scan_number(bytes, pos);
                let item = Item {
                    kind: ItemKind::Number,
                    text: &value[start..unit_end],
                    unit: &value[number_end..unit_end],
                    offset: start,
                };
                items.push(item);
                pos = unit_end;
                continue;
            }
            _ if starts_url(&value[pos..]) => {
                pos = value[pos..].find(')').map_or(bytes.len(), |c| pos + c + 1);
                ItemKind::Url
            }
            _ => {
                pos = scan_word(bytes, pos + 1);
                ItemKind::Word
            }
        };

        items.push(Item {
            kind,
            text: &value[start..pos],
            unit: "",
            offset: start,
        });
    }

    items
}

fn scan_word(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'(' | b')' | b',' | b'"' | b'\'' | b'+'
            | b'*' | b'/' | b'@' => break,
            _ => pos += 1,
        }
    }
    pos
}

fn scan_variable(bytes: &[u8], mut pos: usize) -> usize {
    pos += 1;
    if bytes.get(pos) == Some(&b'@') {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'{') {
        return bytes[pos..]
            .iter()
            .position(|&b| b == b'}')
            .map_or(bytes.len(), |close| pos + close + 1);
    }
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'-' {
            // a dash continues the name only when more name follows
            if bytes.get(pos + 1).copied().is_some_and(is_ident_byte) && bytes[pos + 1] != b'-' {
                pos += 1;
                continue;
            }
            break;
        }
        if !is_ident_byte(b) {
            break;
        }
        pos += 1;
    }
    pos
}

/// Returns the end of the numeric part and the end of the unit.
fn scan_number(bytes: &[u8], mut pos: usize) -> (usize, usize) {
    let mut seen_dot = false;
    while pos < bytes.len() {
        match bytes[pos] {
            b'0'..=b'9' => pos += 1,
            b'.' if !seen_dot && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) => {
                seen_dot = true;
                pos += 1;
            }
            _ => break,
        }
    }
    let number_end = pos;
    if bytes.get(pos) == Some(&b'%') {
        return (number_end, pos + 1);
    }
    while bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
        pos += 1;
    }
    (number_end, pos)
}
