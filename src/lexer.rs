use std::fmt;

use crate::token::{Position, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String literal without its closing quote.
    UnclosedQuote,
    /// `url(` without a matching unescaped `)`.
    UnclosedBracket,
    /// `/*` without `*/`.
    UnclosedComment,
    /// `@{` without `}`.
    UnclosedInterpolation,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedQuote => write!(f, "unclosed quote"),
            Self::UnclosedBracket => write!(f, "unclosed bracket"),
            Self::UnclosedComment => write!(f, "unclosed comment"),
            Self::UnclosedInterpolation => write!(f, "unclosed interpolation"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// Tokenize a LESS source string into a sequence of tokens.
///
/// The input is expected to use `\n` line endings. Concatenating the
/// `text` of the returned tokens reproduces `input` exactly.
///
/// # Errors
///
/// Returns `LexError` on unclosed quotes, comments, interpolations,
/// or `url(` brackets.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    /// 1-based column of `pos`, counted in characters.
    column: usize,
    open_parens: usize,
    tokens: Vec<Token>,
}

const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r' | 0x0C)
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            open_parens: 0,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];

            match ch {
                b if is_space(b) => self.read_space(),
                b'{' => self.emit(TokenKind::OpenBrace, self.pos + 1),
                b'}' => self.emit(TokenKind::CloseBrace, self.pos + 1),
                b':' => self.emit(TokenKind::Colon, self.pos + 1),
                b';' => self.emit(TokenKind::Semicolon, self.pos + 1),
                // commas are plain separators at this level
                b',' => self.emit(TokenKind::Word, self.pos + 1),
                b'(' => self.read_open_paren()?,
                b')' => {
                    self.open_parens = self.open_parens.saturating_sub(1);
                    self.emit(TokenKind::CloseParen, self.pos + 1);
                }
                b'\'' | b'"' => self.read_string(ch)?,
                b'\\' => self.read_escape(),
                b'@' if self.peek_at(1) == Some(b'{') => self.read_interpolation()?,
                b'@' => self.read_at_word(),
                b'/' if self.peek_at(1) == Some(b'*') => self.read_block_comment()?,
                b'/' if self.peek_at(1) == Some(b'/') => self.read_inline_comment(),
                _ => self.read_word(),
            }
        }

        Ok(self.tokens)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    const fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            position: self.position(),
        }
    }

    /// Push a token covering `pos..end` and move past it. The span ends
    /// at the token's last character.
    fn emit(&mut self, kind: TokenKind, end: usize) {
        let input = self.input;
        let text = &input[self.pos..end];
        let start = self.position();
        let mut end_position = start;

        for ch in text.chars() {
            end_position = self.position();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.tokens.push(Token {
            kind,
            text: text.to_owned(),
            span: Span {
                start,
                end: end_position,
            },
        });
        self.pos = end;
    }

    fn last_significant_text(&self) -> Option<&str> {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.kind != TokenKind::Space)
            .map(|t| t.text.as_str())
    }

    /// Index of the next `target` byte at or after `from` that is not
    /// escaped by an odd run of backslashes.
    fn find_unescaped(&self, target: u8, from: usize) -> Option<usize> {
        let mut from = from;
        loop {
            let idx = from + self.bytes.get(from..)?.iter().position(|&b| b == target)?;
            let mut backslashes = 0;
            while idx > backslashes && self.bytes[idx - 1 - backslashes] == b'\\' {
                backslashes += 1;
            }
            if backslashes % 2 == 0 {
                return Some(idx);
            }
            from = idx + 1;
        }
    }

    fn read_space(&mut self) {
        let mut end = self.pos;
        while end < self.bytes.len() && is_space(self.bytes[end]) {
            end += 1;
        }
        self.emit(TokenKind::Space, end);
    }

    fn read_open_paren(&mut self) -> Result<(), LexError> {
        let after = self.peek_at(1);

        if self.last_significant_text() == Some("url")
            && !matches!(after, Some(b'\'' | b'"')) && !after.is_some_and(is_space)
        {
            let close = self
                .find_unescaped(b')', self.pos + 1)
                .ok_or_else(|| self.error(LexErrorKind::UnclosedBracket))?;
            self.emit(TokenKind::Brackets, close + 1);
            return Ok(());
        }

        let close = self.bytes[self.pos + 1..]
            .iter()
            .position(|&b| b == b')')
            .map(|offset| self.pos + 1 + offset);

        match close {
            Some(close) if !keeps_structure(&self.input[self.pos + 1..close]) => {
                self.emit(TokenKind::Brackets, close + 1);
            }
            _ => {
                self.open_parens += 1;
                self.emit(TokenKind::OpenParen, self.pos + 1);
            }
        }

        Ok(())
    }

    fn read_string(&mut self, quote: u8) -> Result<(), LexError> {
        let close = self
            .find_unescaped(quote, self.pos + 1)
            .ok_or_else(|| self.error(LexErrorKind::UnclosedQuote))?;
        self.emit(TokenKind::String, close + 1);
        Ok(())
    }

    fn read_escape(&mut self) {
        let mut next = self.pos;
        let mut escaped = true;
        while self.bytes.get(next + 1) == Some(&b'\\') {
            next += 1;
            escaped = !escaped;
        }

        let mut end = next + 1;
        if escaped {
            let input = self.input;
            if let Some(ch) = input[end..].chars().next() {
                if !matches!(ch, '/' | ' ' | '\n' | '\t' | '\r' | '\u{c}') {
                    end += ch.len_utf8();
                }
            }
        }

        self.emit(TokenKind::Word, end);
    }

    fn read_interpolation(&mut self) -> Result<(), LexError> {
        let close = self.bytes[self.pos + 2..]
            .iter()
            .position(|&b| b == b'}')
            .map(|offset| self.pos + 2 + offset)
            .ok_or_else(|| self.error(LexErrorKind::UnclosedInterpolation))?;
        self.emit(TokenKind::Word, close + 1);
        Ok(())
    }

    fn read_at_word(&mut self) {
        let end = (self.pos + 1..self.bytes.len())
            .find(|&i| self.is_at_word_end(i))
            .unwrap_or(self.bytes.len());

        let kind = if self.open_parens > 0 {
            TokenKind::MixinParam {
                variadic: self.input[self.pos..end].ends_with("..."),
            }
        } else {
            TokenKind::AtWord
        };

        self.emit(kind, end);
    }

    fn read_block_comment(&mut self) -> Result<(), LexError> {
        let close = self.input[self.pos + 2..]
            .find("*/")
            .map(|offset| self.pos + 2 + offset)
            .ok_or_else(|| self.error(LexErrorKind::UnclosedComment))?;
        self.emit(TokenKind::BlockComment, close + 2);
        Ok(())
    }

    fn read_inline_comment(&mut self) {
        let end = self.input[self.pos + 2..]
            .find('\n')
            .map_or(self.bytes.len(), |offset| self.pos + 2 + offset);
        self.emit(TokenKind::Comment, end);
    }

    fn read_word(&mut self) {
        let end = (self.pos + 1..self.bytes.len())
            .find(|&i| self.is_word_end(i))
            .unwrap_or(self.bytes.len());
        self.emit(TokenKind::Word, end);
    }

    fn starts_comment(&self, i: usize) -> bool {
        self.bytes[i] == b'/' && matches!(self.bytes.get(i + 1), Some(b'*' | b'/'))
    }

    fn is_at_word_end(&self, i: usize) -> bool {
        let b = self.bytes[i];
        is_space(b)
            || matches!(b, b'{' | b'}' | b'(' | b')' | b'\'' | b'"' | b'\\' | b';')
            || self.starts_comment(i)
    }

    fn is_word_end(&self, i: usize) -> bool {
        let b = self.bytes[i];
        is_space(b)
            || matches!(
                b,
                b'(' | b')' | b'{' | b'}' | b':' | b';' | b'@' | b'!' | b'\'' | b'"' | b'\\' | b'#'
            )
            || (b == b'/' && self.bytes.get(i + 1) == Some(&b'*'))
    }
}

/// Whether a parenthesized interior must stay as separate tokens rather
/// than collapse into one `Brackets` token: empty or `...` parameter
/// lists, variable references, and contents that cannot be a plain value
/// list.
fn keeps_structure(inner: &str) -> bool {
    inner.is_empty()
        || inner == "..."
        || inner
            .bytes()
            .any(|b| matches!(b, b'@' | b'\n' | b'\'' | b'"' | b'\\' | b'('))
}
