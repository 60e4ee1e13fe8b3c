use serde::Serialize;

/// A 1-based line/column location in the source.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Inclusive source range of a token: `end` is the position of its last
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of spaces, tabs, newlines, carriage returns, or form feeds.
    Space,
    /// Identifier, number, selector fragment, `,`, escape, or `@{...}`
    /// interpolation.
    Word,
    /// `@name` outside of any open parenthesis.
    AtWord,
    /// `@name` inside an unterminated `(`, i.e. a mixin parameter.
    /// `variadic` is set for `@rest...`.
    MixinParam { variadic: bool },
    /// Quoted string, quotes included.
    String,
    /// Collapsed `(...)` span without variable references, or a whole
    /// `(...)` following `url`.
    Brackets,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// Inline `// ...` comment, newline excluded.
    Comment,
    /// `/* ... */` comment, possibly spanning several lines.
    BlockComment,
}

impl TokenKind {
    /// Whitespace and comments, which the parser skips around statements.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Space | Self::Comment | Self::BlockComment)
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment | Self::BlockComment)
    }
}

/// A single token with its kind, raw text, and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}
