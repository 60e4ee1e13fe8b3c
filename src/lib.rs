//! LESS stylesheet linter: tokenizer, parser, and rule engine.
//!
//! Checks LESS sources against a style guide (zero units, color forms,
//! spacing, indentation, import quoting and more) and reports each
//! violation with its line and column.
//!
//! # Quick start
//!
//! ## Lint a stylesheet
//!
//! ```
//! use lesslint::{Config, check_str};
//!
//! let input = "a {\n    width: 0px;\n}\n";
//! let diagnostics = check_str(input, "a.less", &Config::default()).unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].rule, "zero-unit");
//! assert_eq!(diagnostics[0].line, 2);
//! ```
//!
//! ## Parse and rebuild a stylesheet
//!
//! ```
//! use lesslint::{parse, stringify, tokenize};
//!
//! let input = ".m(@a; @b: 2px) {\n    width: @a;\n}\n";
//! let tokens = tokenize(input).unwrap();
//! let sheet = parse(&tokens, input).unwrap();
//! assert!(sheet.mixins.contains_key(".m"));
//! assert_eq!(stringify(&sheet), input);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod rules;
pub mod stringify;
pub mod token;
pub mod value;

pub use ast::{AtRule, Comment, Declaration, MixinParam, MixinSignature, Node, RuleBlock, Stylesheet};
pub use checker::{FileReport, check_batch, check_str};
pub use config::{Config, ConfigError, RuleOption};
pub use diagnostic::Diagnostic;
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use stringify::stringify;
pub use token::{Position, Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position,
        }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.position().line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.position().column
    }

    /// The error as the single record reported for a file that failed to
    /// parse.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            Self::Lex(err) => err.kind.to_string(),
            Self::Parse(err) => err.kind.to_string(),
        };
        Diagnostic::new("parse-error", self.line(), message).at_column(self.column())
    }
}

/// Tokenize and parse a LESS source string in one step.
pub fn parse_str(input: &str) -> Result<Stylesheet, Error> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens, input)?)
}
