//! Lint rules and the engine that runs them.
//!
//! Every rule is a plain function listed in [`REGISTRY`]. Most walk the
//! parsed tree; the comment rules read the token stream directly. Rules
//! share nothing but a per-file [`FileState`], so files can be checked on
//! different threads.

mod block_indent;
mod hex_color;
mod import;
mod leading_zero;
mod operate_unit;
mod require_after_space;
mod require_around_space;
mod require_before_space;
mod require_newline;
mod shorthand_color;
mod single_comment;
mod variable_name;
mod zero_unit;

use tracing::{trace, warn};

use crate::ast::{Declaration, Stylesheet, line_content};
use crate::config::{Config, RuleOption};
use crate::diagnostic::{Diagnostic, column_offset, highlight_range};
use crate::token::Token;

/// How a rule reads a file.
#[derive(Clone, Copy)]
pub enum Check {
    Tree(fn(&Stylesheet, &mut Context<'_>)),
    Tokens(fn(&[Token], &mut Context<'_>)),
}

/// A named rule.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    pub name: &'static str,
    pub check: Check,
}

/// All rules, in the order they run.
pub static REGISTRY: &[RuleEntry] = &[
    RuleEntry {
        name: "zero-unit",
        check: Check::Tree(zero_unit::check),
    },
    RuleEntry {
        name: "hex-color",
        check: Check::Tree(hex_color::check),
    },
    RuleEntry {
        name: "shorthand-color",
        check: Check::Tree(shorthand_color::check),
    },
    RuleEntry {
        name: "leading-zero",
        check: Check::Tree(leading_zero::check),
    },
    RuleEntry {
        name: "import",
        check: Check::Tree(import::check),
    },
    RuleEntry {
        name: "variable-name",
        check: Check::Tree(variable_name::check),
    },
    RuleEntry {
        name: "require-before-space",
        check: Check::Tree(require_before_space::check),
    },
    RuleEntry {
        name: "require-after-space",
        check: Check::Tree(require_after_space::check),
    },
    RuleEntry {
        name: "require-around-space",
        check: Check::Tree(require_around_space::check),
    },
    RuleEntry {
        name: "require-newline",
        check: Check::Tree(require_newline::check),
    },
    RuleEntry {
        name: "block-indent",
        check: Check::Tree(block_indent::check),
    },
    RuleEntry {
        name: "single-comment",
        check: Check::Tokens(single_comment::check),
    },
    RuleEntry {
        name: "comment",
        check: Check::Tokens(single_comment::check),
    },
    RuleEntry {
        name: "operate-unit",
        check: Check::Tree(operate_unit::check),
    },
];

/// Look up a rule by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static RuleEntry> {
    REGISTRY.iter().find(|entry| entry.name == name)
}

/// Conventions a file establishes as it is checked: the first decimal
/// or import quote decides what later ones must look like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    /// Whether decimals in (-1, 1) are written with their leading `0`.
    pub leading_zero: Option<bool>,
    /// Quote character of the first quoted `@import`.
    pub import_quote: Option<char>,
}

/// Everything a rule sees while checking one file.
pub struct Context<'a> {
    pub source: &'a str,
    pub option: &'a RuleOption,
    pub state: &'a mut FileState,
    rule: &'static str,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Context<'a> {
    /// Content of a 1-based source line, empty if out of range.
    #[must_use]
    pub fn line(&self, line: usize) -> &'a str {
        line_content(self.source, line).unwrap_or_default()
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Start a diagnostic for the running rule.
    fn diagnostic(&self, line: usize, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(self.rule, line, message)
    }

    /// Report `message` at `line`/`col`, highlighting the first occurrence
    /// of `segment` on that line. Returns the new record for further
    /// adjustment.
    pub fn report_segment(
        &mut self,
        line: usize,
        col: usize,
        segment: &str,
        message: &str,
    ) -> &mut Diagnostic {
        let range = self.segment_range(line, segment);
        self.push(line, col, range, message, false)
    }

    /// Like [`Context::report_segment`], with the line content quoted in
    /// front of the plain message.
    pub fn report_quoted(
        &mut self,
        line: usize,
        col: usize,
        segment: &str,
        message: &str,
    ) -> &mut Diagnostic {
        let range = self.segment_range(line, segment);
        self.push(line, col, range, message, true)
    }

    /// Report `message` at `line`/`col`, highlighting `width` characters
    /// starting at `col`.
    pub fn report_at(
        &mut self,
        line: usize,
        col: usize,
        width: usize,
        message: &str,
    ) -> &mut Diagnostic {
        let range = self.column_range(line, col, width);
        self.push(line, col, range, message, false)
    }

    pub fn report_quoted_at(
        &mut self,
        line: usize,
        col: usize,
        width: usize,
        message: &str,
    ) -> &mut Diagnostic {
        let range = self.column_range(line, col, width);
        self.push(line, col, range, message, true)
    }

    fn segment_range(&self, line: usize, segment: &str) -> (usize, usize) {
        let content = self.line(line);
        match content.find(segment).filter(|_| !segment.is_empty()) {
            Some(start) => (start, start + segment.len()),
            None => (content.len(), content.len()),
        }
    }

    fn column_range(&self, line: usize, col: usize, width: usize) -> (usize, usize) {
        let content = self.line(line);
        (column_offset(content, col), column_offset(content, col + width))
    }

    fn push(
        &mut self,
        line: usize,
        col: usize,
        (start, end): (usize, usize),
        message: &str,
        quoted: bool,
    ) -> &mut Diagnostic {
        let content = self.line(line);
        let plain = if quoted {
            format!("`{content}` {message}")
        } else {
            message.to_owned()
        };
        let diagnostic = self
            .diagnostic(line, plain)
            .at_column(col)
            .with_colorized(highlight_range(content, start, end, message));
        let idx = self.diagnostics.len();
        self.report(diagnostic);
        &mut self.diagnostics[idx]
    }
}

/// Column of the character at byte `offset` of a declaration's value.
pub(crate) fn value_offset_column(decl: &Declaration, offset: usize) -> usize {
    let prefix = decl.value.get(..offset).unwrap_or(&decl.value);
    decl.value_column() + prefix.chars().count()
}

/// Log configured rule names that no rule answers to.
pub fn warn_unknown(config: &Config) {
    for name in config.rule_names().filter(|name| lookup(name).is_none()) {
        warn!(rule = name, "unknown rule in configuration, ignored");
    }
}

/// Run every enabled rule over one file.
///
/// Diagnostics come back in rule order and are not yet deduplicated.
#[must_use]
pub fn run(sheet: &Stylesheet, tokens: &[Token], config: &Config, path: &str) -> Vec<Diagnostic> {
    let mut state = FileState::default();
    let mut diagnostics = Vec::new();

    for entry in REGISTRY {
        let Some(option) = config.get(entry.name).filter(|o| o.is_enabled()) else {
            continue;
        };

        trace!(rule = entry.name, path, "running rule");
        let before = diagnostics.len();

        let mut cx = Context {
            source: sheet.source(),
            option,
            state: &mut state,
            rule: entry.name,
            diagnostics: &mut diagnostics,
        };
        match entry.check {
            Check::Tree(check) => check(sheet, &mut cx),
            Check::Tokens(check) => check(tokens, &mut cx),
        }

        trace!(
            rule = entry.name,
            reported = diagnostics.len() - before,
            "rule finished"
        );
    }

    diagnostics
}
