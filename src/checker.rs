//! Per-file lint pipeline and batch checking.

use std::borrow::Cow;
use std::thread;

use tracing::debug;

use crate::Error;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, dedup};
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::rules;

/// Strip a leading byte-order mark and turn `\r\n` and lone `\r` line
/// endings into `\n`.
#[must_use]
pub fn normalize(source: &str) -> Cow<'_, str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Lint one stylesheet.
///
/// `path` only labels the file in logs. Returns the deduplicated
/// diagnostics in rule order, or the lexer/parser error that stopped the
/// file before any rule ran.
pub fn check_str(source: &str, path: &str, config: &Config) -> Result<Vec<Diagnostic>, Error> {
    let source = normalize(source);
    let tokens = tokenize(&source)?;
    let sheet = parse(&tokens, &source)?;
    let diagnostics = dedup(rules::run(&sheet, &tokens, config, path));

    debug!(
        path,
        tokens = tokens.len(),
        diagnostics = diagnostics.len(),
        "checked file"
    );
    Ok(diagnostics)
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Lexer or parser failure; `diagnostics` is empty when set.
    pub fatal: Option<Error>,
}

impl FileReport {
    /// Check `source` and wrap the outcome.
    #[must_use]
    pub fn check(path: &str, source: &str, config: &Config) -> Self {
        match check_str(source, path, config) {
            Ok(diagnostics) => Self {
                path: path.to_owned(),
                diagnostics,
                fatal: None,
            },
            Err(err) => {
                debug!(path, error = %err, "file failed to parse");
                Self {
                    path: path.to_owned(),
                    diagnostics: Vec::new(),
                    fatal: Some(err),
                }
            }
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.fatal.is_none()
    }

    /// Every record to show for the file, the fatal error included, sorted
    /// by position.
    #[must_use]
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut all: Vec<Diagnostic> = self
            .fatal
            .iter()
            .map(Error::to_diagnostic)
            .chain(self.diagnostics.iter().cloned())
            .collect();
        all.sort_by_key(|d| (d.line, d.col.unwrap_or(0)));
        all
    }
}

/// Check many files on up to `jobs` threads. Reports come back in input
/// order; a failure in one file never affects the others.
#[must_use]
pub fn check_batch(files: &[(String, String)], config: &Config, jobs: usize) -> Vec<FileReport> {
    rules::warn_unknown(config);

    if files.is_empty() {
        return Vec::new();
    }
    let chunk = files.len().div_ceil(jobs.max(1));

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk)
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|(path, source)| FileReport::check(path, source, config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_line_endings_and_bom() {
        assert_eq!(normalize("\u{feff}a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn crlf_positions_match_lf() {
        let config = Config::default();
        let lf = check_str("a {\n    width: 0px;\n}\n", "a.less", &config).expect("should check");
        let crlf =
            check_str("a {\r\n    width: 0px;\r\n}\r\n", "a.less", &config).expect("should check");
        assert_eq!(lf, crlf);
    }

    #[test]
    fn fatal_error_has_no_lint_diagnostics() {
        let report = FileReport::check(
            "bad.less",
            "div { content: \"unterminated; }",
            &Config::default(),
        );
        assert!(report.fatal.is_some());
        assert!(report.diagnostics.is_empty());
        assert!(!report.is_clean());
        assert_eq!(report.sorted()[0].rule, "parse-error");
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let files: Vec<(String, String)> = (0..7)
            .map(|i| {
                let source = if i == 3 {
                    "a { b: \"x; }".to_string()
                } else {
                    format!("a {{\n    opacity: {};\n}}\n", if i % 2 == 0 { "0.5" } else { ".5" })
                };
                (format!("{i}.less"), source)
            })
            .collect();

        let reports = check_batch(&files, &Config::default(), 3);
        let paths: Vec<_> = reports.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["0.less", "1.less", "2.less", "3.less", "4.less", "5.less", "6.less"]);
        assert!(reports[3].fatal.is_some());
        assert!(reports.iter().enumerate().all(|(i, r)| i == 3 || r.is_clean()));
    }
}
