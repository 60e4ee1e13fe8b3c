use super::Context;
use crate::ast::{AtRule, Stylesheet};

const QUOTE_MSG: &str = "@import path must be wrapped in a pair of quotation marks";
const SUFFIX_MSG: &str = ".less suffix must not be omitted";

/// The import target: its quote character, if properly quoted, and the
/// path text.
fn target(params: &str) -> (Option<char>, &str) {
    // `(reference)`, `(css, optional)` and other import options
    let rest = if params.starts_with('(') {
        params.find(')').map_or(params, |close| params[close + 1..].trim_start())
    } else {
        params
    };

    let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'');
    if let Some(q) = quote {
        if let Some(close) = rest[1..].find(q) {
            return (Some(q), &rest[1..=close]);
        }
    }

    let path = rest.split_whitespace().next().unwrap_or_default();
    let path = path
        .strip_prefix("url(")
        .map_or(path, |inner| inner.trim_end_matches(')'))
        .trim_matches(|c| c == '"' || c == '\'');
    (None, path)
}

fn params_column(at_rule: &AtRule) -> usize {
    at_rule.source.start.column + 1 + at_rule.name.chars().count() + at_rule.after_name.chars().count()
}

fn check_import(at_rule: &AtRule, cx: &mut Context<'_>) {
    let line = at_rule.source.start.line;
    let col = params_column(at_rule);
    let (quote, path) = target(&at_rule.params);

    match quote {
        None => {
            cx.report_quoted(line, col, &at_rule.params, QUOTE_MSG);
        }
        Some(q) => {
            let first = *cx.state.import_quote.get_or_insert(q);
            if q != first {
                let msg = format!(
                    "Quotes must be the same in the same file, Current file the first quote is `{first}`"
                );
                cx.report_quoted(line, col, &q.to_string(), &msg);
            }
        }
    }

    if !path.ends_with(".less") {
        cx.report_quoted(line, col, path, SUFFIX_MSG);
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_at_rules(|at_rule, _| {
        if at_rule.name == "import" {
            check_import(at_rule, cx);
        }
    });
}
