use super::Context;
use crate::ast::Stylesheet;

const MSG: &str = "Must contain exactly one space before the `{`";

/// Line and column of the character right after `text`, which starts at
/// `line`/`column`.
fn position_after(line: usize, column: usize, text: &str) -> (usize, usize) {
    match text.rfind('\n') {
        Some(idx) => (
            line + text.matches('\n').count(),
            text[idx + 1..].chars().count() + 1,
        ),
        None => (line, column + text.chars().count()),
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    if !cx.option.includes("{") {
        return;
    }

    sheet.walk_rules(|rule, _| {
        if rule.is_mixin_call || rule.selector.is_empty() || rule.between == " " {
            return;
        }
        let start = rule.source.start;
        let (line, col) = position_after(start.line, start.column, &rule.selector);
        cx.report_segment(line, col, "{", MSG);
    });
}
