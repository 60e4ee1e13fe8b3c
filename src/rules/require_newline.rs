use super::Context;
use crate::ast::Stylesheet;

const MSG: &str =
    "When multiple selectors share a statement block, each selector statement must be per line";

/// Byte offset of the first top-level comma in `selector` that is not
/// followed by a line break. Commas inside `(...)`, `[...]` and strings
/// separate arguments, not selectors.
fn inline_comma(selector: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, ch) in selector.char_indices() {
        match ch {
            _ if quote == Some(ch) => quote = None,
            _ if quote.is_some() => {}
            '"' | '\'' => quote = Some(ch),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let rest = selector[idx + 1..].trim_start_matches([' ', '\t', '\r', '\x0c']);
                if !rest.starts_with('\n') {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_rules(|rule, _| {
        if rule.is_mixin_call || rule.is_mixin_definition {
            return;
        }
        if let Some(comma) = inline_comma(&rule.selector) {
            let start = rule.source.start;
            let line = start.line + rule.selector[..comma].matches('\n').count();
            let first_line = rule.selector.lines().next().unwrap_or_default();
            cx.report_segment(line, start.column, first_line, MSG).dedup_key =
                Some(format!("require-newline:{}:{}", start.line, start.column));
        }
    });
}
