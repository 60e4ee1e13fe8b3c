use super::Context;
use crate::ast::{Declaration, Stylesheet};
use crate::value::mask_literals;

const COLON_MSG: &str = "Disallow contain spaces between the `attr-name` and `:`, \
                         Must contain spaces between `:` and `attr-value`";
const COMMA_MSG: &str = "Must contain spaces after `,` in `attr-value`";

/// Byte offset of the first comma in `value` that is followed by neither
/// exactly one space nor a line break. Commas in strings and `url(...)`
/// are skipped.
fn bad_comma(value: &str) -> Option<usize> {
    let masked = mask_literals(value);
    masked.match_indices(',').map(|(idx, _)| idx).find(|&idx| {
        let rest = &masked[idx + 1..];
        let gap = &rest[..rest.len() - rest.trim_start().len()];
        let at_end = gap.len() == rest.len();
        !(gap == " " || gap.contains('\n') || at_end)
    })
}

/// `&:extend(...)`, `.a:hover` style statements parse as declarations
/// but their colon is a pseudo-class.
fn is_selector_like(decl: &Declaration) -> bool {
    decl.prop.starts_with(['&', '.', '#'])
}

fn check_decl(decl: &Declaration, cx: &mut Context<'_>, colon: bool, comma: bool) {
    let start = decl.source.start;

    if colon && !is_selector_like(decl) && decl.between != ": " {
        let col = start.column + decl.prop.chars().count();
        cx.report_segment(start.line, col, &decl.between, COLON_MSG);
    }

    if comma {
        if let Some(offset) = bad_comma(&decl.value) {
            let col = super::value_offset_column(decl, offset);
            cx.report_at(start.line, col, 1, COMMA_MSG);
        }
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    let colon = cx.option.includes(":");
    let comma = cx.option.includes(",");

    sheet.walk_decls(|decl, _| check_decl(decl, cx, colon, comma));
}
