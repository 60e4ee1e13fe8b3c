use super::Context;
use crate::ast::{Declaration, Stylesheet};
use crate::value::{Item, ItemKind, is_sign, scan};

const MSG: &str = "`+`, `-` on both sides of the operand must have the same unit, \
                   if one side has unit, the other side must has unit";

/// The operand that breaks the unit rule for `prev op next`, if any.
fn offending<'a>(prev: &Item<'a>, next: &Item<'a>) -> Option<Item<'a>> {
    match (prev.kind, next.kind) {
        (ItemKind::Number, ItemKind::Number) => (prev.unit != next.unit).then_some(*next),
        (ItemKind::Variable, ItemKind::Number) => next.unit.is_empty().then_some(*next),
        (ItemKind::Number, ItemKind::Variable) => prev.unit.is_empty().then_some(*prev),
        _ => None,
    }
}

fn check_decl(decl: &Declaration, cx: &mut Context<'_>) {
    let value = decl.value.as_str();
    let items = scan(value);

    for (idx, item) in items.iter().enumerate() {
        if !(item.is_operator('+') || item.is_operator('-')) || is_sign(value, &items, idx) {
            continue;
        }
        let (Some(prev), Some(next)) = (idx.checked_sub(1).map(|i| &items[i]), items.get(idx + 1))
        else {
            continue;
        };

        if let Some(problem) = offending(prev, next) {
            let col = super::value_offset_column(decl, problem.offset);
            cx.report_quoted_at(decl.source.start.line, col, problem.text.chars().count(), MSG);
        }
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_decls(|decl, _| check_decl(decl, cx));
}
