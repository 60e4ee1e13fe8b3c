use super::Context;
use crate::ast::Stylesheet;
use crate::value::split_space;

const MSG: &str = "Color value can be abbreviated, must use the abbreviation form";

/// Byte offset of the first `#rrggbb` color in `part` whose digit pairs
/// repeat, e.g. `#aabbcc`.
fn abbreviable(part: &str) -> Option<usize> {
    part.match_indices('#').map(|(idx, _)| idx).find(|&idx| {
        let digits: Vec<u8> = part.as_bytes()[idx + 1..]
            .iter()
            .copied()
            .take_while(u8::is_ascii_hexdigit)
            .collect();
        digits.len() == 6
            && digits
                .chunks(2)
                .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]))
    })
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    let mut last_line = 0;

    sheet.walk_decls(|decl, _| {
        let line = decl.source.start.line;
        if line == last_line {
            return;
        }

        let found = split_space(&decl.value)
            .into_iter()
            .find_map(|(offset, part)| abbreviable(part).map(|idx| offset + idx));

        if let Some(offset) = found {
            last_line = line;
            let col = super::value_offset_column(decl, offset);
            cx.report_at(line, col, 7, MSG);
        }
    });
}
