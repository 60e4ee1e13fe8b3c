use super::Context;
use crate::ast::{Declaration, Stylesheet};
use crate::value::{parse_float, split_comma, split_space};

fn message(with_zero: bool) -> String {
    let form = if with_zero { "`0.5`" } else { "`.5`" };
    format!(
        "When value is between 0 - 1 decimal, the integer part `0` must be written consistently, \
         this file uses the {form} form"
    )
}

/// Items of a value that may hold a decimal, with their byte offsets.
/// A part with a parenthesized argument list contributes its arguments.
fn candidates(value: &str) -> Vec<(usize, &str)> {
    let mut items = Vec::new();
    for (offset, part) in split_space(value) {
        let inner = part
            .find('(')
            .and_then(|open| part.rfind(')').filter(|&close| close > open).map(|close| (open, close)));

        match inner {
            Some((open, close)) => items.extend(
                split_comma(&part[open + 1..close])
                    .into_iter()
                    .map(|(idx, arg)| (offset + open + 1 + idx, arg)),
            ),
            None => items.push((offset, part)),
        }
    }
    items
}

fn check_decl(decl: &Declaration, cx: &mut Context<'_>) {
    for (offset, item) in candidates(&decl.value) {
        let Some(number) = parse_float(item) else {
            continue;
        };
        if number == 0.0 || number.abs() >= 1.0 {
            continue;
        }

        let with_zero = item.starts_with("0.") || item.starts_with("-0.");
        let convention = *cx.state.leading_zero.get_or_insert(with_zero);
        if with_zero != convention {
            let col = super::value_offset_column(decl, offset);
            let width = item.chars().count();
            cx.report_at(decl.source.start.line, col, width, &message(convention));
        }
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_decls(|decl, _| check_decl(decl, cx));
}

#[cfg(test)]
mod tests {
    use super::candidates;
    use crate::rules::testing::{check, lines};

    #[test]
    fn splits_function_arguments() {
        let items: Vec<_> = candidates("rgba(0,0,0,.5) 0.3s").into_iter().map(|(_, i)| i).collect();
        assert_eq!(items, ["0", "0", "0", ".5", "0.3s"]);
    }

    #[test]
    fn first_decimal_sets_convention() {
        let diags = check("leading-zero", "a {\n    opacity: 0.5;\n    opacity: .5;\n}\n");
        assert_eq!(lines(&diags), [3]);
        assert_eq!(diags[0].col, Some(14));

        let diags = check("leading-zero", "a {\n    opacity: .5;\n    opacity: 0.5;\n}\n");
        assert_eq!(lines(&diags), [3]);
    }

    #[test]
    fn negative_and_nested_values() {
        let diags = check(
            "leading-zero",
            "a {\n    margin: -.5em;\n    transform: scale(0.8, -0.2);\n}\n",
        );
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.line == 3));
    }

    #[test]
    fn ignores_zero_and_whole_numbers() {
        let diags = check("leading-zero", "a {\n    opacity: 0.5;\n    margin: 0 1.5px 10px;\n}\n");
        assert!(diags.is_empty());
    }
}
