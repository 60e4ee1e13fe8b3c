use super::Context;
use crate::ast::{Declaration, Stylesheet};
use crate::value::{ItemKind, is_sign, scan};

const MSG: &str = "`+`, `-`, `*`, `/` operators must keep exactly one space on both sides";

fn check_decl(decl: &Declaration, cx: &mut Context<'_>) {
    let value = decl.value.as_str();
    let items = scan(value);

    for (idx, item) in items.iter().enumerate() {
        if item.kind != ItemKind::Operator || is_sign(value, &items, idx) {
            continue;
        }
        let (Some(prev), Some(next)) = (idx.checked_sub(1).map(|i| &items[i]), items.get(idx + 1))
        else {
            continue;
        };

        // font: 12px/1.5 shorthand
        if item.is_operator('/')
            && decl.prop == "font"
            && prev.kind == ItemKind::Number
            && next.kind == ItemKind::Number
        {
            continue;
        }

        let before = &value[prev.end()..item.offset];
        let after = &value[item.end()..next.offset];
        if before != " " || after != " " {
            let col = super::value_offset_column(decl, item.offset);
            cx.report_quoted_at(decl.source.start.line, col, 1, MSG);
        }
    }
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_decls(|decl, _| check_decl(decl, cx));
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{check, lines};

    #[test]
    fn binary_operators_need_spaces() {
        let diags = check(
            "require-around-space",
            "a {\n    width: @a+@b;\n    height: @a  * 2;\n    top: (@a - @b)/2;\n    left: @a - @b;\n}\n",
        );
        assert_eq!(lines(&diags), [2, 3, 4]);
        assert_eq!(diags[0].col, Some(14));
    }

    #[test]
    fn signs_are_exempt() {
        let diags = check(
            "require-around-space",
            "a {\n    margin: -1px 0 -2px;\n    top: -@gap;\n    left: 1px -@gap;\n    b: e(-1);\n}\n",
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn font_shorthand_and_literals_are_exempt() {
        let diags = check(
            "require-around-space",
            "a {\n    font: 12px/1.5 Arial;\n    b: url(a/b.png);\n    c: \"a+b\";\n    d: -webkit-box;\n}\n",
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn slash_outside_font_is_checked() {
        let diags = check("require-around-space", "a {\n    line-height: 12px/1.5;\n}\n");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.starts_with("`    line-height: 12px/1.5;`"));
    }
}
