use super::Context;
use crate::ast::{Node, Stylesheet};

const INDENT: usize = 4;

fn message(expected: usize, actual: usize) -> String {
    format!("Bad indentation, Expected `{expected}` but saw `{actual}`")
}

/// Leading whitespace width of `line`, if `column` is the first
/// non-blank character on it.
fn leading_width(line: &str, column: usize) -> Option<usize> {
    let prefix: String = line.chars().take(column.saturating_sub(1)).collect();
    prefix.chars().all(char::is_whitespace).then(|| prefix.chars().count())
}

fn continuation_width(segment: &str) -> usize {
    segment.chars().take_while(|c| c.is_whitespace()).count()
}

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    let mut last_line = 0;

    sheet.walk(|node, depth| {
        let (start, selector) = match node {
            Node::Rule(rule) => (rule.source.start, Some(rule.selector.as_str())),
            Node::Declaration(decl) => (decl.source.start, None),
            Node::AtRule(_) | Node::Comment(_) => return,
        };
        let expected = depth * INDENT;

        if start.line != last_line {
            let content = cx.line(start.line);
            if let Some(actual) = leading_width(content, start.column) {
                if actual != expected {
                    last_line = start.line;
                    let msg = message(expected, actual);
                    cx.report_quoted_at(start.line, start.column, content.chars().count(), &msg);
                }
            }
        }

        // continuation lines of a multi-line selector
        for (k, segment) in selector.unwrap_or_default().split('\n').enumerate().skip(1) {
            let line = start.line + k;
            let actual = continuation_width(segment);
            if actual != expected && line != last_line && !segment.trim().is_empty() {
                last_line = line;
                let msg = message(expected, actual);
                cx.report_quoted_at(line, actual + 1, segment.trim().chars().count(), &msg);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::leading_width;
    use crate::rules::testing::{check, lines};

    #[test]
    fn widths() {
        assert_eq!(leading_width("    a: b;", 5), Some(4));
        assert_eq!(leading_width("a { b: c; }", 5), None);
        assert_eq!(leading_width("x", 1), Some(0));
    }

    #[test]
    fn four_spaces_per_level() {
        let source = "a {\n    b: c;\n    .d {\n        e: f;\n    }\n}\n";
        assert!(check("block-indent", source).is_empty());
    }

    #[test]
    fn reports_expected_and_actual() {
        let diags = check("block-indent", "a {\n  b: c;\n    .d {\n       e: f;\n    }\n}\n");
        assert_eq!(lines(&diags), [2, 4]);
        assert_eq!(diags[0].message, "`  b: c;` Bad indentation, Expected `4` but saw `2`");
        assert_eq!(diags[1].message, "`       e: f;` Bad indentation, Expected `8` but saw `7`");
        assert_eq!(diags[0].col, Some(3));
    }

    #[test]
    fn at_rule_blocks_nest() {
        let source = "@media screen {\n    a {\n        b: c;\n    }\n}\n";
        assert!(check("block-indent", source).is_empty());
        let diags = check("block-indent", "@media screen {\na {\n    b: c;\n}\n}\n");
        assert_eq!(lines(&diags), [2, 3]);
    }

    #[test]
    fn same_line_nodes_are_skipped() {
        assert!(check("block-indent", "a { b: c; d: e; }\n").is_empty());
    }

    #[test]
    fn multi_line_selectors() {
        let diags = check("block-indent", "h1,\n  h2 {\n    b: c;\n}\n");
        assert_eq!(lines(&diags), [2]);
        assert_eq!(diags[0].message, "`  h2 {` Bad indentation, Expected `0` but saw `2`");
        assert_eq!(diags[0].col, Some(3));
    }

    #[test]
    fn mixin_calls_are_indented_like_declarations() {
        let diags = check("block-indent", ".m() {\n    a: b;\n}\n.x {\n  .m();\n}\n");
        assert_eq!(lines(&diags), [5]);
    }
}
