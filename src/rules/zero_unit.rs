use once_cell::sync::Lazy;
use regex::Regex;

use super::Context;
use crate::ast::Stylesheet;
use crate::value::mask_literals;

const MSG: &str = "Values of 0 shouldn't have units specified";

/// A standalone `0` followed, after at most one space, by a length unit.
static ZERO_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w.])0\s?(?:%|in|cm|mm|em|ex|pt|pc|px)(?:[^\w%]|$)")
        .expect("valid zero-unit pattern")
});

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    let mut last_line = 0;

    sheet.walk_decls(|decl, _| {
        let line = decl.source.start.line;
        if line == last_line || !ZERO_WITH_UNIT.is_match(&mask_literals(&decl.value)) {
            return;
        }
        last_line = line;
        cx.report_segment(line, decl.value_column(), &decl.value, MSG);
    });
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{check, lines};

    #[test]
    fn flags_zero_with_length_unit() {
        let diags = check("zero-unit", "a {\n    width: 0px;\n    margin: 0 0em;\n}\n");
        assert_eq!(lines(&diags), [2, 3]);
        assert_eq!(diags[0].col, Some(12));
        assert_eq!(diags[0].message, "Values of 0 shouldn't have units specified");
    }

    #[test]
    fn once_per_line() {
        let diags = check("zero-unit", "a { margin: 0px 0px; padding: 0px; }\n");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn ignores_other_numbers_and_units() {
        let diags = check(
            "zero-unit",
            "a {\n    width: 10px;\n    height: 1.0px;\n    transition: 0s;\n    margin: 0;\n    b: url(0px.png);\n}\n",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn checks_variables_too() {
        let diags = check("zero-unit", "@gap: 0px;\n");
        assert_eq!(lines(&diags), [1]);
    }
}
