use once_cell::sync::Lazy;
use regex::Regex;

use super::Context;
use crate::ast::Stylesheet;

const MSG: &str = "Variable name must be like this `@foo-bar or @foobar`";

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[a-z0-9-]+$").expect("valid variable name pattern"));

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_decls(|decl, _| {
        if decl.is_variable() && !VARIABLE_NAME.is_match(&decl.prop) {
            let start = decl.source.start;
            cx.report_quoted(start.line, start.column, &decl.prop, MSG);
        }
    });
}
