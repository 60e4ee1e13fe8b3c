//! Rule behaviour through the full check pipeline.

mod common;

use common::{lines_of, lint, lint_only, rules_of};
use lesslint::{Config, RuleOption, check_str};

// -----------------------------------------------------------
// Single rules.
// -----------------------------------------------------------

#[test]
fn zero_unit_once_per_line() {
    let diags = lint("a {\n    width: 0px;\n}\n");
    assert_eq!(rules_of(&diags), ["zero-unit"]);
    assert_eq!(diags[0].line, 2);
}

#[test]
fn variable_name_case() {
    let diags = lint_only("variable-name", "@Foo-Bar: 1px;\n");
    assert_eq!(diags.len(), 1);
    assert!(lint_only("variable-name", "@foo-bar: 1px;\n").is_empty());
}

#[test]
fn variable_name_with_space_before_colon() {
    let diags = lint_only("variable-name", "@Foo : 1px;\n");
    assert_eq!(lines_of(&diags), [1]);
    assert!(lint_only("variable-name", "@foo : 1px;\n").is_empty());
}

#[test]
fn block_indent_quotes_the_line() {
    let diags = lint_only("block-indent", "a {\n  color: red;\n}\n");
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "`  color: red;` Bad indentation, Expected `4` but saw `2`"
    );
    let json = serde_json::to_value(&diags).expect("serialize");
    assert!(json[0]["message"].as_str().is_some_and(|m| m.contains("color: red;")));
}

#[test]
fn math_functions_are_not_colors() {
    assert!(lint_only("hex-color", "a {\n    width: tan(45deg);\n}\n").is_empty());
    assert_eq!(lines_of(&lint_only("hex-color", "a {\n    color: tan;\n}\n")), [2]);
}

#[test]
fn import_quote_consistency() {
    let diags = lint_only("import", "@import \"a.css\";\n@import 'b.less';\n");
    let quote: Vec<_> = diags
        .iter()
        .filter(|d| d.message.contains("Quotes must be the same"))
        .collect();
    assert_eq!(quote.len(), 1);
    assert_eq!(quote[0].line, 2);
}

#[test]
fn import_missing_suffix() {
    let diags = lint_only("import", "@import \"a\";\n");
    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains(".less suffix"));
}

#[test]
fn leading_zero_follows_first_decimal() {
    let diags = lint_only("leading-zero", "a {\n    opacity: 0.5;\n    opacity: .5;\n}\n");
    assert_eq!(lines_of(&diags), [3]);
    let diags = lint_only("leading-zero", "a {\n    opacity: .5;\n    opacity: 0.5;\n}\n");
    assert_eq!(lines_of(&diags), [3]);
}

#[test]
fn leading_zero_convention_is_per_file() {
    let config = Config::empty().with_rule("leading-zero", RuleOption::Bool(true));
    let first = check_str("a {\n    opacity: 0.5;\n}\n", "a.less", &config).expect("check");
    let second = check_str("a {\n    opacity: .5;\n}\n", "b.less", &config).expect("check");
    assert!(first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn require_newline_for_selector_groups() {
    let diags = lint_only("require-newline", "h1, h2 {\n  color: red;\n}");
    assert_eq!(lines_of(&diags), [1]);
    assert!(lint_only("require-newline", "h1,\nh2 {\n  color: red;\n}").is_empty());
}

#[test]
fn require_after_space_takes_a_list() {
    let source = "a {\n    color:red;\n    font-family: a,b;\n}\n";
    let config = Config::empty().with_rule("require-after-space", RuleOption::List(vec![",".into()]));
    let diags = check_str(source, "a.less", &config).expect("check");
    assert_eq!(lines_of(&diags), [3]);

    let config = Config::empty().with_rule("require-after-space", RuleOption::List(vec![":".into()]));
    let diags = check_str(source, "a.less", &config).expect("check");
    assert_eq!(lines_of(&diags), [2]);
}

#[test]
fn comment_alias_reports_once() {
    let diags = lint("/* x */\n");
    assert_eq!(rules_of(&diags), ["single-comment"]);
}

// -----------------------------------------------------------
// Default configuration over whole files.
// -----------------------------------------------------------

#[test]
fn clean_stylesheet() {
    let source = "\
@import \"base.less\";

@gap: 10px;

// Panels
.box,
.panel {
    margin: 0 @gap;
    color: #333;
    opacity: 0.5;
    .title {
        font: 12px/1.5 Arial;
    }
}
";
    let diags = lint(source);
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn several_rules_on_one_file() {
    let source = "\
@Gap: 0px;
a{
    color: #ffffff;
    width: @Gap+1;
}
";
    let diags = lint(source);
    let mut rules = rules_of(&diags);
    rules.sort_unstable();
    rules.dedup();
    assert_eq!(
        rules,
        [
            "operate-unit",
            "require-around-space",
            "require-before-space",
            "shorthand-color",
            "variable-name",
            "zero-unit",
        ]
    );
}

#[test]
fn disabling_a_rule_in_config() {
    let config = Config::default().merge(
        Config::from_json(r#"{"zero-unit": false}"#).expect("config"),
    );
    let diags = check_str("a {\n    width: 0px;\n}\n", "a.less", &config).expect("check");
    assert!(diags.is_empty());
}

#[test]
fn colorized_message_highlights_line() {
    let diags = lint("a {\n    width: 0px;\n}\n");
    let colored = diags[0].display_message(true);
    assert!(colored.contains("width: "));
    assert!(colored.contains("\u{1b}["));
    assert_eq!(diags[0].display_message(false), diags[0].message);
}
