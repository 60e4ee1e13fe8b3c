#![allow(dead_code)]

use lesslint::{Config, Diagnostic, check_str, parse, stringify, tokenize};

pub fn roundtrip(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    let sheet = parse(&tokens, input).expect("parse failed");
    let output = stringify(&sheet);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Lint `input` with the default configuration.
pub fn lint(input: &str) -> Vec<Diagnostic> {
    check_str(input, "test.less", &Config::default()).expect("check failed")
}

/// Diagnostics of one rule, with every other rule disabled.
pub fn lint_only(rule: &str, input: &str) -> Vec<Diagnostic> {
    let config = Config::empty().with_rule(rule, lesslint::RuleOption::Bool(true));
    check_str(input, "test.less", &config).expect("check failed")
}

pub fn rules_of(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.rule).collect()
}

pub fn lines_of(diagnostics: &[Diagnostic]) -> Vec<usize> {
    diagnostics.iter().map(|d| d.line).collect()
}
