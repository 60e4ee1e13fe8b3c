//! Round-trip tests: parse then stringify should reproduce the input.

mod common;

use common::roundtrip;

// -----------------------------------------------------------
// Basic round-trip tests.
// -----------------------------------------------------------

#[test]
fn roundtrip_empty() {
    roundtrip("");
}

#[test]
fn roundtrip_whitespace_only() {
    roundtrip("\n\n  \n");
}

#[test]
fn roundtrip_simple_rule() {
    roundtrip("a {\n    color: red;\n}\n");
}

#[test]
fn roundtrip_compact_rule() {
    roundtrip("a{color:red}");
}

#[test]
fn roundtrip_odd_spacing() {
    roundtrip("a   {  color :  red  ;   }   \n");
}

#[test]
fn roundtrip_nested_rules() {
    roundtrip(".a {\n    .b {\n        &:hover {\n            c: d;\n        }\n    }\n}\n");
}

#[test]
fn roundtrip_selector_group() {
    roundtrip("h1,\nh2 ,\n  h3 > a {\n    margin: 0 auto;\n}\n");
}

#[test]
fn roundtrip_empty_rules() {
    roundtrip("a {}\nb { }\n{}\n");
}

// -----------------------------------------------------------
// Variables and values.
// -----------------------------------------------------------

#[test]
fn roundtrip_variables() {
    roundtrip("@a: 1px;\n@b:2px;\n@c : @a + @b;\n");
}

#[test]
fn roundtrip_function_values() {
    roundtrip("a {\n    b: rgba(0, 0, 0, .5);\n    c: darken(@d, 10%);\n    e: url(a/b.png) no-repeat;\n}\n");
}

#[test]
fn roundtrip_important_and_strings() {
    roundtrip("a {\n    content: \"a;b{c}\" !important;\n    font-family: 'x y', sans-serif;\n}\n");
}

#[test]
fn roundtrip_interpolation() {
    roundtrip(".@{name}-box {\n    @{prop}: 1px;\n}\n");
}

#[test]
fn roundtrip_escapes() {
    roundtrip(".a\\:b {\n    c: d;\n}\n");
}

// -----------------------------------------------------------
// At-rules.
// -----------------------------------------------------------

#[test]
fn roundtrip_imports() {
    roundtrip("@import \"a.less\";\n@import (reference) 'b.less';\n@import url(c.css) screen;\n");
}

#[test]
fn roundtrip_media_block() {
    roundtrip("@media screen and (max-width: 100px) {\n    a {\n        b: c;\n    }\n}\n");
}

#[test]
fn roundtrip_at_rule_without_semicolon() {
    roundtrip("a { @apply b }");
}

#[test]
fn roundtrip_trailing_statement_at_rule() {
    roundtrip("@charset \"utf-8\"  \n");
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn roundtrip_comments() {
    roundtrip("// top\n/*  block  */\na {\n    // inside\n    b: c; /* tail */\n}\n/*\n * many\n */\n");
}

#[test]
fn roundtrip_comment_in_value() {
    roundtrip("a { b: c /* x */ d; }");
}

#[test]
fn roundtrip_empty_comments() {
    roundtrip("/**/\n/*   */\n//\n");
}

// -----------------------------------------------------------
// Mixins.
// -----------------------------------------------------------

#[test]
fn roundtrip_mixin_definition_and_calls() {
    roundtrip(
        ".m(@a; @b: 2px) {\n    width: @a;\n    height: @b;\n}\n.x {\n    .m(1px);\n    .m(1px; 3px) !important;\n}\n",
    );
}

#[test]
fn roundtrip_mixin_without_params() {
    roundtrip(".m() {\n    a: b;\n}\n.x { .m }\n");
}

#[test]
fn roundtrip_variadic_mixin() {
    roundtrip(".m(@rest...) {\n    box-shadow: @rest;\n}\n.n(...) {\n}\n");
}
