//! Serializer that rebuilds the exact source text of a parsed stylesheet.
//!
//! Every raw the parser recorded (whitespace before nodes, text between
//! selector and brace, comment padding, optional semicolons) is written
//! back verbatim, so `stringify(parse(s)) == s` for any `s` that parses.

use crate::ast::{AtRule, Comment, Declaration, Node, RuleBlock, Stylesheet};

/// Serialize a `Stylesheet` back into its source text.
#[must_use]
pub fn stringify(sheet: &Stylesheet) -> String {
    let mut out = String::with_capacity(sheet.source().len());
    write_nodes(&mut out, &sheet.nodes);
    out.push_str(&sheet.after);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::AtRule(at_rule) => write_at_rule(out, at_rule),
            Node::Rule(rule) => write_rule(out, rule),
            Node::Declaration(decl) => write_decl(out, decl),
            Node::Comment(comment) => write_comment(out, comment),
        }
    }
}

fn write_at_rule(out: &mut String, at_rule: &AtRule) {
    out.push_str(&at_rule.before);
    out.push('@');
    out.push_str(&at_rule.name);
    out.push_str(&at_rule.after_name);
    out.push_str(&at_rule.params);
    out.push_str(&at_rule.between);

    if let Some(children) = &at_rule.nodes {
        write_block(out, children, &at_rule.after);
    } else if at_rule.semicolon {
        out.push(';');
    }
}

fn write_rule(out: &mut String, rule: &RuleBlock) {
    out.push_str(&rule.before);
    out.push_str(&rule.selector);

    if rule.is_mixin_call {
        if rule.semicolon {
            out.push(';');
        }
        return;
    }

    out.push_str(&rule.between);
    write_block(out, &rule.nodes, &rule.after);
}

fn write_block(out: &mut String, children: &[Node], after: &str) {
    out.push('{');
    write_nodes(out, children);
    out.push_str(after);
    out.push('}');
}

fn write_decl(out: &mut String, decl: &Declaration) {
    out.push_str(&decl.before);
    out.push_str(&decl.prop);
    out.push_str(&decl.between);
    out.push_str(&decl.raw_value);
    if decl.semicolon {
        out.push(';');
    }
}

fn write_comment(out: &mut String, comment: &Comment) {
    out.push_str(&comment.before);
    out.push_str(&comment.raw());
}
