use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{
    AtRule, Comment, Declaration, MixinParam, MixinSignature, Node, RuleBlock, Source, Stylesheet,
};
use crate::token::{Position, Token, TokenKind};

/// A lone class or id selector, escapes allowed: `.rounded`, `#ns`,
/// `.a\:b`.
static MIXIN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[.#](?:[\w-]|\\.)+$").expect("valid mixin name pattern"));

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `}` with no open block.
    UnexpectedClose,
    /// End of input with a block still open.
    UnclosedBlock,
    /// `(` never closed within a statement.
    UnclosedBracket,
    /// Statement that is neither a declaration, a rule, nor a call to a
    /// mixin defined earlier in the file.
    UnknownWord { word: String },
    /// A bare `@`.
    UnnamedAtRule,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedClose => write!(f, "unexpected '}}'"),
            Self::UnclosedBlock => write!(f, "unclosed block"),
            Self::UnclosedBracket => write!(f, "unclosed bracket"),
            Self::UnknownWord { word } => write!(f, "unknown word '{word}'"),
            Self::UnnamedAtRule => write!(f, "at-rule without name"),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

/// Parse a token stream into a `Stylesheet`.
///
/// `source` is the text the tokens were produced from; the tree keeps a
/// copy for line lookups.
///
/// # Errors
///
/// Returns `ParseError` on unbalanced braces or brackets and on
/// statements that cannot be classified.
pub fn parse(tokens: &[Token], source: &str) -> Result<Stylesheet, ParseError> {
    Parser::new(tokens).parse(source)
}

enum Block {
    Rule(RuleBlock),
    AtRule(AtRule),
}

struct Frame {
    block: Block,
    children: Vec<Node>,
}

impl Frame {
    const fn start(&self) -> Position {
        match &self.block {
            Block::Rule(rule) => rule.source.start,
            Block::AtRule(at_rule) => at_rule.source.start,
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Whitespace and stray semicolons waiting to become the next node's
    /// `before` or the enclosing block's `after`.
    spaces: String,
    root: Vec<Node>,
    open: Vec<Frame>,
    mixins: BTreeMap<String, MixinSignature>,
}

fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// An at-word that begins a variable definition rather than an at-rule:
/// `@name:`, `@name:value`, or `@name` followed by `:` after optional
/// whitespace.
fn starts_variable(tokens: &[Token], idx: usize) -> bool {
    tokens[idx].text.contains(':')
        || tokens[idx + 1..]
            .iter()
            .find(|t| t.kind != TokenKind::Space)
            .is_some_and(|t| t.kind == TokenKind::Colon)
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            spaces: String::new(),
            root: Vec::new(),
            open: Vec::new(),
            mixins: BTreeMap::new(),
        }
    }

    fn parse(mut self, source: &str) -> Result<Stylesheet, ParseError> {
        let tokens = self.tokens;

        while self.pos < tokens.len() {
            let token = &tokens[self.pos];

            match token.kind {
                TokenKind::Space | TokenKind::Semicolon => self.spaces.push_str(&token.text),
                TokenKind::CloseBrace => self.close(token)?,
                TokenKind::Comment | TokenKind::BlockComment => self.comment(token),
                TokenKind::AtWord if !starts_variable(tokens, self.pos) => self.at_rule()?,
                TokenKind::OpenBrace => self.empty_rule(token),
                _ => self.other()?,
            }

            self.pos += 1;
        }

        self.end_file(source)
    }

    fn take_spaces(&mut self) -> String {
        std::mem::take(&mut self.spaces)
    }

    fn push_node(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn comment(&mut self, token: &Token) {
        let inline = token.kind == TokenKind::Comment;
        let body = if inline {
            &token.text[2..]
        } else {
            &token.text[2..token.text.len() - 2]
        };
        let (left, text, right) = split_padding(body);

        let node = Comment {
            text: text.to_owned(),
            inline,
            left: left.to_owned(),
            right: right.to_owned(),
            before: self.take_spaces(),
            source: Source {
                start: token.span.start,
                end: token.span.end,
            },
        };
        self.push_node(Node::Comment(node));
    }

    fn empty_rule(&mut self, token: &Token) {
        let rule = RuleBlock {
            selector: String::new(),
            between: String::new(),
            nodes: Vec::new(),
            is_mixin_definition: false,
            params: Vec::new(),
            is_mixin_call: false,
            semicolon: false,
            level: self.open.len(),
            before: self.take_spaces(),
            after: String::new(),
            source: Source {
                start: token.span.start,
                end: token.span.start,
            },
        };
        self.open.push(Frame {
            block: Block::Rule(rule),
            children: Vec::new(),
        });
    }

    /// Scan a statement starting at `pos` until it can be classified as a
    /// declaration (`;` or `}` after a top-level `:`), a rule (`{`), or a
    /// mixin call.
    fn other(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let start = self.pos;
        let mut end = false;
        let mut colon = tokens[start].kind == TokenKind::AtWord && tokens[start].text.contains(':');
        let mut brackets: Vec<usize> = Vec::new();

        while self.pos < tokens.len() {
            match tokens[self.pos].kind {
                TokenKind::OpenParen => brackets.push(self.pos),
                TokenKind::CloseParen if !brackets.is_empty() => {
                    brackets.pop();
                }
                _ if !brackets.is_empty() => {}
                TokenKind::Semicolon => {
                    if colon {
                        self.decl(start, self.pos, true);
                        return Ok(());
                    }
                    break;
                }
                TokenKind::OpenBrace => {
                    self.rule(start, self.pos);
                    return Ok(());
                }
                TokenKind::CloseBrace => {
                    self.pos -= 1;
                    end = true;
                    break;
                }
                TokenKind::Colon => colon = true,
                _ => {}
            }
            self.pos += 1;
        }

        if self.pos == tokens.len() {
            self.pos -= 1;
            end = true;
        }

        if let Some(&open) = brackets.first() {
            return Err(ParseError {
                kind: ParseErrorKind::UnclosedBracket,
                position: tokens[open].span.start,
            });
        }

        if end {
            while self.pos > start && tokens[self.pos].kind.is_trivia() {
                self.pos -= 1;
            }
            if colon {
                self.decl(start, self.pos + 1, false);
                return Ok(());
            }
            return self.mixin_call(start, self.pos + 1, false);
        }

        self.mixin_call(start, self.pos, true)
    }

    /// Build a declaration from `tokens[start..stop]`; with `semicolon`,
    /// `tokens[stop]` is the terminating `;`.
    fn decl(&mut self, start: usize, stop: usize, semicolon: bool) {
        let tokens = self.tokens;
        let slice = &tokens[start..stop];

        let mut prop = String::new();
        let mut between = String::new();
        let mut head = String::new();
        let mut i = 0;

        let embedded_colon = if slice[0].kind == TokenKind::AtWord {
            slice[0].text.split_once(':')
        } else {
            None
        };

        if let Some((name, rest)) = embedded_colon {
            prop.push_str(name);
            between.push(':');
            head.push_str(rest);
            i = 1;
        } else {
            while i < slice.len()
                && !matches!(
                    slice[i].kind,
                    TokenKind::Colon | TokenKind::Space | TokenKind::Comment | TokenKind::BlockComment
                )
            {
                prop.push_str(&slice[i].text);
                i += 1;
            }
            while i < slice.len() {
                between.push_str(&slice[i].text);
                i += 1;
                if slice[i - 1].kind == TokenKind::Colon {
                    break;
                }
            }
        }

        if head.is_empty() {
            while i < slice.len() && slice[i].kind.is_trivia() {
                between.push_str(&slice[i].text);
                i += 1;
            }
        }

        let rest = &slice[i..];
        let raw_value = format!("{head}{}", join(rest));
        let mut value = head;
        for token in rest.iter().filter(|t| !t.kind.is_comment()) {
            value.push_str(&token.text);
        }
        let value = value.trim_end().to_owned();

        let end = if semicolon {
            tokens[stop].span.start
        } else {
            slice[slice.len() - 1].span.end
        };

        let node = Declaration {
            prop,
            between,
            value,
            raw_value,
            semicolon,
            before: self.take_spaces(),
            source: Source {
                start: slice[0].span.start,
                end,
            },
        };
        self.push_node(Node::Declaration(node));
    }

    /// Open a rule block whose selector is `tokens[start..brace]`.
    fn rule(&mut self, start: usize, brace: usize) {
        let tokens = self.tokens;
        let slice = &tokens[start..brace];

        let mut split = slice.len();
        while split > 0 && slice[split - 1].kind.is_trivia() {
            split -= 1;
        }

        let head = &slice[..split];
        let start_position = slice[0].span.start;

        let params = mixin_definition(head).map(|(name, params)| {
            self.mixins.insert(
                name,
                MixinSignature {
                    params: params.clone(),
                    defined_at: start_position,
                },
            );
            params
        });

        let rule = RuleBlock {
            selector: join(head),
            between: join(&slice[split..]),
            nodes: Vec::new(),
            is_mixin_definition: params.is_some(),
            params: params.unwrap_or_default(),
            is_mixin_call: false,
            semicolon: false,
            level: self.open.len(),
            before: self.take_spaces(),
            after: String::new(),
            source: Source {
                start: start_position,
                end: start_position,
            },
        };
        self.open.push(Frame {
            block: Block::Rule(rule),
            children: Vec::new(),
        });
    }

    /// A statement without a top-level colon or a block is only valid as
    /// a call to a mixin registered earlier in this file.
    fn mixin_call(&mut self, start: usize, stop: usize, semicolon: bool) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let first = &tokens[start];
        let name = leading_name(&tokens[start..stop]);

        if !self.mixins.contains_key(&name) {
            return Err(ParseError {
                kind: ParseErrorKind::UnknownWord {
                    word: first.text.clone(),
                },
                position: first.span.start,
            });
        }

        let end = if semicolon {
            tokens[stop].span.start
        } else {
            tokens[stop - 1].span.end
        };

        let call = RuleBlock {
            selector: join(&tokens[start..stop]),
            between: String::new(),
            nodes: Vec::new(),
            is_mixin_definition: false,
            params: Vec::new(),
            is_mixin_call: true,
            semicolon,
            level: self.open.len(),
            before: self.take_spaces(),
            after: String::new(),
            source: Source {
                start: first.span.start,
                end,
            },
        };
        self.push_node(Node::Rule(call));
        Ok(())
    }

    fn at_rule(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let token = &tokens[self.pos];
        let name = token.text[1..].to_owned();

        if name.is_empty() {
            return Err(ParseError {
                kind: ParseErrorKind::UnnamedAtRule,
                position: token.span.start,
            });
        }

        let params_start = self.pos + 1;
        self.pos += 1;
        while self.pos < tokens.len()
            && !matches!(
                tokens[self.pos].kind,
                TokenKind::Semicolon | TokenKind::OpenBrace | TokenKind::CloseBrace
            )
        {
            self.pos += 1;
        }

        let params = &tokens[params_start..self.pos];
        let lead = params
            .iter()
            .take_while(|t| t.kind == TokenKind::Space)
            .count();
        let trail = params[lead..]
            .iter()
            .rev()
            .take_while(|t| t.kind == TokenKind::Space)
            .count();
        let body = &params[lead..params.len() - trail];

        let mut at_rule = AtRule {
            name,
            params: join(body),
            after_name: join(&params[..lead]),
            between: join(&params[params.len() - trail..]),
            nodes: None,
            semicolon: false,
            before: self.take_spaces(),
            after: String::new(),
            source: Source {
                start: token.span.start,
                end: body.last().map_or(token.span.end, |t| t.span.end),
            },
        };

        let Some(terminator) = tokens.get(self.pos) else {
            // end of input: trailing whitespace belongs to the root
            self.spaces = std::mem::take(&mut at_rule.between);
            self.push_node(Node::AtRule(at_rule));
            return Ok(());
        };

        match terminator.kind {
            TokenKind::Semicolon => {
                at_rule.semicolon = true;
                at_rule.source.end = terminator.span.start;
                self.push_node(Node::AtRule(at_rule));
            }
            TokenKind::OpenBrace => {
                self.open.push(Frame {
                    block: Block::AtRule(at_rule),
                    children: Vec::new(),
                });
            }
            _ => {
                self.push_node(Node::AtRule(at_rule));
                self.close(terminator)?;
            }
        }

        Ok(())
    }

    fn close(&mut self, token: &Token) -> Result<(), ParseError> {
        let Some(frame) = self.open.pop() else {
            return Err(ParseError {
                kind: ParseErrorKind::UnexpectedClose,
                position: token.span.start,
            });
        };

        let after = self.take_spaces();
        let end = token.span.start;

        let node = match frame.block {
            Block::Rule(mut rule) => {
                rule.nodes = frame.children;
                rule.after = after;
                rule.source.end = end;
                Node::Rule(rule)
            }
            Block::AtRule(mut at_rule) => {
                at_rule.nodes = Some(frame.children);
                at_rule.after = after;
                at_rule.source.end = end;
                Node::AtRule(at_rule)
            }
        };
        self.push_node(node);
        Ok(())
    }

    fn end_file(mut self, source: &str) -> Result<Stylesheet, ParseError> {
        if let Some(frame) = self.open.last() {
            return Err(ParseError {
                kind: ParseErrorKind::UnclosedBlock,
                position: frame.start(),
            });
        }

        let after = self.take_spaces();
        Ok(Stylesheet::new(
            self.root,
            after,
            self.mixins,
            source.to_owned(),
        ))
    }
}

/// Split a comment body into leading whitespace, trimmed text, and
/// trailing whitespace. An all-whitespace body is kept as `left`.
fn split_padding(body: &str) -> (&str, &str, &str) {
    let text = body.trim();
    if text.is_empty() {
        return (body, "", "");
    }
    let left = &body[..body.len() - body.trim_start().len()];
    let right = &body[left.len() + text.len()..];
    (left, text, right)
}

/// Concatenated leading word tokens; escapes split a selector name into
/// several adjacent words.
fn leading_name(tokens: &[Token]) -> String {
    tokens
        .iter()
        .take_while(|t| t.kind == TokenKind::Word)
        .map(|t| t.text.as_str())
        .collect()
}

fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Recognize `.name(...)` / `#name(...)` selectors from tokens: a single
/// class or id selector followed, modulo whitespace, by an open paren.
fn mixin_definition(selector: &[Token]) -> Option<(String, Vec<MixinParam>)> {
    let name = leading_name(selector);
    if !MIXIN_NAME.is_match(&name) {
        return None;
    }

    let name_len = selector
        .iter()
        .take_while(|t| t.kind == TokenKind::Word)
        .count();
    let open = name_len
        + selector[name_len..]
            .iter()
            .take_while(|t| t.kind == TokenKind::Space)
            .count();

    if selector.get(open)?.kind != TokenKind::OpenParen {
        return None;
    }
    let close = matching_paren(selector, open)?;

    Some((name, mixin_params(&selector[open + 1..close])))
}

struct PendingParam {
    name: String,
    variadic: bool,
    default: Option<String>,
    before: String,
    spaces: String,
    source: Source,
}

impl PendingParam {
    fn finish(self) -> MixinParam {
        let default = self
            .default
            .map(|d| d.trim().trim_end_matches(',').trim_end().to_owned());

        MixinParam {
            name: self.name,
            variadic: self.variadic,
            default,
            before: self.before,
            after: self.spaces,
            source: self.source,
        }
    }
}

fn mixin_params(tokens: &[Token]) -> Vec<MixinParam> {
    let mut params = Vec::new();
    let mut current: Option<PendingParam> = None;
    let mut leading = String::new();

    for token in tokens {
        match token.kind {
            TokenKind::MixinParam { variadic } => {
                params.extend(current.take().map(PendingParam::finish));

                let text = token.text.trim_start_matches('@');
                let (name, default) = match text.split_once(':') {
                    Some((name, head)) => (name, Some(head.to_owned())),
                    None => (text, None),
                };
                let name = name.trim_end_matches(',').trim_end_matches("...");

                current = Some(PendingParam {
                    name: name.to_owned(),
                    variadic,
                    default,
                    before: std::mem::take(&mut leading),
                    spaces: String::new(),
                    source: Source {
                        start: token.span.start,
                        end: token.span.end,
                    },
                });
            }
            TokenKind::Word if token.text == "..." && current.is_none() => {
                current = Some(PendingParam {
                    name: String::new(),
                    variadic: true,
                    default: None,
                    before: std::mem::take(&mut leading),
                    spaces: String::new(),
                    source: Source {
                        start: token.span.start,
                        end: token.span.end,
                    },
                });
            }
            TokenKind::Semicolon => {
                params.extend(current.take().map(PendingParam::finish));
            }
            TokenKind::Space => match current.as_mut() {
                Some(param) => param.spaces.push_str(&token.text),
                None => leading.push_str(&token.text),
            },
            _ => {
                if let Some(param) = current.as_mut() {
                    if let Some(default) = param.default.as_mut() {
                        default.push_str(&param.spaces);
                        default.push_str(&token.text);
                        param.spaces.clear();
                        param.source.end = token.span.end;
                    }
                }
            }
        }
    }

    params.extend(current.map(PendingParam::finish));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_input(input: &str) -> Result<Stylesheet, ParseError> {
        let tokens = tokenize(input).expect("tokenize failed");
        parse(&tokens, input)
    }

    fn first_rule(sheet: &Stylesheet) -> &RuleBlock {
        match &sheet.nodes[0] {
            Node::Rule(rule) => rule,
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn simple_rule() {
        let sheet = parse_input("a {\n    color: red;\n}\n").expect("parse failed");
        let rule = first_rule(&sheet);
        assert_eq!(rule.selector, "a");
        assert_eq!(rule.between, " ");
        assert_eq!(rule.nodes.len(), 1);
        let Node::Declaration(decl) = &rule.nodes[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.prop, "color");
        assert_eq!(decl.between, ": ");
        assert_eq!(decl.value, "red");
        assert_eq!(decl.before, "\n    ");
        assert_eq!(decl.source.start, Position::new(2, 5));
        assert_eq!(sheet.after, "\n");
    }

    #[test]
    fn variable_definition() {
        let sheet = parse_input("@main-color: #fff;").expect("parse failed");
        let Node::Declaration(decl) = &sheet.nodes[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.prop, "@main-color");
        assert_eq!(decl.between, ": ");
        assert_eq!(decl.value, "#fff");
        assert!(decl.is_variable());
    }

    #[test]
    fn variable_without_space() {
        let sheet = parse_input("@a:1px;").expect("parse failed");
        let Node::Declaration(decl) = &sheet.nodes[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.prop, "@a");
        assert_eq!(decl.between, ":");
        assert_eq!(decl.value, "1px");
    }

    #[test]
    fn declaration_without_semicolon() {
        let sheet = parse_input("a { color: red }").expect("parse failed");
        let rule = first_rule(&sheet);
        let Node::Declaration(decl) = &rule.nodes[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.value, "red");
        assert!(!decl.semicolon);
        assert_eq!(rule.after, " ");
    }

    #[test]
    fn nested_levels() {
        let sheet = parse_input(".a {\n    .b {\n        c: d;\n    }\n}").expect("parse failed");
        let outer = first_rule(&sheet);
        assert_eq!(outer.level, 0);
        let Node::Rule(inner) = &outer.nodes[0] else {
            panic!("expected nested rule");
        };
        assert_eq!(inner.level, 1);
        assert_eq!(inner.source.start, Position::new(2, 5));
    }

    #[test]
    fn at_rule_statement() {
        let sheet = parse_input("@import (reference) \"a.less\";").expect("parse failed");
        let Node::AtRule(at_rule) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(at_rule.name, "import");
        assert_eq!(at_rule.params, "(reference) \"a.less\"");
        assert_eq!(at_rule.after_name, " ");
        assert!(at_rule.nodes.is_none());
        assert!(at_rule.semicolon);
    }

    #[test]
    fn at_rule_block() {
        let sheet =
            parse_input("@media screen and (max-width: 100px) {\n    a { b: c; }\n}").expect("parse failed");
        let Node::AtRule(at_rule) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(at_rule.name, "media");
        assert_eq!(at_rule.params, "screen and (max-width: 100px)");
        assert_eq!(at_rule.between, " ");
        assert_eq!(at_rule.nodes.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn comments_keep_padding() {
        let sheet = parse_input("/*  hi */\n// yo").expect("parse failed");
        let Node::Comment(block) = &sheet.nodes[0] else {
            panic!("expected comment");
        };
        assert_eq!(block.text, "hi");
        assert_eq!(block.left, "  ");
        assert_eq!(block.right, " ");
        assert!(!block.inline);
        let Node::Comment(line) = &sheet.nodes[1] else {
            panic!("expected comment");
        };
        assert!(line.inline);
        assert_eq!(line.text, "yo");
    }

    #[test]
    fn mixin_definition_with_params() {
        let sheet =
            parse_input(".m(@a; @b: 2px; @rest...) {\n    width: @a;\n}").expect("parse failed");
        let rule = first_rule(&sheet);
        assert!(rule.is_mixin_definition);
        let names: Vec<_> = rule.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "rest"]);
        assert_eq!(rule.params[1].default.as_deref(), Some("2px"));
        assert!(rule.params[2].variadic);
        assert!(sheet.mixins.contains_key(".m"));
    }

    #[test]
    fn plain_rule_is_not_mixin() {
        let sheet = parse_input(".a .b {\n}").expect("parse failed");
        assert!(!first_rule(&sheet).is_mixin_definition);
        assert!(sheet.mixins.is_empty());
    }

    #[test]
    fn registered_mixin_call() {
        let sheet =
            parse_input(".m() {\n    a: b;\n}\n.x {\n    .m();\n}").expect("parse failed");
        let Node::Rule(x) = &sheet.nodes[1] else {
            panic!("expected rule");
        };
        let Node::Rule(call) = &x.nodes[0] else {
            panic!("expected mixin call");
        };
        assert!(call.is_mixin_call);
        assert_eq!(call.selector, ".m()");
        assert!(call.semicolon);
    }

    #[test]
    fn unknown_word() {
        let err = parse_input(".x {\n    .missing();\n}").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownWord {
                word: ".missing".to_string()
            }
        );
        assert_eq!(err.position, Position::new(2, 5));
    }

    #[test]
    fn unexpected_close() {
        let err = parse_input("a { b: c; } }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedClose);
    }

    #[test]
    fn unclosed_block() {
        let err = parse_input("a {\n    b: c;\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBlock);
        assert_eq!(err.position, Position::new(1, 1));
    }

    #[test]
    fn empty_rule() {
        let sheet = parse_input("{}").expect("parse failed");
        let rule = first_rule(&sheet);
        assert_eq!(rule.selector, "");
        assert!(rule.nodes.is_empty());
    }
}
