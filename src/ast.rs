//! Syntax tree for a parsed LESS stylesheet.
//!
//! Nodes keep the raw text around them (`before`, `between`, `after`)
//! so the original source can be rebuilt exactly and so spacing rules
//! can inspect it.

use std::collections::BTreeMap;

use crate::token::Position;

/// Start and end position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub start: Position,
    pub end: Position,
}

/// Root of a parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
    /// Whitespace after the last top-level node.
    pub after: String,
    /// Mixins defined in this file, keyed by their selector without the
    /// parameter list (e.g. `.border-radius`).
    pub mixins: BTreeMap<String, MixinSignature>,
    source: String,
}

/// A child of the root or of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRule),
    Rule(RuleBlock),
    Declaration(Declaration),
    Comment(Comment),
}

/// `@name params;` or `@name params { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the leading `@`.
    pub name: String,
    pub params: String,
    /// Whitespace between the name and the params.
    pub after_name: String,
    /// Whitespace between the params and `{` or `;`.
    pub between: String,
    /// Children, present only when the at-rule opened a block.
    pub nodes: Option<Vec<Node>>,
    pub semicolon: bool,
    pub before: String,
    /// Whitespace before the closing `}`.
    pub after: String,
    pub source: Source,
}

/// A selector with a declaration block, a mixin definition, or a mixin
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    /// Raw selector text, possibly spanning several lines.
    pub selector: String,
    /// Whitespace and comments between the selector and `{`.
    pub between: String,
    pub nodes: Vec<Node>,
    pub is_mixin_definition: bool,
    /// Parameters of a mixin definition; empty otherwise.
    pub params: Vec<MixinParam>,
    /// A statement like `.rounded(4px);` invoking a mixin defined earlier
    /// in the file. Has no block.
    pub is_mixin_call: bool,
    pub semicolon: bool,
    /// Nesting depth, 0 at the top level.
    pub level: usize,
    pub before: String,
    pub after: String,
    pub source: Source,
}

/// `prop: value;`, including LESS variable definitions (`@name: value;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    /// Exact text between the property and the value, colon included.
    pub between: String,
    /// Value without comments and trailing whitespace.
    pub value: String,
    /// Value exactly as written.
    pub raw_value: String,
    pub semicolon: bool,
    pub before: String,
    pub source: Source,
}

/// `// text` or `/* text */`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment body with surrounding whitespace trimmed.
    pub text: String,
    pub inline: bool,
    /// Whitespace between the opening marker and the text.
    pub left: String,
    /// Whitespace between the text and the closing marker.
    pub right: String,
    pub before: String,
    pub source: Source,
}

/// One parameter of a mixin definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinParam {
    /// Name without `@`, `:` or `...`. Empty for a bare `...`.
    pub name: String,
    pub variadic: bool,
    /// Raw default value text, if any.
    pub default: Option<String>,
    pub before: String,
    pub after: String,
    pub source: Source,
}

/// What the per-file mixin registry remembers about a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinSignature {
    pub params: Vec<MixinParam>,
    pub defined_at: Position,
}

impl Stylesheet {
    pub(crate) const fn new(
        nodes: Vec<Node>,
        after: String,
        mixins: BTreeMap<String, MixinSignature>,
        source: String,
    ) -> Self {
        Self {
            nodes,
            after,
            mixins,
            source,
        }
    }

    /// The source text this tree was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Visit every node depth-first in document order together with its
    /// nesting depth (0 for top-level nodes).
    pub fn walk<'s, F>(&'s self, mut visit: F)
    where
        F: FnMut(&'s Node, usize),
    {
        walk_nodes(&self.nodes, 0, &mut visit);
    }

    /// Visit every declaration in document order.
    pub fn walk_decls<'s, F>(&'s self, mut visit: F)
    where
        F: FnMut(&'s Declaration, usize),
    {
        self.walk(|node, depth| {
            if let Node::Declaration(decl) = node {
                visit(decl, depth);
            }
        });
    }

    /// Visit every rule block, mixin calls included.
    pub fn walk_rules<'s, F>(&'s self, mut visit: F)
    where
        F: FnMut(&'s RuleBlock, usize),
    {
        self.walk(|node, depth| {
            if let Node::Rule(rule) = node {
                visit(rule, depth);
            }
        });
    }

    pub fn walk_at_rules<'s, F>(&'s self, mut visit: F)
    where
        F: FnMut(&'s AtRule, usize),
    {
        self.walk(|node, depth| {
            if let Node::AtRule(at_rule) = node {
                visit(at_rule, depth);
            }
        });
    }
}

fn walk_nodes<'s, F>(nodes: &'s [Node], depth: usize, visit: &mut F)
where
    F: FnMut(&'s Node, usize),
{
    for node in nodes {
        visit(node, depth);
        if let Some(children) = node.children() {
            walk_nodes(children, depth + 1, visit);
        }
    }
}

/// Content of the 1-based line `line` of `source`, without its newline.
#[must_use]
pub fn line_content(source: &str, line: usize) -> Option<&str> {
    line.checked_sub(1).and_then(|idx| source.split('\n').nth(idx))
}

impl Node {
    /// Child nodes for blocks; `None` for leaves and statement at-rules.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::AtRule(at_rule) => at_rule.nodes.as_deref(),
            Self::Rule(rule) => Some(&rule.nodes),
            Self::Declaration(_) | Self::Comment(_) => None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        match self {
            Self::AtRule(n) => &n.source,
            Self::Rule(n) => &n.source,
            Self::Declaration(n) => &n.source,
            Self::Comment(n) => &n.source,
        }
    }

    /// Whitespace preceding the node.
    #[must_use]
    pub fn before(&self) -> &str {
        match self {
            Self::AtRule(n) => &n.before,
            Self::Rule(n) => &n.before,
            Self::Declaration(n) => &n.before,
            Self::Comment(n) => &n.before,
        }
    }
}

impl Declaration {
    /// Whether this declares a LESS variable (`@name: value`).
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.prop.starts_with('@')
    }

    /// Column where the value starts, assuming the property, separator,
    /// and value share a line.
    #[must_use]
    pub fn value_column(&self) -> usize {
        self.source.start.column + self.prop.chars().count() + self.between.chars().count()
    }
}

impl Comment {
    /// The comment exactly as written, markers included.
    #[must_use]
    pub fn raw(&self) -> String {
        if self.inline {
            format!("//{}{}{}", self.left, self.text, self.right)
        } else {
            format!("/*{}{}{}*/", self.left, self.text, self.right)
        }
    }
}
