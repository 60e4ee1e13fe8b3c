//! Rule configuration: which rules run and with what option.
//!
//! A config is a JSON object mapping rule names to either a boolean or a
//! rule-specific value, the format of `.lesslintrc` files:
//!
//! ```json
//! { "zero-unit": true, "require-after-space": [":"], "hex-color": false }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::rules::REGISTRY;

/// The value configured for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleOption {
    Bool(bool),
    List(Vec<String>),
    Text(String),
}

impl RuleOption {
    /// A rule runs when its option is `true`, a non-empty list, or a
    /// non-empty string.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Bool(on) => *on,
            Self::List(items) => !items.is_empty(),
            Self::Text(text) => !text.is_empty(),
        }
    }

    /// Whether a list option names `item`. `true` selects every item and a
    /// string option is treated as a one-element list.
    #[must_use]
    pub fn includes(&self, item: &str) -> bool {
        match self {
            Self::Bool(on) => *on,
            Self::List(items) => items.iter().any(|i| i == item),
            Self::Text(text) => text == item,
        }
    }
}

/// Classifies a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// The text is not valid JSON.
    Syntax(String),
    /// Valid JSON, but not an object of booleans, strings, or string lists.
    Shape(String),
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(msg) => write!(f, "invalid JSON: {msg}"),
            Self::Shape(msg) => write!(f, "invalid rule options: {msg}"),
        }
    }
}

/// Error produced while reading a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        let kind = if err.is_data() {
            ConfigErrorKind::Shape(err.to_string())
        } else {
            ConfigErrorKind::Syntax(err.to_string())
        };
        Self {
            kind,
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Rule name to option mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    rules: BTreeMap<String, RuleOption>,
}

impl Default for Config {
    /// Every registered rule, enabled with its default option.
    fn default() -> Self {
        let rules = REGISTRY
            .iter()
            .map(|entry| {
                let option = match entry.name {
                    "require-after-space" => list(&[":", ","]),
                    "require-before-space" => list(&["{"]),
                    _ => RuleOption::Bool(true),
                };
                (entry.name.to_owned(), option)
            })
            .collect();
        Self { rules }
    }
}

fn list(items: &[&str]) -> RuleOption {
    RuleOption::List(items.iter().map(|&i| i.to_owned()).collect())
}

impl Config {
    /// A config with no rules at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Parse a JSON object of rule options.
    ///
    /// Unknown rule names are kept; the engine ignores them.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let rules: BTreeMap<String, RuleOption> = serde_json::from_str(text)?;
        Ok(Self { rules })
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Set one rule's option.
    #[must_use]
    pub fn with_rule(mut self, name: &str, option: RuleOption) -> Self {
        self.rules.insert(name.to_owned(), option);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleOption> {
        self.rules.get(name)
    }

    /// Configured rule names in sorted order, known or not.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}
