use crate::tokenizer::{Token, TokenType};
use ampcss_shared::char_stream::Location;
use serde::Serialize;

/// Root of a parsed stylesheet. Rules are kept in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    /// Location of the first token of the stylesheet
    pub location: Location,
    /// Location of the end of the stylesheet
    pub eof: Location,
}

impl Stylesheet {
    pub fn new(rules: Vec<Rule>, location: Location, eof: Location) -> Self {
        Self { rules, location, eof }
    }
}

/// A top level or nested rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Rule {
    Qualified(QualifiedRule),
    At(AtRule),
}

impl Rule {
    pub fn location(&self) -> Location {
        match self {
            Rule::Qualified(rule) => rule.location,
            Rule::At(rule) => rule.location,
        }
    }
}

/// A rule like `selector { decl; decl; }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedRule {
    /// Selector tokens
    pub prelude: Vec<Token>,
    pub declarations: Vec<Declaration>,
    pub location: Location,
}

impl QualifiedRule {
    pub fn new(location: Location) -> Self {
        Self {
            prelude: Vec::new(),
            declarations: Vec::new(),
            location,
        }
    }

    /// Concatenates the string values of the prelude tokens
    pub fn rule_name(&self) -> String {
        self.prelude.iter().filter_map(|t| t.value()).collect()
    }
}

/// An at-rule like `@media screen { ... }` or `@import "x.css";`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    /// Name without the `@`
    pub name: String,
    pub prelude: Vec<Token>,
    /// Nested rules. `None` when the at-rule has no block.
    pub rules: Option<Vec<Rule>>,
    /// Declarations, for at-rules whose block is parsed as a list of declarations
    pub declarations: Vec<Declaration>,
    pub location: Location,
}

impl AtRule {
    pub fn new(name: &str, location: Location) -> Self {
        Self {
            name: name.to_string(),
            prelude: Vec::new(),
            rules: None,
            declarations: Vec::new(),
            location,
        }
    }

    /// Returns true when the at-rule was followed by a `{}` block
    pub fn has_block(&self) -> bool {
        self.rules.is_some()
    }

    /// Returns the first identifier of the prelude, like the animation name of `@keyframes spin`
    pub fn prelude_ident(&self) -> Option<&str> {
        self.prelude.iter().find_map(|t| match &t.token_type {
            TokenType::Ident(value) => Some(value.as_str()),
            _ => None,
        })
    }
}

/// A `name: value` declaration. A trailing `!important` is not part of the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub value: Vec<Token>,
    pub important: bool,
    pub location: Location,
}

impl Declaration {
    pub fn new(name: &str, location: Location) -> Self {
        Self {
            name: name.to_string(),
            value: Vec::new(),
            important: false,
            location,
        }
    }

    /// If the first token of the value, or the first one after a leading whitespace, is an
    /// identifier, returns its value. Otherwise returns an empty string.
    pub fn first_ident(&self) -> &str {
        let mut tokens = self.value.iter();
        let first = match tokens.next() {
            Some(t) if t.is_whitespace() => tokens.next(),
            t => t,
        };

        match first.map(|t| &t.token_type) {
            Some(TokenType::Ident(value)) => value.as_str(),
            _ => "",
        }
    }
}

/// Strips a vendor prefix (`-webkit-`, `-moz-`, `-ms-`, `-o-` or `-epub-`) from a property or
/// at-rule name
pub fn strip_vendor_prefix(name: &str) -> &str {
    if !name.starts_with('-') {
        return name;
    }

    for prefix in ["-webkit-", "-moz-", "-ms-", "-o-", "-epub-"] {
        if let Some(stripped) = name.strip_prefix(prefix) {
            return stripped;
        }
    }

    name
}

/// Strips a `min-` or `max-` prefix from a media feature name
pub fn strip_min_max(name: &str) -> &str {
    name.strip_prefix("min-")
        .or_else(|| name.strip_prefix("max-"))
        .unwrap_or(name)
}
