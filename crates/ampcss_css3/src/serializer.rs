//! Serializes tokens and parsed stylesheets back to CSS text.
//!
//! The output is not meant to look like the input: it is a compact canonical form that
//! parses back into the same structure. Where two tokens would otherwise merge into a
//! different token, an empty `/**/` comment is placed between them.
use crate::node::{AtRule, Declaration, QualifiedRule, Rule, Stylesheet};
use crate::tokenizer::{Token, TokenType};
use crate::unicode::{is_ident_char, is_non_printable};
use itertools::Itertools;
use std::fmt::Write;

/// Serializes a single token
pub fn serialize_token(token: &Token) -> String {
    match &token.token_type {
        TokenType::AtKeyword(val) => format!("@{}", serialize_ident(val)),
        TokenType::Ident(val) => serialize_ident(val),
        TokenType::Function(val) => format!("{}(", serialize_ident(val)),
        TokenType::Url(val) => format!("url({})", serialize_url(val)),
        TokenType::Dimension { value, unit } => format!("{}{}", value, serialize_unit(unit)),
        TokenType::Percentage(val) => format!("{val}%"),
        TokenType::Number(val) => val.to_string(),
        TokenType::QuotedString(val) => serialize_string(val),
        TokenType::Whitespace => " ".into(),
        TokenType::Hash(val) => format!("#{}", serialize_name(val)),
        TokenType::IDHash(val) => format!("#{}", serialize_ident(val)),
        TokenType::Delim(c) => c.to_string(),
        TokenType::LCurly => "{".into(),
        TokenType::RCurly => "}".into(),
        TokenType::LParen => "(".into(),
        TokenType::RParen => ")".into(),
        TokenType::LBracket => "[".into(),
        TokenType::RBracket => "]".into(),
        TokenType::Comma => ",".into(),
        TokenType::Colon => ":".into(),
        TokenType::Semicolon => ";".into(),
        TokenType::Cdo => "<!--".into(),
        TokenType::Cdc => "-->".into(),
        TokenType::IncludeMatch => "~=".into(),
        TokenType::DashMatch => "|=".into(),
        TokenType::PrefixMatch => "^=".into(),
        TokenType::SuffixMatch => "$=".into(),
        TokenType::SubstringMatch => "*=".into(),
        TokenType::Column => "||".into(),
        TokenType::Comment(val) => val.clone(),
        TokenType::Error(_) | TokenType::Eof => String::new(),
    }
}

/// Serializes a list of tokens, separating tokens that would merge when read back
pub fn serialize_tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;

    for token in tokens {
        if let Some(prev) = prev {
            if needs_separator(prev, token) {
                out.push_str("/**/");
            }
        }
        out.push_str(&serialize_token(token));
        prev = Some(token);
    }

    out
}

fn needs_separator(prev: &Token, next: &Token) -> bool {
    let continues_ident = matches!(
        next.token_type,
        TokenType::Ident(_)
            | TokenType::Function(_)
            | TokenType::Url(_)
            | TokenType::Number(_)
            | TokenType::Percentage(_)
            | TokenType::Dimension { .. }
            | TokenType::Delim('-')
            | TokenType::Cdc
    );
    let is_numeric = matches!(
        next.token_type,
        TokenType::Number(_) | TokenType::Percentage(_) | TokenType::Dimension { .. }
    );

    match prev.token_type {
        TokenType::Ident(_) => continues_ident || next.token_type == TokenType::LParen,
        TokenType::AtKeyword(_) | TokenType::Hash(_) | TokenType::IDHash(_) | TokenType::Dimension { .. } => {
            continues_ident
        }
        TokenType::Number(_) => continues_ident || matches!(next.token_type, TokenType::Delim('.' | '%')),
        TokenType::Delim('#' | '@' | '-') => continues_ident,
        TokenType::Delim('.' | '+') => is_numeric,
        TokenType::Delim('/') => next.token_type == TokenType::Delim('*'),
        TokenType::Delim('<') => next.token_type == TokenType::Delim('!'),
        TokenType::Delim('|') => matches!(next.token_type, TokenType::Delim('=' | '|')),
        TokenType::Delim('~' | '^' | '$' | '*') => next.token_type == TokenType::Delim('='),
        _ => false,
    }
}

/// Serializes an identifier, escaping what would not read back as the same identifier
pub fn serialize_ident(value: &str) -> String {
    if value == "-" {
        return "\\-".into();
    }

    let mut out = String::new();
    let first_is_dash = value.starts_with('-');

    for (index, c) in value.chars().enumerate() {
        let starts_with_digit = c.is_ascii_digit() && (index == 0 || (index == 1 && first_is_dash));
        if is_ident_char(c) && !starts_with_digit {
            out.push(c);
        } else {
            escape_char(&mut out, c);
        }
    }

    out
}

/// Serializes a name where any ident code point is allowed at the start
fn serialize_name(value: &str) -> String {
    let mut out = String::new();
    for c in value.chars() {
        if is_ident_char(c) {
            out.push(c);
        } else {
            escape_char(&mut out, c);
        }
    }

    out
}

/// A dimension unit that starts with `e` followed by digits would be read back as an exponent
fn serialize_unit(unit: &str) -> String {
    let mut chars = unit.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();

    let looks_like_exponent = matches!(first, Some('e' | 'E'))
        && (matches!(second, Some(c) if c.is_ascii_digit())
            || (matches!(second, Some('+' | '-')) && matches!(third, Some(c) if c.is_ascii_digit())));

    if looks_like_exponent {
        let mut out = String::new();
        escape_char(&mut out, unit.chars().next().unwrap_or('e'));
        out.push_str(&serialize_name(&unit[1..]));
        return out;
    }

    serialize_ident(unit)
}

/// Serializes a string value including the double quotes
pub fn serialize_string(value: &str) -> String {
    let mut out = String::from("\"");
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || is_non_printable(c) => escape_char(&mut out, c),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

fn serialize_url(value: &str) -> String {
    let mut out = String::new();
    for c in value.chars() {
        match c {
            '"' | '\'' | '(' | ')' | '\\' | ' ' | '\t' | '\n' | '\r' | '\x0C' => {
                escape_char(&mut out, c)
            }
            c if is_non_printable(c) => escape_char(&mut out, c),
            c => out.push(c),
        }
    }

    out
}

/// Writes `c` as a hex escape, always terminated by a space
fn escape_char(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", c as u32);
}

impl Declaration {
    pub fn to_css(&self) -> String {
        let mut out = format!("{}:{}", serialize_ident(&self.name), serialize_tokens(&self.value));
        if self.important {
            out.push_str("!important");
        }
        out
    }
}

fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations.iter().map(|d| d.to_css()).join(";")
}

impl QualifiedRule {
    pub fn to_css(&self) -> String {
        format!(
            "{}{{{}}}",
            serialize_tokens(&self.prelude),
            serialize_declarations(&self.declarations)
        )
    }
}

impl AtRule {
    pub fn to_css(&self) -> String {
        let keyword = Token::new(TokenType::AtKeyword(self.name.clone()), self.location, self.location.offset);
        let head = serialize_tokens(std::iter::once(&keyword).chain(self.prelude.iter()));

        match &self.rules {
            None => format!("{head};"),
            Some(rules) => {
                let mut body = rules.iter().map(|r| r.to_css()).join("");
                if !self.declarations.is_empty() {
                    if !body.is_empty() {
                        body.push(';');
                    }
                    body.push_str(&serialize_declarations(&self.declarations));
                }
                format!("{head}{{{body}}}")
            }
        }
    }
}

impl Rule {
    pub fn to_css(&self) -> String {
        match self {
            Rule::Qualified(rule) => rule.to_css(),
            Rule::At(rule) => rule.to_css(),
        }
    }
}

impl Stylesheet {
    /// Renders the stylesheet as canonical CSS text
    pub fn to_css(&self) -> String {
        self.rules.iter().map(|r| r.to_css()).join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use test_case::test_case;

    #[test_case("a", "a" ; "plain")]
    #[test_case("1a", "\\31 a" ; "leading digit")]
    #[test_case("-1a", "-\\31 a" ; "dash digit")]
    #[test_case("-", "\\-" ; "lone dash")]
    #[test_case("a b", "a\\20 b" ; "space")]
    fn test_serialize_ident(value: &str, expected: &str) {
        assert_eq!(serialize_ident(value), expected);
    }

    #[test]
    fn test_serialize_string() {
        assert_eq!(serialize_string("a\"b\\c\n"), "\"a\\\"b\\\\c\\a \"");
    }

    #[test]
    fn test_separators() {
        let tokens = tokenize("a/**/b 1/**/px");
        let without_comments: Vec<&Token> = tokens.iter().filter(|t| !t.is_comment()).collect();
        assert_eq!(serialize_tokens(without_comments), "a/**/b 1/**/px");
    }

    #[test]
    fn test_unit_like_exponent() {
        let tokens = tokenize("1\\65 3x");
        assert_eq!(
            tokens[0].token_type,
            TokenType::Dimension {
                value: 1.0,
                unit: "e3x".into()
            }
        );
        assert_eq!(serialize_token(&tokens[0]), "1\\65 3x");
    }

    #[test]
    fn test_huge_numbers_read_back_as_numbers() {
        let tokens = tokenize("1e400 2e999px");
        let serialized = serialize_token(&tokens[0]);
        assert!(!serialized.contains("inf"));
        assert_eq!(tokenize(&serialized)[0].token_type, TokenType::Number(f64::MAX));

        let serialized = serialize_token(&tokens[2]);
        assert!(serialized.ends_with("px"));
        assert_eq!(tokenize(&serialized)[0].token_type, tokens[2].token_type);
    }
}
