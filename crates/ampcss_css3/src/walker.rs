use crate::node::{AtRule, Declaration, QualifiedRule, Rule, Stylesheet};
use crate::serializer::serialize_tokens;
use crate::tokenizer::{Token, TokenType};
use std::io::Write;

/// The walker is used to walk the AST and print it to stdout.
pub struct Walker<'a> {
    root: &'a Stylesheet,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Stylesheet) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = walk_stylesheet(self.root, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = walk_stylesheet(self.root, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn walk_stylesheet(stylesheet: &Stylesheet, f: &mut dyn Write) -> Result<(), std::io::Error> {
    writeln!(f, "[Stylesheet ({})]", stylesheet.rules.len())?;
    for rule in &stylesheet.rules {
        walk_rule(rule, 1, f)?;
    }

    Ok(())
}

fn walk_rule(rule: &Rule, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    match rule {
        Rule::Qualified(rule) => walk_qualified_rule(rule, depth, f),
        Rule::At(rule) => walk_at_rule(rule, depth, f),
    }
}

fn walk_qualified_rule(rule: &QualifiedRule, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    writeln!(f, "{}[Rule] prelude: {}", prefix, serialize_tokens(&rule.prelude).trim())?;
    for declaration in &rule.declarations {
        walk_declaration(declaration, depth + 1, f)?;
    }

    Ok(())
}

fn walk_at_rule(rule: &AtRule, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    let prelude = serialize_tokens(&rule.prelude);
    if prelude.trim().is_empty() {
        writeln!(f, "{}[AtRule] name: {}", prefix, rule.name)?;
    } else {
        writeln!(f, "{}[AtRule] name: {} prelude: {}", prefix, rule.name, prelude.trim())?;
    }

    for nested in rule.rules.iter().flatten() {
        walk_rule(nested, depth + 1, f)?;
    }
    for declaration in &rule.declarations {
        walk_declaration(declaration, depth + 1, f)?;
    }

    Ok(())
}

fn walk_declaration(declaration: &Declaration, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    writeln!(
        f,
        "{}[Declaration] property: {} important: {}",
        prefix, declaration.name, declaration.important
    )?;
    for token in &declaration.value {
        walk_token(token, depth + 1, f)?;
    }

    Ok(())
}

fn walk_token(token: &Token, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match &token.token_type {
        TokenType::Whitespace => writeln!(f, "{}[Whitespace]", prefix),
        TokenType::Ident(value) => writeln!(f, "{}[Ident] {}", prefix, value),
        TokenType::Function(name) => writeln!(f, "{}[Function] {}", prefix, name),
        TokenType::Url(url) => writeln!(f, "{}[Url] {}", prefix, url),
        TokenType::QuotedString(value) => writeln!(f, "{}[String] {}", prefix, value),
        TokenType::Number(value) => writeln!(f, "{}[Number] {}", prefix, value),
        TokenType::Percentage(value) => writeln!(f, "{}[Percentage] {}%", prefix, value),
        TokenType::Dimension { value, unit } => writeln!(f, "{}[Dimension] {}{}", prefix, value, unit),
        TokenType::Hash(value) | TokenType::IDHash(value) => writeln!(f, "{}[Hash] {}", prefix, value),
        TokenType::Delim(c) => writeln!(f, "{}[Delim] {}", prefix, c),
        _ => writeln!(f, "{}[Token] {}", prefix, token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_config::ParserConfig;
    use crate::Css3;

    #[test]
    fn test_walk_values() {
        let result = Css3::parse_str(
            "a{margin:1px 50% -2 #fff url(x) \"s\" f(a),!important}",
            &ParserConfig::default(),
        );
        let w = Walker::new(&result.stylesheet);

        assert_eq!(
            w.walk_to_string(),
            "[Stylesheet (1)]\n  [Rule] prelude: a\n    [Declaration] property: margin important: true\n      [Dimension] 1px\n      [Whitespace]\n      [Percentage] 50%\n      [Whitespace]\n      [Number] -2\n      [Whitespace]\n      [Hash] fff\n      [Whitespace]\n      [Url] x\n      [Whitespace]\n      [String] s\n      [Whitespace]\n      [Function] f\n      [Ident] a\n      [Token] )\n      [Token] ,\n"
        );
    }
}
