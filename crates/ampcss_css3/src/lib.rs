//! CSS tokenizer, parser and rule visitors used to validate stylesheets against a restricted
//! set of rules.
//!
//! The parser never fails on malformed input. Every problem is recorded as an [`ErrorToken`]
//! with the position of the token that triggered it, and parsing continues with the next rule
//! or declaration.
use crate::errors::ErrorToken;
use crate::node::{Declaration, Stylesheet};
use crate::parser_config::ParserConfig;
use crate::token_stream::TokenStream;
use crate::tokenizer::{Token, TokenType, Tokenizer};
use ampcss_shared::char_stream::Location;

pub mod analysis;
pub mod errors;
pub mod node;
pub mod parser;
pub mod parser_config;
pub mod serializer;
pub mod token_stream;
pub mod tokenizer;
mod unicode;
pub mod visitor;
pub mod walker;

/// Tokenizes the given css. The returned list always ends with an EOF token.
pub fn tokenize(css: &str) -> Vec<Token> {
    tokenize_with_location(css, Location::default())
}

/// Tokenizes the given css, reporting the first character at `location`
pub fn tokenize_with_location(css: &str, location: Location) -> Vec<Token> {
    Tokenizer::new(css, location).consume_all()
}

/// Result of parsing a stylesheet
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub stylesheet: Stylesheet,
    /// Lexical and structural errors in document order
    pub errors: Vec<ErrorToken>,
}

/// Result of parsing the contents of a `style` attribute
#[derive(Debug, Clone)]
pub struct InlineStyle {
    pub declarations: Vec<Declaration>,
    pub errors: Vec<ErrorToken>,
}

/// The CSS3 parser. It works on a list of tokens produced by the tokenizer.
pub struct Css3<'config> {
    /// Tokens that are being parsed. Nested blocks are parsed from their own stream.
    stream: TokenStream,
    /// The parser configuration as given
    config: &'config ParserConfig,
    /// Errors found so far
    errors: Vec<ErrorToken>,
}

impl<'config> Css3<'config> {
    /// Creates a new parser. Error tokens of the tokenizer are moved into the error list and
    /// comments are dropped, so the parser only sees meaningful tokens.
    fn new(tokens: Vec<Token>, config: &'config ParserConfig) -> Self {
        let mut errors = Vec::new();
        let mut parse_tokens = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token.token_type {
                TokenType::Error(code) => errors.push(ErrorToken::with_style_context(code, token.location)),
                TokenType::Comment(_) => {}
                _ => parse_tokens.push(token),
            }
        }

        Self {
            stream: TokenStream::new(parse_tokens),
            config,
            errors,
        }
    }

    /// Parses a list of tokens into a stylesheet
    pub fn parse_stylesheet(tokens: Vec<Token>, config: &ParserConfig) -> ParseResult {
        let mut parser = Css3::new(tokens, config);
        let stylesheet = parser.parse_a_stylesheet();

        ParseResult {
            stylesheet,
            errors: parser.errors,
        }
    }

    /// Tokenizes and parses the given css. Positions start at the location in the config.
    pub fn parse_str(css: &str, config: &ParserConfig) -> ParseResult {
        let tokens = tokenize_with_location(css, config.location);
        Css3::parse_stylesheet(tokens, config)
    }

    /// Parses the tokens of a `style` attribute as a list of declarations
    pub fn parse_inline_style(tokens: Vec<Token>) -> InlineStyle {
        let config = ParserConfig::inline_style();
        let mut parser = Css3::new(tokens, &config);
        let declarations = parser.parse_a_list_of_declarations();

        InlineStyle {
            declarations,
            errors: parser.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorCode;
    use crate::walker::Walker;
    use simple_logger::SimpleLogger;

    #[test]
    fn parse_str_reports_tokenizer_errors() {
        let _ = SimpleLogger::new().with_level(log::LevelFilter::Warn).init();

        let result = Css3::parse_str("a { content: \"open\n; color: red }", &ParserConfig::default());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ValidationErrorCode::CssSyntaxUnterminatedString);
        assert_eq!(result.errors[0].params, vec!["style".to_string()]);
        assert_eq!(result.errors[0].location.line, 1);
        assert_eq!(result.errors[0].location.column, 13);

        let w = Walker::new(&result.stylesheet);
        assert_eq!(
            w.walk_to_string(),
            "[Stylesheet (1)]\n  [Rule] prelude: a\n    [Declaration] property: content important: false\n      [Whitespace]\n      [Whitespace]\n    [Declaration] property: color important: false\n      [Whitespace]\n      [Ident] red\n      [Whitespace]\n"
        );
    }

    #[test]
    fn parse_str_with_host_location() {
        let config = ParserConfig::default().with_location(Location::new(10, 4, 0));
        let result = Css3::parse_str("a {\n  color red }", &config);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ValidationErrorCode::CssSyntaxIncompleteDeclaration);
        assert_eq!(result.errors[0].location.line, 11);
        assert_eq!(result.errors[0].location.column, 2);
        assert_eq!(result.stylesheet.location.line, 10);
        assert_eq!(result.stylesheet.location.column, 4);
    }

    #[test]
    fn parse_inline_style() {
        let tokens = tokenize("color: red; width: 1px !important; @media x {}");
        let inline = Css3::parse_inline_style(tokens);

        assert_eq!(inline.declarations.len(), 2);
        assert_eq!(inline.declarations[0].name, "color");
        assert!(!inline.declarations[0].important);
        assert_eq!(inline.declarations[1].name, "width");
        assert!(inline.declarations[1].important);

        assert_eq!(inline.errors.len(), 1);
        assert_eq!(inline.errors[0].code, ValidationErrorCode::CssSyntaxInvalidAtRule);
        assert_eq!(inline.errors[0].params, vec!["style".to_string(), "media".to_string()]);
    }
}
