use crate::errors::{ErrorToken, ValidationErrorCode};
use crate::node::{AtRule, Stylesheet};
use crate::token_stream::TokenStream;
use crate::tokenizer::{Token, TokenType};
use crate::visitor::RuleVisitor;

/// Checks the preludes of `@media` rules against the media query grammar of
/// <https://www.w3.org/TR/css3-mediaqueries/#syntax>
struct MediaQueryVisitor<'e> {
    media_types: &'e mut Vec<Token>,
    media_features: &'e mut Vec<Token>,
    errors: &'e mut Vec<ErrorToken>,
}

impl MediaQueryVisitor<'_> {
    /// The tokenizer collapses whitespace, so there is at most one whitespace token
    fn maybe_consume_whitespace(stream: &mut TokenStream) {
        if stream.current().is_whitespace() {
            stream.consume();
        }
    }

    /// `S* [media_query [ ',' S* media_query ]* ]?`
    fn parse_a_media_query_list(&mut self, stream: &mut TokenStream) -> bool {
        Self::maybe_consume_whitespace(stream);

        if !stream.current().is_eof() {
            if !self.parse_a_media_query(stream) {
                return false;
            }

            while stream.current().token_type == TokenType::Comma {
                stream.consume();
                Self::maybe_consume_whitespace(stream);
                if !self.parse_a_media_query(stream) {
                    return false;
                }
            }
        }

        stream.current().is_eof()
    }

    /// `(expression | [ONLY | NOT]? S* media_type S*) [ AND S* expression ]*`
    fn parse_a_media_query(&mut self, stream: &mut TokenStream) -> bool {
        if stream.current().token_type == TokenType::LParen {
            if !self.parse_a_media_expression(stream) {
                return false;
            }
        } else {
            if stream.current().ascii_match("only") || stream.current().ascii_match("not") {
                stream.consume();
            }
            Self::maybe_consume_whitespace(stream);
            if !self.parse_a_media_type(stream) {
                return false;
            }
            Self::maybe_consume_whitespace(stream);
        }

        while stream.current().ascii_match("and") {
            stream.consume();
            Self::maybe_consume_whitespace(stream);
            if !self.parse_a_media_expression(stream) {
                return false;
            }
        }

        true
    }

    fn parse_a_media_type(&mut self, stream: &mut TokenStream) -> bool {
        if !stream.current().is_ident() {
            return false;
        }

        self.media_types.push(stream.current().clone());
        stream.consume();
        true
    }

    /// `'(' S* media_feature S* [ ':' S* expr ]? ')' S*`
    ///
    /// Media features only accept single values, so the expression is skipped up to the
    /// closing parenthesis.
    fn parse_a_media_expression(&mut self, stream: &mut TokenStream) -> bool {
        if stream.current().token_type != TokenType::LParen {
            return false;
        }
        stream.consume();
        Self::maybe_consume_whitespace(stream);

        if !self.parse_a_media_feature(stream) {
            return false;
        }
        Self::maybe_consume_whitespace(stream);

        if stream.current().token_type == TokenType::Colon {
            stream.consume();
            Self::maybe_consume_whitespace(stream);
            while !stream.current().is_eof() && stream.current().token_type != TokenType::RParen {
                stream.consume();
            }
        }

        if stream.current().token_type != TokenType::RParen {
            return false;
        }
        stream.consume();
        Self::maybe_consume_whitespace(stream);

        true
    }

    fn parse_a_media_feature(&mut self, stream: &mut TokenStream) -> bool {
        if !stream.current().is_ident() {
            return false;
        }

        self.media_features.push(stream.current().clone());
        stream.consume();
        true
    }
}

impl<'a> RuleVisitor<'a> for MediaQueryVisitor<'_> {
    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        if !at_rule.name.eq_ignore_ascii_case("media") {
            return;
        }

        let mut stream = TokenStream::new(at_rule.prelude.clone());
        stream.consume();

        if !self.parse_a_media_query_list(&mut stream) {
            log::debug!("{} malformed media query", at_rule.location);
            self.errors.push(ErrorToken::with_style_context(
                ValidationErrorCode::CssSyntaxMalformedMediaQuery,
                at_rule.location,
            ));
        }
    }
}

/// Parses the media queries of all `@media` rules. Media types and media features are
/// collected as the ident tokens they were found in; every malformed query records
/// `CSS_SYNTAX_MALFORMED_MEDIA_QUERY` at its at-rule.
pub fn parse_media_queries(
    stylesheet: &Stylesheet,
    media_types: &mut Vec<Token>,
    media_features: &mut Vec<Token>,
    errors: &mut Vec<ErrorToken>,
) {
    let mut visitor = MediaQueryVisitor {
        media_types,
        media_features,
        errors,
    };
    stylesheet.accept(&mut visitor);
}
