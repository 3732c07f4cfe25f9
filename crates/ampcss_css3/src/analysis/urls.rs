use crate::errors::{ErrorToken, ValidationErrorCode};
use crate::node::{AtRule, Declaration, QualifiedRule, Stylesheet};
use crate::tokenizer::{Token, TokenType};
use crate::visitor::RuleVisitor;
use ampcss_shared::char_stream::Location;
use serde::Serialize;

/// A url found in a declaration value, either as `url(x)` or as `url("x")`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCssUrl {
    /// The decoded url, without quotes or escapes
    pub url: String,
    /// Name of the enclosing at-rule, or an empty string when the url is not inside one
    pub at_rule_scope: String,
    pub location: Location,
}

struct UrlFunctionVisitor<'e> {
    urls: &'e mut Vec<ParsedCssUrl>,
    errors: &'e mut Vec<ErrorToken>,
    at_rule_scope: String,
}

impl<'e> UrlFunctionVisitor<'e> {
    fn new(urls: &'e mut Vec<ParsedCssUrl>, errors: &'e mut Vec<ErrorToken>) -> Self {
        Self {
            urls,
            errors,
            at_rule_scope: String::new(),
        }
    }

    fn parsed(&self, url: &str, location: Location) -> ParsedCssUrl {
        ParsedCssUrl {
            url: url.to_string(),
            at_rule_scope: self.at_rule_scope.clone(),
            location,
        }
    }
}

/// Parses `url( <string> )` starting at the function token at `index`. Returns the url and
/// the index just past the closing parenthesis.
fn parse_url_function(tokens: &[Token], index: usize) -> Option<(String, usize)> {
    let mut index = index + 1;

    let skip_whitespace = |mut index: usize| {
        while tokens.get(index).is_some_and(Token::is_whitespace) {
            index += 1;
        }
        index
    };

    index = skip_whitespace(index);
    let url = match tokens.get(index).map(|t| &t.token_type) {
        Some(TokenType::QuotedString(url)) => url.clone(),
        _ => return None,
    };

    index = skip_whitespace(index + 1);
    match tokens.get(index).map(|t| &t.token_type) {
        Some(TokenType::RParen) => Some((url, index + 1)),
        _ => None,
    }
}

impl<'a> RuleVisitor<'a> for UrlFunctionVisitor<'_> {
    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        self.at_rule_scope = at_rule.name.clone();
    }

    fn leave_at_rule(&mut self, _at_rule: &'a AtRule) {
        self.at_rule_scope.clear();
    }

    fn visit_qualified_rule(&mut self, _rule: &'a QualifiedRule) {
        self.at_rule_scope.clear();
    }

    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        let tokens = &declaration.value;
        let mut index = 0;

        while let Some(token) = tokens.get(index) {
            match &token.token_type {
                TokenType::Url(url) => {
                    let parsed = self.parsed(url, token.location);
                    self.urls.push(parsed);
                    index += 1;
                }
                TokenType::Function(_) if token.is_function("url") => match parse_url_function(tokens, index) {
                    Some((url, next)) => {
                        let parsed = self.parsed(&url, token.location);
                        self.urls.push(parsed);
                        index = next;
                    }
                    None => {
                        self.errors
                            .push(ErrorToken::with_style_context(ValidationErrorCode::CssSyntaxBadUrl, token.location));
                        return;
                    }
                },
                _ => index += 1,
            }
        }
    }
}

/// Collects the urls referenced in the stylesheet. When a malformed `url(` function is found,
/// `CSS_SYNTAX_BAD_URL` is recorded and none of the urls of this stylesheet are kept.
pub fn extract_urls(stylesheet: &Stylesheet, urls: &mut Vec<ParsedCssUrl>, errors: &mut Vec<ErrorToken>) {
    let urls_len = urls.len();
    let errors_len = errors.len();

    let mut visitor = UrlFunctionVisitor::new(urls, errors);
    stylesheet.accept(&mut visitor);

    if errors.len() != errors_len {
        urls.truncate(urls_len);
    }
}

/// Same as [`extract_urls`], for a single declaration of a `style` attribute
pub fn extract_urls_from_declaration(
    declaration: &Declaration,
    urls: &mut Vec<ParsedCssUrl>,
    errors: &mut Vec<ErrorToken>,
) {
    let urls_len = urls.len();
    let errors_len = errors.len();

    let mut visitor = UrlFunctionVisitor::new(urls, errors);
    declaration.accept(&mut visitor);

    if errors.len() != errors_len {
        urls.truncate(urls_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_config::ParserConfig;
    use crate::Css3;

    fn urls_of(css: &str) -> (Vec<ParsedCssUrl>, Vec<ErrorToken>) {
        let result = Css3::parse_str(css, &ParserConfig::default());
        assert!(result.errors.is_empty(), "unexpected parse errors: {:?}", result.errors);

        let mut urls = Vec::new();
        let mut errors = Vec::new();
        extract_urls(&result.stylesheet, &mut urls, &mut errors);
        (urls, errors)
    }

    #[test]
    fn test_extract_urls() {
        let (urls, errors) = urls_of(
            "a { background: url(a.png), url( \"b.png\" ) } @font-face { src: url('c.woff') } b { x: URL(d) }",
        );
        assert!(errors.is_empty());

        let found: Vec<(&str, &str)> = urls.iter().map(|u| (u.url.as_str(), u.at_rule_scope.as_str())).collect();
        assert_eq!(
            found,
            vec![("a.png", ""), ("b.png", ""), ("c.woff", "font-face"), ("d", "")]
        );
        assert_eq!(urls[0].location.column, 16);
        assert_eq!(urls[1].location.column, 28);
    }

    #[test]
    fn test_scope_is_reset_by_qualified_rules() {
        let (urls, _) = urls_of("@media x { a { b: url(x.png) } }");
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].at_rule_scope, "");
    }

    #[test]
    fn test_bad_url_discards_urls() {
        let (urls, errors) = urls_of("a { b: url(a.png) } c { d: url(\"x\" y) } e { f: url(z.png) }");
        assert!(urls.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ValidationErrorCode::CssSyntaxBadUrl);
        assert_eq!(errors[0].location.column, 27);
    }

    #[test]
    fn test_url_function_with_trailing_tokens() {
        let (urls, errors) = urls_of("a { b: url(\"x\" 1px) }");
        assert!(urls.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].params, vec!["style".to_string()]);
    }

    #[test]
    fn test_extract_urls_from_declaration() {
        let inline = Css3::parse_inline_style(crate::tokenize("background: url(x.png)"));
        let mut urls = Vec::new();
        let mut errors = Vec::new();
        extract_urls_from_declaration(&inline.declarations[0], &mut urls, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].url, "x.png");
    }
}
