use crate::errors::ValidationErrorCode;
use crate::parser::MAX_NESTING_DEPTH;
use crate::tokenizer::{Token, TokenType};
use crate::Css3;

/// Returns the closing token type for an opening grouping token
fn mirror(token_type: &TokenType) -> Option<TokenType> {
    match token_type {
        TokenType::LCurly => Some(TokenType::RCurly),
        TokenType::LBracket => Some(TokenType::RBracket),
        TokenType::LParen => Some(TokenType::RParen),
        _ => None,
    }
}

impl Css3<'_> {
    /// Appends the current component value to `tokens`. Blocks and functions are consumed as
    /// a whole. Returns false when the maximum nesting depth is exceeded.
    pub(crate) fn consume_a_component_value(&mut self, tokens: &mut Vec<Token>, depth: usize) -> bool {
        if depth > MAX_NESTING_DEPTH {
            return false;
        }

        let current = self.stream.current();
        if mirror(&current.token_type).is_some() {
            return self.consume_a_simple_block(tokens, depth + 1);
        }
        if matches!(current.token_type, TokenType::Function(_)) {
            return self.consume_a_function(tokens, depth + 1);
        }

        tokens.push(current.clone());
        true
    }

    /// Appends a simple block to `tokens`, including its start token and its end token (or
    /// EOF when the block is not closed)
    fn consume_a_simple_block(&mut self, tokens: &mut Vec<Token>, depth: usize) -> bool {
        if depth > MAX_NESTING_DEPTH {
            return false;
        }

        let start = self.stream.current().clone();
        let Some(end_type) = mirror(&start.token_type) else {
            return false;
        };

        tokens.push(start);
        loop {
            self.stream.consume();
            let current = self.stream.current();
            if current.is_eof() || current.token_type == end_type {
                tokens.push(current.clone());
                return true;
            }

            if !self.consume_a_component_value(tokens, depth + 1) {
                return false;
            }
        }
    }

    /// Appends a function to `tokens`, including the function token and the closing
    /// parenthesis (or EOF)
    fn consume_a_function(&mut self, tokens: &mut Vec<Token>, depth: usize) -> bool {
        if depth > MAX_NESTING_DEPTH {
            return false;
        }

        tokens.push(self.stream.current().clone());
        loop {
            self.stream.consume();
            let current = self.stream.current();
            if matches!(current.token_type, TokenType::Eof | TokenType::RParen) {
                tokens.push(current.clone());
                return true;
            }

            if !self.consume_a_component_value(tokens, depth + 1) {
                return false;
            }
        }
    }

    /// Consumes the simple block that starts at the current token and returns its contents
    /// without the start token. The end token is replaced by an EOF token at its position,
    /// so the contents can be parsed as a stream of their own.
    pub(crate) fn extract_a_simple_block(&mut self) -> Vec<Token> {
        log::trace!("extract_a_simple_block");

        let start = self.stream.current().clone();
        let mut consumed = Vec::new();

        if !self.consume_a_simple_block(&mut consumed, 0) {
            self.add_nesting_error();
        } else if consumed.last().is_some_and(|t| t.is_eof()) {
            self.add_error(ValidationErrorCode::CssSyntaxUnterminatedBlock, start.location);
        }

        let end = match consumed.pop() {
            Some(token) => token.copy_pos_to(TokenType::Eof),
            None => Token::new_eof(start.location),
        };

        let mut contents: Vec<Token> = consumed.into_iter().skip(1).collect();
        contents.push(end);

        contents
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ValidationErrorCode;
    use crate::parser_config::ParserConfig;
    use crate::Css3;
    use test_case::test_case;

    #[test_case("a { color: red }", 0 ; "closed")]
    #[test_case("a { ", 1 ; "unterminated rule")]
    #[test_case("a { color: f(1", 1 ; "unterminated function inside block")]
    #[test_case("@media screen { a { color: red }", 1 ; "unterminated at-rule")]
    #[test_case("@media screen { a { color: red", 2 ; "both unterminated")]
    fn unterminated_blocks(css: &str, expected: usize) {
        let result = Css3::parse_str(css, &ParserConfig::default());
        let count = result
            .errors
            .iter()
            .filter(|e| e.code == ValidationErrorCode::CssSyntaxUnterminatedBlock)
            .count();
        assert_eq!(count, expected);
    }

    #[test]
    fn unterminated_block_location() {
        let result = Css3::parse_str("a { ", &ParserConfig::default());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].location.column, 2);
        assert_eq!(result.stylesheet.rules.len(), 1);
    }

    #[test]
    fn excessive_nesting() {
        let css = format!("a {{ b: {}1{} }}", "(".repeat(60), ")".repeat(60));
        let result = Css3::parse_str(&css, &ParserConfig::default());

        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ValidationErrorCode::CssExcessivelyNested));
    }

    #[test]
    fn nesting_within_bounds() {
        let css = format!("a {{ b: {}1{} }}", "(".repeat(40), ")".repeat(40));
        let result = Css3::parse_str(&css, &ParserConfig::default());

        assert!(result.errors.is_empty());
    }
}
