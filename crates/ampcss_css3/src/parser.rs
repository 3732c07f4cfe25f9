use crate::errors::{ErrorToken, ValidationErrorCode};
use crate::token_stream::TokenStream;
use crate::tokenizer::{Token, TokenType};
use crate::Css3;
use ampcss_shared::char_stream::Location;

mod at_rule;
mod block;
mod declaration;
mod rule;
mod stylesheet;

/// Maximum nesting of blocks and functions. Deeper input is not parsed and records
/// `CSS_EXCESSIVELY_NESTED`.
pub const MAX_NESTING_DEPTH: usize = 100;

impl Css3<'_> {
    /// Records an error with the default `style` context
    fn add_error(&mut self, code: ValidationErrorCode, location: Location) {
        log::debug!("{location} {code}");
        self.errors.push(ErrorToken::with_style_context(code, location));
    }

    fn add_nesting_error(&mut self) {
        let location = self.stream.current().location;
        self.add_error(ValidationErrorCode::CssExcessivelyNested, location);
    }

    /// Parses the tokens of a nested block from their own stream, then continues with the
    /// current stream
    fn with_stream<T>(&mut self, tokens: Vec<Token>, f: impl FnOnce(&mut Self) -> T) -> T {
        let outer = std::mem::replace(&mut self.stream, TokenStream::new(tokens));
        let result = f(self);
        self.stream = outer;

        result
    }

    /// Returns true when the next token ends a declaration
    fn at_declaration_end(&self) -> bool {
        matches!(self.stream.next().token_type, TokenType::Semicolon | TokenType::Eof)
    }
}
