use crate::tokenizer::Token;
use ampcss_shared::char_stream::Location;

/// A cursor over a list of tokens. The stream starts before the first token, so the first
/// `consume()` makes the first token current. Reading past the end keeps returning the final
/// EOF token.
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Number of consumed tokens. The current token is at `consumed - 1`.
    consumed: usize,
    eof: Token,
}

impl TokenStream {
    /// Creates a new stream. An EOF token is appended when the list does not already end
    /// with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.is_eof() => last.clone(),
            Some(last) => {
                let eof = Token::new_eof(Location::new(last.location.line, last.location.column, last.end));
                tokens.push(eof.clone());
                eof
            }
            None => {
                let eof = Token::new_eof(Location::default());
                tokens.push(eof.clone());
                eof
            }
        };

        Self {
            tokens,
            consumed: 0,
            eof,
        }
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// Returns the current token
    pub fn current(&self) -> &Token {
        self.token_at(self.consumed.saturating_sub(1))
    }

    /// Returns the token after the current one
    pub fn next(&self) -> &Token {
        self.token_at(self.consumed)
    }

    /// Advances the stream by one token
    pub fn consume(&mut self) {
        if self.consumed <= self.tokens.len() {
            self.consumed += 1;
        }
    }

    /// Moves back one token, so the current token will be consumed again
    pub fn reconsume(&mut self) {
        self.consumed = self.consumed.saturating_sub(1);
    }
}
