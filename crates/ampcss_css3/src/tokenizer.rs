use crate::errors::ValidationErrorCode;
use crate::serializer;
use crate::unicode::{escaped_char, is_ident_char, is_ident_start, is_non_printable, UnicodeChar};
use ampcss_shared::char_stream::Character::{Ch, StreamEnd};
use ampcss_shared::char_stream::{CharStream, Character, Location, CHAR_CR, CHAR_LF};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub type Number = f64;

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// A function token. The value does not include the opening parenthesis.
    Function(String),
    /// An unquoted `url(...)`. The value is the decoded url.
    Url(String),
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram).
    /// Runs of whitespace are collapsed into a single token.
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// The value does not include the `#` marker.
    IDHash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    /// A `<!--` `<CDO-token>`
    Cdo,
    /// A `-->` `<CDC-token>`
    Cdc,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `||`
    Column,
    /// A comment, including the `/*` and `*/` markers
    Comment(String),
    /// Malformed input. The token covers the text that could not be tokenized.
    Error(ValidationErrorCode),
    /// A `<EOF-token>`
    Eof,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the first character of the token
    pub location: Location,
    /// Byte offset just past the last character of the token
    pub end: usize,
}

impl Token {
    /// Returns a new token for the given type on the given location
    pub fn new(token_type: TokenType, location: Location, end: usize) -> Token {
        Token {
            token_type,
            location,
            end,
        }
    }

    /// Returns an EOF token that covers no text at the given location
    pub fn new_eof(location: Location) -> Token {
        Token::new(TokenType::Eof, location, location.offset)
    }

    /// Byte range of the source text this token was created from
    pub fn span(&self) -> Range<usize> {
        self.location.offset..self.end
    }

    /// Returns a copy of this token with the given type, keeping its position
    pub fn copy_pos_to(&self, token_type: TokenType) -> Token {
        Token::new(token_type, self.location, self.end)
    }

    /// String payload of the token, if it carries one
    pub fn value(&self) -> Option<&str> {
        match &self.token_type {
            TokenType::AtKeyword(val)
            | TokenType::Ident(val)
            | TokenType::Function(val)
            | TokenType::Url(val)
            | TokenType::QuotedString(val)
            | TokenType::Hash(val)
            | TokenType::IDHash(val) => Some(val),
            _ => None,
        }
    }

    /// Returns true when this is an ident that matches `value` ASCII case-insensitively
    pub fn ascii_match(&self, value: &str) -> bool {
        matches!(&self.token_type, TokenType::Ident(val) if val.eq_ignore_ascii_case(value))
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.token_type, TokenType::Comment(_))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.token_type, TokenType::Error(_))
    }

    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }

    pub fn is_function(&self, name: &str) -> bool {
        matches!(&self.token_type, TokenType::Function(val) if val.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serializer::serialize_token(self))
    }
}

/// CSS Tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
///
/// The tokenizer never drops input: every character ends up in exactly one token, so the
/// spans of all tokens together reconstruct the source text. Malformed input becomes an
/// `Error` token covering the offending text.
pub struct Tokenizer<'src> {
    stream: CharStream<'src>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a new tokenizer for the given css. The first character is reported at the
    /// given location, which does not have to be 1:0.
    pub fn new(css: &'src str, location: Location) -> Self {
        Self {
            stream: CharStream::new(css, location),
        }
    }

    /// Consumes the next token and returns it. Once the stream is exhausted, EOF tokens are
    /// returned.
    pub fn consume(&mut self) -> Token {
        let token = self.consume_token();
        log::trace!("{:?} {:?}", token.location, token.token_type);

        token
    }

    /// Consumes all tokens. The returned list always ends with a single EOF token.
    pub fn consume_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.consume();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn token(&self, token_type: TokenType, location: Location) -> Token {
        Token::new(token_type, location, self.stream.byte_offset())
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        let loc = self.stream.location();

        if self.current_char() == Ch('/') && self.stream.look_ahead(1) == Ch('*') {
            return self.consume_comment(loc);
        }

        let current = self.current_char();
        match current {
            StreamEnd => self.token(TokenType::Eof, loc),
            c if c.is_whitespace() => {
                self.consume_whitespace();
                self.token(TokenType::Whitespace, loc)
            }
            Ch(c @ ('"' | '\'')) => self.consume_string_token(c, loc),
            Ch('#') => {
                // consume '#'
                self.next_char();

                if matches!(self.current_char(), Ch(c) if is_ident_char(c)) || self.is_start_of_escape(0) {
                    let is_id = self.would_start_ident(0);
                    let name = self.consume_ident();
                    let token_type = if is_id {
                        TokenType::IDHash(name)
                    } else {
                        TokenType::Hash(name)
                    };
                    return self.token(token_type, loc);
                }

                self.token(TokenType::Delim('#'), loc)
            }
            Ch('$') => self.consume_match_token('$', TokenType::SuffixMatch, loc),
            Ch('*') => self.consume_match_token('*', TokenType::SubstringMatch, loc),
            Ch('^') => self.consume_match_token('^', TokenType::PrefixMatch, loc),
            Ch('~') => self.consume_match_token('~', TokenType::IncludeMatch, loc),
            Ch('|') => {
                // consume '|'
                self.next_char();
                match self.current_char() {
                    Ch('=') => {
                        self.next_char();
                        self.token(TokenType::DashMatch, loc)
                    }
                    Ch('|') => {
                        self.next_char();
                        self.token(TokenType::Column, loc)
                    }
                    _ => self.token(TokenType::Delim('|'), loc),
                }
            }
            Ch('(') => self.consume_single(TokenType::LParen, loc),
            Ch(')') => self.consume_single(TokenType::RParen, loc),
            Ch('[') => self.consume_single(TokenType::LBracket, loc),
            Ch(']') => self.consume_single(TokenType::RBracket, loc),
            Ch('{') => self.consume_single(TokenType::LCurly, loc),
            Ch('}') => self.consume_single(TokenType::RCurly, loc),
            Ch(',') => self.consume_single(TokenType::Comma, loc),
            Ch(':') => self.consume_single(TokenType::Colon, loc),
            Ch(';') => self.consume_single(TokenType::Semicolon, loc),
            Ch(c @ ('+' | '.')) => {
                if self.would_start_number(0) {
                    return self.consume_numeric_token(loc);
                }

                self.consume_single(TokenType::Delim(c), loc)
            }
            Ch('-') => {
                if self.would_start_number(0) {
                    return self.consume_numeric_token(loc);
                }

                if self.look_ahead_slice(3) == "-->" {
                    self.consume_chars(3);
                    return self.token(TokenType::Cdc, loc);
                }

                if self.would_start_ident(0) {
                    return self.consume_ident_like_seq(loc);
                }

                self.consume_single(TokenType::Delim('-'), loc)
            }
            Ch('<') => {
                if self.look_ahead_slice(4) == "<!--" {
                    self.consume_chars(4);
                    return self.token(TokenType::Cdo, loc);
                }

                self.consume_single(TokenType::Delim('<'), loc)
            }
            Ch('@') => {
                // consume '@'
                self.next_char();

                if self.would_start_ident(0) {
                    let keyword = self.consume_ident();
                    return self.token(TokenType::AtKeyword(keyword), loc);
                }

                self.token(TokenType::Delim('@'), loc)
            }
            Ch('\\') => {
                if self.is_start_of_escape(0) {
                    return self.consume_ident_like_seq(loc);
                }

                // a backslash followed by a newline. Only the backslash is consumed.
                self.consume_single(TokenType::Error(ValidationErrorCode::CssSyntaxStrayTrailingBackslash), loc)
            }
            c if c.is_numeric() => self.consume_numeric_token(loc),
            Ch(c) if is_ident_start(c) => self.consume_ident_like_seq(loc),
            Ch(c) => self.consume_single(TokenType::Delim(c), loc),
        }
    }

    fn consume_single(&mut self, token_type: TokenType, loc: Location) -> Token {
        self.next_char();
        self.token(token_type, loc)
    }

    /// Consumes `c=` as a match token, or `c` as a delimiter
    fn consume_match_token(&mut self, c: char, token_type: TokenType, loc: Location) -> Token {
        // consume the first char
        self.next_char();

        if self.current_char() == Ch('=') {
            self.next_char();
            return self.token(token_type, loc);
        }

        self.token(TokenType::Delim(c), loc)
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comment(&mut self, loc: Location) -> Token {
        let start = self.stream.byte_offset();

        // consume '/*'
        self.consume_chars(2);

        loop {
            if self.stream.eof() {
                return self.token(TokenType::Error(ValidationErrorCode::CssSyntaxUnterminatedComment), loc);
            }

            if self.current_char() == Ch('*') && self.stream.look_ahead(1) == Ch('/') {
                // consume '*/'
                self.consume_chars(2);
                break;
            }

            self.next_char();
        }

        let comment = self.stream.slice(start, self.stream.byte_offset()).to_string();
        self.token(TokenType::Comment(comment), loc)
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self, loc: Location) -> Token {
        let value = self.consume_number();

        if self.would_start_ident(0) {
            let unit = self.consume_ident();
            return self.token(TokenType::Dimension { value, unit }, loc);
        }

        if self.current_char() == Ch('%') {
            // consume '%'
            self.next_char();
            return self.token(TokenType::Percentage(value), loc);
        }

        self.token(TokenType::Number(value), loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or an error token when a newline is found before the
    /// closing quote. The newline itself is left in the stream.
    fn consume_string_token(&mut self, ending: char, loc: Location) -> Token {
        // consume the opening quote
        self.next_char();

        let mut value = String::new();

        loop {
            match self.current_char() {
                // eof: the string is returned as-is
                StreamEnd => return self.token(TokenType::QuotedString(value), loc),
                Ch(c) if c == ending => {
                    self.next_char();
                    return self.token(TokenType::QuotedString(value), loc);
                }
                c if c.is_newline() => {
                    return self.token(TokenType::Error(ValidationErrorCode::CssSyntaxUnterminatedString), loc);
                }
                Ch('\\') => {
                    let next = self.stream.look_ahead(1);
                    if next == StreamEnd {
                        // consume '\'
                        self.next_char();
                    } else if next.is_newline() {
                        // escaped newline: consume both the '\' and the newline
                        self.next_char();
                        self.consume_newline();
                    } else {
                        value.push(self.consume_escaped_token());
                    }
                }
                Ch(c) => {
                    self.next_char();
                    value.push(replace_null(c));
                }
            }
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut repr = String::new();

        if matches!(self.current_char(), Ch('+' | '-')) {
            repr.push(self.next_char().into());
        }

        repr.push_str(&self.consume_digits());

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            repr.push_str(&self.consume_chars(2));
            repr.push_str(&self.consume_digits());
        }

        let c1 = self.stream.look_ahead(0);
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('e' | 'E')) && (c2.is_numeric() || (matches!(c2, Ch('+' | '-')) && c3.is_numeric())) {
            repr.push(self.next_char().into());
            repr.push(self.next_char().into());
            repr.push_str(&self.consume_digits());
        }

        // out of range values are clamped so they stay numbers when serialized
        let value: Number = repr.parse().unwrap_or_default();
        value.clamp(Number::MIN, Number::MAX)
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns: `<ident-token>`, `<function-token>`, `<url-token>`, or an error token for a bad url.
    fn consume_ident_like_seq(&mut self, loc: Location) -> Token {
        let value = self.consume_ident();

        if value.eq_ignore_ascii_case("url") && self.current_char() == Ch('(') {
            // consume '('
            self.next_char();

            // keep at most one whitespace in front of a possible quote
            while self.current_char().is_whitespace() && self.stream.look_ahead(1).is_whitespace() {
                self.next_char();
            }

            let quote_follows = |c: Character| matches!(c, Ch('"' | '\''));
            if quote_follows(self.current_char())
                || (self.current_char().is_whitespace() && quote_follows(self.stream.look_ahead(1)))
            {
                return self.token(TokenType::Function(value), loc);
            }

            return self.consume_url(loc);
        }

        if self.current_char() == Ch('(') {
            // consume '('
            self.next_char();
            return self.token(TokenType::Function(value), loc);
        }

        self.token(TokenType::Ident(value), loc)
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or an error token for a bad url
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut url = String::new();

        self.consume_whitespace();

        loop {
            match self.current_char() {
                StreamEnd => break,
                Ch(')') => {
                    // consume ')'
                    self.next_char();
                    break;
                }
                c if c.is_whitespace() => {
                    self.consume_whitespace();
                    match self.current_char() {
                        StreamEnd => break,
                        Ch(')') => {
                            self.next_char();
                            break;
                        }
                        _ => return self.bad_url(loc),
                    }
                }
                Ch('"' | '\'' | '(') => return self.bad_url(loc),
                Ch(c) if is_non_printable(c) => return self.bad_url(loc),
                Ch('\\') => {
                    if !self.is_start_of_escape(0) {
                        return self.bad_url(loc);
                    }
                    url.push(self.consume_escaped_token());
                }
                Ch(c) => {
                    self.next_char();
                    url.push(c);
                }
            }
        }

        self.token(TokenType::Url(url), loc)
    }

    fn bad_url(&mut self, loc: Location) -> Token {
        self.consume_remnants_of_bad_url();
        self.token(TokenType::Error(ValidationErrorCode::CssSyntaxBadUrl), loc)
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Used is to consume enough of the input stream to reach a recovery point where normal tokenizing can resume.
    fn consume_remnants_of_bad_url(&mut self) {
        loop {
            match self.current_char() {
                StreamEnd => break,
                Ch(')') => {
                    // recovery point
                    self.next_char();
                    break;
                }
                _ if self.is_start_of_escape(0) => {
                    self.consume_escaped_token();
                }
                _ => {
                    self.next_char();
                }
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    fn consume_escaped_token(&mut self) -> char {
        // consume '\'
        self.next_char();

        if self.stream.eof() {
            return UnicodeChar::REPLACEMENT_CHARACTER;
        }

        let mut hex = String::new();
        while hex.len() < 6 && matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) {
            hex.push(self.next_char().into());
        }

        if hex.is_empty() {
            return replace_null(self.next_char().into());
        }

        // a single whitespace after the hex digits belongs to the escape
        if self.current_char().is_newline() {
            self.consume_newline();
        } else if self.current_char().is_whitespace() {
            self.next_char();
        }

        escaped_char(u32::from_str_radix(&hex, 16).unwrap_or_default())
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Caller should ensure that the stream starts with an ident sequence before calling this
    /// algorithm.
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            match self.current_char() {
                Ch(c) if is_ident_char(c) => {
                    self.next_char();
                    value.push(c);
                }
                _ => break,
            }
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while self.current_char().is_numeric() {
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_chars(&mut self, len: usize) -> String {
        let mut value = String::new();

        for _ in 0..len {
            match self.next_char() {
                Ch(c) => value.push(c),
                StreamEnd => break,
            }
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// Consumes a single newline, where `\r\n` counts as one
    fn consume_newline(&mut self) {
        if self.current_char() == Ch(CHAR_CR) && self.stream.look_ahead(1) == Ch(CHAR_LF) {
            self.next_char();
        }
        self.next_char();
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_start_of_escape(&self, start: usize) -> bool {
        self.stream.look_ahead(start) == Ch('\\') && !self.stream.look_ahead(start + 1).is_newline()
    }

    /// 4.3.9. [Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn would_start_ident(&self, start: usize) -> bool {
        match self.stream.look_ahead(start) {
            Ch('-') => match self.stream.look_ahead(start + 1) {
                Ch('-') => true,
                Ch(c) if is_ident_start(c) => true,
                _ => self.is_start_of_escape(start + 1),
            },
            Ch('\\') => self.is_start_of_escape(start),
            Ch(c) => is_ident_start(c),
            StreamEnd => false,
        }
    }

    /// 4.3.10. [Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self, start: usize) -> bool {
        let first = self.stream.look_ahead(start);
        let second = self.stream.look_ahead(start + 1);
        let third = self.stream.look_ahead(start + 2);

        match first {
            // e.g. +1, -1, +.1, -0.01
            Ch('+' | '-') => second.is_numeric() || (second == Ch('.') && third.is_numeric()),
            Ch('.') => second.is_numeric(),
            c => c.is_numeric(),
        }
    }

    fn current_char(&self) -> Character {
        self.stream.read()
    }

    fn next_char(&mut self) -> Character {
        self.stream.read_and_next()
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                StreamEnd => break,
            }
        }

        s
    }
}

fn replace_null(c: char) -> char {
    if c == UnicodeChar::NULL {
        UnicodeChar::REPLACEMENT_CHARACTER
    } else {
        c
    }
}
