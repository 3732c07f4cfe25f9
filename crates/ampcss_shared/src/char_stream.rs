use core::fmt::{Debug, Display, Formatter};
use serde::Serialize;
use std::fmt;

pub const CHAR_LF: char = '\u{000A}';
pub const CHAR_CR: char = '\u{000D}';
pub const CHAR_FF: char = '\u{000C}';

/// Characters can be either a normal character or the end of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// There are no more characters in the stream
    StreamEnd,
}

use Character::{Ch, StreamEnd};

impl Character {
    /// Returns true when the character is a CSS whitespace (space, tab or any newline)
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(' ' | '\t')) || self.is_newline()
    }

    /// Returns true when the character is a CSS newline (LF, CR or FF)
    pub fn is_newline(&self) -> bool {
        matches!(self, Ch(CHAR_LF | CHAR_CR | CHAR_FF))
    }

    /// Returns true when the character is an ASCII digit
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }
}

impl From<Character> for char {
    fn from(c: Character) -> Self {
        match c {
            Ch(c) => c,
            StreamEnd => '\0',
        }
    }
}

impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
        }
    }
}

/// Location holds the start position of the given element in the data source
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 0
    pub column: usize,
    /// Byte offset into the source text, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 0
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A character stream over a borrowed string that keeps track of line and column
/// information while reading. The stream can start at any location, which is used
/// when the text is embedded in another document (for instance a `<style>` element).
///
/// `\r\n`, `\r` and form feeds each count as a single line break, but offsets always
/// address the original text so slices stay exact.
pub struct CharStream<'src> {
    /// The source text
    source: &'src str,
    /// All characters together with their byte offset into the source
    chars: Vec<(usize, char)>,
    /// Index of the next character to read
    position: usize,
    /// Location of the next character to read
    location: Location,
}

impl<'src> CharStream<'src> {
    /// Creates a new stream. Line and column of `start` are used as the location of the
    /// first character; its offset is ignored as offsets are relative to the source.
    pub fn new(source: &'src str, start: Location) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            position: 0,
            location: Location::new(start.line, start.column, 0),
        }
    }

    /// Returns the character at `offset` characters from the current position
    pub fn look_ahead(&self, offset: usize) -> Character {
        match self.chars.get(self.position + offset) {
            Some((_, c)) => Ch(*c),
            None => StreamEnd,
        }
    }

    /// Returns the current character without consuming it
    pub fn read(&self) -> Character {
        self.look_ahead(0)
    }

    /// Consumes the current character and returns it
    pub fn read_and_next(&mut self) -> Character {
        let c = self.read();
        if let Ch(ch) = c {
            self.advance_location(ch);
            self.position += 1;
            self.location.offset = self.byte_offset();
        }

        c
    }

    fn advance_location(&mut self, ch: char) {
        match ch {
            // a CR directly followed by a LF is a single line break, counted on the LF
            CHAR_CR if self.look_ahead(1) == Ch(CHAR_LF) => {
                self.location.column += 1;
            }
            CHAR_LF | CHAR_CR | CHAR_FF => {
                self.location.line += 1;
                self.location.column = 0;
            }
            _ => {
                self.location.column += 1;
            }
        }
    }

    /// Returns true when all characters have been consumed
    pub fn eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Location of the next character
    pub fn location(&self) -> Location {
        self.location
    }

    /// Byte offset of the next character into the source
    pub fn byte_offset(&self) -> usize {
        match self.chars.get(self.position) {
            Some((offset, _)) => *offset,
            None => self.source.len(),
        }
    }

    /// Returns the source text between two byte offsets
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        self.source.get(start..end).unwrap_or_default()
    }

    /// Returns the complete source text
    pub fn source(&self) -> &'src str {
        self.source
    }
}
