use thiserror::Error;

/// A syntax error raised while feeding characters to the parser, together
/// with the position of the offending character.
///
/// Positions are 1-based. Errors raised at end of input point one column
/// past the last character written.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    /// What went wrong.
    pub source: SyntaxError,
    /// Line of the offending character.
    pub line: usize,
    /// Column of the offending character.
    pub column: usize,
}

impl ParserError {
    /// The underlying syntax error, without position information.
    #[must_use]
    pub fn syntax_error(&self) -> &SyntaxError {
        &self.source
    }
}

/// The kinds of grammar violation the tokenizer and parser report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot start a token, or a structural character
    /// that is not allowed in the current container state.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A keyword (`true`, `false`, `null`) continued with the wrong character.
    #[error("invalid character '{found}' in keyword '{expected}'")]
    InvalidKeyword {
        /// The keyword being matched.
        expected: &'static str,
        /// The character that broke the match.
        found: char,
    },
    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A non-hexadecimal character inside a `\u` escape.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// An unescaped control character inside a string.
    #[error("invalid control character {0:?} in string")]
    ControlCharacterInString(char),
    /// A number continued in a way that cannot form a complete number, such
    /// as `1.` followed by a non-digit.
    #[error("invalid character '{0}' in number")]
    InvalidNumber(char),
    /// Non-whitespace content after the root value closed.
    #[error("unexpected trailing character '{0}'")]
    TrailingCharacter(char),
    /// The input ended while a token or container was still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Input was written after the end of input was signalled.
    #[error("write after end of input")]
    WriteAfterEnd,
    /// An array or object opened inside more enclosing containers than
    /// [`ParserOptions::max_depth`](crate::ParserOptions::max_depth) allows.
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

/// Lifecycle shared by [`JsonBrook`](crate::JsonBrook) and
/// [`Tokenizer`](crate::Tokenizer). A failed stream repeats its first error.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Status {
    #[default]
    Open,
    Ended,
    Failed(ParserError),
}
