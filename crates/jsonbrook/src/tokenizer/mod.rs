//! Lexical analysis: classify characters into JSON tokens.
//!
//! [`start`] classifies a character when no token is in flight. Keyword,
//! string and number tokens span several characters; they are held as a
//! [`PartialToken`] and resumed with their own `step` methods until they
//! complete. The parser drives these pieces directly, storing the partial
//! token inside the tree node it belongs to.
//!
//! [`Tokenizer`] wraps the same pieces into a standalone token stream for
//! callers that want tokens rather than values.
mod keyword;
mod number;
mod string;

use alloc::string::String;

pub(crate) use keyword::KeywordToken;
pub(crate) use number::{NumberStep, NumberToken};
pub(crate) use string::StringToken;

use tracing::debug;

use crate::{ParserError, ParserOptions, SyntaxError, Value, error::Status, position::Position};

/// One of the six structural characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
}

impl Symbol {
    fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '{' => Symbol::BeginObject,
            '}' => Symbol::EndObject,
            '[' => Symbol::BeginArray,
            ']' => Symbol::EndArray,
            ':' => Symbol::Colon,
            ',' => Symbol::Comma,
            _ => return None,
        })
    }

    /// The character this symbol is spelled with.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Symbol::BeginObject => '{',
            Symbol::EndObject => '}',
            Symbol::BeginArray => '[',
            Symbol::EndArray => ']',
            Symbol::Colon => ':',
            Symbol::Comma => ',',
        }
    }
}

/// A complete JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A structural character.
    Symbol(Symbol),
    /// `true`, `false` or `null`.
    Keyword(Value),
    /// A string with its escapes resolved.
    String(String),
    /// A number.
    Number(f64),
}

/// A multi-character token that has started but not completed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PartialToken {
    Keyword(KeywordToken),
    String(StringToken),
    Number(NumberToken),
}

impl PartialToken {
    /// Best-effort value of the token so far.
    pub fn provisional(&self) -> Option<Value> {
        match self {
            PartialToken::Keyword(k) => Some(k.provisional()),
            PartialToken::String(s) => Some(Value::String(s.provisional().into())),
            PartialToken::Number(n) => n.provisional().map(Value::Number),
        }
    }
}

/// What a character means when no token is in flight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Whitespace,
    Symbol(Symbol),
    Partial(PartialToken),
}

/// Classifies `ch` as the first character of a token.
pub(crate) fn start(ch: char, options: &ParserOptions) -> Result<Lexeme, SyntaxError> {
    if options.is_whitespace(ch) {
        return Ok(Lexeme::Whitespace);
    }
    if let Some(symbol) = Symbol::from_char(ch) {
        return Ok(Lexeme::Symbol(symbol));
    }
    if ch == '"' {
        return Ok(Lexeme::Partial(PartialToken::String(StringToken::new())));
    }
    if let Some(keyword) = KeywordToken::new(ch) {
        return Ok(Lexeme::Partial(PartialToken::Keyword(keyword)));
    }
    if let Some(number) = NumberToken::new(ch) {
        return Ok(Lexeme::Partial(PartialToken::Number(number)));
    }
    Err(SyntaxError::InvalidCharacter(ch))
}

/// Outcome of resuming a [`PartialToken`] with one character.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resumed {
    /// The token consumed the character and needs more.
    Pending,
    /// The token completed and consumed the character.
    Complete(Value),
    /// A number completed without consuming `rest`.
    CompleteWithRest(Value, char),
}

impl PartialToken {
    pub fn resume(&mut self, ch: char) -> Result<Resumed, SyntaxError> {
        Ok(match self {
            PartialToken::Keyword(k) => match k.step(ch)? {
                Some(value) => Resumed::Complete(value),
                None => Resumed::Pending,
            },
            PartialToken::String(s) => match s.step(ch)? {
                Some(text) => Resumed::Complete(Value::String(text)),
                None => Resumed::Pending,
            },
            PartialToken::Number(n) => match n.step(ch)? {
                NumberStep::Continue => Resumed::Pending,
                NumberStep::Done { value, rest } => Resumed::CompleteWithRest(Value::Number(value), rest),
            },
        })
    }
}

/// A standalone character-to-token stream.
///
/// Each [`write`](Tokenizer::write) yields the tokens completed by that
/// character: usually none or one, and two when a character both ends a
/// number and is a symbol itself (`1]`).
///
/// # Examples
///
/// ```rust
/// use jsonbrook::{ParserOptions, Symbol, Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new(ParserOptions::default());
/// let mut tokens = Vec::new();
/// for ch in "[1,true]".chars() {
///     tokens.extend(tokenizer.write(ch).unwrap());
/// }
/// tokens.extend(tokenizer.end().unwrap());
/// assert_eq!(tokens[1], Token::Number(1.0));
/// assert_eq!(tokens[4], Token::Symbol(Symbol::EndArray));
/// ```
///
/// Like [`JsonBrook`](crate::JsonBrook), a tokenizer that reported an error
/// keeps reporting it.
#[derive(Debug, Default)]
pub struct Tokenizer {
    options: ParserOptions,
    pending: Option<PartialToken>,
    position: Position,
    status: Status,
}

impl Tokenizer {
    /// Creates a tokenizer with no token in flight.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            pending: None,
            position: Position::default(),
            status: Status::Open,
        }
    }

    /// Feeds one character and returns the tokens it completed.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] if `ch` cannot start or continue a token,
    /// [`SyntaxError::WriteAfterEnd`] after [`end`](Self::end), or the first
    /// error again once one was returned.
    pub fn write(&mut self, ch: char) -> Result<impl Iterator<Item = Token> + use<>, ParserError> {
        match &self.status {
            Status::Open => {}
            Status::Ended => return Err(self.position.error(SyntaxError::WriteAfterEnd)),
            Status::Failed(err) => return Err(err.clone()),
        }
        match self.write_inner(ch) {
            Ok(tokens) => {
                self.position.advance(ch);
                Ok(tokens.into_iter().flatten())
            }
            Err(source) => Err(self.fail(source)),
        }
    }

    fn fail(&mut self, source: SyntaxError) -> ParserError {
        let err = self.position.error(source);
        debug!(%err, "token error");
        self.pending = None;
        self.status = Status::Failed(err.clone());
        err
    }

    fn write_inner(&mut self, ch: char) -> Result<[Option<Token>; 2], SyntaxError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok([self.start(ch)?, None]);
        };
        match pending.resume(ch)? {
            Resumed::Pending => Ok([None, None]),
            Resumed::Complete(value) => {
                let token = self.complete(value);
                Ok([Some(token), None])
            }
            Resumed::CompleteWithRest(value, rest) => {
                let token = self.complete(value);
                Ok([Some(token), self.start(rest)?])
            }
        }
    }

    fn start(&mut self, ch: char) -> Result<Option<Token>, SyntaxError> {
        Ok(match start(ch, &self.options)? {
            Lexeme::Whitespace => None,
            Lexeme::Symbol(symbol) => Some(Token::Symbol(symbol)),
            Lexeme::Partial(partial) => {
                self.pending = Some(partial);
                None
            }
        })
    }

    fn complete(&mut self, value: Value) -> Token {
        self.pending = None;
        match value {
            Value::String(s) => Token::String(s),
            Value::Number(n) => Token::Number(n),
            keyword => Token::Keyword(keyword),
        }
    }

    /// Signals end of input, returning a number that was still waiting for
    /// a terminator.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] if a keyword or string is unfinished, or the
    /// pending number is incomplete (`1.`). A tokenizer that already failed
    /// returns its first error. Calling `end` again after success yields
    /// nothing.
    pub fn end(&mut self) -> Result<Option<Token>, ParserError> {
        match &self.status {
            Status::Open => {}
            Status::Ended => return Ok(None),
            Status::Failed(err) => return Err(err.clone()),
        }
        let token = match self.pending.take() {
            None => None,
            Some(PartialToken::Number(n)) => match n.finish() {
                Ok(v) => Some(Token::Number(v)),
                Err(source) => return Err(self.fail(source)),
            },
            Some(_) => return Err(self.fail(SyntaxError::UnexpectedEndOfInput)),
        };
        self.status = Status::Ended;
        Ok(token)
    }
}
