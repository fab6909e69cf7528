//! String tokens.
//!
//! The token decodes escapes as they arrive, so the text it holds is always
//! the fully resolved value of the closed portion of the string. A pending
//! escape (a lone backslash, or a `\u` with fewer than four hex digits)
//! contributes nothing until it completes.
//!
//! UTF-16 surrogate pairs spelled as two consecutive `\uXXXX` escapes are
//! combined into one `char`. A surrogate that is not part of a pair decodes
//! to U+FFFD, since Rust strings cannot represent it.
use alloc::string::String;

use crate::SyntaxError;

/// Accumulates the four hex digits of a `\uXXXX` escape into a UTF-16 code
/// unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Feeds one hex digit. Returns the code unit once the fourth digit
    /// arrives, resetting the buffer.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let d = c
            .to_digit(16)
            .ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        #[allow(clippy::cast_possible_truncation)]
        let d = d as u16;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.acc;
        *self = Self::default();
        Ok(Some(unit))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Normal,
    /// After a backslash.
    Escape,
    /// Inside the hex digits of `\u`.
    Unicode,
}

/// A string literal whose closing quote has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringToken {
    value: String,
    state: EscapeState,
    unicode: UnicodeEscapeBuffer,
    /// High surrogate waiting for its low half.
    high_surrogate: Option<u16>,
}

impl StringToken {
    /// A token positioned just after the opening quote.
    pub(crate) fn new() -> Self {
        Self {
            value: String::new(),
            state: EscapeState::Normal,
            unicode: UnicodeEscapeBuffer::default(),
            high_surrogate: None,
        }
    }

    /// Feeds the next character. Returns the decoded string once the closing
    /// quote is consumed.
    pub(crate) fn step(&mut self, ch: char) -> Result<Option<String>, SyntaxError> {
        match self.state {
            EscapeState::Normal => match ch {
                '"' => {
                    self.flush_surrogate();
                    return Ok(Some(core::mem::take(&mut self.value)));
                }
                '\\' => self.state = EscapeState::Escape,
                '\u{0}'..='\u{1F}' => return Err(SyntaxError::ControlCharacterInString(ch)),
                _ => {
                    self.flush_surrogate();
                    self.value.push(ch);
                }
            },
            EscapeState::Escape => {
                let decoded = match ch {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{8}',
                    'f' => '\u{C}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        self.state = EscapeState::Unicode;
                        return Ok(None);
                    }
                    _ => return Err(SyntaxError::InvalidEscape(ch)),
                };
                self.flush_surrogate();
                self.value.push(decoded);
                self.state = EscapeState::Normal;
            }
            EscapeState::Unicode => {
                if let Some(unit) = self.unicode.feed(ch)? {
                    self.push_code_unit(unit);
                    self.state = EscapeState::Normal;
                }
            }
        }
        Ok(None)
    }

    /// The decoded text of the closed portion of the string.
    pub(crate) fn provisional(&self) -> &str {
        &self.value
    }

    fn push_code_unit(&mut self, unit: u16) {
        match (self.high_surrogate.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                self.value.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            (high, 0xD800..=0xDBFF) => {
                if high.is_some() {
                    self.value.push(char::REPLACEMENT_CHARACTER);
                }
                self.high_surrogate = Some(unit);
            }
            (high, _) => {
                if high.is_some() {
                    self.value.push(char::REPLACEMENT_CHARACTER);
                }
                self.value
                    .push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.value.push(char::REPLACEMENT_CHARACTER);
        }
    }
}
