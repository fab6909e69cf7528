//! Number tokens.
//!
//! JSON numbers have no closing delimiter, so a number token only completes
//! when the next character cannot extend it (that character is handed back
//! to the caller) or when the input ends. The token tracks the length of the
//! longest prefix that is a complete number on its own; trailing text beyond
//! it (`1.`, `1e`, `1e+`) is held but cannot be committed.
use alloc::string::String;

use crate::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// `-`
    Negative,
    /// `0` or `-0`
    Zero,
    /// Integer part starting with `1`-`9`.
    Digit,
    /// `.` with no fraction digit yet.
    Point,
    DigitFraction,
    /// `e` or `E` with nothing after it yet.
    Exp,
    /// Exponent sign and/or digits.
    ExpDigitOrSign,
}

/// Result of feeding one character to a [`NumberToken`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumberStep {
    /// The character extended the number.
    Continue,
    /// The character cannot extend the number, which is complete. `rest` was
    /// not consumed and must be offered to whatever comes next.
    Done { value: f64, rest: char },
}

/// A number literal that may still grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberToken {
    text: String,
    state: NumberState,
    valid_len: usize,
}

impl NumberToken {
    /// Starts a number at `first`, which must be `-` or a digit.
    pub(crate) fn new(first: char) -> Option<Self> {
        let (state, valid_len) = match first {
            '-' => (NumberState::Negative, 0),
            '0' => (NumberState::Zero, 1),
            '1'..='9' => (NumberState::Digit, 1),
            _ => return None,
        };
        let mut text = String::with_capacity(8);
        text.push(first);
        Some(Self {
            text,
            state,
            valid_len,
        })
    }

    pub(crate) fn step(&mut self, ch: char) -> Result<NumberStep, SyntaxError> {
        use NumberState as S;

        let (next, valid) = match (self.state, ch) {
            (S::Negative, '0') => (S::Zero, true),
            (S::Negative, '1'..='9') => (S::Digit, true),
            (S::Digit, '0'..='9') => (S::Digit, true),
            (S::Zero | S::Digit, '.') => (S::Point, false),
            (S::Point | S::DigitFraction, '0'..='9') => (S::DigitFraction, true),
            (S::Zero | S::Digit | S::DigitFraction, 'e' | 'E') => (S::Exp, false),
            (S::Exp, '+' | '-') => (S::ExpDigitOrSign, false),
            (S::Exp | S::ExpDigitOrSign, '0'..='9') => (S::ExpDigitOrSign, true),
            _ => {
                if self.is_complete() {
                    return Ok(NumberStep::Done {
                        value: self.parse()?,
                        rest: ch,
                    });
                }
                return Err(SyntaxError::InvalidNumber(ch));
            }
        };

        self.state = next;
        self.text.push(ch);
        if valid {
            self.valid_len = self.text.len();
        }
        Ok(NumberStep::Continue)
    }

    /// Commits the number at end of input.
    pub(crate) fn finish(&self) -> Result<f64, SyntaxError> {
        if self.is_complete() {
            self.parse()
        } else {
            Err(SyntaxError::UnexpectedEndOfInput)
        }
    }

    /// The value of the longest complete prefix, if there is one yet.
    pub(crate) fn provisional(&self) -> Option<f64> {
        self.text[..self.valid_len].parse().ok()
    }

    fn is_complete(&self) -> bool {
        self.valid_len > 0 && self.valid_len == self.text.len()
    }

    fn parse(&self) -> Result<f64, SyntaxError> {
        // The grammar above only admits text `f64::from_str` accepts.
        self.text[..self.valid_len]
            .parse()
            .map_err(|_| SyntaxError::UnexpectedEndOfInput)
    }
}
