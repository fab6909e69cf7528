use crate::{SyntaxError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    pub fn text(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
        }
    }

    pub fn value(self) -> Value {
        match self {
            Keyword::True => Value::Boolean(true),
            Keyword::False => Value::Boolean(false),
            Keyword::Null => Value::Null,
        }
    }
}

/// A keyword whose first `matched` characters have been seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordToken {
    keyword: Keyword,
    matched: usize,
}

impl KeywordToken {
    /// Start matching after the first character (`t`, `f` or `n`).
    pub(crate) fn new(first: char) -> Option<Self> {
        let keyword = match first {
            't' => Keyword::True,
            'f' => Keyword::False,
            'n' => Keyword::Null,
            _ => return None,
        };
        Some(Self { keyword, matched: 1 })
    }

    /// Feeds the next character. Returns the keyword's value once the last
    /// character matched.
    pub(crate) fn step(&mut self, ch: char) -> Result<Option<Value>, SyntaxError> {
        let text = self.keyword.text();
        if text[self.matched..].chars().next() != Some(ch) {
            return Err(SyntaxError::InvalidKeyword {
                expected: text,
                found: ch,
            });
        }
        self.matched += 1;
        if self.matched == text.len() {
            Ok(Some(self.keyword.value()))
        } else {
            Ok(None)
        }
    }

    /// The only value this keyword can still become.
    pub(crate) fn provisional(&self) -> Value {
        self.keyword.value()
    }
}
