use crate::error::{ParserError, SyntaxError};

/// 1-based line/column of the next character to be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Position {
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn error(self, source: SyntaxError) -> ParserError {
        ParserError {
            source,
            line: self.line,
            column: self.column,
        }
    }
}
