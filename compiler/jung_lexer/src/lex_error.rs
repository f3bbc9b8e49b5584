//! Lexical errors.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("line {line}:{column} - unexpected character '{ch}'")]
    UnexpectedChar { ch: char, line: u32, column: u32 },

    #[error("line {line}:{column} - unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    #[error("line {line}:{column} - invalid number literal '{text}'")]
    InvalidNumber { text: String, line: u32, column: u32 },
}

impl LexError {
    /// Line the error was reported on.
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnexpectedChar { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }
}
