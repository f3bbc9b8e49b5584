//! Parse error types.

use jung_lexer::{LexError, Token};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token other than the one the grammar required.
    #[error("line {line}:{column} - {message} (got {found})")]
    Unexpected {
        message: String,
        found: String,
        line: u32,
        column: u32,
    },

    /// `=` or `op=` after an expression that is not a name, index or property.
    #[error("line {line}:{column} - invalid assignment target")]
    InvalidAssignmentTarget { line: u32, column: u32 },
}

impl ParseError {
    #[cold]
    pub(crate) fn unexpected(message: impl Into<String>, token: &Token) -> Self {
        ParseError::Unexpected {
            message: message.into(),
            found: token.kind.describe(),
            line: token.line,
            column: token.column,
        }
    }

    /// Line the error was reported on.
    pub fn line(&self) -> u32 {
        match self {
            ParseError::Lex(e) => e.line(),
            ParseError::Unexpected { line, .. }
            | ParseError::InvalidAssignmentTarget { line, .. } => *line,
        }
    }
}
