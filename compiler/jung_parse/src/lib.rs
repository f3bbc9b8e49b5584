//! Recursive descent parser for Jung.
//!
//! Produces the tree defined in `jung_ir`. Statements may end with an optional
//! `;`; blocks are brace-delimited. Interpolated string segments are lexed and
//! parsed as standalone expressions.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use jung_ir::{Expr, Program};
use jung_lexer::{TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            stmts.push(self.parse_statement()?);
        }
        Ok(Program::new(stmts))
    }

    /// Parse a single expression that must span the whole input.
    pub fn parse_standalone_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.cursor.is_at_end() {
            return Err(ParseError::unexpected(
                "Expected end of expression",
                self.cursor.current(),
            ));
        }
        Ok(expr)
    }
}

/// Lex and parse a complete program.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = jung_lexer::lex(source)?;
    parse_tokens(&tokens)
}

/// Parse an already-lexed token list.
pub fn parse_tokens(tokens: &TokenList) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(statements = program.stmts.len(), "parsed program");
    Ok(program)
}

/// Parse the source of one `${}` segment; `line` is where the segment starts.
pub(crate) fn parse_fragment(source: &str, line: u32) -> Result<Expr, ParseError> {
    let tokens = jung_lexer::lex_from_line(source, line)?;
    if matches!(tokens.get(0).map(|t| &t.kind), Some(TokenKind::Eof) | None) {
        return Err(ParseError::Unexpected {
            message: "Expected expression in string interpolation".to_string(),
            found: TokenKind::Eof.describe(),
            line,
            column: 1,
        });
    }
    Parser::new(&tokens).parse_standalone_expression()
}

#[cfg(test)]
mod tests;
