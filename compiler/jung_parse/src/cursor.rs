//! Token cursor for navigating the token stream.

use crate::ParseError;
use jung_lexer::{Token, TokenKind, TokenList};
use std::mem::discriminant;

/// Stand-in returned past the end of a list that lacks a trailing `Eof`.
static EOF: Token = Token {
    kind: TokenKind::Eof,
    line: 0,
    column: 0,
};

/// Cursor over a token list.
///
/// The position never moves past the final `Eof` token.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_line(&self) -> u32 {
        self.current().line
    }

    /// One-token lookahead.
    pub fn peek_next_kind(&self) -> &'a TokenKind {
        self.tokens.get(self.pos + 1).map_or(&EOF.kind, |t| &t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Compare the current token's kind, ignoring any payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(message, self.current()))
        }
    }

    pub fn expect_ident(&mut self, message: &str) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(ParseError::unexpected(message, self.current())),
        }
    }

    /// Semicolons are optional after simple statements.
    pub fn skip_semicolon(&mut self) {
        self.eat(&TokenKind::Semicolon);
    }
}
