//! Lexer for Jung using logos.
//!
//! This lexer:
//! - Skips whitespace and `#` / `//` line comments
//! - Maps keyword aliases onto the keyword they stand for
//! - Cooks string bodies (escapes, `${}` interpolation segments)
//! - Records line and column for every token

mod escape;
mod lex_error;
mod raw_token;
mod token;

use logos::Logos;

use raw_token::RawToken;

pub use lex_error::LexError;
pub use token::{StrPart, Token, TokenKind, TokenList};

/// Tokenize a complete source text.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    lex_from_line(source, 1)
}

/// Tokenize a fragment whose first line is `first_line` of some enclosing
/// source (used for `${}` segments of interpolated strings).
pub fn lex_from_line(source: &str, first_line: u32) -> Result<TokenList, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut raw = RawToken::lexer(source);

    while let Some(result) = raw.next() {
        let start = u32::try_from(raw.span().start).unwrap_or(u32::MAX);
        let (line, column) = index.position(start);
        let line = line + first_line - 1;
        let slice = raw.slice();

        let kind = match result {
            Ok(raw_kind) => cook(raw_kind, slice, line),
            Err(()) => return Err(classify_error(slice, line, column)),
        };
        tokens.push(Token::new(kind, line, column));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    let (line, column) = index.position(end);
    tokens.push(Token::new(TokenKind::Eof, line + first_line - 1, column));
    Ok(TokenList::new(tokens))
}

fn cook(raw: RawToken, slice: &str, line: u32) -> TokenKind {
    match raw {
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::Float(n) => TokenKind::Float(n),
        RawToken::Str(body) => {
            let mut parts = escape::cook_string(&body, line);
            if parts.iter().any(|p| matches!(p, StrPart::Code { .. })) {
                TokenKind::Interpolated(parts)
            } else {
                match parts.pop() {
                    Some(StrPart::Text(text)) => TokenKind::Str(text),
                    _ => TokenKind::Str(String::new()),
                }
            }
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Print => TokenKind::Print,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Return => TokenKind::Return,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Import => TokenKind::Import,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Class => TokenKind::Class,
        RawToken::New => TokenKind::New,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,

        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Question => TokenKind::Question,
    }
}

fn classify_error(slice: &str, line: u32, column: u32) -> LexError {
    match slice.chars().next() {
        Some('"') => LexError::UnterminatedString { line, column },
        Some(c) if c.is_ascii_digit() => LexError::InvalidNumber {
            text: slice.to_string(),
            line,
            column,
        },
        Some(ch) => LexError::UnexpectedChar { ch, line, column },
        None => LexError::UnexpectedChar {
            ch: '\0',
            line,
            column,
        },
    }
}

/// Byte offsets of line starts, for offset → (line, column) lookups.
struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { starts }
    }

    /// 1-based line and column for a byte offset.
    fn position(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.starts.get(line_idx).copied().unwrap_or(0);
        let line = u32::try_from(line_idx + 1).unwrap_or(u32::MAX);
        (line, offset - line_start + 1)
    }
}

#[cfg(test)]
mod tests;
