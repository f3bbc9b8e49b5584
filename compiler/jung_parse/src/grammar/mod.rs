//! Grammar productions, split by category.
//!
//! - `stmt`: statements, blocks, function and class definitions
//! - `expr`: the expression precedence ladder

mod expr;
mod stmt;

use crate::{ParseError, Parser};
use jung_lexer::TokenKind;

impl Parser<'_> {
    /// Comma-separated items up to `close`, which is consumed.
    fn parse_comma_list<T>(
        &mut self,
        close: &TokenKind,
        close_message: &str,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        if !self.cursor.check(close) {
            items.push(item(self)?);
            while self.cursor.eat(&TokenKind::Comma) {
                items.push(item(self)?);
            }
        }
        self.cursor.expect(close, close_message)?;
        Ok(items)
    }
}
