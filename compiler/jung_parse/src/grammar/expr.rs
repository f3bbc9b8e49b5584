//! Expression parsing.
//!
//! Precedence, lowest first:
//!
//! | Level          | Operators                     |
//! |----------------|-------------------------------|
//! | ternary        | `c ? a : b` (right-assoc)     |
//! | or             | `or`                          |
//! | and            | `and`                         |
//! | comparison     | `== != < > <= >=`             |
//! | additive       | `+ -`                         |
//! | multiplicative | `* / %`                       |
//! | unary          | `not`, `-`                    |
//! | postfix        | `[index]`, `.field`, `.m()`   |

use jung_ir::{BinaryOp, Expr, ExprKind, InterpPart, UnaryOp};
use jung_lexer::{StrPart, TokenKind};
use jung_stack::ensure_sufficient_stack;

use crate::{parse_fragment, ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression at the lowest precedence level.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_ternary())
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_or()?;
        if !self.cursor.check(&TokenKind::Question) {
            return Ok(cond);
        }
        let line = self.cursor.advance().line;
        let then_branch = self.parse_expression()?;
        self.cursor
            .expect(&TokenKind::Colon, "Expected ':' in ternary expression")?;
        let else_branch = self.parse_expression()?;
        Ok(Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            line,
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.check(&TokenKind::Or) {
            let line = self.cursor.advance().line;
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right, line);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.cursor.check(&TokenKind::And) {
            let line = self.cursor.advance().line;
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right, line);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(left),
            };
            let line = self.cursor.advance().line;
            let right = self.parse_additive()?;
            left = binary(op, left, right, line);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            let line = self.cursor.advance().line;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right, line);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            let line = self.cursor.advance().line;
            let right = self.parse_unary()?;
            left = binary(op, left, right, line);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        let line = self.cursor.advance().line;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LBracket => {
                    let line = self.cursor.advance().line;
                    let index = self.parse_expression()?;
                    self.cursor.expect(&TokenKind::RBracket, "Expected ']'")?;
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        line,
                    );
                }
                TokenKind::Dot => {
                    let line = self.cursor.advance().line;
                    let name = self
                        .cursor
                        .expect_ident("Expected property name after '.'")?;
                    let kind = if self.cursor.eat(&TokenKind::LParen) {
                        let args = self.parse_call_args()?;
                        ExprKind::MethodCall {
                            receiver: Box::new(expr),
                            method: name,
                            args,
                        }
                    } else {
                        ExprKind::Property {
                            object: Box::new(expr),
                            name,
                        }
                    };
                    expr = Expr::new(kind, line);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after an opening `(`, through the closing `)`.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.parse_comma_list(
            &TokenKind::RParen,
            "Expected ')' after arguments",
            Self::parse_expression,
        )
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let line = token.line;
        let kind = match &token.kind {
            TokenKind::Number(n) => {
                self.cursor.advance();
                ExprKind::Number(*n)
            }
            TokenKind::Float(n) => {
                self.cursor.advance();
                ExprKind::Float(*n)
            }
            TokenKind::Str(s) => {
                self.cursor.advance();
                ExprKind::Str(s.clone())
            }
            TokenKind::Interpolated(parts) => {
                self.cursor.advance();
                ExprKind::Interpolation(parse_interpolation(parts)?)
            }
            TokenKind::Null => {
                self.cursor.advance();
                ExprKind::Null
            }
            TokenKind::True => {
                self.cursor.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.cursor.advance();
                ExprKind::Bool(false)
            }
            TokenKind::This => {
                self.cursor.advance();
                ExprKind::This
            }
            TokenKind::New => {
                self.cursor.advance();
                let class = self
                    .cursor
                    .expect_ident("Expected class name after 'new'")?;
                self.cursor
                    .expect(&TokenKind::LParen, "Expected '(' after class name")?;
                let args = self.parse_call_args()?;
                ExprKind::New { class, args }
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    ExprKind::Call {
                        callee: name.clone(),
                        args,
                    }
                } else {
                    ExprKind::Ident(name.clone())
                }
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let elements = self.parse_comma_list(
                    &TokenKind::RBracket,
                    "Expected ']'",
                    Self::parse_expression,
                )?;
                ExprKind::Array(elements)
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                ExprKind::Object(self.parse_object_fields()?)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression()?;
                self.cursor
                    .expect(&TokenKind::RParen, "Expected ')' after expression")?;
                return Ok(inner);
            }
            _ => return Err(ParseError::unexpected("Expected expression", token)),
        };
        Ok(Expr::new(kind, line))
    }

    /// `key: value` pairs after `{`, through the closing `}`.
    ///
    /// Keys are identifiers or plain strings; a trailing comma is allowed.
    fn parse_object_fields(&mut self) -> Result<Vec<(String, Expr)>, ParseError> {
        let mut fields = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            let key = match self.cursor.current_kind() {
                TokenKind::Ident(key) | TokenKind::Str(key) => key.clone(),
                _ => {
                    return Err(ParseError::unexpected(
                        "Expected property name",
                        self.cursor.current(),
                    ))
                }
            };
            self.cursor.advance();
            self.cursor
                .expect(&TokenKind::Colon, "Expected ':' after property name")?;
            fields.push((key, self.parse_expression()?));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace, "Expected '}'")?;
        Ok(fields)
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr, line: u32) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        line,
    )
}

fn parse_interpolation(parts: &[StrPart]) -> Result<Vec<InterpPart>, ParseError> {
    parts
        .iter()
        .map(|part| match part {
            StrPart::Text(text) => Ok(InterpPart::Text(text.clone())),
            StrPart::Code { source, line } => parse_fragment(source, *line).map(InterpPart::Expr),
        })
        .collect()
}
