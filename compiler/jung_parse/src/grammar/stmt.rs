//! Statement parsing.

use std::rc::Rc;

use jung_ir::{ClassDef, CompoundOp, FunctionDef, Param, Stmt, StmtKind};
use jung_lexer::TokenKind;
use jung_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let line = self.cursor.current_line();
        let kind = match self.cursor.current_kind() {
            TokenKind::Class => self.parse_class()?,
            TokenKind::Fn => {
                self.cursor.advance();
                StmtKind::Function(Rc::new(self.parse_function_def("Expected function name")?))
            }
            TokenKind::Return => {
                self.cursor.advance();
                let value = if matches!(
                    self.cursor.current_kind(),
                    TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
                ) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.cursor.skip_semicolon();
                StmtKind::Return(value)
            }
            TokenKind::Break => {
                self.cursor.advance();
                self.cursor.skip_semicolon();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                self.cursor.skip_semicolon();
                StmtKind::Continue
            }
            TokenKind::Import => {
                self.cursor.advance();
                let path = match self.cursor.current_kind() {
                    TokenKind::Str(path) => path.clone(),
                    _ => {
                        return Err(ParseError::unexpected(
                            "Expected string path after import",
                            self.cursor.current(),
                        ))
                    }
                };
                self.cursor.advance();
                self.cursor.skip_semicolon();
                StmtKind::Import(path)
            }
            TokenKind::Try => self.parse_try()?,
            TokenKind::Throw => {
                self.cursor.advance();
                let value = self.parse_expression()?;
                self.cursor.skip_semicolon();
                StmtKind::Throw(value)
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_expression()?;
                let body = self.parse_block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::For => {
                self.cursor.advance();
                let var = self.cursor.expect_ident("Expected variable name")?;
                self.cursor.expect(&TokenKind::In, "Expected 'in'")?;
                let iterable = self.parse_expression()?;
                let body = self.parse_block()?;
                StmtKind::For {
                    var,
                    iterable,
                    body,
                }
            }
            TokenKind::Let => {
                self.cursor.advance();
                let name = self.cursor.expect_ident("Expected variable name")?;
                self.cursor
                    .expect(&TokenKind::Eq, "Expected '=' in assignment")?;
                let value = self.parse_expression()?;
                self.cursor.skip_semicolon();
                StmtKind::Let { name, value }
            }
            TokenKind::Print => {
                self.cursor.advance();
                let value = self.parse_expression()?;
                self.cursor.skip_semicolon();
                StmtKind::Print(value)
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Stmt::new(kind, line))
    }

    /// An expression, optionally followed by `=` or `op=` when it is a place.
    fn parse_expression_statement(&mut self) -> Result<StmtKind, ParseError> {
        let target = self.parse_expression()?;

        let op = match self.cursor.current_kind() {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(CompoundOp::Add),
            TokenKind::MinusEq => Some(CompoundOp::Sub),
            TokenKind::StarEq => Some(CompoundOp::Mul),
            TokenKind::SlashEq => Some(CompoundOp::Div),
            _ => {
                self.cursor.skip_semicolon();
                return Ok(StmtKind::Expr(target));
            }
        };

        let op_token = self.cursor.advance();
        if !target.is_place() {
            return Err(ParseError::InvalidAssignmentTarget {
                line: op_token.line,
                column: op_token.column,
            });
        }
        let value = self.parse_expression()?;
        self.cursor.skip_semicolon();
        Ok(match op {
            None => StmtKind::Assign { target, value },
            Some(op) => StmtKind::CompoundAssign { target, op, value },
        })
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.cursor.expect(&TokenKind::LBrace, "Expected '{'")?;
        let mut stmts = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            stmts.push(self.parse_statement()?);
        }
        self.cursor.expect(&TokenKind::RBrace, "Expected '}'")?;
        Ok(stmts)
    }

    /// `if cond { ... } [else if ... | else { ... }]`
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        let cond = self.parse_expression()?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.cursor.eat(&TokenKind::Else) {
            if self.cursor.check(&TokenKind::If) {
                Some(vec![self.parse_statement()?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    /// `try { ... } catch [(name)] { ... }`
    fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        let body = self.parse_block()?;
        self.cursor
            .expect(&TokenKind::Catch, "Expected 'catch' after try block")?;
        let catch_var = if self.cursor.eat(&TokenKind::LParen) {
            let name = self
                .cursor
                .expect_ident("Expected variable name in catch")?;
            self.cursor
                .expect(&TokenKind::RParen, "Expected ')' after catch variable")?;
            Some(name)
        } else {
            None
        };
        let handler = self.parse_block()?;
        Ok(StmtKind::Try {
            body,
            catch_var,
            handler,
        })
    }

    /// `class Name { fn m(params) { ... } ... }`
    fn parse_class(&mut self) -> Result<StmtKind, ParseError> {
        let line = self.cursor.advance().line;
        let name = self.cursor.expect_ident("Expected class name")?;
        self.cursor
            .expect(&TokenKind::LBrace, "Expected '{' after class name")?;

        let mut methods = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            self.cursor
                .expect(&TokenKind::Fn, "Expected method definition in class")?;
            methods.push(Rc::new(self.parse_function_def("Expected method name")?));
        }
        self.cursor
            .expect(&TokenKind::RBrace, "Expected '}' after class body")?;

        Ok(StmtKind::Class(Rc::new(ClassDef {
            name,
            methods,
            line,
        })))
    }

    /// `name(params) { body }`, after the leading `fn`.
    fn parse_function_def(&mut self, name_message: &str) -> Result<FunctionDef, ParseError> {
        let line = self.cursor.current_line();
        let name = self.cursor.expect_ident(name_message)?;
        self.cursor
            .expect(&TokenKind::LParen, "Expected '(' after function name")?;
        let params = self.parse_comma_list(
            &TokenKind::RParen,
            "Expected ')' after parameters",
            Self::parse_param,
        )?;
        let body = self.parse_block()?;
        Ok(FunctionDef {
            name,
            params,
            body,
            line,
        })
    }

    /// `name` or `name = default`
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let name = self.cursor.expect_ident("Expected parameter name")?;
        let default = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Param { name, default })
    }
}
