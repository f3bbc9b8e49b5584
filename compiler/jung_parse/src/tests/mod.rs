//! Parser tests.
//!
//! - `stmt`: statement forms, blocks, definitions and assignment targets
//! - `expr`: precedence, postfix chains, literals and interpolation
//! - `errors`: error positions and messages

mod expr;
mod stmt;

use crate::{parse, ParseError};
use jung_ir::{Expr, Program, Stmt, StmtKind};

pub(crate) fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(e) => panic!("parse failed for {source:?}: {e}"),
    }
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("expected parse error for {source:?}, got {program:?}"),
        Err(e) => e,
    }
}

pub(crate) fn single_stmt(source: &str) -> Stmt {
    let mut program = parse_ok(source);
    assert_eq!(program.stmts.len(), 1, "expected one statement in {source:?}");
    program.stmts.remove(0)
}

pub(crate) fn expr_of(source: &str) -> Expr {
    match single_stmt(source).kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}
