//! Jung IR - syntax tree types shared by the parser and the evaluator.
//!
//! This crate contains:
//! - Statement and expression nodes (`Stmt`, `Expr`) and the `Program` root
//! - Operator kinds

pub mod ast;

pub use ast::{
    BinaryOp, ClassDef, CompoundOp, Expr, ExprKind, FunctionDef, InterpPart, Param, Program,
    Stmt, StmtKind, UnaryOp,
};
