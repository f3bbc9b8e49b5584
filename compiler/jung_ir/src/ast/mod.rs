//! Syntax tree node kinds.
//!
//! The tree is produced once by the parser and consumed read-only by the
//! evaluator. Function and class bodies sit behind `Rc` so a function value
//! can keep its body alive after the program that defined it is dropped
//! (the REPL relies on this).

mod operators;

use std::rc::Rc;

pub use operators::{BinaryOp, CompoundOp, UnaryOp};

/// A whole program: statements in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Program { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// The expression of a program made of exactly one expression statement.
    ///
    /// Interactive front ends use this to decide whether to echo a result.
    pub fn as_single_expr(&self) -> Option<&Expr> {
        match self.stmts.as_slice() {
            [Stmt {
                kind: StmtKind::Expr(expr),
                ..
            }] => Some(expr),
            _ => None,
        }
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// 1-based source line the expression starts on.
    pub line: u32,
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Expr { kind, line }
    }

    /// True if the expression names a storage location that assignment can
    /// write back to (a variable, an index, or a property).
    pub fn is_place(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident(_) | ExprKind::Index { .. } | ExprKind::Property { .. }
        )
    }

    /// True for a fractional literal, possibly negated: `2.5`, `-4.0`.
    pub fn is_float_literal(&self) -> bool {
        match &self.kind {
            ExprKind::Float(_) => true,
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => operand.is_float_literal(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Number(f64),
    /// Number literal written with a fractional part (`4.0`). Division
    /// involving one is never truncated.
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    /// `"a ${b} c"`: literal text and sub-expressions, in order.
    Interpolation(Vec<InterpPart>),

    /// Variable reference.
    Ident(String),
    /// The bound receiver inside a method body.
    This,

    Array(Vec<Expr>),
    /// Object literal; keys in source order.
    Object(Vec<(String, Expr)>),

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `object.name`
    Property {
        object: Box<Expr>,
        name: String,
    },

    /// `name(args)`
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    /// `receiver.method(args)`
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `new Class(args)`
    New {
        class: String,
        args: Vec<Expr>,
    },
}

/// One piece of an interpolated string.
#[derive(Clone, Debug, PartialEq)]
pub enum InterpPart {
    Text(String),
    Expr(Expr),
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Stmt { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value`: always binds in the innermost scope.
    Let { name: String, value: Expr },
    /// `target = value` where target is a place expression.
    Assign { target: Expr, value: Expr },
    /// `target op= value`
    CompoundAssign {
        target: Expr,
        op: CompoundOp,
        value: Expr,
    },
    Expr(Expr),
    Print(Expr),
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        /// An `else if` chain is a single nested `If` here.
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    For {
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Function(Rc<FunctionDef>),
    Class(Rc<ClassDef>),
    Return(Option<Expr>),
    Break,
    Continue,
    Try {
        body: Vec<Stmt>,
        catch_var: Option<String>,
        handler: Vec<Stmt>,
    },
    Throw(Expr),
    Import(String),
}

/// A declared parameter with an optional default expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

/// A named function or class method.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// A class: a name and its methods. No inheritance.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub methods: Vec<Rc<FunctionDef>>,
    pub line: u32,
}

impl ClassDef {
    /// Find a method by name.
    pub fn method(&self, name: &str) -> Option<&Rc<FunctionDef>> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The constructor: `constructor` if defined, otherwise `init`.
    pub fn constructor(&self) -> Option<&Rc<FunctionDef>> {
        self.method("constructor").or_else(|| self.method("init"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> Rc<FunctionDef> {
        Rc::new(FunctionDef {
            name: name.to_string(),
            params: Vec::new(),
            body: Vec::new(),
            line: 1,
        })
    }

    #[test]
    fn test_constructor_prefers_constructor_over_init() {
        let class = ClassDef {
            name: "Point".to_string(),
            methods: vec![method("init"), method("constructor")],
            line: 1,
        };
        assert_eq!(
            class.constructor().map(|m| m.name.as_str()),
            Some("constructor")
        );
    }

    #[test]
    fn test_constructor_falls_back_to_init() {
        let class = ClassDef {
            name: "Point".to_string(),
            methods: vec![method("init"), method("area")],
            line: 1,
        };
        assert_eq!(class.constructor().map(|m| m.name.as_str()), Some("init"));
        assert!(class.method("missing").is_none());
    }

    #[test]
    fn test_is_place() {
        let ident = Expr::new(ExprKind::Ident("x".to_string()), 1);
        let prop = Expr::new(
            ExprKind::Property {
                object: Box::new(ident.clone()),
                name: "f".to_string(),
            },
            1,
        );
        assert!(ident.is_place());
        assert!(prop.is_place());
        assert!(!Expr::new(ExprKind::Number(1.0), 1).is_place());
    }

    #[test]
    fn test_is_float_literal() {
        let float = Expr::new(ExprKind::Float(2.5), 1);
        let negated = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(float.clone()),
            },
            1,
        );
        assert!(float.is_float_literal());
        assert!(negated.is_float_literal());
        assert!(!Expr::new(ExprKind::Number(2.0), 1).is_float_literal());
    }

    #[test]
    fn test_single_expr_program() {
        let expr = Expr::new(ExprKind::Number(3.0), 1);
        let program = Program::new(vec![Stmt::new(StmtKind::Expr(expr.clone()), 1)]);
        assert_eq!(program.as_single_expr(), Some(&expr));
        assert!(Program::default().as_single_expr().is_none());
    }
}
