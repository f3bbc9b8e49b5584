//! Expression parsing tests.

use super::expr_of;
use jung_ir::{BinaryOp, Expr, ExprKind, InterpPart, UnaryOp};
use pretty_assertions::assert_eq;

fn num(n: f64) -> Expr {
    Expr::new(ExprKind::Number(n), 1)
}

fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()), 1)
}

fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        1,
    )
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        expr_of("1 + 2 * 3"),
        bin(
            BinaryOp::Add,
            num(1.0),
            bin(BinaryOp::Mul, num(2.0), num(3.0))
        )
    );
}

#[test]
fn test_additive_is_left_associative() {
    assert_eq!(
        expr_of("10 - 4 - 3"),
        bin(
            BinaryOp::Sub,
            bin(BinaryOp::Sub, num(10.0), num(4.0)),
            num(3.0)
        )
    );
}

#[test]
fn test_comparison_below_additive() {
    assert_eq!(
        expr_of("a + 1 < b"),
        bin(
            BinaryOp::Lt,
            bin(BinaryOp::Add, ident("a"), num(1.0)),
            ident("b")
        )
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        expr_of("a or b and c"),
        bin(
            BinaryOp::Or,
            ident("a"),
            bin(BinaryOp::And, ident("b"), ident("c"))
        )
    );
}

#[test]
fn test_ternary_is_lowest_and_right_associative() {
    let expr = expr_of("a ? 1 : b ? 2 : 3");
    let ExprKind::Ternary {
        cond, else_branch, ..
    } = expr.kind
    else {
        panic!("expected ternary");
    };
    assert_eq!(*cond, ident("a"));
    assert!(matches!(else_branch.kind, ExprKind::Ternary { .. }));
}

#[test]
fn test_unary_minus_applies_to_postfix_operand() {
    assert_eq!(
        expr_of("-a[0]"),
        Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::new(
                    ExprKind::Index {
                        object: Box::new(ident("a")),
                        index: Box::new(num(0.0)),
                    },
                    1
                )),
            },
            1
        )
    );
}

#[test]
fn test_not_not() {
    let expr = expr_of("not not x");
    let ExprKind::Unary { op, operand } = expr.kind else {
        panic!("expected unary");
    };
    assert_eq!(op, UnaryOp::Not);
    assert!(matches!(
        operand.kind,
        ExprKind::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn test_postfix_chain() {
    let expr = expr_of("o.items[1].name.upper()");
    let ExprKind::MethodCall {
        receiver,
        method,
        args,
    } = expr.kind
    else {
        panic!("expected method call");
    };
    assert_eq!(method, "upper");
    assert!(args.is_empty());
    assert!(matches!(receiver.kind, ExprKind::Property { ref name, .. } if name == "name"));
}

#[test]
fn test_call_and_new() {
    assert_eq!(
        expr_of("f(1, x)").kind,
        ExprKind::Call {
            callee: "f".to_string(),
            args: vec![num(1.0), ident("x")],
        }
    );
    assert_eq!(
        expr_of("new Point(1, 2)").kind,
        ExprKind::New {
            class: "Point".to_string(),
            args: vec![num(1.0), num(2.0)],
        }
    );
}

#[test]
fn test_array_literal() {
    assert_eq!(
        expr_of("[1, 2, 3]").kind,
        ExprKind::Array(vec![num(1.0), num(2.0), num(3.0)])
    );
    assert_eq!(expr_of("[]").kind, ExprKind::Array(Vec::new()));
}

#[test]
fn test_object_literal_keys_in_order_with_trailing_comma() {
    assert_eq!(
        expr_of(r#"{b: 1, "a": 2,}"#).kind,
        ExprKind::Object(vec![("b".to_string(), num(1.0)), ("a".to_string(), num(2.0))])
    );
}

#[test]
fn test_parenthesized_grouping() {
    assert_eq!(
        expr_of("(1 + 2) * 3"),
        bin(
            BinaryOp::Mul,
            bin(BinaryOp::Add, num(1.0), num(2.0)),
            num(3.0)
        )
    );
}

#[test]
fn test_interpolation_parts() {
    assert_eq!(
        expr_of(r#""sum: ${a + 1}!""#).kind,
        ExprKind::Interpolation(vec![
            InterpPart::Text("sum: ".to_string()),
            InterpPart::Expr(bin(BinaryOp::Add, ident("a"), num(1.0))),
            InterpPart::Text("!".to_string()),
        ])
    );
}

#[test]
fn test_literals() {
    assert_eq!(expr_of("null").kind, ExprKind::Null);
    assert_eq!(expr_of("true").kind, ExprKind::Bool(true));
    assert_eq!(expr_of("false").kind, ExprKind::Bool(false));
    assert_eq!(expr_of("this").kind, ExprKind::This);
    assert_eq!(expr_of(r#""hi""#).kind, ExprKind::Str("hi".to_string()));
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 2000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(expr_of(&source), num(1.0));
}

#[test]
fn test_fractional_literal_is_float() {
    assert_eq!(
        expr_of("10 / 4.0"),
        bin(
            BinaryOp::Div,
            num(10.0),
            Expr::new(ExprKind::Float(4.0), 1)
        )
    );
}
