//! Statement parsing tests.

use super::{parse_ok, single_stmt};
use jung_ir::{CompoundOp, ExprKind, StmtKind};
use pretty_assertions::assert_eq;

#[test]
fn test_semicolons_are_optional() {
    let program = parse_ok("let a = 1; let b = 2\nprint a;print b");
    assert_eq!(program.stmts.len(), 4);
    assert!(matches!(program.stmts[2].kind, StmtKind::Print(_)));
}

#[test]
fn test_statement_lines() {
    let program = parse_ok("let a = 1\n\nprint a");
    let lines: Vec<u32> = program.stmts.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_function_with_defaults() {
    let StmtKind::Function(def) = single_stmt("fn greet(name, greeting = \"Hello\") { return greeting + name }").kind
    else {
        panic!("expected function");
    };
    assert_eq!(def.name, "greet");
    assert_eq!(def.params.len(), 2);
    assert!(def.params[0].default.is_none());
    assert_eq!(
        def.params[1].default.as_ref().map(|d| d.kind.clone()),
        Some(ExprKind::Str("Hello".to_string()))
    );
    assert!(matches!(def.body[0].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_bare_return() {
    let StmtKind::Function(def) = single_stmt("fn f() { return }").kind else {
        panic!("expected function");
    };
    assert_eq!(def.body[0].kind, StmtKind::Return(None));

    let StmtKind::Function(def) = single_stmt("fn g() { return; }").kind else {
        panic!("expected function");
    };
    assert_eq!(def.body[0].kind, StmtKind::Return(None));
}

#[test]
fn test_class_methods() {
    let source = "class Point {\n  fn init(x) { this.x = x }\n  fn get() { return this.x }\n}";
    let StmtKind::Class(class) = single_stmt(source).kind else {
        panic!("expected class");
    };
    assert_eq!(class.name, "Point");
    let names: Vec<&str> = class.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["init", "get"]);
    assert_eq!(class.methods[1].line, 3);
}

#[test]
fn test_else_if_chain_nests() {
    let StmtKind::If { else_branch, .. } =
        single_stmt("if a { print 1 } else if b { print 2 } else { print 3 }").kind
    else {
        panic!("expected if");
    };
    let else_branch = else_branch.unwrap_or_default();
    assert_eq!(else_branch.len(), 1);
    let StmtKind::If {
        else_branch: inner_else,
        ..
    } = &else_branch[0].kind
    else {
        panic!("expected nested if");
    };
    assert_eq!(inner_else.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_loops() {
    assert!(matches!(
        single_stmt("while i < 3 { i += 1 }").kind,
        StmtKind::While { .. }
    ));
    let StmtKind::For { var, body, .. } = single_stmt("for x in [1, 2] { break; continue }").kind
    else {
        panic!("expected for");
    };
    assert_eq!(var, "x");
    assert_eq!(body[0].kind, StmtKind::Break);
    assert_eq!(body[1].kind, StmtKind::Continue);
}

#[test]
fn test_try_catch_with_and_without_variable() {
    let StmtKind::Try { catch_var, .. } =
        single_stmt("try { throw \"boom\" } catch (e) { print e }").kind
    else {
        panic!("expected try");
    };
    assert_eq!(catch_var.as_deref(), Some("e"));

    let StmtKind::Try {
        catch_var, handler, ..
    } = single_stmt("try { } catch { }").kind
    else {
        panic!("expected try");
    };
    assert_eq!(catch_var, None);
    assert!(handler.is_empty());
}

#[test]
fn test_import() {
    assert_eq!(
        single_stmt("import \"lib/util.jung\";").kind,
        StmtKind::Import("lib/util.jung".to_string())
    );
}

#[test]
fn test_assignment_targets() {
    assert!(matches!(
        single_stmt("x = 1").kind,
        StmtKind::Assign { ref target, .. } if matches!(target.kind, ExprKind::Ident(_))
    ));
    assert!(matches!(
        single_stmt("a[0] = 1").kind,
        StmtKind::Assign { ref target, .. } if matches!(target.kind, ExprKind::Index { .. })
    ));
    assert!(matches!(
        single_stmt("o.list[2] = 1").kind,
        StmtKind::Assign { ref target, .. } if matches!(target.kind, ExprKind::Index { .. })
    ));
    assert!(matches!(
        single_stmt("p.x = 1").kind,
        StmtKind::Assign { ref target, .. } if matches!(target.kind, ExprKind::Property { .. })
    ));
}

#[test]
fn test_compound_assignment_ops() {
    let ops: Vec<CompoundOp> = parse_ok("a += 1\na -= 1\na *= 2\na /= 2\no.n += 1")
        .stmts
        .into_iter()
        .filter_map(|s| match s.kind {
            StmtKind::CompoundAssign { op, .. } => Some(op),
            _ => None,
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            CompoundOp::Add,
            CompoundOp::Sub,
            CompoundOp::Mul,
            CompoundOp::Div,
            CompoundOp::Add
        ]
    );
}

#[test]
fn test_expression_statement() {
    assert!(matches!(
        single_stmt("list.push(3)").kind,
        StmtKind::Expr(ref e) if matches!(e.kind, ExprKind::MethodCall { .. })
    ));
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("  # only a comment\n").is_empty());
}
