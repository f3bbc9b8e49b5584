use super::{output, run_err};
use crate::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

#[test]
fn throw_and_catch() {
    let src = r#"
try {
    throw "boom"
} catch (e) {
    print e == "boom"
}
"#;
    assert_eq!(output(src), "true\n");
}

#[test]
fn thrown_values_are_stringified() {
    let src = "
try { throw 42 } catch (e) { print type(e) }
try { throw [1, 2] } catch (e) { print e }
";
    assert_eq!(output(src), "string\n[1, 2]\n");
}

#[test]
fn throw_unwinds_function_frames() {
    let src = r#"
fn inner() { throw "deep" }
fn outer() {
    inner()
    print "not reached"
}
try { outer() } catch (e) { print "caught " + e }
print "after"
"#;
    assert_eq!(output(src), "caught deep\nafter\n");
}

#[test]
fn runtime_errors_are_catchable_with_line() {
    let src = "
try {
    let x = 1 / 0
} catch (e) {
    print e
}
";
    assert_eq!(output(src), "[line 3] division by zero\n");
}

#[test]
fn catch_without_variable() {
    assert_eq!(output("try { missing() } catch { print \"handled\" }"), "handled\n");
}

#[test]
fn catch_variable_is_scoped_to_the_handler() {
    let err = run_err("try { throw 1 } catch (e) { }\nprint e");
    assert_eq!(err.message, "undefined variable 'e'");
}

#[test]
fn rethrow_from_handler() {
    let src = r#"
try {
    try { throw "a" } catch (e) { throw e + "b" }
} catch (e) {
    print e
}
"#;
    assert_eq!(output(src), "ab\n");
}

#[test]
fn uncaught_throw_is_fatal() {
    let err = run_err("print 1\nthrow \"bad\"");
    assert_eq!(
        err.kind,
        EvalErrorKind::UncaughtException {
            message: "bad".to_string()
        }
    );
    assert_eq!(err.thrown, Some(Value::from("bad")));
    assert_eq!(err.line, Some(2));
}

#[test]
fn division_and_modulo_by_zero() {
    assert_eq!(run_err("print 1 / 0").kind, EvalErrorKind::DivisionByZero);
    assert_eq!(run_err("let z = 0\nprint 5 % z").kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn exit_is_not_catchable() {
    let src = r#"
try { exit(3) } catch (e) { print "caught" }
print "after"
"#;
    let err = run_err(src);
    assert_eq!(err.exit_code(), Some(3));
}

#[test]
fn stack_overflow_is_catchable() {
    let src = "
fn down() { return down() }
try { down() } catch (e) { print e }
print \"recovered\"
";
    assert_eq!(
        output(src),
        "[line 2] stack overflow (max 200 call depth)\nrecovered\n"
    );
}

#[test]
fn error_line_points_at_the_failing_statement() {
    let src = "let a = 1\n\nlet b = a + \"x\" - 1";
    let err = run_err(src);
    assert_eq!(err.line, Some(3));
}

#[test]
fn output_before_an_error_is_kept() {
    let src = "print \"before\"\nprint nope";
    match super::try_run(src) {
        Ok(out) => panic!("expected an error, got {out:?}"),
        Err(err) => assert_eq!(err.line, Some(2)),
    }
}
