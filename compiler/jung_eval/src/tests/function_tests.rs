use super::{output, run_err};
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn default_parameters() {
    let src = "
fn f(a, b = 2) { return a + b }
print f(1)
print f(1, 5)
";
    assert_eq!(output(src), "3\n6\n");
}

#[test]
fn defaults_see_earlier_parameters() {
    assert_eq!(output("fn f(a, b = a * 10) { return b }\nprint f(4)"), "40\n");
}

#[test]
fn missing_arguments_are_null_and_extras_ignored() {
    let src = "
fn f(a, b) { return b }
print f(1)
print f(1, 2, 3)
";
    assert_eq!(output(src), "null\n2\n");
}

#[test]
fn function_without_return_yields_null() {
    assert_eq!(output("fn f() { let x = 1 }\nprint f()"), "null\n");
}

#[test]
fn functions_see_globals_but_not_caller_locals() {
    let src = "
let g = 10
fn read() { return g }
print read()
fn outer() {
    let local = 1
    return inner()
}
fn inner() { return local }
outer()
";
    let err = run_err(src);
    assert_eq!(err.message, "undefined variable 'local'");
    assert_eq!(err.line, Some(9));
}

#[test]
fn functions_update_globals() {
    let src = "
let count = 0
fn bump() { count += 1 }
bump()
bump()
print count
";
    assert_eq!(output(src), "2\n");
}

#[test]
fn recursion() {
    let src = "
fn fib(n) {
    if n < 2 { return n }
    return fib(n - 1) + fib(n - 2)
}
print fib(15)
";
    assert_eq!(output(src), "610\n");
}

#[test]
fn functions_may_be_called_before_later_definitions_run() {
    let src = "
fn a() { return b() }
fn b() { return 3 }
print a()
";
    assert_eq!(output(src), "3\n");
}

#[test]
fn recursion_limit() {
    let err = run_err("fn down(n) { return down(n + 1) }\ndown(0)");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 200 });
    assert_eq!(err.message, "stack overflow (max 200 call depth)");
}

#[test]
fn depth_limit_allows_exactly_the_maximum() {
    let src = "
fn depth(n) {
    if n == 1 { return 1 }
    return 1 + depth(n - 1)
}
print depth(200)
";
    assert_eq!(output(src), "200\n");
}

#[test]
fn function_values() {
    let src = "
fn double(x) { return x * 2 }
let f = double
print f(21)
print type(f)
print f
";
    assert_eq!(output(src), "42\nfunction\n<fn double>\n");
}

#[test]
fn map_filter_reduce() {
    let src = r#"
fn double(x) { return x * 2 }
fn odd(x) { return x % 2 == 1 }
fn add(a, b) { return a + b }
let xs = [1, 2, 3, 4]
print map(xs, double)
print filter(xs, "odd")
print reduce(xs, add)
print reduce(xs, add, 10)
print reduce([], add)
print map(double, xs)
print map(["a", "b"], len)
"#;
    assert_eq!(
        output(src),
        "[2, 4, 6, 8]\n[1, 3]\n10\n20\nnull\n[2, 4, 6, 8]\n[1, 1]\n"
    );
}

#[test]
fn map_with_unknown_function_name() {
    let err = run_err(r#"print map([1], "nope")"#);
    assert_eq!(err.message, "map: undefined function 'nope'");
}

#[test]
fn calling_a_non_function() {
    let err = run_err("let x = 5\nprint map([1], x)");
    assert_eq!(err.message, "map: number is not callable");
    let err = run_err("missing(1)");
    assert_eq!(err.message, "undefined function 'missing'");
}

#[test]
fn callable_variable_shadows_function_namespace() {
    let src = "
fn f() { return 1 }
let g = len
print g(\"abc\")
print f()
";
    assert_eq!(output(src), "3\n1\n");
}

#[test]
fn this_is_null_in_plain_calls() {
    assert_eq!(output("fn me() { return this }\nprint me()"), "null\n");
}

#[test]
fn reduce_with_callable_first() {
    let src = "
fn add(a, b) { return a + b }
print reduce(add, [1, 2, 3]) == reduce(add, [1, 2, 3], 0)
print reduce(add, [])
";
    assert_eq!(output(src), "true\nnull\n");
}
