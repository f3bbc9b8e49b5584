//! Evaluator tests driven by script text.
//!
//! - `expr_tests`: operators, indexing, properties, interpolation
//! - `stmt_tests`: scoping, loops, assignment places, value aliasing
//! - `function_tests`: call frames, defaults, recursion, higher-order natives
//! - `class_tests`: constructors, `this`, method dispatch
//! - `error_tests`: try/catch, throw, fatal errors, exit
//! - `import_tests`: imports and the host API

mod error_tests;
mod function_tests;
mod import_tests;

use jung_ir::Program;

use crate::{buffer_handler, EvalError, Interpreter, SharedPrintHandler, Value};

pub(crate) fn parse_ok(source: &str) -> Program {
    match jung_parse::parse(source) {
        Ok(program) => program,
        Err(e) => panic!("parse failed for {source:?}: {e}"),
    }
}

pub(crate) fn interpreter() -> (Interpreter, SharedPrintHandler) {
    let handler = buffer_handler();
    let interp = Interpreter::builder()
        .print_handler(handler.clone())
        .build();
    (interp, handler)
}

/// Run a script, returning its printed output or the error that stopped it.
pub(crate) fn try_run(source: &str) -> Result<String, EvalError> {
    let program = parse_ok(source);
    let (mut interp, handler) = interpreter();
    interp.run(&program)?;
    Ok(handler.get_output())
}

/// Printed output of a script that must succeed.
pub(crate) fn output(source: &str) -> String {
    match try_run(source) {
        Ok(out) => out,
        Err(e) => panic!("script failed: {e} (line {:?})\n{source}", e.line),
    }
}

/// The error a script must stop with.
pub(crate) fn run_err(source: &str) -> EvalError {
    match try_run(source) {
        Ok(out) => panic!("expected an error, script printed {out:?}\n{source}"),
        Err(e) => e,
    }
}

/// Value of a single expression.
pub(crate) fn eval(source: &str) -> Value {
    let program = parse_ok(source);
    let Some(expr) = program.as_single_expr() else {
        panic!("not a single expression: {source}");
    };
    let (mut interp, _) = interpreter();
    match interp.evaluate(expr) {
        Ok(v) => v,
        Err(e) => panic!("evaluation failed for {source:?}: {e}"),
    }
}
