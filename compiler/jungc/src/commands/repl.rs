//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use jung_eval::{Interpreter, Value};

use crate::CliError;

pub const PROMPT: &str = "jung> ";

/// Read lines from `input` and execute each against one interpreter.
///
/// A line holding a single expression echoes its value unless it is null.
/// Errors are written to `errors` and the session continues. `exit`,
/// `quit` or end of input ends the session; a script `exit(code)` ends it
/// with that error.
pub fn run_repl<R, W, E>(
    interp: &mut Interpreter,
    mut input: R,
    out: &mut W,
    errors: &mut E,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let source = line.trim();
        match source {
            "" => continue,
            "exit" | "quit" => return Ok(()),
            _ => {}
        }

        match eval_line(interp, source) {
            Ok(Some(value)) => writeln!(out, "{value}")?,
            Ok(None) => {}
            Err(CliError::Runtime(err)) if err.is_exit() => return Err(err.into()),
            Err(err) => {
                if let Some(report) = err.report() {
                    writeln!(errors, "{report}")?;
                }
            }
        }
    }
}

/// Execute one line; a lone expression yields its value when not null.
fn eval_line(interp: &mut Interpreter, source: &str) -> Result<Option<Value>, CliError> {
    let program = jung_parse::parse(source)?;
    if let Some(expr) = program.as_single_expr() {
        let value = interp.evaluate(expr)?;
        return Ok((!matches!(value, Value::Null)).then_some(value));
    }
    interp.run(&program)?;
    Ok(None)
}
