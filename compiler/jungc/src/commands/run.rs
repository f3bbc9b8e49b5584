//! Running a script file.

use std::fs;

use jung_eval::Interpreter;

use crate::CliError;

/// Read, parse and execute the script at `path` with output on stdout.
pub fn run_file(path: &str) -> Result<(), CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    tracing::debug!(path, bytes = source.len(), "running file");
    run_source(&mut Interpreter::new(), &source)
}

/// Parse and execute `source` against an existing interpreter.
pub fn run_source(interp: &mut Interpreter, source: &str) -> Result<(), CliError> {
    let program = jung_parse::parse(source)?;
    interp.run(&program)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jung_eval::buffer_handler;
    use pretty_assertions::assert_eq;

    #[test]
    fn run_source_keeps_state() {
        let handler = buffer_handler();
        let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
        for src in ["let n = 2", "print n * 21"] {
            if let Err(e) = run_source(&mut interp, src) {
                panic!("run failed: {e}");
            }
        }
        assert_eq!(handler.get_output(), "42\n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        match run_file("/no/such/script.jung") {
            Err(CliError::Read { path, .. }) => assert_eq!(path, "/no/such/script.jung"),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
