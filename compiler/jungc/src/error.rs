//! Errors surfaced by the `jung` binary.

use jung_eval::EvalError;
use jung_parse::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Runtime(#[from] EvalError),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Runtime(err) => err.exit_code().unwrap_or(1),
            _ => 1,
        }
    }

    /// The line printed to stderr, or `None` for a script's `exit()` request.
    pub fn report(&self) -> Option<String> {
        match self {
            CliError::Runtime(err) if err.is_exit() => None,
            CliError::Runtime(err) => Some(match err.line {
                Some(line) => format!("jung runtime error [line {line}]: {}", err.message),
                None => format!("jung runtime error: {}", err.message),
            }),
            other => Some(format!("jung: {other}")),
        }
    }
}
