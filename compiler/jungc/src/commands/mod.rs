//! Command handlers for the `jung` binary.

mod repl;
mod run;

pub use repl::{run_repl, PROMPT};
pub use run::{run_file, run_source};
