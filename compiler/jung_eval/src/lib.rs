//! Jung Eval - the runtime for the Jung scripting language.
//!
//! # Architecture
//!
//! - `Value`: the value universe. Strings and arrays are value types;
//!   objects are shared, reference-counted tables
//! - `Environment`: variable scoping with a scope stack
//! - `Interpreter`: statement execution and expression evaluation, with
//!   control flow threaded through `Outcome`
//! - `builtins`: the native function and method registry
//! - `json`: the serde mapping between values and JSON text
//!
//! The interpreter consumes a `jung_ir::Program` read-only.

pub mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
pub mod json;
mod operators;
mod print_handler;
mod value;

pub use builtins::{Builtin, NativeFn};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, Outcome, ScopedInterpreter, CLASS_KEY};
pub use operators::{binary as evaluate_binary, unary as evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{format_number, ObjectRef, Table, Value};

use jung_ir::Program;

/// Execute a program against a fresh interpreter printing to stdout.
pub fn run(program: &Program) -> Result<(), EvalError> {
    Interpreter::new().run(program)
}

#[cfg(test)]
mod tests;
