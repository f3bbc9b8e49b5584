//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::environment::{Environment, DEFAULT_MAX_SCOPE_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for interpreters.
///
/// Defaults: output to stdout, 200 nested calls, 256 nested scopes per frame.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
    max_scope_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_scope_depth: DEFAULT_MAX_SCOPE_DEPTH,
        }
    }

    /// Where `print` output goes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn max_scope_depth(mut self, depth: usize) -> Self {
        self.max_scope_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: Environment::with_max_depth(self.max_scope_depth),
            functions: FxHashMap::default(),
            classes: FxHashMap::default(),
            this: None,
            call_depth: 0,
            max_call_depth: self.max_call_depth,
            imported: FxHashSet::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            started: Instant::now(),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
