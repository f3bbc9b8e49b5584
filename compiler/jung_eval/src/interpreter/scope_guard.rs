//! RAII scope guard for the interpreter's environment.
//!
//! [`ScopedInterpreter`] pops the scope it pushed when dropped, on every
//! exit path: normal completion, `?` propagation, or unwinding. It derefs to
//! the interpreter, so code inside the scope uses it like `self`.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::errors::EvalError;
use crate::value::Value;

pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a scope that is popped when the guard drops.
    ///
    /// Fails with a scope-overflow error at the depth limit.
    pub fn scoped(&mut self) -> Result<ScopedInterpreter<'_>, EvalError> {
        self.env.push_scope()?;
        Ok(ScopedInterpreter { interpreter: self })
    }

    pub(crate) fn with_env_scope<T, F>(&mut self, f: F) -> Result<T, EvalError>
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> Result<T, EvalError>,
    {
        let mut scoped = self.scoped()?;
        f(&mut scoped)
    }

    /// Run `f` in a new scope holding one binding (loop variables).
    pub(crate) fn with_binding<T, F>(&mut self, name: &str, value: Value, f: F) -> Result<T, EvalError>
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> Result<T, EvalError>,
    {
        self.with_env_scope(|scoped| {
            scoped.env.define(name, value);
            f(scoped)
        })
    }
}
