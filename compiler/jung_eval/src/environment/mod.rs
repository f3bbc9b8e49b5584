//! Variable scoping for the interpreter.
//!
//! Uses a scope stack (not cloning): entering a block pushes a scope whose
//! parent is the current one, leaving it pops. The global scope sits at the
//! bottom and is shared by every call frame; each call frame gets its own
//! [`Environment`] from [`Environment::child`], so a function body sees its
//! parameters and globals but never its caller's locals.

use rustc_hash::FxHashMap;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::errors::{scope_overflow, EvalError};
use crate::value::Value;

/// Default bound on nested block scopes within one call frame.
pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 256;

/// A single-threaded scope handle.
///
/// `#[repr(transparent)]` over `Rc<RefCell<T>>`; all scope allocations go
/// through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// A single scope containing variable bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Look up `name` here, then in each enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Apply `f` to the binding of `name` without cloning it.
    pub fn with_value<R>(&self, name: &str, f: impl FnOnce(&Value) -> R) -> Option<R> {
        if let Some(value) = self.bindings.get(name) {
            return Some(f(value));
        }
        self.parent.as_ref()?.borrow().with_value(name, f)
    }

    /// Mutate the nearest binding of `name` in place.
    pub fn with_value_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        if let Some(slot) = self.bindings.get_mut(name) {
            return Some(f(slot));
        }
        self.parent.as_ref()?.borrow_mut().with_value_mut(name, f)
    }

    /// True if this scope or an enclosing one binds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().contains(name))
    }

    /// Overwrite the nearest existing binding of `name`.
    ///
    /// Hands the value back when no scope binds `name`.
    pub fn assign_existing(&mut self, name: &str, value: Value) -> Result<(), Value> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign_existing(name, value),
            None => Err(value),
        }
    }
}

/// Scope stack for one call frame.
pub struct Environment {
    /// Current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope, always at the bottom.
    global: LocalScope<Scope>,
    max_depth: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_SCOPE_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
            max_depth,
        }
    }

    /// Number of scopes on this frame's stack, global included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a block scope.
    pub fn push_scope(&mut self) -> Result<(), EvalError> {
        if self.scopes.len() >= self.max_depth {
            tracing::warn!(limit = self.max_depth, "scope overflow");
            return Err(scope_overflow(self.max_depth));
        }
        let parent = self.current_scope().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
        Ok(())
    }

    /// Pop the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Define a variable in the innermost scope.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.current_scope().borrow_mut().define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    /// True if any scope visible from this frame binds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.current_scope().borrow().contains(name)
    }

    pub fn with_value<R>(&self, name: &str, f: impl FnOnce(&Value) -> R) -> Option<R> {
        self.current_scope().borrow().with_value(name, f)
    }

    pub fn with_value_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        self.current_scope().borrow_mut().with_value_mut(name, f)
    }

    /// Reassign the nearest binding of `name`, or define it in the
    /// innermost scope when nothing binds it yet.
    pub fn assign(&mut self, name: &str, value: Value) {
        let unbound = self
            .current_scope()
            .borrow_mut()
            .assign_existing(name, value);
        if let Err(value) = unbound {
            self.define(name, value);
        }
    }

    /// Define a variable in the global scope.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    /// A fresh frame sharing only the global scope.
    #[must_use]
    pub fn child(&self) -> Self {
        let global = self.global.clone();
        Environment {
            scopes: vec![global.clone()],
            global,
            max_depth: self.max_depth,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
