//! Stack growth for deeply nested scripts.
//!
//! Both the parser and the evaluator recurse once per nesting level of the
//! script (parenthesized expressions, nested blocks, recursive calls). Call
//! depth is bounded by the interpreter, but a single deeply nested expression
//! is not, so recursive entry points run through [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate grows the stack on demand; on WASM
//! the closure is called directly.

/// Grow the stack when less than this much remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn eval(&mut self, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
