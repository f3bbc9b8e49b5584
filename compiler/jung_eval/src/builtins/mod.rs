//! Native function registry.
//!
//! A static name → implementation table. Natives receive already-evaluated
//! arguments; wrong-typed arguments produce a neutral result (empty string,
//! empty array, 0, false or null) rather than an error. Only the
//! higher-order natives re-enter the evaluator.

mod collections;
mod basic;
mod higher_order;
mod io;
mod math;
mod text;

use std::fmt;

use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::json;
use crate::value::Value;

/// How a native is invoked.
#[derive(Clone, Copy)]
pub enum NativeFn {
    /// Reads its arguments only.
    Pure(fn(&[Value]) -> EvalResult),
    /// Mutates its first argument in place; the caller writes the result
    /// back to the place that argument was read from.
    Mutating(fn(&mut Value, &[Value]) -> EvalResult),
    /// Calls back into the interpreter.
    WithInterpreter(fn(&mut Interpreter, &[Value]) -> EvalResult),
}

/// A named native function; first-class as `Value::Builtin`.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: NativeFn,
}

impl Builtin {
    /// True for natives whose first argument is written back after the call.
    pub fn is_mutating(&self) -> bool {
        matches!(self.func, NativeFn::Mutating(_))
    }

    const fn pure(name: &'static str, f: fn(&[Value]) -> EvalResult) -> Self {
        Builtin {
            name,
            func: NativeFn::Pure(f),
        }
    }

    const fn mutating(name: &'static str, f: fn(&mut Value, &[Value]) -> EvalResult) -> Self {
        Builtin {
            name,
            func: NativeFn::Mutating(f),
        }
    }

    const fn with_interpreter(
        name: &'static str,
        f: fn(&mut Interpreter, &[Value]) -> EvalResult,
    ) -> Self {
        Builtin {
            name,
            func: NativeFn::WithInterpreter(f),
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// Free functions callable by name.
pub(crate) const FUNCTIONS: &[Builtin] = &[
    // Core
    Builtin::pure("str", basic::stringify),
    Builtin::pure("toString", basic::stringify),
    Builtin::pure("stringify", basic::stringify),
    Builtin::pure("len", basic::len),
    Builtin::pure("type", basic::type_of),
    Builtin::mutating("push", basic::push),
    Builtin::mutating("pop", basic::pop),
    Builtin::pure("range", basic::range),
    Builtin::pure("int", basic::int),
    Builtin::pure("float", basic::float),
    Builtin::pure("number", basic::float),
    Builtin::with_interpreter("input", basic::input),
    Builtin::pure("time", basic::time),
    Builtin::with_interpreter("clock", basic::clock),
    Builtin::pure("exit", basic::exit),
    // Strings
    Builtin::pure("split", text::split),
    Builtin::pure("join", text::join),
    Builtin::pure("slice", text::slice),
    // Objects and arrays
    Builtin::pure("keys", collections::keys),
    Builtin::pure("values", collections::values),
    Builtin::pure("has", collections::has),
    Builtin::pure("delete", collections::delete),
    Builtin::pure("sort", collections::sort),
    Builtin::pure("reverse", collections::reverse),
    // Higher-order
    Builtin::with_interpreter("map", higher_order::map),
    Builtin::with_interpreter("filter", higher_order::filter),
    Builtin::with_interpreter("reduce", higher_order::reduce),
    // Math
    Builtin::pure("abs", math::abs),
    Builtin::pure("floor", math::floor),
    Builtin::pure("ceil", math::ceil),
    Builtin::pure("round", math::round),
    Builtin::pure("sqrt", math::sqrt),
    Builtin::pure("min", math::min),
    Builtin::pure("max", math::max),
    Builtin::pure("pow", math::pow),
    // Files
    Builtin::pure("readFile", io::read_file),
    Builtin::pure("writeFile", io::write_file),
    Builtin::pure("appendFile", io::append_file),
    // JSON
    Builtin::pure("jsonParse", json::json_parse),
    Builtin::pure("jsonStringify", json::json_stringify),
];

/// Receiver-style methods: `recv.name(args)` calls `name` with the receiver
/// as the first argument.
const METHODS: &[Builtin] = &[
    // String
    Builtin::pure("upper", text::upper),
    Builtin::pure("lower", text::lower),
    Builtin::pure("trim", text::trim),
    Builtin::pure("contains", text::contains),
    Builtin::pure("replace", text::replace),
    Builtin::pure("indexOf", collections::index_of),
    Builtin::pure("length", basic::length),
    // Array
    Builtin::pure("includes", collections::includes),
    Builtin::pure("flat", collections::flat),
    Builtin::pure("concat", collections::concat),
    Builtin::mutating("push", basic::push),
    Builtin::mutating("pop", basic::pop),
    // Object
    Builtin::pure("keys", collections::keys),
    Builtin::pure("values", collections::values),
    Builtin::pure("has", collections::has),
];

/// Look up a free native function.
pub fn lookup(name: &str) -> Option<Builtin> {
    FUNCTIONS.iter().find(|b| b.name == name).copied()
}

/// Look up a receiver method.
pub fn lookup_method(name: &str) -> Option<Builtin> {
    METHODS.iter().find(|b| b.name == name).copied()
}

// Argument helpers shared by the submodules.

fn arg(args: &[Value], i: usize) -> &Value {
    const NULL: &Value = &Value::Null;
    args.get(i).unwrap_or(NULL)
}

fn number_arg(args: &[Value], i: usize) -> Option<f64> {
    arg(args, i).as_number()
}

fn str_arg(args: &[Value], i: usize) -> Option<&str> {
    arg(args, i).as_str()
}

/// Normalize a possibly negative index against `len`, clamping to `0..=len`.
fn clamp_index(index: f64, len: usize) -> usize {
    let len_i = len as i64;
    let mut i = index as i64;
    if i < 0 {
        i += len_i;
    }
    i.clamp(0, len_i) as usize
}
