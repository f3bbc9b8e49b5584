//! `map`, `filter` and `reduce`: natives that call back into script code.
//!
//! Both argument orders are accepted (`map(arr, f)` and `map(f, arr)`). The
//! callable may be a function value, a builtin, or the name of a function.

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Split `(array, callable)` out of the first two arguments, in either order.
fn array_and_callable(
    interp: &Interpreter,
    name: &str,
    args: &[Value],
) -> Result<(Vec<Value>, Value), EvalError> {
    let (items, callable) = match args {
        [Value::Array(items), callable, ..] | [callable, Value::Array(items), ..] => {
            (items.clone(), callable)
        }
        _ => {
            return Err(EvalError::new(format!(
                "{name} expects an array and a function"
            )))
        }
    };
    let callable = match callable {
        Value::Function(_) | Value::Builtin(_) => callable.clone(),
        Value::String(fn_name) => interp
            .resolve_callable(fn_name)
            .ok_or_else(|| EvalError::new(format!("{name}: undefined function '{fn_name}'")))?,
        other => {
            return Err(EvalError::new(format!(
                "{name}: {} is not callable",
                other.type_name()
            )))
        }
    };
    Ok((items, callable))
}

pub(super) fn map(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let (items, callable) = array_and_callable(interp, "map", args)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(interp.call_value(&callable, vec![item])?);
    }
    Ok(Value::Array(out))
}

pub(super) fn filter(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let (items, callable) = array_and_callable(interp, "filter", args)?;
    let mut out = Vec::new();
    for item in items {
        if interp.call_value(&callable, vec![item.clone()])?.is_truthy() {
            out.push(item);
        }
    }
    Ok(Value::Array(out))
}

/// Fold left. Without an initial value the first element seeds the
/// accumulator; an empty array then yields null.
pub(super) fn reduce(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let (items, callable) = array_and_callable(interp, "reduce", args)?;
    let mut rest = items.into_iter();
    let mut acc = match args.get(2) {
        Some(init) => init.clone(),
        None => match rest.next() {
            Some(first) => first,
            None => return Ok(Value::Null),
        },
    };
    for item in rest {
        acc = interp.call_value(&callable, vec![acc, item])?;
    }
    Ok(acc)
}
