//! String natives.

use super::{arg, clamp_index, number_arg, str_arg};
use crate::errors::EvalResult;
use crate::value::Value;

/// `split(s, delim)`; an empty delimiter splits into characters.
pub(super) fn split(args: &[Value]) -> EvalResult {
    let (Some(s), Some(delim)) = (str_arg(args, 0), str_arg(args, 1)) else {
        return Ok(Value::Array(Vec::new()));
    };
    let parts = if delim.is_empty() {
        s.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        s.split(delim).map(Value::string).collect()
    };
    Ok(Value::Array(parts))
}

/// `join(arr, sep)`: stringifies each element.
pub(super) fn join(args: &[Value]) -> EvalResult {
    let (Value::Array(items), Some(sep)) = (arg(args, 0), str_arg(args, 1)) else {
        return Ok(Value::String(String::new()));
    };
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep);
    Ok(Value::String(joined))
}

/// `slice(s | arr, start[, end])` with negative indices from the end.
pub(super) fn slice(args: &[Value]) -> EvalResult {
    let Some(start) = number_arg(args, 1) else {
        return Ok(Value::Null);
    };
    match arg(args, 0) {
        Value::String(s) => {
            let (start, end) = bounds(start, number_arg(args, 2), s.chars().count());
            Ok(Value::String(s.chars().skip(start).take(end - start).collect()))
        }
        Value::Array(items) => {
            let (start, end) = bounds(start, number_arg(args, 2), items.len());
            Ok(Value::Array(
                items.get(start..end).map(<[Value]>::to_vec).unwrap_or_default(),
            ))
        }
        _ => Ok(Value::Null),
    }
}

fn bounds(start: f64, end: Option<f64>, len: usize) -> (usize, usize) {
    let start = clamp_index(start, len);
    let end = end.map_or(len, |e| clamp_index(e, len));
    (start, end.max(start))
}

pub(super) fn upper(args: &[Value]) -> EvalResult {
    Ok(Value::String(
        str_arg(args, 0).map(str::to_ascii_uppercase).unwrap_or_default(),
    ))
}

pub(super) fn lower(args: &[Value]) -> EvalResult {
    Ok(Value::String(
        str_arg(args, 0).map(str::to_ascii_lowercase).unwrap_or_default(),
    ))
}

pub(super) fn trim(args: &[Value]) -> EvalResult {
    Ok(Value::string(str_arg(args, 0).map(str::trim).unwrap_or_default()))
}

pub(super) fn contains(args: &[Value]) -> EvalResult {
    let found = match (str_arg(args, 0), str_arg(args, 1)) {
        (Some(s), Some(needle)) => s.contains(needle),
        _ => false,
    };
    Ok(Value::Bool(found))
}

/// Replace every occurrence; an empty pattern leaves the string unchanged.
pub(super) fn replace(args: &[Value]) -> EvalResult {
    match (arg(args, 0), str_arg(args, 1), str_arg(args, 2)) {
        (Value::String(s), Some(old), Some(new)) if !old.is_empty() => {
            Ok(Value::String(s.replace(old, new)))
        }
        (Value::String(s), _, _) => Ok(Value::String(s.clone())),
        _ => Ok(Value::String(String::new())),
    }
}
