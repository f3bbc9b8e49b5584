//! Object and array natives.

use std::cmp::Ordering;

use super::{arg, str_arg};
use crate::errors::EvalResult;
use crate::value::Value;

pub(super) fn keys(args: &[Value]) -> EvalResult {
    Ok(Value::Array(match arg(args, 0) {
        Value::Object(obj) => obj.borrow().keys().map(Value::string).collect(),
        _ => Vec::new(),
    }))
}

pub(super) fn values(args: &[Value]) -> EvalResult {
    Ok(Value::Array(match arg(args, 0) {
        Value::Object(obj) => obj.borrow().values().cloned().collect(),
        _ => Vec::new(),
    }))
}

pub(super) fn has(args: &[Value]) -> EvalResult {
    let found = match (arg(args, 0), str_arg(args, 1)) {
        (Value::Object(obj), Some(key)) => obj.borrow().contains_key(key),
        _ => false,
    };
    Ok(Value::Bool(found))
}

/// Remove a key from the shared table; every alias observes it.
pub(super) fn delete(args: &[Value]) -> EvalResult {
    if let (Value::Object(obj), Some(key)) = (arg(args, 0), str_arg(args, 1)) {
        obj.borrow_mut().remove(key);
    }
    Ok(Value::Null)
}

/// Sorted copy. Numbers first, then Strings, then everything else in its
/// original order.
pub(super) fn sort(args: &[Value]) -> EvalResult {
    let Value::Array(items) = arg(args, 0) else {
        return Ok(Value::Array(Vec::new()));
    };
    let mut sorted = items.clone();
    sorted.sort_by(sort_order);
    Ok(Value::Array(sorted))
}

fn sort_order(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Number(_) => 0,
            Value::String(_) => 1,
            _ => 2,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        _ => rank(a).cmp(&rank(b)),
    }
}

pub(super) fn reverse(args: &[Value]) -> EvalResult {
    Ok(Value::Array(match arg(args, 0) {
        Value::Array(items) => items.iter().rev().cloned().collect(),
        _ => Vec::new(),
    }))
}

/// Byte offset of a substring, or position of an equal array element; -1
/// when absent.
pub(super) fn index_of(args: &[Value]) -> EvalResult {
    let position = match (arg(args, 0), arg(args, 1)) {
        (Value::String(s), Value::String(needle)) => s
            .find(needle.as_str())
            .map(|byte| s[..byte].chars().count()),
        (Value::Array(items), needle) => items.iter().position(|item| item.equals(needle)),
        _ => None,
    };
    Ok(Value::Number(position.map_or(-1.0, |i| i as f64)))
}

pub(super) fn includes(args: &[Value]) -> EvalResult {
    let found = match arg(args, 0) {
        Value::Array(items) => items.iter().any(|item| item.equals(arg(args, 1))),
        _ => false,
    };
    Ok(Value::Bool(found))
}

/// Flatten one level.
pub(super) fn flat(args: &[Value]) -> EvalResult {
    let Value::Array(items) = arg(args, 0) else {
        return Ok(Value::Array(Vec::new()));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => out.extend(inner.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    Ok(Value::Array(out))
}

pub(super) fn concat(args: &[Value]) -> EvalResult {
    Ok(Value::Array(match (arg(args, 0), arg(args, 1)) {
        (Value::Array(a), Value::Array(b)) => a.iter().chain(b).cloned().collect(),
        (Value::Array(a), _) => a.clone(),
        _ => Vec::new(),
    }))
}
