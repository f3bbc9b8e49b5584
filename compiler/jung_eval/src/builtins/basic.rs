//! Conversions, sizes, array push/pop, process and clock natives.

use std::io::BufRead;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{arg, number_arg, str_arg};
use crate::errors::{exit_requested, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn stringify(args: &[Value]) -> EvalResult {
    Ok(match args.first() {
        Some(v) => Value::String(v.to_string()),
        None => Value::String(String::new()),
    })
}

/// Byte length of a String, element count of an Array, key count of an Object.
pub(super) fn len(args: &[Value]) -> EvalResult {
    let n = match arg(args, 0) {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(obj) => obj.borrow().len(),
        _ => 0,
    };
    Ok(Value::Number(n as f64))
}

/// `.length()`: like `len` but Objects have no method length.
pub(super) fn length(args: &[Value]) -> EvalResult {
    let n = match arg(args, 0) {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => 0,
    };
    Ok(Value::Number(n as f64))
}

pub(super) fn type_of(args: &[Value]) -> EvalResult {
    Ok(Value::string(arg(args, 0).type_name()))
}

pub(super) fn push(target: &mut Value, args: &[Value]) -> EvalResult {
    if let (Value::Array(items), Some(item)) = (target, args.first()) {
        items.push(item.clone());
    }
    Ok(Value::Null)
}

pub(super) fn pop(target: &mut Value, _args: &[Value]) -> EvalResult {
    Ok(match target {
        Value::Array(items) => items.pop().unwrap_or(Value::Null),
        _ => Value::Null,
    })
}

/// `range(n)` is `0..n`; `range(a, b)` is `a..b`.
pub(super) fn range(args: &[Value]) -> EvalResult {
    let (start, end) = match args {
        [] => (0, 0),
        [end] => (0, as_int(end)),
        [start, end, ..] => (as_int(start), as_int(end)),
    };
    Ok(Value::Array(
        (start..end).map(|i| Value::Number(i as f64)).collect(),
    ))
}

fn as_int(v: &Value) -> i64 {
    v.as_number().map_or(0, |n| n as i64)
}

/// Floor of a Number, of a String's numeric prefix, or 0/1 for a Bool.
pub(super) fn int(args: &[Value]) -> EvalResult {
    let n = match arg(args, 0) {
        Value::Number(n) => n.floor(),
        Value::String(s) => parse_numeric_prefix(s).map_or(0.0, f64::floor),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    Ok(Value::Number(n))
}

pub(super) fn float(args: &[Value]) -> EvalResult {
    let n = match arg(args, 0) {
        Value::Number(n) => *n,
        Value::String(s) => parse_numeric_prefix(s).unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    Ok(Value::Number(n))
}

/// Parse the longest numeric prefix of `s` after leading whitespace:
/// optional sign, digits, optional fraction, optional exponent.
pub(crate) fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s.get(..end)?.parse().ok()
}

/// Read one line from stdin, printing the optional prompt first.
pub(super) fn input(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    if let Some(prompt) = str_arg(args, 0) {
        interp.print_handler().print(prompt);
    }
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Ok(Value::String(line))
        }
        Err(_) => Ok(Value::String(String::new())),
    }
}

/// Unix time in whole seconds.
pub(super) fn time(_args: &[Value]) -> EvalResult {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    Ok(Value::Number(secs as f64))
}

/// Seconds since the interpreter was created.
pub(super) fn clock(interp: &mut Interpreter, _args: &[Value]) -> EvalResult {
    Ok(Value::Number(interp.elapsed().as_secs_f64()))
}

pub(super) fn exit(args: &[Value]) -> EvalResult {
    let code = number_arg(args, 0).map_or(0, |n| n as i32);
    Err(exit_requested(code))
}
