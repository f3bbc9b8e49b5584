//! Stringification.
//!
//! Integral numbers within ±1e15 print without a fraction. Everything else
//! uses a `%g`-style general format with six significant digits.

use std::fmt;

use super::{ObjectRef, Value};

const MAX_PLAIN_INTEGER: f64 = 1e15;
const SIGNIFICANT_DIGITS: i32 = 6;

/// Render a number the way `print` and string concatenation do.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == n.floor() && (-MAX_PLAIN_INTEGER..=MAX_PLAIN_INTEGER).contains(&n) {
        return format!("{}", n as i64);
    }
    format_general(n)
}

fn format_general(n: f64) -> String {
    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{n:.precision$e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{n:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Strings nested inside arrays and objects are quoted.
fn write_element(f: &mut fmt::Formatter<'_>, value: &Value, open: &mut Vec<ObjectRef>) -> fmt::Result {
    match value {
        Value::String(s) => write!(f, "\"{s}\""),
        other => write_value(f, other, open),
    }
}

/// `open` holds the objects being written around `value`; meeting one of
/// them again prints `{...}` instead of recursing.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, open: &mut Vec<ObjectRef>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_element(f, item, open)?;
            }
            f.write_str("]")
        }
        Value::Object(obj) if open.iter().any(|o| o.ptr_eq(obj)) => f.write_str("{...}"),
        Value::Object(obj) => {
            open.push(obj.clone());
            f.write_str("{")?;
            for (i, (key, value)) in obj.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_element(f, value, open)?;
            }
            open.pop();
            f.write_str("}")
        }
        Value::Function(def) => write!(f, "<fn {}>", def.name),
        Value::Builtin(_) => f.write_str("<builtin>"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}
