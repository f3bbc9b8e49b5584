//! Numeric natives. Non-number arguments yield 0.

use super::number_arg;
use crate::errors::EvalResult;
use crate::value::Value;

fn unary(args: &[Value], f: fn(f64) -> f64) -> EvalResult {
    Ok(Value::Number(number_arg(args, 0).map_or(0.0, f)))
}

fn binary(args: &[Value], f: fn(f64, f64) -> f64) -> EvalResult {
    let n = match (number_arg(args, 0), number_arg(args, 1)) {
        (Some(a), Some(b)) => f(a, b),
        _ => 0.0,
    };
    Ok(Value::Number(n))
}

pub(super) fn abs(args: &[Value]) -> EvalResult {
    unary(args, f64::abs)
}

pub(super) fn floor(args: &[Value]) -> EvalResult {
    unary(args, f64::floor)
}

pub(super) fn ceil(args: &[Value]) -> EvalResult {
    unary(args, f64::ceil)
}

/// Half away from zero.
pub(super) fn round(args: &[Value]) -> EvalResult {
    unary(args, f64::round)
}

pub(super) fn sqrt(args: &[Value]) -> EvalResult {
    unary(args, f64::sqrt)
}

pub(super) fn min(args: &[Value]) -> EvalResult {
    binary(args, |a, b| if a < b { a } else { b })
}

pub(super) fn max(args: &[Value]) -> EvalResult {
    binary(args, |a, b| if a > b { a } else { b })
}

pub(super) fn pow(args: &[Value]) -> EvalResult {
    binary(args, f64::powf)
}
