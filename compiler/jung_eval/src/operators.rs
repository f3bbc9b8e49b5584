//! Binary and unary operator evaluation on already-evaluated operands.
//!
//! `and`/`or` short-circuit and never reach this module.

use std::cmp::Ordering;

use jung_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, modulo_by_zero, type_mismatch, EvalResult,
};
use crate::value::Value;

/// Evaluate a non-short-circuit binary operator.
pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => {
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                return Ok(Value::String(format!("{left}{right}")));
            }
            arithmetic(op, left, right)
        }
        BinaryOp::Div => divide(left, right, false),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Mod => arithmetic(op, left, right),
        BinaryOp::Eq => Ok(Value::Bool(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.equals(right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(op, left, right)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Some(Ordering::Less),
                BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                BinaryOp::Gt => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            }))
        }
        // Handled by the evaluator before operands are both evaluated.
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let (Value::Number(l), Value::Number(r)) = (left, right) else {
        return Err(binary_type_mismatch(
            op,
            left.type_name(),
            right.type_name(),
        ));
    };
    let (l, r) = (*l, *r);
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Mod => {
            if r == 0.0 {
                return Err(modulo_by_zero());
            }
            l % r
        }
        _ => return Err(binary_type_mismatch(op, "number", "number")),
    };
    Ok(Value::Number(result))
}

/// Division of two numbers.
///
/// Whole operands divide integrally unless `real` is set, which the
/// evaluator does when an operand was written as a fractional literal.
pub fn divide(left: &Value, right: &Value, real: bool) -> EvalResult {
    let (Value::Number(l), Value::Number(r)) = (left, right) else {
        return Err(binary_type_mismatch(
            BinaryOp::Div,
            left.type_name(),
            right.type_name(),
        ));
    };
    if *r == 0.0 {
        return Err(division_by_zero());
    }
    let quotient = l / r;
    if !real && l.fract() == 0.0 && r.fract() == 0.0 {
        Ok(Value::Number(quotient.trunc()))
    } else {
        Ok(Value::Number(quotient))
    }
}

/// `None` when either number is NaN: every ordering test is then false.
fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Ordering>, crate::EvalError> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(l.partial_cmp(r)),
        (Value::String(l), Value::String(r)) => Ok(Some(l.as_bytes().cmp(r.as_bytes()))),
        _ => Err(binary_type_mismatch(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

pub fn unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(type_mismatch("number", other.type_name())),
        },
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}
