//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch: the value set is fixed, so pattern matching
//! is preferred over trait objects. Arithmetic is integer-only and
//! checked: any non-integer operand is a type mismatch, and overflow is
//! reported rather than wrapped.

use recast_ir::BinaryOp;

use crate::errors::{integer_overflow, type_mismatch, EvalResult};
use crate::value::Value;

/// Checked arithmetic with overflow handling.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Public API consumed by callers passing owned Values; references would force cloning at call sites"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(_), other) | (other, _) => Err(type_mismatch("int", other.type_name())),
    }
}

/// Binary operations on integers.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
    }
}
