//! Strict fixed-width numerics.
//!
//! Int8..UInt64, Float32 and Float64 combine only with a value of the exact
//! same kind. Integer arithmetic wraps in two's complement; float arithmetic
//! is plain IEEE. Nothing here ever promotes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::cmp::Ordering;

use num_traits::{One, WrappingMul};

use crate::arith::ArithOp;
use crate::context::NumericContext;
use crate::error::{NumResult, NumericError};
use crate::value::Value;

/// `base ^ exp` by square-and-multiply, wrapping at the type's width.
fn wrapping_pow<T: WrappingMul + One + Copy>(base: T, mut exp: u64) -> T {
    let mut result = T::one();
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(&base);
        }
        exp >>= 1;
        if exp > 0 {
            base = base.wrapping_mul(&base);
        }
    }
    result
}

macro_rules! int_arith {
    ($variant:ident, $op:expr, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        match $op {
            ArithOp::Add => Ok(Value::$variant(a.wrapping_add(b))),
            ArithOp::Sub => Ok(Value::$variant(a.wrapping_sub(b))),
            ArithOp::Mul => Ok(Value::$variant(a.wrapping_mul(b))),
            ArithOp::Div if b == 0 => Err(NumericError::ZeroDivision),
            ArithOp::Div => Ok(Value::$variant(a.wrapping_div(b))),
            ArithOp::Mod if b == 0 => Err(NumericError::ZeroDivision),
            ArithOp::Mod => Ok(Value::$variant(a.wrapping_rem(b))),
            // negative exponents yield 1, as for flexible integers
            ArithOp::Pow => Ok(Value::$variant(match u64::try_from(b) {
                Ok(exp) => wrapping_pow(a, exp),
                Err(_) => 1,
            })),
        }
    }};
}

macro_rules! float_arith {
    ($variant:ident, $op:expr, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        Ok(Value::$variant(match $op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Mod => a % b,
            ArithOp::Pow => a.powf(b),
        }))
    }};
}

/// Arithmetic with a strict receiver.
///
/// Returns a coerce error when `rhs` is not exactly the receiver's kind.
pub fn arith(ctx: &NumericContext<'_>, op: ArithOp, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    match (lhs, rhs) {
        (Value::Int8(a), Value::Int8(b)) => int_arith!(Int8, op, *a, *b),
        (Value::Int16(a), Value::Int16(b)) => int_arith!(Int16, op, *a, *b),
        (Value::Int32(a), Value::Int32(b)) => int_arith!(Int32, op, *a, *b),
        (Value::Int64(a), Value::Int64(b)) => int_arith!(Int64, op, *a, *b),
        (Value::UInt8(a), Value::UInt8(b)) => int_arith!(UInt8, op, *a, *b),
        (Value::UInt16(a), Value::UInt16(b)) => int_arith!(UInt16, op, *a, *b),
        (Value::UInt32(a), Value::UInt32(b)) => int_arith!(UInt32, op, *a, *b),
        (Value::UInt64(a), Value::UInt64(b)) => int_arith!(UInt64, op, *a, *b),
        (Value::Float32(a), Value::Float32(b)) => float_arith!(Float32, op, *a, *b),
        (Value::Float64(a), Value::Float64(b)) => float_arith!(Float64, op, *a, *b),
        _ => Err(coerce_error(ctx, lhs, rhs)),
    }
}

/// Ordering between two values of the same strict kind.
pub fn compare(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Option<Ordering>> {
    match (lhs, rhs) {
        (Value::Int8(a), Value::Int8(b)) => Ok(Some(a.cmp(b))),
        (Value::Int16(a), Value::Int16(b)) => Ok(Some(a.cmp(b))),
        (Value::Int32(a), Value::Int32(b)) => Ok(Some(a.cmp(b))),
        (Value::Int64(a), Value::Int64(b)) => Ok(Some(a.cmp(b))),
        (Value::UInt8(a), Value::UInt8(b)) => Ok(Some(a.cmp(b))),
        (Value::UInt16(a), Value::UInt16(b)) => Ok(Some(a.cmp(b))),
        (Value::UInt32(a), Value::UInt32(b)) => Ok(Some(a.cmp(b))),
        (Value::UInt64(a), Value::UInt64(b)) => Ok(Some(a.cmp(b))),
        (Value::Float32(a), Value::Float32(b)) => Ok(a.partial_cmp(b)),
        (Value::Float64(a), Value::Float64(b)) => Ok(a.partial_cmp(b)),
        _ => Err(coerce_error(ctx, lhs, rhs)),
    }
}

/// Wrapping negation; `None` for non-strict values.
pub fn negate(value: &Value) -> Option<Value> {
    Some(match value {
        Value::Int8(a) => Value::Int8(a.wrapping_neg()),
        Value::Int16(a) => Value::Int16(a.wrapping_neg()),
        Value::Int32(a) => Value::Int32(a.wrapping_neg()),
        Value::Int64(a) => Value::Int64(a.wrapping_neg()),
        Value::UInt8(a) => Value::UInt8(a.wrapping_neg()),
        Value::UInt16(a) => Value::UInt16(a.wrapping_neg()),
        Value::UInt32(a) => Value::UInt32(a.wrapping_neg()),
        Value::UInt64(a) => Value::UInt64(a.wrapping_neg()),
        Value::Float32(a) => Value::Float32(-a),
        Value::Float64(a) => Value::Float64(-a),
        _ => return None,
    })
}

/// Direction of a bit shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

macro_rules! int_shift {
    ($variant:ident, $ty:ty, $a:expr, $dir:expr, $amount:expr) => {{
        let a: $ty = $a;
        let width = u64::from(<$ty>::BITS);
        Value::$variant(match $dir {
            ShiftDirection::Left if $amount >= width => 0,
            ShiftDirection::Left => a.wrapping_shl($amount as u32),
            // arithmetic shift: sign fill for signed, zero fill for unsigned
            ShiftDirection::Right if $amount >= width => a >> (<$ty>::BITS - 1) >> 1,
            ShiftDirection::Right => a >> ($amount as u32),
        })
    }};
}

/// Shift a strict integer within its own width; `None` if `value` is not
/// a strict integer.
pub fn shift(value: &Value, direction: ShiftDirection, amount: u64) -> Option<Value> {
    Some(match value {
        Value::Int8(a) => int_shift!(Int8, i8, *a, direction, amount),
        Value::Int16(a) => int_shift!(Int16, i16, *a, direction, amount),
        Value::Int32(a) => int_shift!(Int32, i32, *a, direction, amount),
        Value::Int64(a) => int_shift!(Int64, i64, *a, direction, amount),
        Value::UInt8(a) => int_shift!(UInt8, u8, *a, direction, amount),
        Value::UInt16(a) => int_shift!(UInt16, u16, *a, direction, amount),
        Value::UInt32(a) => int_shift!(UInt32, u32, *a, direction, amount),
        Value::UInt64(a) => int_shift!(UInt64, u64, *a, direction, amount),
        _ => return None,
    })
}

fn coerce_error(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumericError {
    NumericError::coerce(ctx.type_name(lhs), ctx.type_name(rhs))
}
