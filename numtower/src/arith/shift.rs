//! Bit shifts.
//!
//! Receivers are SmallInt, BigInt or strict integers; amounts are any
//! integer kind. A negative amount shifts the other way. Right shifts are
//! arithmetic, so negative receivers fill with sign bits.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::context::NumericContext;
use crate::error::{NumResult, NumericError};
use crate::numtower_trace;
use crate::value::strict::{self, ShiftDirection};
use crate::value::Value;

pub fn shl(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    shift(ctx, lhs, rhs, ShiftDirection::Left)
}

pub fn shr(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    shift(ctx, lhs, rhs, ShiftDirection::Right)
}

fn reverse(direction: ShiftDirection) -> ShiftDirection {
    match direction {
        ShiftDirection::Left => ShiftDirection::Right,
        ShiftDirection::Right => ShiftDirection::Left,
    }
}

/// Amounts whose negation does not fit their own width.
fn negation_overflows(amount: &Value) -> bool {
    match amount {
        Value::SmallInt(n) | Value::Int64(n) => *n == i64::MIN,
        Value::Int8(n) => *n == i8::MIN,
        Value::Int16(n) => *n == i16::MIN,
        Value::Int32(n) => *n == i32::MIN,
        _ => false,
    }
}

/// Zero of the receiver's kind.
fn zero_like(value: &Value) -> Value {
    match value {
        Value::Int8(_) => Value::Int8(0),
        Value::Int16(_) => Value::Int16(0),
        Value::Int32(_) => Value::Int32(0),
        Value::Int64(_) => Value::Int64(0),
        Value::UInt8(_) => Value::UInt8(0),
        Value::UInt16(_) => Value::UInt16(0),
        Value::UInt32(_) => Value::UInt32(0),
        Value::UInt64(_) => Value::UInt64(0),
        _ => Value::SmallInt(0),
    }
}

fn shift(
    ctx: &NumericContext<'_>,
    lhs: &Value,
    rhs: &Value,
    direction: ShiftDirection,
) -> NumResult<Value> {
    let is_strict_int = lhs.kind().is_strict() && lhs.as_bigint().is_some();
    if !lhs.is_flexible_int() && !is_strict_int {
        return Err(NumericError::bitshift_operand(ctx.type_name(lhs)));
    }
    let amount = rhs
        .as_bigint()
        .ok_or_else(|| NumericError::bitshift_operand(ctx.type_name(rhs)))?;

    let (direction, magnitude) = if amount.is_negative() {
        if negation_overflows(rhs) {
            return Ok(zero_like(lhs));
        }
        (reverse(direction), -amount)
    } else {
        (direction, amount)
    };

    if is_strict_int {
        let bits = magnitude.to_u64().unwrap_or(u64::MAX);
        return strict::shift(lhs, direction, bits)
            .ok_or_else(|| NumericError::bitshift_operand(ctx.type_name(lhs)));
    }

    match direction {
        ShiftDirection::Left => shift_left(ctx, lhs, &magnitude),
        ShiftDirection::Right => Ok(shift_right(lhs, &magnitude)),
    }
}

fn shift_left(ctx: &NumericContext<'_>, lhs: &Value, amount: &BigInt) -> NumResult<Value> {
    if lhs.is_int_zero() {
        return Ok(Value::SmallInt(0));
    }
    let max_bits = ctx.config().max_shift_bits;
    let bits = amount
        .to_u64()
        .filter(|bits| *bits <= max_bits)
        .ok_or_else(|| {
            NumericError::out_of_range(format!("shift width {} is too large", amount))
        })?;
    if let (Value::SmallInt(n), true) = (lhs, bits < 64) {
        return Ok(Value::from_i128(i128::from(*n) << bits));
    }
    let n = match lhs {
        Value::SmallInt(n) => BigInt::from(*n),
        Value::BigInt(n) => n.clone(),
        _ => return Err(NumericError::bitshift_operand(ctx.type_name(lhs))),
    };
    let shift = usize::try_from(bits)
        .map_err(|_| NumericError::out_of_range(format!("shift width {} is too large", bits)))?;
    numtower_trace!("left shift by {} computed in BigInt", bits);
    Ok(Value::from_bigint(n << shift))
}

fn shift_right(lhs: &Value, amount: &BigInt) -> Value {
    match lhs {
        Value::SmallInt(n) => match amount.to_u32().filter(|bits| *bits < 64) {
            Some(bits) => Value::SmallInt(n >> bits),
            None => Value::SmallInt(if *n < 0 { -1 } else { 0 }),
        },
        Value::BigInt(n) => {
            let past_end = amount.to_u64().map_or(true, |bits| bits >= n.bits());
            if past_end {
                return Value::SmallInt(if n.is_negative() { -1 } else { 0 });
            }
            match amount.to_usize() {
                // arithmetic: rounds toward negative infinity
                Some(bits) => Value::from_bigint(n >> bits),
                None => Value::SmallInt(if n.is_negative() { -1 } else { 0 }),
            }
        }
        _ => lhs.clone(),
    }
}
