//! Exponentiation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::ArithOp;
use crate::coerce::{coerce, Coerced};
use crate::context::NumericContext;
use crate::error::{NumResult, NumericError};
use crate::numtower_trace;
use crate::value::{strict, Value};

/// `lhs ** rhs`.
///
/// Integer bases with a negative integer exponent yield `1`. Anything
/// involving a BigFloat is computed as BigFloat at the coerced precision.
pub fn pow(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    if lhs.kind().is_strict() {
        return strict::arith(ctx, ArithOp::Pow, lhs, rhs);
    }
    match coerce(ctx, lhs, rhs)? {
        Coerced::Small(a, b) => {
            if let Ok(exp) = u32::try_from(b) {
                if let Some(n) = a.checked_pow(exp) {
                    return Ok(Value::SmallInt(n));
                }
            }
            int_pow(ctx, BigInt::from(a), &BigInt::from(b))
        }
        Coerced::Big(a, b) => int_pow(ctx, a, &b),
        Coerced::Float(a, b) => Ok(Value::Float(a.powf(b))),
        Coerced::BigFloat {
            lhs,
            rhs,
            precision,
        } => Ok(Value::BigFloat(lhs.pow(&rhs, precision)?)),
    }
}

fn int_pow(ctx: &NumericContext<'_>, base: BigInt, exp: &BigInt) -> NumResult<Value> {
    if exp.is_negative() {
        return Ok(Value::SmallInt(1));
    }
    if exp.is_zero() || base.is_one() {
        return Ok(Value::SmallInt(1));
    }
    if base.is_zero() {
        return Ok(Value::SmallInt(0));
    }
    if base == -BigInt::one() {
        return Ok(Value::SmallInt(if exp.is_odd() { -1 } else { 1 }));
    }
    let max_bits = ctx.config().max_shift_bits;
    let result_bits = exp
        .to_u64()
        .and_then(|e| e.checked_mul(base.bits()))
        .filter(|bits| *bits <= max_bits);
    let (Some(_), Some(e)) = (result_bits, exp.to_u32()) else {
        return Err(NumericError::out_of_range(format!(
            "exponent {} is too large",
            exp
        )));
    };
    numtower_trace!("integer power {} ** {} computed in BigInt", base, e);
    Ok(Value::from_bigint(base.pow(e)))
}
