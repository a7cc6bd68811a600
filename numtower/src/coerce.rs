//! Coercion engine for the flexible numerics.
//!
//! Brings a (receiver, operand) pair to a common representation:
//!
//! | Left ＼ Right | SmallInt | BigInt | Float | BigFloat |
//! |---|---|---|---|---|
//! | SmallInt | Small | Big | Float | BigFloat, max(r.p, 64) |
//! | BigInt | Big | Big | Float | BigFloat, max(r.p, bitlen(l), 64) |
//! | Float | Float | Float | Float | BigFloat, max(r.p, 53) |
//! | BigFloat | max(l.p, 64) | max(l.p, bitlen(r), 64) | max(l.p, 53) | max(l.p, r.p) |
//!
//! 64 and 53 are `min_bigfloat_precision` and `float_precision` from the
//! context's [`TowerConfig`](crate::config::TowerConfig).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::context::NumericContext;
use crate::error::{NumResult, NumericError};
use crate::numtower_trace;
use crate::value::{BigFloat, Value};

/// Operand pair in a common representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Small(i64, i64),
    Big(BigInt, BigInt),
    Float(f64, f64),
    BigFloat {
        lhs: BigFloat,
        rhs: BigFloat,
        /// Precision of the operation's result
        precision: usize,
    },
}

/// Coerce a flexible receiver and operand to a common representation.
///
/// Strict numerics and non-numeric values on either side are rejected with
/// a coerce error naming both types.
pub fn coerce(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Coerced> {
    let min_p = ctx.min_precision();
    let float_p = ctx.float_precision();
    match (lhs, rhs) {
        (Value::SmallInt(a), Value::SmallInt(b)) => Ok(Coerced::Small(*a, *b)),
        (Value::SmallInt(a), Value::BigInt(b)) => Ok(Coerced::Big(BigInt::from(*a), b.clone())),
        (Value::BigInt(a), Value::SmallInt(b)) => Ok(Coerced::Big(a.clone(), BigInt::from(*b))),
        (Value::BigInt(a), Value::BigInt(b)) => Ok(Coerced::Big(a.clone(), b.clone())),

        (Value::SmallInt(a), Value::Float(b)) => Ok(Coerced::Float(*a as f64, *b)),
        (Value::BigInt(a), Value::Float(b)) => Ok(Coerced::Float(bigint_to_f64(a), *b)),
        (Value::Float(a), Value::SmallInt(b)) => Ok(Coerced::Float(*a, *b as f64)),
        (Value::Float(a), Value::BigInt(b)) => Ok(Coerced::Float(*a, bigint_to_f64(b))),
        (Value::Float(a), Value::Float(b)) => Ok(Coerced::Float(*a, *b)),

        (Value::SmallInt(a), Value::BigFloat(b)) => {
            let p = widen(b.precision(), min_p);
            Ok(big_float_pair(BigFloat::from_i64(*a, p), b.clone(), p))
        }
        (Value::BigInt(a), Value::BigFloat(b)) => {
            let p = widen(b.precision(), min_p).max(bit_len(a));
            Ok(big_float_pair(BigFloat::from_bigint(a, p), b.clone(), p))
        }
        (Value::Float(a), Value::BigFloat(b)) => {
            let p = widen(b.precision(), float_p);
            Ok(big_float_pair(BigFloat::from_f64(*a, float_p), b.clone(), p))
        }
        (Value::BigFloat(a), Value::SmallInt(b)) => {
            let p = widen(a.precision(), min_p);
            Ok(big_float_pair(a.clone(), BigFloat::from_i64(*b, p), p))
        }
        (Value::BigFloat(a), Value::BigInt(b)) => {
            let p = widen(a.precision(), min_p).max(bit_len(b));
            Ok(big_float_pair(a.clone(), BigFloat::from_bigint(b, p), p))
        }
        (Value::BigFloat(a), Value::Float(b)) => {
            let p = widen(a.precision(), float_p);
            Ok(big_float_pair(a.clone(), BigFloat::from_f64(*b, float_p), p))
        }
        (Value::BigFloat(a), Value::BigFloat(b)) => {
            let p = a.precision().max(b.precision());
            Ok(big_float_pair(a.clone(), b.clone(), p))
        }

        _ => Err(NumericError::coerce(
            ctx.type_name(lhs),
            ctx.type_name(rhs),
        )),
    }
}

fn widen(precision: usize, floor: usize) -> usize {
    if precision < floor {
        numtower_trace!("widen BigFloat precision {} -> {}", precision, floor);
    }
    precision.max(floor)
}

fn bit_len(n: &BigInt) -> usize {
    usize::try_from(n.bits()).unwrap_or(usize::MAX)
}

fn big_float_pair(lhs: BigFloat, rhs: BigFloat, precision: usize) -> Coerced {
    Coerced::BigFloat {
        lhs,
        rhs,
        precision,
    }
}

/// Lossy widening; magnitudes beyond f64 become ±Inf.
pub(crate) fn bigint_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}
