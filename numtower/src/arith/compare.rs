//! Ordering and equality across the lattice.
//!
//! Integer/Float mixes compare exactly instead of rounding the integer to
//! f64, so `2^53 + 1 > 2^53 as f64` holds.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use super::BinOp;
use crate::coerce::{coerce, Coerced};
use crate::context::NumericContext;
use crate::error::{ErrorKind, NumResult};
use crate::value::{strict, Value};

/// Numeric ordering; `Ok(None)` when a NaN is involved.
pub fn compare(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Option<Ordering>> {
    if lhs.kind().is_strict() {
        return strict::compare(ctx, lhs, rhs);
    }
    match (lhs, rhs) {
        (Value::SmallInt(_) | Value::BigInt(_), Value::Float(f)) => {
            Ok(lhs.as_bigint().and_then(|n| cmp_int_float(&n, *f)))
        }
        (Value::Float(f), Value::SmallInt(_) | Value::BigInt(_)) => Ok(rhs
            .as_bigint()
            .and_then(|n| cmp_int_float(&n, *f))
            .map(Ordering::reverse)),
        _ => Ok(match coerce(ctx, lhs, rhs)? {
            Coerced::Small(a, b) => Some(a.cmp(&b)),
            Coerced::Big(a, b) => Some(a.cmp(&b)),
            Coerced::Float(a, b) => a.partial_cmp(&b),
            Coerced::BigFloat { lhs, rhs, .. } => lhs.partial_cmp_value(&rhs),
        }),
    }
}

/// Exact `n <=> f`.
fn cmp_int_float(n: &BigInt, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f.is_infinite() {
        return Some(if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let t = f.trunc();
    let ti = BigInt::from_f64(t)?;
    Some(match n.cmp(&ti) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - t))?,
        other => other,
    })
}

/// Numeric equality. Values that cannot be compared are unequal.
pub fn equals(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> bool {
    matches!(compare(ctx, lhs, rhs), Ok(Some(Ordering::Equal)))
}

pub(super) fn compare_op(
    ctx: &NumericContext<'_>,
    op: BinOp,
    lhs: &Value,
    rhs: &Value,
) -> NumResult<Value> {
    let ordering = match compare(ctx, lhs, rhs) {
        Ok(ordering) => ordering,
        // equality never raises on incompatible kinds
        Err(e) if e.kind() == ErrorKind::Coerce && matches!(op, BinOp::Eq | BinOp::Ne) => None,
        Err(e) => return Err(e),
    };
    let result = match op {
        BinOp::Lt => ordering == Some(Ordering::Less),
        BinOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinOp::Gt => ordering == Some(Ordering::Greater),
        BinOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinOp::Eq => ordering == Some(Ordering::Equal),
        _ => ordering != Some(Ordering::Equal),
    };
    Ok(Value::Bool(result))
}
