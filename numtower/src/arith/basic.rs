//! Add, subtract, multiply, divide, modulo and negation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::BigInt;

use super::ArithOp;
use crate::coerce::{coerce, Coerced};
use crate::context::NumericContext;
use crate::error::{NumResult, NumericError};
use crate::numtower_trace;
use crate::value::{strict, BigFloat, Value};

/// Machine-width fast path, recomputed in BigInt when it overflows.
fn small_or_big(
    op: ArithOp,
    a: i64,
    b: i64,
    checked: fn(i64, i64) -> Option<i64>,
    big: fn(BigInt, BigInt) -> BigInt,
) -> Value {
    match checked(a, b) {
        Some(n) => Value::SmallInt(n),
        None => {
            numtower_trace!("{:?} overflow: {} and {} promoted to BigInt", op, a, b);
            Value::from_bigint(big(BigInt::from(a), BigInt::from(b)))
        }
    }
}

/// Shared shape of the four coerced arithmetic paths.
struct Kernels {
    op: ArithOp,
    small: fn(i64, i64) -> Option<i64>,
    big: fn(BigInt, BigInt) -> BigInt,
    float: fn(f64, f64) -> f64,
    big_float: fn(&BigFloat, &BigFloat, usize) -> BigFloat,
}

fn apply(ctx: &NumericContext<'_>, k: Kernels, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    if lhs.kind().is_strict() {
        return strict::arith(ctx, k.op, lhs, rhs);
    }
    Ok(match coerce(ctx, lhs, rhs)? {
        Coerced::Small(a, b) => small_or_big(k.op, a, b, k.small, k.big),
        Coerced::Big(a, b) => Value::from_bigint((k.big)(a, b)),
        Coerced::Float(a, b) => Value::Float((k.float)(a, b)),
        Coerced::BigFloat {
            lhs,
            rhs,
            precision,
        } => Value::BigFloat((k.big_float)(&lhs, &rhs, precision)),
    })
}

pub fn add(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    let kernels = Kernels {
        op: ArithOp::Add,
        small: i64::checked_add,
        big: |a, b| a + b,
        float: |a, b| a + b,
        big_float: BigFloat::add,
    };
    apply(ctx, kernels, lhs, rhs)
}

pub fn sub(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    let kernels = Kernels {
        op: ArithOp::Sub,
        small: i64::checked_sub,
        big: |a, b| a - b,
        float: |a, b| a - b,
        big_float: BigFloat::sub,
    };
    apply(ctx, kernels, lhs, rhs)
}

pub fn mul(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    let kernels = Kernels {
        op: ArithOp::Mul,
        small: i64::checked_mul,
        big: |a, b| a * b,
        float: |a, b| a * b,
        big_float: BigFloat::mul,
    };
    apply(ctx, kernels, lhs, rhs)
}

/// Division. Integer division truncates toward zero.
///
/// A flexible integer zero divisor raises ZeroDivision whatever the
/// receiver; float zero divisors follow IEEE.
pub fn div(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    if !lhs.kind().is_strict() && lhs.is_numeric() && rhs.is_int_zero() {
        return Err(NumericError::ZeroDivision);
    }
    let kernels = Kernels {
        op: ArithOp::Div,
        // only i64::MIN / -1 fails here
        small: i64::checked_div,
        big: |a, b| a / b,
        float: |a, b| a / b,
        big_float: BigFloat::div,
    };
    apply(ctx, kernels, lhs, rhs)
}

/// Truncated remainder: `a == (a / b) * b + a % b` for integers.
pub fn modulo(ctx: &NumericContext<'_>, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    if !lhs.kind().is_strict() && lhs.is_numeric() && rhs.is_int_zero() {
        return Err(NumericError::ZeroDivision);
    }
    let kernels = Kernels {
        op: ArithOp::Mod,
        small: i64::checked_rem,
        big: |a, b| a % b,
        float: |a, b| a % b,
        big_float: BigFloat::rem,
    };
    apply(ctx, kernels, lhs, rhs)
}

/// Unary minus. `-i64::MIN` promotes; strict integers wrap.
pub fn negate(ctx: &NumericContext<'_>, value: &Value) -> NumResult<Value> {
    match value {
        Value::SmallInt(n) => Ok(match n.checked_neg() {
            Some(m) => Value::SmallInt(m),
            None => Value::from_bigint(-BigInt::from(*n)),
        }),
        Value::BigInt(n) => Ok(Value::from_bigint(-n)),
        Value::Float(x) => Ok(Value::Float(-x)),
        Value::BigFloat(x) => Ok(Value::BigFloat(x.neg())),
        other => match strict::negate(other) {
            Some(v) => Ok(v),
            None => sub(ctx, &Value::SmallInt(0), other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NumericContext<'static> {
        NumericContext::default()
    }

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_overflow_promotes() {
        let r = add(&ctx(), &Value::SmallInt(i64::MAX), &Value::SmallInt(18)).unwrap();
        assert_eq!(r, Value::BigInt(big("9223372036854775825")));
    }

    #[test]
    fn test_bigint_result_demotes() {
        let r = add(
            &ctx(),
            &Value::BigInt(big("9223372036854775827")),
            &Value::BigInt(big("-27")),
        )
        .unwrap();
        assert_eq!(r, Value::SmallInt(9223372036854775800));
    }

    #[test]
    fn test_sub_and_mul_overflow() {
        let r = sub(&ctx(), &Value::SmallInt(i64::MIN), &Value::SmallInt(1)).unwrap();
        assert_eq!(r, Value::BigInt(big("-9223372036854775809")));
        let r = mul(&ctx(), &Value::SmallInt(1 << 40), &Value::SmallInt(1 << 40)).unwrap();
        assert_eq!(r, Value::BigInt(BigInt::from(1u8) << 80));
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        let r = div(&ctx(), &Value::SmallInt(-7), &Value::SmallInt(2)).unwrap();
        assert_eq!(r, Value::SmallInt(-3));
        let big_neg: BigInt = -(BigInt::from(1u8) << 70u32) - 1;
        let r = div(&ctx(), &Value::BigInt(big_neg), &Value::BigInt(BigInt::from(1u8) << 69)).unwrap();
        assert_eq!(r, Value::SmallInt(-2));
    }

    #[test]
    fn test_div_min_by_minus_one_promotes() {
        let r = div(&ctx(), &Value::SmallInt(i64::MIN), &Value::SmallInt(-1)).unwrap();
        assert_eq!(r, Value::BigInt(BigInt::from(1u8) << 63));
    }

    #[test]
    fn test_div_by_integer_zero() {
        for lhs in [
            Value::SmallInt(1),
            Value::BigInt(BigInt::from(1u8) << 80),
            Value::Float(1.5),
            Value::BigFloat(BigFloat::from_f64(2.0, 64)),
        ] {
            assert_eq!(div(&ctx(), &lhs, &Value::SmallInt(0)), Err(NumericError::ZeroDivision));
            assert_eq!(modulo(&ctx(), &lhs, &Value::SmallInt(0)), Err(NumericError::ZeroDivision));
        }
    }

    #[test]
    fn test_div_by_float_zero_is_ieee() {
        let r = div(&ctx(), &Value::SmallInt(1), &Value::Float(0.0)).unwrap();
        assert_eq!(r, Value::Float(f64::INFINITY));
        let r = div(&ctx(), &Value::Float(0.0), &Value::Float(0.0)).unwrap();
        assert!(matches!(r, Value::Float(x) if x.is_nan()));
    }

    #[test]
    fn test_modulo_truncates() {
        let r = modulo(&ctx(), &Value::SmallInt(-7), &Value::SmallInt(2)).unwrap();
        assert_eq!(r, Value::SmallInt(-1));
        let r = modulo(&ctx(), &Value::SmallInt(i64::MIN), &Value::SmallInt(-1)).unwrap();
        assert_eq!(r, Value::SmallInt(0));
        let r = modulo(&ctx(), &Value::Float(7.5), &Value::SmallInt(2)).unwrap();
        assert_eq!(r, Value::Float(1.5));
    }

    #[test]
    fn test_bigfloat_keeps_operand_precision() {
        let x = Value::BigFloat(BigFloat::from_f64(2.5, 80));
        let r = add(&ctx(), &Value::BigInt(BigInt::from(56)), &x).unwrap();
        assert_eq!(r, Value::BigFloat(BigFloat::from_f64(58.5, 80)));
    }

    #[test]
    fn test_negate() {
        assert_eq!(
            negate(&ctx(), &Value::SmallInt(i64::MIN)).unwrap(),
            Value::BigInt(BigInt::from(1u8) << 63)
        );
        assert_eq!(
            negate(&ctx(), &Value::BigInt(BigInt::from(1u8) << 63)).unwrap(),
            Value::SmallInt(i64::MIN)
        );
        assert_eq!(negate(&ctx(), &Value::Int8(i8::MIN)).unwrap(), Value::Int8(i8::MIN));
        let err = negate(&ctx(), &Value::Nil).unwrap_err();
        assert_eq!(err.to_string(), "`Std::Nil` can't be coerced into `Std::Int`");
    }

    #[test]
    fn test_strict_receiver_routes_to_strict() {
        let r = add(&ctx(), &Value::UInt8(250), &Value::UInt8(10)).unwrap();
        assert_eq!(r, Value::UInt8(4));
        let err = add(&ctx(), &Value::UInt8(250), &Value::SmallInt(10)).unwrap_err();
        assert_eq!(err.to_string(), "`Std::Int` can't be coerced into `Std::UInt8`");
    }
}
