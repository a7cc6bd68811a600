//! End-to-end arithmetic scenarios across the promotion lattice.

mod common;

use common::{bf, big, ctx, eval, lit, precision};
use num_bigint::BigInt;
use numtower::arith::{add, div, mul, pow, shr, sub};
use numtower::error::{ErrorKind, NumericError};
use numtower::value::Value;
use pretty_assertions::assert_eq;

// ==================== Promotion and Demotion ====================

#[test]
fn test_small_int_overflow_promotes_to_bigint() {
    let r = add(&ctx(), &Value::SmallInt(i64::MAX), &Value::SmallInt(18)).unwrap();
    assert_eq!(r, Value::BigInt(big("9223372036854775825")));
}

#[test]
fn test_bigint_literal_plus_small() {
    let r = eval(&lit("9223372036854775815"), "+", &lit("10")).unwrap();
    assert_eq!(r, Value::BigInt(big("9223372036854775825")));
}

#[test]
fn test_bigint_sum_demotes_to_small_int() {
    let r = add(
        &ctx(),
        &Value::BigInt(big("9223372036854775827")),
        &Value::BigInt(big("-27")),
    )
    .unwrap();
    assert_eq!(r, Value::SmallInt(9223372036854775800));
}

#[test]
fn test_integer_results_are_canonical() {
    let values = [
        lit("0"),
        lit("-1"),
        lit("9223372036854775807"),
        lit("-9223372036854775808"),
        lit("9223372036854775808"),
        lit("-9223372036854775809"),
        lit("340282366920938463463374607431768211456"),
    ];
    for lhs in &values {
        for rhs in &values {
            for op in ["+", "-", "*"] {
                let r = eval(lhs, op, rhs).unwrap();
                if let Value::BigInt(n) = &r {
                    assert!(
                        i64::try_from(n).is_err(),
                        "{} {} {} produced non-canonical {:?}",
                        lhs,
                        op,
                        rhs,
                        r
                    );
                }
            }
        }
    }
}

#[test]
fn test_overflow_boundaries() {
    let r = sub(&ctx(), &Value::SmallInt(i64::MIN), &Value::SmallInt(1)).unwrap();
    assert_eq!(r, Value::BigInt(BigInt::from(i64::MIN) - 1));
    let r = mul(&ctx(), &Value::SmallInt(-1), &Value::SmallInt(i64::MIN)).unwrap();
    assert_eq!(r, Value::BigInt(-BigInt::from(i64::MIN)));
    let r = div(&ctx(), &Value::SmallInt(i64::MIN), &Value::SmallInt(-1)).unwrap();
    assert_eq!(r, Value::BigInt(big("9223372036854775808")));
}

// ==================== BigFloat Precision ====================

#[test]
fn test_bigint_plus_bigfloat_keeps_precision() {
    let r = add(&ctx(), &Value::BigInt(BigInt::from(56)), &bf(2.5, 80)).unwrap();
    assert_eq!(r, bf(58.5, 80));
    assert_eq!(r.inspect(), "58.5bf");
}

#[test]
fn test_bigfloat_precision_monotonicity() {
    let operands = [
        lit("3"),
        lit("123456789012345678901234567890"),
        lit("1.25"),
        bf(0.75, 40),
        bf(0.75, 64),
        bf(0.75, 150),
    ];
    let floor = |v: &Value| match v {
        Value::BigFloat(x) => x.precision(),
        _ => 0,
    };
    for lhs in &operands {
        for rhs in &operands {
            if !matches!(lhs, Value::BigFloat(_)) && !matches!(rhs, Value::BigFloat(_)) {
                continue;
            }
            for op in ["+", "-", "*", "/"] {
                let r = eval(lhs, op, rhs).unwrap();
                let p = precision(&r);
                assert!(p >= floor(lhs).max(floor(rhs)), "{} {} {}", lhs, op, rhs);
                let both_bigfloat = matches!(lhs, Value::BigFloat(_)) && matches!(rhs, Value::BigFloat(_));
                if both_bigfloat {
                    assert_eq!(p, floor(lhs).max(floor(rhs)));
                } else if !matches!(lhs, Value::Float(_)) && !matches!(rhs, Value::Float(_)) {
                    assert!(p >= 64);
                }
            }
        }
    }
}

#[test]
fn test_bigint_operand_widens_precision() {
    let r = mul(&ctx(), &bf(1.5, 64), &lit("340282366920938463463374607431768211457")).unwrap();
    assert_eq!(precision(&r), 129);
}

// ==================== Exponentiation ====================

#[test]
fn test_integer_negative_exponent_yields_one() {
    let r = pow(&ctx(), &Value::BigInt(BigInt::from(4)), &Value::BigInt(BigInt::from(-2))).unwrap();
    assert_eq!(r, Value::SmallInt(1));
}

#[test]
fn test_bigfloat_negative_exponent() {
    let r = pow(&ctx(), &bf(4.0, 53), &bf(-2.0, 53)).unwrap();
    assert_eq!(r, bf(0.0625, 53));
    assert_eq!(r.inspect(), "0.0625bf");
}

#[test]
fn test_exact_big_power() {
    let r = eval(&lit("3"), "**", &lit("40")).unwrap();
    assert_eq!(r, Value::BigInt(big("12157665459056928801")));
}

// ==================== Shifts ====================

#[test]
fn test_right_shift_by_negative_amount() {
    let r = shr(&ctx(), &Value::BigInt(big("9223372036854775808")), &Value::SmallInt(-40)).unwrap();
    assert_eq!(r, Value::BigInt(big("10141204801825835211973625643008")));
}

#[test]
fn test_shift_round_trip_demotes() {
    let up = eval(&lit("5"), "<<", &lit("100")).unwrap();
    let down = eval(&up, ">>", &lit("100")).unwrap();
    assert_eq!(down, Value::SmallInt(5));
}

// ==================== Errors ====================

#[test]
fn test_zero_division_for_every_flexible_receiver() {
    for lhs in [lit("1"), lit("9223372036854775808"), lit("1.5"), lit("1.5bf")] {
        for zero in [lit("0"), Value::BigInt(BigInt::from(0))] {
            assert_eq!(eval(&lhs, "/", &zero), Err(NumericError::ZeroDivision));
            assert_eq!(eval(&lhs, "%", &zero), Err(NumericError::ZeroDivision));
        }
    }
}

#[test]
fn test_non_numeric_operands() {
    for rhs in [Value::Nil, Value::Bool(true), Value::string("1")] {
        for op in ["+", "-", "*", "/", "%", "**", "<"] {
            let err = eval(&lit("1"), op, &rhs).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Coerce, "1 {} {:?}", op, rhs);
        }
    }
    let err = eval(&lit("1"), "+", &Value::Nil).unwrap_err();
    assert_eq!(err.to_string(), "`Std::Nil` can't be coerced into `Std::Int`");
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(&lit("9223372036854775808"), ">", &lit("1e18")).unwrap(), Value::Bool(true));
    assert_eq!(eval(&lit("2"), "==", &lit("2.0")).unwrap(), Value::Bool(true));
    assert_eq!(eval(&lit("2"), "==", &Value::Nil).unwrap(), Value::Bool(false));
    assert_eq!(eval(&lit("1.5bf"), "<=", &lit("1.5")).unwrap(), Value::Bool(true));
}
