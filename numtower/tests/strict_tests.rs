//! Strict fixed-width numerics never coerce.

mod common;

use common::{ctx, eval, lit};
use numtower::arith::BinOp;
use numtower::error::{ErrorKind, NumericError};
use numtower::value::Value;
use pretty_assertions::assert_eq;

fn strict_samples() -> Vec<Value> {
    vec![
        Value::Int8(3),
        Value::Int16(3),
        Value::Int32(3),
        Value::Int64(3),
        Value::UInt8(3),
        Value::UInt16(3),
        Value::UInt32(3),
        Value::UInt64(3),
        Value::Float32(3.0),
        Value::Float64(3.0),
    ]
}

fn flexible_samples() -> Vec<Value> {
    vec![lit("3"), lit("9223372036854775808"), lit("3.0"), lit("3.0bf")]
}

const ARITH_OPS: [&str; 6] = ["+", "-", "*", "/", "%", "**"];

#[test]
fn test_mixed_strict_kinds_always_fail() {
    let samples = strict_samples();
    for lhs in &samples {
        for rhs in &samples {
            if lhs.kind() == rhs.kind() {
                continue;
            }
            for op in ARITH_OPS {
                let err = eval(lhs, op, rhs).unwrap_err();
                let expected = format!("`{}` can't be coerced into `{}`", rhs.kind(), lhs.kind());
                assert_eq!(err.to_string(), expected, "{} {} {}", lhs, op, rhs);
            }
        }
    }
}

#[test]
fn test_strict_receiver_rejects_flexible_operand() {
    for lhs in strict_samples() {
        for rhs in flexible_samples() {
            for op in ARITH_OPS {
                let err = eval(&lhs, op, &rhs).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Coerce);
            }
        }
    }
}

#[test]
fn test_flexible_receiver_rejects_strict_operand() {
    for lhs in flexible_samples() {
        for rhs in strict_samples() {
            for op in ["+", "-", "*", "**"] {
                let err = eval(&lhs, op, &rhs).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Coerce);
            }
        }
    }
}

#[test]
fn test_same_kind_arithmetic() {
    assert_eq!(eval(&lit("100i8"), "+", &lit("100i8")).unwrap(), Value::Int8(-56));
    assert_eq!(eval(&lit("3u16"), "-", &lit("4u16")).unwrap(), Value::UInt16(u16::MAX));
    assert_eq!(eval(&lit("7i32"), "/", &lit("-2i32")).unwrap(), Value::Int32(-3));
    assert_eq!(eval(&lit("7i32"), "%", &lit("-2i32")).unwrap(), Value::Int32(1));
    assert_eq!(eval(&lit("2u64"), "**", &lit("64u64")).unwrap(), Value::UInt64(0));
    assert_eq!(
        eval(&lit("1.5f32"), "*", &lit("2f32")).unwrap(),
        Value::Float32(3.0)
    );
}

#[test]
fn test_strict_zero_division() {
    assert_eq!(eval(&lit("1u8"), "/", &lit("0u8")), Err(NumericError::ZeroDivision));
    assert_eq!(eval(&lit("1i64"), "%", &lit("0i64")), Err(NumericError::ZeroDivision));
    let r = eval(&lit("1f64"), "/", &lit("0f64")).unwrap();
    assert_eq!(r, Value::Float64(f64::INFINITY));
}

#[test]
fn test_strict_comparisons() {
    assert_eq!(eval(&lit("200u8"), ">", &lit("100u8")).unwrap(), Value::Bool(true));
    assert_eq!(eval(&lit("200u8"), "==", &lit("200u16")).unwrap(), Value::Bool(false));
    assert!(eval(&lit("200u8"), "<", &lit("200u16")).is_err());
}

#[test]
fn test_strict_negation_wraps() {
    let r = numtower::arith::negate(&ctx(), &Value::Int16(i16::MIN)).unwrap();
    assert_eq!(r, Value::Int16(i16::MIN));
}

#[test]
fn test_binop_dispatch_covers_every_operator() {
    for op in BinOp::ALL {
        let r = numtower::arith::binop(&ctx(), op, &Value::Int32(12), &Value::Int32(3));
        assert!(r.is_ok(), "{} failed: {:?}", op, r);
    }
}
