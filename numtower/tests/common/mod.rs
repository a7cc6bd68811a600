//! Shared helpers for numtower integration tests.

#![allow(dead_code)]

use num_bigint::BigInt;
use numtower::arith::{binop, BinOp};
use numtower::context::NumericContext;
use numtower::error::NumResult;
use numtower::literal::parse_literal;
use numtower::value::{BigFloat, Value};

pub fn ctx() -> NumericContext<'static> {
    NumericContext::default()
}

/// Parse a literal, panicking on malformed test input.
pub fn lit(text: &str) -> Value {
    parse_literal(text).unwrap_or_else(|e| panic!("bad literal {:?}: {}", text, e))
}

pub fn big(text: &str) -> BigInt {
    text.parse().unwrap()
}

pub fn bf(x: f64, precision: usize) -> Value {
    Value::BigFloat(BigFloat::from_f64(x, precision))
}

/// Evaluate `lhs <op> rhs` with the default context.
pub fn eval(lhs: &Value, op: &str, rhs: &Value) -> NumResult<Value> {
    let op = BinOp::from_token(op).unwrap_or_else(|| panic!("unknown operator {}", op));
    binop(&ctx(), op, lhs, rhs)
}

/// Precision of a BigFloat result.
pub fn precision(value: &Value) -> usize {
    match value {
        Value::BigFloat(x) => x.precision(),
        other => panic!("expected BigFloat, got {:?}", other),
    }
}
