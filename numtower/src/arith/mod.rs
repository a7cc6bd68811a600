//! Arithmetic operations over the value tower.
//!
//! [`binop`] dispatches on the operator; each operator is also exposed as a
//! function. Strict receivers are routed to [`crate::value::strict`], the
//! flexible numerics go through the coercion engine.
//!
//! # Module Organization
//!
//! - `basic.rs`: add, sub, mul, div, modulo, negate
//! - `pow.rs`: exponentiation
//! - `shift.rs`: `<<` and `>>`
//! - `compare.rs`: ordering and equality

mod basic;
mod compare;
mod pow;
mod shift;

pub use basic::{add, div, modulo, mul, negate, sub};
pub use compare::{compare, equals};
pub use pow::pow;
pub use shift::{shl, shr};

use std::fmt;

use crate::context::NumericContext;
use crate::error::NumResult;
use crate::value::Value;

/// Binary operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// The subset of [`BinOp`] that produces a number of the coerced type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinOp; 14] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Mod,
        BinOp::Pow,
        BinOp::Shl,
        BinOp::Shr,
        BinOp::Lt,
        BinOp::Le,
        BinOp::Gt,
        BinOp::Ge,
        BinOp::Eq,
        BinOp::Ne,
    ];

    /// Get the operator string
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }

    /// Parse an operator token.
    pub fn from_token(token: &str) -> Option<BinOp> {
        Self::ALL.into_iter().find(|op| op.as_str() == token)
    }

    pub fn arith(self) -> Option<ArithOp> {
        match self {
            BinOp::Add => Some(ArithOp::Add),
            BinOp::Sub => Some(ArithOp::Sub),
            BinOp::Mul => Some(ArithOp::Mul),
            BinOp::Div => Some(ArithOp::Div),
            BinOp::Mod => Some(ArithOp::Mod),
            BinOp::Pow => Some(ArithOp::Pow),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perform a binary operation.
///
/// Dispatches based on the operator and the runtime kinds of the operands.
/// Comparison operators return `Value::Bool`.
pub fn binop(ctx: &NumericContext<'_>, op: BinOp, lhs: &Value, rhs: &Value) -> NumResult<Value> {
    match op {
        BinOp::Add => add(ctx, lhs, rhs),
        BinOp::Sub => sub(ctx, lhs, rhs),
        BinOp::Mul => mul(ctx, lhs, rhs),
        BinOp::Div => div(ctx, lhs, rhs),
        BinOp::Mod => modulo(ctx, lhs, rhs),
        BinOp::Pow => pow(ctx, lhs, rhs),
        BinOp::Shl => shl(ctx, lhs, rhs),
        BinOp::Shr => shr(ctx, lhs, rhs),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne => {
            compare::compare_op(ctx, op, lhs, rhs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_tokens() {
        for op in BinOp::ALL {
            assert_eq!(BinOp::from_token(op.as_str()), Some(op));
        }
        assert_eq!(BinOp::from_token("^"), None);
    }

    #[test]
    fn test_arith_subset() {
        assert_eq!(BinOp::Pow.arith(), Some(ArithOp::Pow));
        assert_eq!(BinOp::Shl.arith(), None);
        assert_eq!(BinOp::Eq.arith(), None);
    }

    #[test]
    fn test_binop_dispatch() {
        let ctx = NumericContext::default();
        let r = binop(&ctx, BinOp::Mul, &Value::SmallInt(6), &Value::SmallInt(7)).unwrap();
        assert_eq!(r, Value::SmallInt(42));
        let r = binop(&ctx, BinOp::Lt, &Value::SmallInt(6), &Value::Float(6.5)).unwrap();
        assert_eq!(r, Value::Bool(true));
        let r = binop(&ctx, BinOp::Shl, &Value::SmallInt(1), &Value::SmallInt(4)).unwrap();
        assert_eq!(r, Value::SmallInt(16));
    }
}
