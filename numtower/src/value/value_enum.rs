//! Value enum definition and canonical constructors.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use super::BigFloat;
use crate::numtower_trace;
use crate::types::ValueKind;

/// Runtime numeric value.
///
/// Immutable: every operation returns a fresh value. Integer results are
/// canonical-narrowest, so a `BigInt` never holds a value that fits `i64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // ========== Flexible Numerics ==========
    /// Machine-width default integer
    SmallInt(i64),
    /// Arbitrary precision integer (never fits i64)
    BigInt(BigInt),
    /// Default inexact number
    Float(f64),
    /// Arbitrary precision float with explicit precision
    BigFloat(BigFloat),

    // ========== Strict Numerics ==========
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),

    // ========== Non-numeric Operands ==========
    /// nil
    Nil,
    /// Boolean
    Bool(bool),
    /// String
    String(Arc<str>),
}

impl Value {
    /// Canonical integer: SmallInt when `n` fits i64, BigInt otherwise.
    ///
    /// Every integer path that may leave machine width returns through here.
    pub fn from_bigint(n: BigInt) -> Value {
        match n.to_i64() {
            Some(small) => {
                numtower_trace!("demote BigInt -> SmallInt({})", small);
                Value::SmallInt(small)
            }
            None => Value::BigInt(n),
        }
    }

    /// Promote an i128 intermediate, demoting when it fits.
    pub fn from_i128(n: i128) -> Value {
        match i64::try_from(n) {
            Ok(small) => Value::SmallInt(small),
            Err(_) => {
                numtower_trace!("promote {} -> BigInt", n);
                Value::BigInt(BigInt::from(n))
            }
        }
    }

    pub fn string(s: &str) -> Value {
        Value::String(Arc::from(s))
    }

    /// Simplified type tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::SmallInt(_) => ValueKind::SmallInt,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Float(_) => ValueKind::Float,
            Value::BigFloat(_) => ValueKind::BigFloat,
            Value::Int8(_) => ValueKind::Int8,
            Value::Int16(_) => ValueKind::Int16,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::UInt8(_) => ValueKind::UInt8,
            Value::UInt16(_) => ValueKind::UInt16,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// SmallInt or BigInt.
    pub fn is_flexible_int(&self) -> bool {
        matches!(self, Value::SmallInt(_) | Value::BigInt(_))
    }

    /// Flexible integer zero (the only divisor that raises ZeroDivision
    /// outside the strict types).
    pub fn is_int_zero(&self) -> bool {
        match self {
            Value::SmallInt(n) => *n == 0,
            Value::BigInt(n) => n.is_zero(),
            _ => false,
        }
    }

    /// Integer value of any integer kind, flexible or strict.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::SmallInt(n) | Value::Int64(n) => Some(BigInt::from(*n)),
            Value::BigInt(n) => Some(n.clone()),
            Value::Int8(n) => Some(BigInt::from(*n)),
            Value::Int16(n) => Some(BigInt::from(*n)),
            Value::Int32(n) => Some(BigInt::from(*n)),
            Value::UInt8(n) => Some(BigInt::from(*n)),
            Value::UInt16(n) => Some(BigInt::from(*n)),
            Value::UInt32(n) => Some(BigInt::from(*n)),
            Value::UInt64(n) => Some(BigInt::from(*n)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::SmallInt(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::from_bigint(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<BigFloat> for Value {
    fn from(x: BigFloat) -> Self {
        Value::BigFloat(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bigint_demotes() {
        assert_eq!(Value::from_bigint(BigInt::from(42)), Value::SmallInt(42));
        assert_eq!(
            Value::from_bigint(BigInt::from(i64::MIN)),
            Value::SmallInt(i64::MIN)
        );
        let big: BigInt = BigInt::from(i64::MAX) + 1;
        assert_eq!(Value::from_bigint(big.clone()), Value::BigInt(big));
    }

    #[test]
    fn test_from_i128() {
        assert_eq!(Value::from_i128(-5), Value::SmallInt(-5));
        assert_eq!(
            Value::from_i128(i128::from(i64::MAX) + 18),
            Value::BigInt(BigInt::from(i128::from(i64::MAX) + 18))
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::SmallInt(1).kind(), ValueKind::SmallInt);
        assert_eq!(Value::UInt8(1).kind(), ValueKind::UInt8);
        assert_eq!(Value::string("x").kind(), ValueKind::String);
        assert!(!Value::Nil.is_numeric());
    }

    #[test]
    fn test_as_bigint() {
        assert_eq!(Value::Int8(-3).as_bigint(), Some(BigInt::from(-3)));
        assert_eq!(Value::UInt64(u64::MAX).as_bigint(), Some(BigInt::from(u64::MAX)));
        assert_eq!(Value::Float(1.0).as_bigint(), None);
    }

    #[test]
    fn test_value_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
    }

    #[test]
    fn test_is_int_zero() {
        assert!(Value::SmallInt(0).is_int_zero());
        assert!(!Value::Float(0.0).is_int_zero());
        assert!(!Value::Int8(0).is_int_zero());
    }
}
