//! numtower - numeric value tower for a dynamic language runtime
//!
//! This crate provides the numeric core the VM calls into:
//!
//! - `Value` enum with flexible (SmallInt, BigInt, Float, BigFloat) and
//!   strict fixed-width numerics
//! - Coercion between the flexible numerics, with overflow promotion and
//!   canonical demotion
//! - Arithmetic, shifts and comparisons returning `NumResult<Value>`
//! - The numeric literal parser and canonical `inspect` strings
//!
//! # Example
//! ```
//! use numtower::prelude::*;
//!
//! let ctx = NumericContext::default();
//! let big = binop(&ctx, BinOp::Add, &Value::SmallInt(i64::MAX), &Value::SmallInt(18)).unwrap();
//! assert_eq!(big.inspect(), "9223372036854775825");
//!
//! let back = binop(&ctx, BinOp::Sub, &big, &Value::SmallInt(18)).unwrap();
//! assert_eq!(back, Value::SmallInt(i64::MAX));
//! ```

// Tracing goes through `trace::trace_log`; nothing else writes to stderr.
#![deny(clippy::print_stderr)]

pub mod arith;
pub mod coerce;
pub mod config;
pub mod context;
pub mod error;
mod inspect;
pub mod literal;
pub mod trace;
pub mod types;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use numtower::prelude::*;
/// ```
pub mod prelude {
    pub use super::arith::{binop, compare, negate, BinOp};
    pub use super::config::TowerConfig;
    pub use super::context::NumericContext;
    pub use super::error::{ErrorKind, FormatError, NumResult, NumericError};
    pub use super::literal::{parse_integer, parse_literal};
    pub use super::types::{BuiltinTypeNames, TypeNames, TypeRegistry, ValueKind};
    pub use super::value::{BigFloat, Value};
}

pub use prelude::*;
