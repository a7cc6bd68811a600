//! Value module - numeric runtime values.
//!
//! # Module Organization
//!
//! - `value_enum.rs`: Value enum, demotion and conversions
//! - `bigfloat.rs`: BigFloat with explicit precision
//! - `strict.rs`: fixed-width numerics that never coerce

mod bigfloat;
pub mod strict;
mod value_enum;

pub use bigfloat::{consts, BigFloat, ExactParts};
pub(crate) use bigfloat::Pow5Bounds;
pub use value_enum::Value;

// Re-export BigFloat for use in other modules
pub use astro_float::BigFloat as RustBigFloat;
pub use astro_float::Consts as BigFloatConsts;
pub use astro_float::RoundingMode as BigFloatRoundingMode;
