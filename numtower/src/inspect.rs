//! Canonical `inspect` strings.
//!
//! Integers print in decimal, strict integers keep their literal suffix so
//! the text parses back to the same kind. Floats print the shortest decimal
//! that round-trips; BigFloat does the same at its own precision and adds
//! the `bf` suffix.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::cmp::Ordering;
use std::f64::consts::LOG10_2;
use std::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::value::{BigFloat, ExactParts, Pow5Bounds, Value};

impl Value {
    /// Canonical source-like representation.
    pub fn inspect(&self) -> String {
        match self {
            Value::SmallInt(n) => n.to_string(),
            Value::BigInt(n) => n.to_string(),
            Value::Float(x) | Value::Float64(x) => format_f64(*x),
            Value::Float32(x) => format_f32(*x),
            Value::BigFloat(x) => x.to_string(),
            Value::Int8(n) => format!("{}i8", n),
            Value::Int16(n) => format!("{}i16", n),
            Value::Int32(n) => format!("{}i32", n),
            Value::Int64(n) => format!("{}i64", n),
            Value::UInt8(n) => format!("{}u8", n),
            Value::UInt16(n) => format!("{}u16", n),
            Value::UInt32(n) => format!("{}u32", n),
            Value::UInt64(n) => format!("{}u64", n),
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::String(s) => format!("{:?}", s),
        }
    }
}

fn format_f64(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{:?}", x)
    }
}

fn format_f32(x: f32) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{:?}", x)
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("BigFloat::NAN");
        }
        if self.is_infinite() {
            let sign = if self.is_negative() { "-" } else { "" };
            return write!(f, "{}BigFloat::INF", sign);
        }
        let Some(parts) = self.exact_parts() else {
            return f.write_str("BigFloat::NAN");
        };
        let sign = if parts.negative { "-" } else { "" };
        if parts.is_zero() {
            return write!(f, "{}0.0bf", sign);
        }
        let (digits, exponent) = shortest_digits(&parts, self.precision());
        write!(f, "{}{}bf", sign, layout(&digits, exponent))
    }
}

/// `floor(x * 2^k / 10^q)` and whether a remainder was left, or `None`
/// when the bounds on `5^|q|` are too loose to decide the floor.
///
/// When `5^|q|` is inexact it has more bits than `x` and than the result,
/// so the quotient (or product) cannot be a whole number.
fn scaled_floor(x: &BigUint, k: i64, q: i64, pow: &Pow5Bounds) -> Option<(BigUint, bool)> {
    // x * 2^k / 10^q == x * 2^(k - q) * 5^(-q)
    let t = k - q;
    let (low, high) = if q >= 0 {
        // the larger divisor gives the smaller quotient
        (
            div_pow2(x, t - pow.upper.exponent, &pow.upper.mantissa),
            div_pow2(x, t - pow.lower.exponent, &pow.lower.mantissa),
        )
    } else {
        (
            mul_pow2(x * &pow.lower.mantissa, t + pow.lower.exponent),
            mul_pow2(x * &pow.upper.mantissa, t + pow.upper.exponent),
        )
    };
    if low.0 != high.0 {
        return None;
    }
    Some((low.0, !pow.exact || low.1))
}

/// `floor(x * 2^s / d)` and whether the division left a remainder.
fn div_pow2(x: &BigUint, s: i64, d: &BigUint) -> (BigUint, bool) {
    let (q, r) = if s >= 0 {
        (x << s.unsigned_abs()).div_rem(d)
    } else {
        x.div_rem(&(d << s.unsigned_abs()))
    };
    (q, !r.is_zero())
}

/// `floor(m * 2^s)` and whether any set bits were shifted out.
fn mul_pow2(m: BigUint, s: i64) -> (BigUint, bool) {
    let shift = s.unsigned_abs();
    if s >= 0 {
        return (m << shift, false);
    }
    let lost = m.trailing_zeros().is_some_and(|tz| tz < shift);
    (m >> shift, lost)
}

/// Truncated multiple of `10^q` plus a remainder flag.
type Scaled = (BigUint, bool);

/// Compare `c * 10^q` with a truncated bound at the same scale.
fn cmp_scaled(c: &BigUint, bound: &Scaled) -> Ordering {
    match c.cmp(&bound.0) {
        Ordering::Equal if bound.1 => Ordering::Less,
        other => other,
    }
}

/// Shortest digits `D` and exponent `q` (value `D * 10^q`) that round back
/// to `parts` at `precision` bits under ties-to-even.
///
/// Works on `precision`-sized numbers only: the interval bounds are scaled
/// to a fixed number of decimal digits with bounded powers of five.
fn shortest_digits(parts: &ExactParts, precision: usize) -> (String, i64) {
    // scale the mantissa to exactly `precision` bits
    let bits = parts.bits() as i64;
    let pad = (precision as i64 - bits).max(0);
    let mantissa = &parts.mantissa << (pad as usize);
    let exponent = parts.exponent - pad;

    // interval bounds in units of 2^(exponent - 2)
    let k = exponent - 2;
    let center = &mantissa << 2usize;
    let hi = &center + 2u32;
    let at_boundary = mantissa == BigUint::one() << ((precision.max(1) - 1) as usize);
    let lo = if at_boundary {
        &center - 1u32
    } else {
        &center - 2u32
    };
    let inclusive = mantissa.is_even();

    // ceil(p * log10(2)) + 1 digits always identify a p-bit value; two more
    // absorb the error of the magnitude estimate
    let max_digits = (precision as f64 * LOG10_2).ceil() as i64 + 1;
    let magnitude = ((center.bits() as i64 - 1 + k) as f64 * LOG10_2).floor() as i64;
    let q0 = magnitude - max_digits - 1;

    let mut width = hi.bits() + 4 * (max_digits.unsigned_abs() + 4) + 64;
    let (lo_d, center_d, hi_d) = loop {
        let pow = Pow5Bounds::new(q0.unsigned_abs(), width);
        if let (Some(l), Some(c), Some(h)) = (
            scaled_floor(&lo, k, q0, &pow),
            scaled_floor(&center, k, q0, &pow),
            scaled_floor(&hi, k, q0, &pow),
        ) {
            break (l, c, h);
        }
        width *= 2;
    };

    let inside = |c: &BigUint, scale: &BigUint| {
        let scaled = c * scale;
        let above_lo = cmp_scaled(&scaled, &lo_d);
        let below_hi = cmp_scaled(&scaled, &hi_d);
        let lower_ok = above_lo == Ordering::Greater || (inclusive && above_lo == Ordering::Equal);
        let upper_ok = below_hi == Ordering::Less || (inclusive && below_hi == Ordering::Equal);
        lower_ok && upper_ok
    };

    let all = center_d.0.to_string();
    for n in 1..all.len() {
        let dropped = all.len() - n;
        let scale = num_traits::pow(BigUint::from(10u32), dropped);
        let (trunc, rest) = center_d.0.div_rem(&scale);
        let up = &trunc + 1u32;
        let choice = match (inside(&trunc, &scale), inside(&up, &scale)) {
            (false, false) => continue,
            (true, false) => trunc,
            (false, true) => up,
            (true, true) => match rest.cmp(&(&scale / 2u32)) {
                Ordering::Less => trunc,
                Ordering::Greater => up,
                Ordering::Equal if center_d.1 || trunc.is_odd() => up,
                Ordering::Equal => trunc,
            },
        };
        return trim_zeros(choice.to_string(), q0 + dropped as i64);
    }
    // max_digits + 2 digits always round-trip
    trim_zeros(all, q0)
}

fn trim_zeros(digits: String, q: i64) -> (String, i64) {
    let trimmed = digits.trim_end_matches('0');
    if trimmed.is_empty() {
        return ("0".to_string(), 0);
    }
    let removed = (digits.len() - trimmed.len()) as i64;
    (trimmed.to_string(), q + removed)
}

/// Lay out `digits * 10^q` the way `{:?}` lays out an f64.
fn layout(digits: &str, q: i64) -> String {
    let len = digits.len() as i64;
    let sci_exponent = len - 1 + q;
    if (-4..16).contains(&sci_exponent) {
        if q >= 0 {
            format!("{}{}.0", digits, "0".repeat(q as usize))
        } else if len + q > 0 {
            let (int_part, frac_part) = digits.split_at((len + q) as usize);
            format!("{}.{}", int_part, frac_part)
        } else {
            format!("0.{}{}", "0".repeat((-(len + q)) as usize), digits)
        }
    } else {
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}", first, sci_exponent)
        } else {
            format!("{}.{}e{}", first, rest, sci_exponent)
        }
    }
}
