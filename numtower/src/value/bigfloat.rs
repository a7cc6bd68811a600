//! BigFloat - arbitrary precision float that carries its precision.
//!
//! The number lives in an `astro_float::BigFloat`, which sizes mantissas in
//! whole machine words. Arithmetic runs on exact integer mantissas
//! ([`ExactParts`]) and is rounded once, ties to even, to the declared
//! precision, so the astro value only ever holds already-rounded numbers.
//! Two values are equal only if both the number and the precision match.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::cmp::Ordering;

use astro_float::{Sign, Word, EXPONENT_MAX, EXPONENT_MIN, INF_NEG, INF_POS, NAN, WORD_BIT_SIZE};
use num_bigint::{BigInt, BigUint, Sign as BigSign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::{BigFloatConsts, BigFloatRoundingMode, RustBigFloat};
use crate::error::{FormatError, NumResult, NumericError};

/// Extra bits carried by intermediate results of multi-step operations.
const GUARD_BITS: u64 = 64;

/// Binary magnitudes past this are outside astro-float's exponent range.
const EXPONENT_SPAN: u64 = (EXPONENT_MAX as u64) * 2;

/// Decimal exponents past this overflow (or underflow) astro-float's range.
const DECIMAL_EXPONENT_LIMIT: i64 = 700_000_000;

const WORD_BYTES: usize = std::mem::size_of::<Word>();

/// Fresh constants cache for astro-float operations that need one.
pub fn consts() -> NumResult<BigFloatConsts> {
    BigFloatConsts::new().map_err(|e| {
        NumericError::out_of_range(format!("failed to initialize BigFloat constants: {}", e))
    })
}

/// Exact binary value `(-1)^negative * mantissa * 2^exponent`.
///
/// The mantissa has no trailing zero bits unless it is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactParts {
    pub negative: bool,
    pub mantissa: BigUint,
    pub exponent: i64,
}

impl ExactParts {
    pub fn zero(negative: bool) -> Self {
        Self {
            negative,
            mantissa: BigUint::zero(),
            exponent: 0,
        }
    }

    pub fn one() -> Self {
        Self {
            negative: false,
            mantissa: BigUint::one(),
            exponent: 0,
        }
    }

    pub fn from_bigint(n: &BigInt) -> Self {
        Self {
            negative: n.sign() == BigSign::Minus,
            mantissa: n.magnitude().clone(),
            exponent: 0,
        }
        .normalize()
    }

    fn normalize(mut self) -> Self {
        match self.mantissa.trailing_zeros() {
            None => self.exponent = 0,
            Some(tz) => {
                self.mantissa >>= tz;
                self.exponent += tz as i64;
            }
        }
        self
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Significant bits of the mantissa.
    pub fn bits(&self) -> u64 {
        self.mantissa.bits()
    }

    /// Exclusive bound on the magnitude: `|value| < 2^top`.
    pub fn top(&self) -> i64 {
        self.bits() as i64 + self.exponent
    }

    pub fn is_integer(&self) -> bool {
        self.exponent >= 0 || self.is_zero()
    }

    /// Append a sticky bit below the mantissa.
    ///
    /// An inexact value lies strictly between its truncation and the next
    /// mantissa step; the half step stands in for it. Needs at least
    /// `precision + 1` mantissa bits to round the same way as the true value.
    fn with_sticky(self, inexact: bool) -> Self {
        if !inexact {
            return self;
        }
        Self {
            negative: self.negative,
            mantissa: (self.mantissa << 1u32) | BigUint::one(),
            exponent: self.exponent - 1,
        }
    }

    /// Round the mantissa to at most `precision` bits, ties to even.
    pub fn round_to(self, precision: usize) -> Self {
        let this = self.normalize();
        let bits = this.bits();
        let p = precision.max(1) as u64;
        if bits <= p {
            return this;
        }
        let shift = bits - p;
        let half = BigUint::one() << (shift - 1);
        let mask = (BigUint::one() << shift) - 1u32;
        let rem = &this.mantissa & &mask;
        let mut mantissa = &this.mantissa >> shift;
        if rem > half || (rem == half && mantissa.is_odd()) {
            mantissa += 1u32;
        }
        Self {
            negative: this.negative,
            mantissa,
            exponent: this.exponent + shift as i64,
        }
        .normalize()
    }

    /// Top `width` mantissa bits, their exponent, and whether anything
    /// nonzero was cut off below them.
    fn split_at_width(&self, width: u64) -> (BigUint, i64, bool) {
        let bits = self.bits();
        if bits <= width {
            return (self.mantissa.clone(), self.exponent, false);
        }
        let shift = bits - width;
        let lost = self.mantissa.trailing_zeros().is_some_and(|tz| tz < shift);
        (&self.mantissa >> shift, self.exponent + shift as i64, lost)
    }

    /// Truncate to `width` bits and force the last bit on if anything was
    /// dropped (round to odd).
    fn round_to_odd(self, width: u64) -> Self {
        let (mut mantissa, exponent, lost) = self.split_at_width(width);
        if lost {
            mantissa |= BigUint::one();
        }
        Self {
            negative: self.negative,
            mantissa,
            exponent,
        }
        .normalize()
    }

    /// `width`-bit bound on the magnitude, toward zero or away from it.
    fn narrow(&self, width: u64, up: bool) -> (Self, bool) {
        let (mut mantissa, exponent, lost) = self.split_at_width(width);
        if up && lost {
            mantissa += 1u32;
        }
        let bound = Self {
            negative: self.negative,
            mantissa,
            exponent,
        };
        (bound.normalize(), lost)
    }

    /// Exact product.
    pub fn product(&self, other: &Self) -> Self {
        Self {
            negative: self.negative != other.negative,
            mantissa: &self.mantissa * &other.mantissa,
            exponent: self.exponent + other.exponent,
        }
        .normalize()
    }

    /// `self + other`, rounded once to `precision` bits.
    pub fn sum(&self, other: &Self, precision: usize) -> Self {
        if self.is_zero() && other.is_zero() {
            return Self::zero(self.negative && other.negative);
        }
        if other.is_zero() {
            return self.clone().round_to(precision);
        }
        if self.is_zero() {
            return other.clone().round_to(precision);
        }
        let (big, small) = if self.top() >= other.top() {
            (self, other)
        } else {
            (other, self)
        };
        // Below `floor` no rounding boundary sits near `big`: a smaller
        // operand only decides which side of `big` the sum lands on.
        let floor = (big.top() - precision.max(1) as i64 - 3).min(big.exponent);
        let stand_in;
        let small = if small.top() < floor {
            stand_in = Self {
                negative: small.negative,
                mantissa: BigUint::one(),
                exponent: floor - 1,
            };
            &stand_in
        } else {
            small
        };
        let exponent = big.exponent.min(small.exponent);
        let signed = |p: &Self| {
            let sign = if p.negative {
                BigSign::Minus
            } else {
                BigSign::Plus
            };
            BigInt::from_biguint(sign, &p.mantissa << ((p.exponent - exponent) as usize))
        };
        let (sign, mantissa) = (signed(big) + signed(small)).into_parts();
        if mantissa.is_zero() {
            return Self::zero(false);
        }
        Self {
            negative: sign == BigSign::Minus,
            mantissa,
            exponent,
        }
        .round_to(precision)
    }

    /// `self / other`, rounded once to `precision` bits. `other` is nonzero.
    pub fn quotient(&self, other: &Self, precision: usize) -> Self {
        let negative = self.negative != other.negative;
        if self.is_zero() {
            return Self::zero(negative);
        }
        // at least precision + 2 quotient bits keep the sticky bit below
        // the rounding bit
        let shift = (precision.max(1) as u64 + 2 + other.bits()).saturating_sub(self.bits());
        let (q, r) = (&self.mantissa << shift).div_rem(&other.mantissa);
        Self {
            negative,
            mantissa: q,
            exponent: self.exponent - shift as i64 - other.exponent,
        }
        .with_sticky(!r.is_zero())
        .round_to(precision)
    }

    /// `self / other` to at least `width` bits, truncated or rounded up.
    fn quotient_bound(&self, other: &Self, width: u64, up: bool) -> Self {
        let shift = (width + other.bits()).saturating_sub(self.bits());
        let (mut q, r) = (&self.mantissa << shift).div_rem(&other.mantissa);
        if up && !r.is_zero() {
            q += 1u32;
        }
        Self {
            negative: self.negative != other.negative,
            mantissa: q,
            exponent: self.exponent - shift as i64 - other.exponent,
        }
        .normalize()
    }

    /// Scale by `2^k`.
    fn shifted(self, k: i64) -> Self {
        Self {
            exponent: self.exponent + k,
            ..self
        }
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(&self) -> BigInt {
        let magnitude = if self.exponent >= 0 {
            &self.mantissa << (self.exponent as usize)
        } else {
            &self.mantissa >> (self.exponent.unsigned_abs() as usize)
        };
        let sign = if self.negative {
            BigSign::Minus
        } else {
            BigSign::Plus
        };
        BigInt::from_biguint(sign, magnitude)
    }

    /// Nearest f64 (single rounding for normal results).
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return if self.negative { -0.0 } else { 0.0 };
        }
        let bits = self.bits();
        let (top, exponent) = if bits > 64 {
            let shift = (bits - 64) as usize;
            let mask = (BigUint::one() << shift) - 1u32;
            let sticky = !(&self.mantissa & &mask).is_zero();
            let top = (&self.mantissa >> shift).to_u64().unwrap_or(u64::MAX) | u64::from(sticky);
            (top, self.exponent + shift as i64)
        } else {
            (self.mantissa.to_u64().unwrap_or(u64::MAX), self.exponent)
        };
        let magnitude = scale_by_pow2(top as f64, exponent);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// `x * 2^exp` without intermediate overflow for moderate exponents.
fn scale_by_pow2(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
        if x.is_infinite() {
            return x;
        }
    }
    while exp < -STEP {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
        if x == 0.0 {
            return x;
        }
    }
    x * 2f64.powi(exp as i32)
}

/// `lower <= 5^n <= upper`, both carried in `width` bits.
///
/// Square-and-multiply on two chains, one truncating and one rounding up,
/// so the cost depends on `width` and `log2(n)` only.
#[derive(Debug)]
pub(crate) struct Pow5Bounds {
    pub lower: ExactParts,
    pub upper: ExactParts,
    /// Both bounds are `5^n` itself.
    pub exact: bool,
}

impl Pow5Bounds {
    pub fn new(mut n: u64, width: u64) -> Self {
        let five = ExactParts::from_bigint(&BigInt::from(5));
        let (mut lower, mut lower_base) = (ExactParts::one(), five.clone());
        let (mut upper, mut upper_base) = (ExactParts::one(), five);
        let mut exact = true;
        let mut step = |chain: &ExactParts, base: &ExactParts, up: bool| {
            let (bound, lost) = chain.product(base).narrow(width, up);
            exact &= !lost;
            bound
        };
        while n > 0 {
            if n & 1 == 1 {
                lower = step(&lower, &lower_base, false);
                upper = step(&upper, &upper_base, true);
            }
            n >>= 1;
            if n > 0 {
                lower_base = step(&lower_base, &lower_base, false);
                upper_base = step(&upper_base, &upper_base, true);
            }
        }
        Self {
            lower,
            upper,
            exact,
        }
    }
}

/// `digits * 10^exp10`, correctly rounded to `precision` bits.
///
/// Rounding is monotone, so once both bounds on `5^|exp10|` round to the
/// same value the true product does too; otherwise widen and retry.
fn round_decimal(digits: &BigUint, exp10: i64, precision: usize) -> ExactParts {
    let value = ExactParts {
        negative: false,
        mantissa: digits.clone(),
        exponent: 0,
    }
    .normalize();
    if value.is_zero() {
        return value;
    }
    let mut width = value.bits() + precision as u64 + GUARD_BITS;
    loop {
        let pow = Pow5Bounds::new(exp10.unsigned_abs(), width);
        if pow.exact {
            let scaled = if exp10 >= 0 {
                value.product(&pow.lower).round_to(precision)
            } else {
                value.quotient(&pow.lower, precision)
            };
            return scaled.shifted(exp10);
        }
        let (low, high) = if exp10 >= 0 {
            (value.product(&pow.lower), value.product(&pow.upper))
        } else {
            (
                value.quotient_bound(&pow.upper, width, false),
                value.quotient_bound(&pow.lower, width, true),
            )
        };
        let low = low.round_to(precision);
        if low == high.round_to(precision) {
            return low.shifted(exp10);
        }
        width *= 2;
    }
}

/// Decimal exponent digits with an optional sign; saturates far outside
/// astro-float's range.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Arbitrary precision float with explicit precision.
#[derive(Debug, Clone)]
pub struct BigFloat {
    value: RustBigFloat,
    precision: usize,
}

impl BigFloat {
    /// Wrap an astro-float result, rounding it to exactly `precision` bits.
    ///
    /// astro's inexact flag becomes a sticky bit, so a result truncated at a
    /// wider working precision is still rounded only once.
    fn from_raw(value: RustBigFloat, precision: usize) -> Self {
        match raw_parts_of(&value) {
            Some(parts) => Self::from_parts(&parts.with_sticky(value.inexact()), precision),
            None => Self {
                value,
                precision: precision.max(1),
            },
        }
    }

    /// Exact value from its binary parts, rounded to `precision`.
    pub fn from_parts(parts: &ExactParts, precision: usize) -> Self {
        let precision = precision.max(1);
        let rounded = parts.clone().round_to(precision);
        Self {
            value: to_astro(&rounded, precision),
            precision,
        }
    }

    pub fn from_f64(x: f64, precision: usize) -> Self {
        // every f64 is exact in one 64-bit word
        Self::from_raw(RustBigFloat::from_f64(x, 64), precision)
    }

    pub fn from_i64(n: i64, precision: usize) -> Self {
        Self::from_bigint(&BigInt::from(n), precision)
    }

    /// Convert a BigInt, exact when `precision >= n.bits()`.
    pub fn from_bigint(n: &BigInt, precision: usize) -> Self {
        Self::from_parts(&ExactParts::from_bigint(n), precision)
    }

    /// Parse decimal text (`"12.7"`, `"-1.5e300"`, `"1_000.5"`), correctly
    /// rounded to `precision` bits.
    pub fn parse_decimal(text: &str, precision: usize) -> NumResult<Self> {
        let invalid = || NumericError::from(FormatError::InvalidFloat(text.to_string()));
        let cleaned = text.replace('_', "");
        let (negative, body) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };
        let (mantissa_text, exp10) = match body.split_once(['e', 'E']) {
            Some((m, e)) => (m, parse_exponent(e).ok_or_else(invalid)?),
            None => (body, 0),
        };
        let (int_part, frac_part) = mantissa_text.split_once('.').unwrap_or((mantissa_text, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let joined = format!("{}{}", int_part, frac_part);
        let significant = joined.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Self::signed_zero(negative, precision));
        }
        let digits = BigUint::parse_bytes(significant.as_bytes(), 10).ok_or_else(invalid)?;
        let exp10 = exp10.saturating_sub(frac_part.len() as i64);
        let magnitude = exp10.saturating_add(significant.len() as i64);
        if magnitude > DECIMAL_EXPONENT_LIMIT {
            return Ok(Self::infinity(negative, precision));
        }
        if magnitude < -DECIMAL_EXPONENT_LIMIT {
            return Ok(Self::signed_zero(negative, precision));
        }
        let mut parts = round_decimal(&digits, exp10, precision.max(1));
        parts.negative = negative;
        Ok(Self::from_parts(&parts, precision))
    }

    pub fn nan(precision: usize) -> Self {
        Self {
            value: NAN,
            precision: precision.max(1),
        }
    }

    pub fn infinity(negative: bool, precision: usize) -> Self {
        Self {
            value: if negative { INF_NEG } else { INF_POS },
            precision: precision.max(1),
        }
    }

    fn signed_zero(negative: bool, precision: usize) -> Self {
        Self::from_parts(&ExactParts::zero(negative), precision)
    }

    /// Declared mantissa width in bits.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Same number, rounded to a new precision.
    pub fn with_precision(&self, precision: usize) -> Self {
        match self.exact_parts() {
            Some(parts) => Self::from_parts(&parts, precision),
            None => Self {
                value: self.value.clone(),
                precision: precision.max(1),
            },
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.value.is_inf()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Exact binary value; `None` for NaN and infinities.
    pub fn exact_parts(&self) -> Option<ExactParts> {
        raw_parts_of(&self.value).map(ExactParts::normalize)
    }

    pub fn to_f64(&self) -> f64 {
        if self.is_nan() {
            return f64::NAN;
        }
        if self.is_infinite() {
            return if self.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        self.exact_parts().map_or(f64::NAN, |p| p.to_f64())
    }

    pub fn add(&self, other: &Self, precision: usize) -> Self {
        match (self.exact_parts(), other.exact_parts()) {
            (Some(a), Some(b)) => Self::from_parts(&a.sum(&b, precision), precision),
            _ => Self::from_raw(
                self.value.add(&other.value, 64, BigFloatRoundingMode::ToEven),
                precision,
            ),
        }
    }

    pub fn sub(&self, other: &Self, precision: usize) -> Self {
        self.add(&other.neg(), precision)
    }

    pub fn mul(&self, other: &Self, precision: usize) -> Self {
        match (self.exact_parts(), other.exact_parts()) {
            (Some(a), Some(b)) => Self::from_parts(&a.product(&b), precision),
            _ => Self::from_raw(
                self.value.mul(&other.value, 64, BigFloatRoundingMode::ToEven),
                precision,
            ),
        }
    }

    /// IEEE division: a zero divisor yields ±Inf, or NaN for `0 / 0`.
    pub fn div(&self, other: &Self, precision: usize) -> Self {
        if other.is_zero() {
            if self.is_zero() || self.is_nan() {
                return Self::nan(precision);
            }
            return Self::infinity(self.is_negative() != other.is_negative(), precision);
        }
        match (self.exact_parts(), other.exact_parts()) {
            (Some(a), Some(b)) => Self::from_parts(&a.quotient(&b, precision), precision),
            _ => Self::from_raw(
                self.value.div(&other.value, 64, BigFloatRoundingMode::ToEven),
                precision,
            ),
        }
    }

    /// Truncated remainder (`fmod`); exact before the final rounding.
    pub fn rem(&self, other: &Self, precision: usize) -> Self {
        if other.is_infinite() && !self.is_infinite() && !self.is_nan() {
            return self.with_precision(precision);
        }
        let (Some(a), Some(b)) = (self.exact_parts(), other.exact_parts()) else {
            return Self::nan(precision);
        };
        if b.is_zero() {
            return Self::nan(precision);
        }
        if a.is_zero() {
            return Self::from_parts(&a, precision);
        }
        let exponent = a.exponent.min(b.exponent);
        let lhs = &a.mantissa << ((a.exponent - exponent) as usize);
        let rhs = &b.mantissa << ((b.exponent - exponent) as usize);
        let parts = ExactParts {
            negative: a.negative,
            mantissa: lhs % rhs,
            exponent,
        };
        Self::from_parts(&parts, precision)
    }

    /// `self ^ n` for an integer exponent by square-and-multiply.
    ///
    /// Intermediates are kept at `precision + GUARD_BITS` bits and rounded
    /// to odd, so the final rounding still sees every discarded bit.
    pub fn powi(&self, n: &BigInt, precision: usize) -> NumResult<Self> {
        let negative_exponent = n.sign() == BigSign::Minus;
        let negative = self.is_negative() && n.is_odd();
        if n.is_zero() {
            return Ok(Self::from_i64(1, precision));
        }
        if self.is_nan() {
            return Ok(Self::nan(precision));
        }
        // infinite bases have no exact parts
        let Some(base) = self.exact_parts() else {
            return Ok(if negative_exponent {
                Self::signed_zero(negative, precision)
            } else {
                Self::infinity(negative, precision)
            });
        };
        if base.is_zero() {
            return Ok(if negative_exponent {
                Self::infinity(negative, precision)
            } else {
                Self::signed_zero(negative, precision)
            });
        }
        if base.exponent == 0 && base.mantissa.is_one() {
            return Ok(Self::from_i64(if negative { -1 } else { 1 }, precision));
        }
        let Some(mut exp) = n.magnitude().to_u64() else {
            return Err(NumericError::out_of_range(format!("exponent {} is too large", n)));
        };

        let working = precision.max(1) as u64 + GUARD_BITS;
        let mut square = ExactParts {
            negative: false,
            ..base
        };
        let mut result = ExactParts::one();
        loop {
            if exp & 1 == 1 {
                result = result.product(&square).round_to_odd(working);
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            square = square.product(&square).round_to_odd(working);
            if square.top().unsigned_abs() > EXPONENT_SPAN {
                let huge = (square.top() > 0) != negative_exponent;
                return Ok(if huge {
                    Self::infinity(negative, precision)
                } else {
                    Self::signed_zero(negative, precision)
                });
            }
        }
        result.negative = negative;
        let parts = if negative_exponent {
            ExactParts::one().quotient(&result, precision)
        } else {
            result
        };
        Ok(Self::from_parts(&parts, precision))
    }

    /// General power; integral exponents take the [`BigFloat::powi`] path.
    pub fn pow(&self, exponent: &Self, precision: usize) -> NumResult<Self> {
        if let Some(parts) = exponent.exact_parts() {
            if parts.is_integer() {
                // past 2^128 only the sign and parity (even) of `n` matter
                let n = if parts.top() > 128 {
                    let sign = if parts.negative {
                        BigSign::Minus
                    } else {
                        BigSign::Plus
                    };
                    BigInt::from_biguint(sign, BigUint::one() << 128u32)
                } else {
                    parts.trunc()
                };
                return self.powi(&n, precision);
            }
        }
        let mut cc = consts()?;
        let working = precision.max(1) + 2 * WORD_BIT_SIZE;
        Ok(Self::from_raw(
            self.value
                .pow(&exponent.value, working, BigFloatRoundingMode::ToZero, &mut cc),
            precision,
        ))
    }

    pub fn neg(&self) -> Self {
        Self {
            value: self.value.neg(),
            precision: self.precision,
        }
    }

    /// Numeric ordering; `None` when either side is NaN.
    pub fn partial_cmp_value(&self, other: &Self) -> Option<Ordering> {
        self.value.cmp(&other.value).map(|c| c.cmp(&0))
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision
            && self.partial_cmp_value(other) == Some(Ordering::Equal)
    }
}

/// Full-width mantissa of a finite astro value, trailing zeros kept.
fn raw_parts_of(value: &RustBigFloat) -> Option<ExactParts> {
    if value.is_nan() || value.is_inf() {
        return None;
    }
    if value.is_zero() {
        return Some(ExactParts::zero(value.is_negative()));
    }
    let (words, _bits, sign, exponent, _inexact) = value.as_raw_parts()?;
    // words are stored least significant first
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    // astro-float normalizes to 0.m * 2^e
    let width = (WORD_BIT_SIZE * words.len()) as i64;
    Some(ExactParts {
        negative: matches!(sign, Sign::Neg),
        mantissa: BigUint::from_bytes_le(&bytes),
        exponent: i64::from(exponent) - width,
    })
}

/// Materialize exact parts as an astro value holding at least `precision`
/// bits; out-of-range magnitudes become ±Inf or ±0.
fn to_astro(parts: &ExactParts, precision: usize) -> RustBigFloat {
    let width = precision
        .max(parts.bits() as usize)
        .max(1)
        .div_ceil(WORD_BIT_SIZE)
        * WORD_BIT_SIZE;
    if parts.is_zero() {
        let zero = RustBigFloat::new(width);
        return if parts.negative { zero.neg() } else { zero };
    }
    let top = parts.top();
    if top > i64::from(EXPONENT_MAX) {
        return if parts.negative { INF_NEG } else { INF_POS };
    }
    if top < i64::from(EXPONENT_MIN) {
        let zero = RustBigFloat::new(width);
        return if parts.negative { zero.neg() } else { zero };
    }
    // pad so the top bit of the last word is set
    let mantissa = &parts.mantissa << (width as u64 - parts.bits());
    let words: Vec<Word> = mantissa
        .to_bytes_le()
        .chunks(WORD_BYTES)
        .map(|chunk| {
            let mut buf = [0u8; WORD_BYTES];
            buf[..chunk.len()].copy_from_slice(chunk);
            Word::from_le_bytes(buf)
        })
        .collect();
    let sign = if parts.negative { Sign::Neg } else { Sign::Pos };
    // `top` fits: checked against the exponent range above
    RustBigFloat::from_words(&words, sign, top as i32)
}
