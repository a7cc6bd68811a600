//! Numeric literal parser.
//!
//! Grammar accepted by [`parse_integer`]:
//!
//! ```text
//! [+-] [0b | 0q | 0o | 0d | 0x] digit ( digit | _ )*
//! ```
//!
//! With base `0` the prefix selects the radix (2, 4, 8, 12, 16; default 10).
//! Digits are `0-9` then `a-z`/`A-Z` for 10..35. [`parse_literal`] adds
//! decimal floats and the type suffixes `i8..i64`, `u8..u64`, `f32`, `f64`
//! and `bf`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{FormatError, NumResult};
use crate::value::{BigFloat, Value};

/// Minimum precision of a `bf` literal.
const MIN_LITERAL_PRECISION: usize = 64;

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

/// Radix selected by a `0b`/`0q`/`0o`/`0d`/`0x` prefix.
fn prefix_base(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    match bytes[1].to_ascii_lowercase() {
        b'b' => Some(2),
        b'q' => Some(4),
        b'o' => Some(8),
        b'd' => Some(12),
        b'x' => Some(16),
        _ => None,
    }
}

fn resolve_base(text: &str, base: u32) -> Result<(u32, &str), FormatError> {
    if base == 0 {
        return Ok(match prefix_base(text) {
            Some(b) => (b, &text[2..]),
            None => (10, text),
        });
    }
    if !(2..=36).contains(&base) {
        return Err(FormatError::InvalidBase(base));
    }
    Ok((base, text))
}

/// Feed each digit value to `accept`; returns the number of digits seen.
fn scan_digits(
    digits: &str,
    base: u32,
    mut accept: impl FnMut(u32) -> Result<(), FormatError>,
) -> Result<usize, FormatError> {
    let mut count = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        match c.to_digit(36) {
            Some(d) if d < base => accept(d)?,
            _ => return Err(FormatError::illegal_character(base, c)),
        }
        count += 1;
    }
    if count == 0 {
        return Err(FormatError::InvalidFormat);
    }
    Ok(count)
}

/// Parse an integer literal into an arbitrary precision integer.
///
/// `base` is 2..=36, or 0 to sniff a radix prefix.
pub fn parse_integer(text: &str, base: u32) -> Result<BigInt, FormatError> {
    let (negative, rest) = split_sign(text);
    let (base, digits) = resolve_base(rest, base)?;
    let mut values = Vec::with_capacity(digits.len());
    scan_digits(digits, base, |d| {
        // d < base <= 36
        values.push(d as u8);
        Ok(())
    })?;
    let magnitude = BigUint::from_radix_be(&values, base).ok_or(FormatError::InvalidFormat)?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn max_for_width(bit_width: u32) -> u64 {
    if bit_width >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_width) - 1
    }
}

/// Accumulate digits into a magnitude no larger than `limit`.
fn accumulate(digits: &str, base: u32, limit: u64) -> Result<Option<u64>, FormatError> {
    let mut acc: u64 = 0;
    let mut overflow = false;
    scan_digits(digits, base, |d| {
        if !overflow {
            match acc
                .checked_mul(u64::from(base))
                .and_then(|v| v.checked_add(u64::from(d)))
            {
                Some(v) if v <= limit => acc = v,
                _ => overflow = true,
            }
        }
        Ok(())
    })?;
    Ok(if overflow { None } else { Some(acc) })
}

/// Parse an unsigned literal of a strict integer type.
///
/// Values past `2^bit_width - 1` fail with
/// [`FormatError::ValueOverflows`] carrying the width's maximum.
pub fn parse_strict_integer(text: &str, base: u32, bit_width: u32) -> Result<u64, FormatError> {
    let rest = text.strip_prefix('+').unwrap_or(text);
    let (base, digits) = resolve_base(rest, base)?;
    let max = max_for_width(bit_width);
    accumulate(digits, base, max)?.ok_or(FormatError::ValueOverflows { saturated: max })
}

/// Parse a signed literal of a strict integer type.
///
/// Overflow saturates to the width's `MIN` or `MAX`, reported as a two's
/// complement bit pattern.
#[allow(clippy::cast_sign_loss)]
pub fn parse_strict_signed(text: &str, base: u32, bit_width: u32) -> Result<i64, FormatError> {
    let bit_width = bit_width.clamp(1, 64);
    let (negative, rest) = split_sign(text);
    let (base, digits) = resolve_base(rest, base)?;
    let max = max_for_width(bit_width - 1);
    let limit = if negative { max + 1 } else { max };
    match accumulate(digits, base, limit)? {
        Some(magnitude) if negative => Ok((magnitude as i64).wrapping_neg()),
        Some(magnitude) => Ok(magnitude as i64),
        None => {
            let saturated = if negative {
                (max as i64).wrapping_neg().wrapping_sub(1) as u64
            } else {
                max
            };
            Err(FormatError::ValueOverflows { saturated })
        }
    }
}

/// Digits of a decimal literal's mantissa that carry precision.
///
/// Skips the sign, `.`, `_` and leading zeros; stops at the exponent.
pub fn count_significant_digits(text: &str) -> usize {
    let mut count = 0;
    for c in text.chars() {
        match c {
            'e' | 'E' => break,
            '0' if count == 0 => {}
            '0'..='9' => count += 1,
            _ => {}
        }
    }
    count
}

/// Precision, in bits, of a `bf` literal: enough for every decimal digit,
/// and never below 64.
pub fn bigfloat_precision_for(text: &str) -> usize {
    let digits = count_significant_digits(text) as f64;
    let bits = (digits * std::f64::consts::LOG2_10).round() as usize;
    bits.max(MIN_LITERAL_PRECISION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    Signed(u32),
    Unsigned(u32),
    Float32,
    Float64,
    BigFloat,
}

const SUFFIXES: [(&str, Suffix); 11] = [
    ("i8", Suffix::Signed(8)),
    ("i16", Suffix::Signed(16)),
    ("i32", Suffix::Signed(32)),
    ("i64", Suffix::Signed(64)),
    ("u8", Suffix::Unsigned(8)),
    ("u16", Suffix::Unsigned(16)),
    ("u32", Suffix::Unsigned(32)),
    ("u64", Suffix::Unsigned(64)),
    ("f32", Suffix::Float32),
    ("f64", Suffix::Float64),
    ("bf", Suffix::BigFloat),
];

fn split_suffix(text: &str, prefixed: bool) -> (&str, Option<Suffix>) {
    for (name, suffix) in SUFFIXES {
        // hex digits can spell `bf`, `f32`, ...
        if prefixed && !matches!(suffix, Suffix::Signed(_) | Suffix::Unsigned(_)) {
            continue;
        }
        if let Some(body) = text.strip_suffix(name) {
            if !body.is_empty() {
                return (body, Some(suffix));
            }
        }
    }
    (text, None)
}

fn is_decimal_float_text(text: &str) -> bool {
    let (_, rest) = split_sign(text);
    rest.starts_with(|c: char| c.is_ascii_digit())
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-' | '_'))
}

fn parse_float(text: &str, body: &str) -> Result<f64, FormatError> {
    if !is_decimal_float_text(body) {
        return Err(FormatError::InvalidFloat(text.to_string()));
    }
    body.replace('_', "")
        .parse::<f64>()
        .map_err(|_| FormatError::InvalidFloat(text.to_string()))
}

/// Convert a complete numeric literal to its canonical value.
///
/// ```
/// use numtower::literal::parse_literal;
/// use numtower::value::Value;
///
/// assert_eq!(parse_literal("0x_ff").unwrap(), Value::SmallInt(255));
/// assert_eq!(parse_literal("200u8").unwrap(), Value::UInt8(200));
/// assert_eq!(parse_literal("1.5").unwrap(), Value::Float(1.5));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn parse_literal(text: &str) -> NumResult<Value> {
    let prefixed = prefix_base(split_sign(text).1).is_some();
    let (body, suffix) = split_suffix(text, prefixed);
    let value = match suffix {
        Some(Suffix::Signed(bits)) => {
            let n = parse_strict_signed(body, 0, bits)?;
            match bits {
                8 => Value::Int8(n as i8),
                16 => Value::Int16(n as i16),
                32 => Value::Int32(n as i32),
                _ => Value::Int64(n),
            }
        }
        Some(Suffix::Unsigned(bits)) => {
            let n = parse_strict_integer(body, 0, bits)?;
            match bits {
                8 => Value::UInt8(n as u8),
                16 => Value::UInt16(n as u16),
                32 => Value::UInt32(n as u32),
                _ => Value::UInt64(n),
            }
        }
        Some(Suffix::Float32) => Value::Float32(parse_float(text, body)? as f32),
        Some(Suffix::Float64) => Value::Float64(parse_float(text, body)?),
        Some(Suffix::BigFloat) => {
            if !is_decimal_float_text(body) {
                return Err(FormatError::InvalidFloat(text.to_string()).into());
            }
            Value::BigFloat(BigFloat::parse_decimal(body, bigfloat_precision_for(body))?)
        }
        None if !prefixed && body.contains(['.', 'e', 'E']) => {
            Value::Float(parse_float(text, body)?)
        }
        None => Value::from_bigint(parse_integer(body, 0)?),
    };
    Ok(value)
}
