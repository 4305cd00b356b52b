//! Literal values carried by the AST.
//!
//! The parser never evaluates expressions, but constant literals (numbers,
//! strings, `true`/`false`/`null`) and constant index keys are stored as
//! [`Value`]s so traversal paths can be analyzed statically.

use std::fmt;

use thiserror::Error;

/// Coarse type of a value, used for unknown placeholders.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    /// Any type at all.
    Dynamic,
    Bool,
    Number,
    String,
}

/// A constant value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// A value of the given type that is not known at parse time.
    ///
    /// `Unknown(ValueType::Dynamic)` is the placeholder the parser inserts
    /// where an expression could not be parsed.
    Unknown(ValueType),
}

impl Value {
    /// The dynamic placeholder value.
    pub const DYNAMIC: Value = Value::Unknown(ValueType::Dynamic);

    /// Convert this value to a number.
    ///
    /// Numbers pass through, strings go through [`Number::parse`], unknowns
    /// become unknown numbers. Anything else is rejected.
    pub fn to_number(&self) -> Result<Value, NumberError> {
        match self {
            Value::Number(n) => Ok(Value::Number(n.clone())),
            Value::String(s) => Number::parse(s).map(Value::Number),
            Value::Unknown(_) => Ok(Value::Unknown(ValueType::Number)),
            Value::Null | Value::Bool(_) => Err(NumberError::Invalid),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Value::Unknown(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Unknown(_) => f.write_str("(unknown)"),
        }
    }
}

/// Failure converting text to a number.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum NumberError {
    #[error("a number is required, but the string is empty")]
    Empty,
    #[error("a number is required")]
    Invalid,
    #[error("number is out of range")]
    OutOfRange,
}

/// A finite number of arbitrary precision.
///
/// Stored as decimal significant digits and a power-of-ten exponent, so
/// `1e400` and `9007199254740993` are kept exactly. Conversion to `f64`
/// happens only on demand. The representation is normalized (no leading or
/// trailing zero digits, zero is never negative), so derived equality and
/// hashing compare values.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Number {
    negative: bool,
    /// Significant digits, ASCII `1-9` first and last. Empty for zero.
    digits: String,
    /// The value is `digits * 10^exponent`.
    exponent: i64,
}

/// Largest decimal exponent accepted in number text.
const MAX_EXPONENT: i64 = i32::MAX as i64;

impl Number {
    /// Build a normalized number from raw digits and exponent.
    fn from_parts(negative: bool, digits: &str, exponent: i64) -> Result<Self, NumberError> {
        let leading = digits.trim_start_matches('0');
        let significant = leading.trim_end_matches('0');
        if significant.is_empty() {
            return Ok(Number::zero());
        }
        #[allow(clippy::cast_possible_wrap)]
        let trailing = (leading.len() - significant.len()) as i64;
        let exponent = exponent
            .checked_add(trailing)
            .filter(|e| e.abs() <= MAX_EXPONENT)
            .ok_or(NumberError::OutOfRange)?;
        Ok(Number {
            negative,
            digits: significant.to_owned(),
            exponent,
        })
    }

    pub fn zero() -> Self {
        Number {
            negative: false,
            digits: String::new(),
            exponent: 0,
        }
    }

    /// Create from a finite float. Non-finite input is rejected.
    pub fn from_f64(value: f64) -> Result<Self, NumberError> {
        if !value.is_finite() {
            return Err(NumberError::OutOfRange);
        }
        // `{:e}` is the shortest text that round-trips, e.g. `1.5e0`.
        Number::parse(&format!("{value:e}"))
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Nearest `f64`. Magnitudes beyond its range become infinite or zero.
    pub fn as_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let sign = if self.negative { "-" } else { "" };
        format!("{sign}{}e{}", self.digits, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// The number as a collection index, if it is a non-negative integer
    /// that fits in a `u64`.
    pub fn as_index(&self) -> Option<u64> {
        if self.is_zero() {
            return Some(0);
        }
        if self.negative || self.exponent < 0 {
            return None;
        }
        let zeros = u32::try_from(self.exponent).ok()?;
        let mantissa: u64 = self.digits.parse().ok()?;
        mantissa.checked_mul(10u64.checked_pow(zeros)?)
    }

    /// Parse decimal number text.
    ///
    /// Accepted grammar: `[+-]? digits ( "." digits )? ( [eE] [+-]? digits )?`.
    /// Leading or trailing whitespace, hex, `inf` and `nan` are rejected, as
    /// are exponents too large to represent.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        if text.is_empty() {
            return Err(NumberError::Empty);
        }
        if !is_decimal(text.as_bytes()) {
            return Err(NumberError::Invalid);
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..])?),
            None => (unsigned, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        #[allow(clippy::cast_possible_wrap)]
        let exponent = exponent
            .checked_sub(frac.len() as i64)
            .ok_or(NumberError::OutOfRange)?;
        Number::from_parts(negative, &format!("{int}{frac}"), exponent)
    }
}

/// Exponent digits with optional sign, already validated.
fn parse_exponent(text: &str) -> Result<i64, NumberError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .try_fold(0i64, |acc, b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .filter(|e| *e <= MAX_EXPONENT)
        .ok_or(NumberError::OutOfRange)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn is_decimal(bytes: &[u8]) -> bool {
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if !digits(&mut i) {
        return false;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !digits(&mut i) {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::from_parts(false, &n.to_string(), 0).unwrap_or_else(|_| Number::zero())
    }
}

impl fmt::Display for Number {
    /// Plain decimal for moderate magnitudes, `d.ddde±N` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        let digits = self.digits.as_str();
        #[allow(clippy::cast_possible_wrap)]
        let point = digits.len() as i64 + self.exponent;
        match point {
            // Integer with up to 21 digits.
            _ if self.exponent >= 0 && point <= 21 => {
                let zeros = usize::try_from(self.exponent).unwrap_or(0);
                write!(f, "{digits}{}", "0".repeat(zeros))
            }
            // Fraction with the point inside the digits.
            1.. if self.exponent < 0 => {
                let at = usize::try_from(point).unwrap_or(0);
                write!(f, "{}.{}", &digits[..at], &digits[at..])
            }
            // Small fraction with a few leading zeros.
            -5..=0 => {
                let zeros = usize::try_from(-point).unwrap_or(0);
                write!(f, "0.{}{digits}", "0".repeat(zeros))
            }
            _ => {
                let (first, rest) = digits.split_at(1);
                if rest.is_empty() {
                    write!(f, "{first}e{}", point - 1)
                } else {
                    write!(f, "{first}.{rest}e{}", point - 1)
                }
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
