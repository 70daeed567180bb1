//! Scalar purifiers — booleans, integers, floats and JSON
//!
//! Same contract as the identifier canonicalizer: `(raw, default) -> value`,
//! with the default returned untouched on any failure.

use std::sync::LazyLock;

use regex::Regex;

use crate::canonicalizer::{require_text, settle};
use crate::error::{Rejection, Result};
use crate::raw::RawValue;

static SIGNED_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("built-in decimal pattern must compile")
});

static UNSIGNED_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]*\.?[0-9]+$").expect("built-in decimal pattern must compile")
});

// ── Booleans ───────────────────────────────────────────────

/// `true`/`false` from a boolean, or from the tokens `1 on true yes` /
/// `0 off false no` in any case.
pub fn boolean<'r, D: From<bool>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("boolean", parse_boolean(raw.into()), default)
}

fn parse_boolean(raw: RawValue<'_>) -> Result<bool> {
    const TRUTHY: [&str; 4] = ["1", "on", "true", "yes"];
    const FALSY: [&str; 4] = ["0", "off", "false", "no"];

    match raw {
        RawValue::Boolean(value) => Ok(value),
        RawValue::Text(text) => {
            if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(text)) {
                Ok(true)
            } else if FALSY.iter().any(|t| t.eq_ignore_ascii_case(text)) {
                Ok(false)
            } else {
                Err(Rejection::Unmatched("boolean token"))
            }
        }
        other => Err(Rejection::TypeMismatch {
            expected: "boolean or text",
            found: other.kind(),
        }),
    }
}

// ── Integers ───────────────────────────────────────────────

/// Integer from a number (floored) or from the leading decimal digits of a
/// string, so `"123.456"` → 123, `"1blabla"` → 1 and `"0x1234"` → 0.
pub fn integer<'r, D: From<i64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("integer", parse_integer(raw.into()), default)
}

/// Integer within the inclusive bounds; a missing bound is unbounded.
pub fn integer_in_range<'r, D: From<i64>>(
    raw: impl Into<RawValue<'r>>,
    lower: Option<i64>,
    upper: Option<i64>,
    default: D,
) -> D {
    settle(
        "integer_in_range",
        parse_integer(raw.into()).and_then(|value| within(value, lower, upper)),
        default,
    )
}

/// Integer ≥ 1
pub fn positive_integer<'r, D: From<i64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "positive_integer",
        parse_integer(raw.into()).and_then(|value| within(value, Some(1), None)),
        default,
    )
}

/// Integer ≥ 0
pub fn positive_integer_or_zero<'r, D: From<i64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "positive_integer_or_zero",
        parse_integer(raw.into()).and_then(|value| within(value, Some(0), None)),
        default,
    )
}

pub(crate) fn parse_integer(raw: RawValue<'_>) -> Result<i64> {
    match raw {
        RawValue::Text(text) => parse_leading_integer(text),
        RawValue::Number(number) => floor_to_i64(number),
        other => Err(Rejection::TypeMismatch {
            expected: "number or text",
            found: other.kind(),
        }),
    }
}

fn parse_leading_integer(text: &str) -> Result<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(Rejection::NotANumber(text.to_string()));
    }
    trimmed[..sign_len + digits]
        .parse::<i64>()
        .map_err(|_| Rejection::NotANumber(text.to_string()))
}

fn floor_to_i64(number: f64) -> Result<i64> {
    let floored = number.floor();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if !floored.is_finite() || floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Err(Rejection::NotANumber(number.to_string()));
    }
    Ok(floored as i64)
}

fn within(value: i64, lower: Option<i64>, upper: Option<i64>) -> Result<i64> {
    let above = lower.map_or(true, |lower| value >= lower);
    let below = upper.map_or(true, |upper| value <= upper);
    if above && below {
        Ok(value)
    } else {
        Err(Rejection::OutOfRange {
            value: value.to_string(),
        })
    }
}

// ── Floats ─────────────────────────────────────────────────

/// Finite float from a number or a plain decimal string (no exponent).
pub fn float<'r, D: From<f64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("float", parse_float(raw.into(), &SIGNED_DECIMAL), default)
}

/// Float > 0
pub fn positive_float<'r, D: From<f64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "positive_float",
        parse_float(raw.into(), &UNSIGNED_DECIMAL).and_then(|value| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(Rejection::OutOfRange {
                    value: value.to_string(),
                })
            }
        }),
        default,
    )
}

/// Float ≥ 0
pub fn positive_float_or_zero<'r, D: From<f64>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "positive_float_or_zero",
        parse_float(raw.into(), &UNSIGNED_DECIMAL).and_then(|value| {
            if value >= 0.0 {
                Ok(value)
            } else {
                Err(Rejection::OutOfRange {
                    value: value.to_string(),
                })
            }
        }),
        default,
    )
}

fn parse_float(raw: RawValue<'_>, shape: &Regex) -> Result<f64> {
    let value = match raw {
        RawValue::Text(text) if shape.is_match(text) => text
            .parse::<f64>()
            .map_err(|_| Rejection::NotANumber(text.to_string()))?,
        RawValue::Text(text) => return Err(Rejection::NotANumber(text.to_string())),
        RawValue::Number(number) => number,
        other => {
            return Err(Rejection::TypeMismatch {
                expected: "number or text",
                found: other.kind(),
            })
        }
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Rejection::NotANumber(value.to_string()))
    }
}

// ── JSON ───────────────────────────────────────────────────

/// Strictly parsed JSON document.
pub fn json<'r, D: From<serde_json::Value>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("json", parse_json(raw.into()), default)
}

fn parse_json(raw: RawValue<'_>) -> Result<serde_json::Value> {
    let text = require_text(raw)?;
    serde_json::from_str(text).map_err(|_| Rejection::Unmatched("json"))
}
