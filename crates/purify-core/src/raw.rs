//! Raw input model — the untrusted value handed to every purifier
//!
//! Purifiers never trust the shape of their input. `RawValue` captures the
//! handful of shapes a form field, query string or JSON body can carry, so
//! each purifier can reject the wrong shape instead of failing to compile
//! against it.

use std::fmt;

/// An untrusted input value. Never mutated by a purifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// A string of unknown content
    Text(&'a str),
    /// A number, possibly NaN or infinite
    Number(f64),
    /// A boolean
    Boolean(bool),
    /// null / missing / undefined
    Absent,
    /// Any compound shape (array, object, host object)
    Unsupported,
}

impl<'a> RawValue<'a> {
    /// Map a JSON value onto the raw shapes. Arrays and objects are
    /// `Unsupported`; every purifier rejects them.
    pub fn from_json(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(RawValue::Number)
                .unwrap_or(RawValue::Unsupported),
            serde_json::Value::Bool(b) => RawValue::Boolean(*b),
            serde_json::Value::Null => RawValue::Absent,
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => RawValue::Unsupported,
        }
    }

    /// The string content, if and only if this is `Text`.
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short shape name used in rejection reasons.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Text(_) => "text",
            RawValue::Number(_) => "number",
            RawValue::Boolean(_) => "boolean",
            RawValue::Absent => "absent",
            RawValue::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{:?}", s),
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::Absent => write!(f, "<absent>"),
            RawValue::Unsupported => write!(f, "<unsupported>"),
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<bool> for RawValue<'_> {
    fn from(value: bool) -> Self {
        RawValue::Boolean(value)
    }
}

impl<'a, T: Into<RawValue<'a>>> From<Option<T>> for RawValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Absent)
    }
}

impl<'a> From<&'a serde_json::Value> for RawValue<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        RawValue::from_json(value)
    }
}
