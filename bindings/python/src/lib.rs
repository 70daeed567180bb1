//! Python bindings for purify
//!
//! Thin wrapper around `purify-core` — ZERO logic here.
//! All behavior comes from the canonical Rust implementation.
//!
//! Every purifier takes `(raw_value, default=None)` and returns either the
//! purified value or `default`, untouched. Python objects map onto the raw
//! shapes as `str` → text, `bool` → boolean, `int`/`float` → number and
//! `None` → absent; anything else is rejected.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyString};

use purify_core::{Bounds, Purified, Purifier, RawValue};

// ── Conversions ───────────────────────────────────────────

fn with_raw<R>(value: &Bound<'_, PyAny>, f: impl FnOnce(RawValue<'_>) -> R) -> R {
    if value.is_none() {
        return f(RawValue::Absent);
    }
    // bool is a subclass of int; test it first
    if let Ok(flag) = value.downcast::<PyBool>() {
        return f(RawValue::Boolean(flag.is_true()));
    }
    if let Ok(text) = value.downcast::<PyString>() {
        return match text.to_cow() {
            Ok(text) => f(RawValue::Text(&text)),
            Err(_) => f(RawValue::Unsupported),
        };
    }
    if value.is_instance_of::<PyInt>() || value.is_instance_of::<PyFloat>() {
        if let Ok(number) = value.extract::<f64>() {
            return f(RawValue::Number(number));
        }
    }
    f(RawValue::Unsupported)
}

fn to_python(py: Python<'_>, value: Purified) -> PyResult<PyObject> {
    Ok(match value {
        Purified::Text(text) => PyString::new(py, &text).into_any().unbind(),
        Purified::Boolean(flag) => PyBool::new(py, flag).to_owned().into_any().unbind(),
        Purified::Integer(number) => number.into_pyobject(py)?.into_any().unbind(),
        Purified::Float(number) => PyFloat::new(py, number).into_any().unbind(),
        Purified::Json(document) => py
            .import("json")?
            .call_method1("loads", (document.to_string(),))?
            .unbind(),
    })
}

fn run(
    py: Python<'_>,
    purifier: Purifier,
    raw_value: &Bound<'_, PyAny>,
    default: Option<PyObject>,
    bounds: Bounds,
) -> PyResult<PyObject> {
    match with_raw(raw_value, |raw| purifier.apply_within(raw, bounds)) {
        Some(value) => to_python(py, value),
        None => Ok(default.unwrap_or_else(|| py.None())),
    }
}

// ── Purifiers ─────────────────────────────────────────────

macro_rules! purifiers {
    ($($name:ident => $purifier:ident),* $(,)?) => {
        $(
            #[pyfunction]
            #[pyo3(signature = (raw_value, default=None))]
            fn $name(
                py: Python<'_>,
                raw_value: &Bound<'_, PyAny>,
                default: Option<PyObject>,
            ) -> PyResult<PyObject> {
                run(py, Purifier::$purifier, raw_value, default, Bounds::default())
            }
        )*

        fn add_purifiers(m: &Bound<'_, PyModule>) -> PyResult<()> {
            $(m.add_function(wrap_pyfunction!($name, m)?)?;)*
            Ok(())
        }
    };
}

purifiers! {
    email_to_ace => EmailToAce,
    email_to_unicode => EmailToUnicode,
    domain_to_ace => DomainToAce,
    domain_to_unicode => DomainToUnicode,
    domain_relaxed => DomainRelaxed,
    domain_relaxed_idn => DomainRelaxedIdn,
    email_relaxed => EmailRelaxed,
    email_relaxed_idn => EmailRelaxedIdn,
    url => Url,
    url_with_localhost => UrlWithLocalhost,
    url_relaxed => UrlRelaxed,
    url_relaxed_with_localhost => UrlRelaxedWithLocalhost,
    boolean => Boolean,
    integer => Integer,
    positive_integer => PositiveInteger,
    positive_integer_or_zero => PositiveIntegerOrZero,
    float => Float,
    positive_float => PositiveFloat,
    positive_float_or_zero => PositiveFloatOrZero,
    json => Json,
    visible_unicode => VisibleUnicode,
    non_empty_visible_unicode => NonEmptyVisibleUnicode,
    printable_unicode => PrintableUnicode,
    non_empty_printable_unicode => NonEmptyPrintableUnicode,
    visible_ascii => VisibleAscii,
    non_empty_visible_ascii => NonEmptyVisibleAscii,
    printable_ascii => PrintableAscii,
    non_empty_printable_ascii => NonEmptyPrintableAscii,
    alpha_numeric => AlphaNumeric,
    non_empty_alpha_numeric => NonEmptyAlphaNumeric,
    alpha_numeric_with_dot => AlphaNumericWithDot,
    non_empty_alpha_numeric_with_dot => NonEmptyAlphaNumericWithDot,
    uuid => Uuid,
    upper_case_uuid => UpperCaseUuid,
    lower_case_uuid => LowerCaseUuid,
}

/// Integer within the inclusive bounds; a missing bound is unbounded.
#[pyfunction]
#[pyo3(signature = (raw_value, lower=None, upper=None, default=None))]
fn integer_in_range(
    py: Python<'_>,
    raw_value: &Bound<'_, PyAny>,
    lower: Option<i64>,
    upper: Option<i64>,
    default: Option<PyObject>,
) -> PyResult<PyObject> {
    run(
        py,
        Purifier::IntegerInRange,
        raw_value,
        default,
        Bounds { lower, upper },
    )
}

/// Run a purifier by its kebab-case name, e.g. `"email-to-ace"`.
///
/// Raises:
///     ValueError: If the purifier name is unknown
#[pyfunction]
#[pyo3(signature = (name, raw_value, default=None, lower=None, upper=None))]
fn apply(
    py: Python<'_>,
    name: &str,
    raw_value: &Bound<'_, PyAny>,
    default: Option<PyObject>,
    lower: Option<i64>,
    upper: Option<i64>,
) -> PyResult<PyObject> {
    let purifier: Purifier = name
        .parse()
        .map_err(|e: purify_core::UnknownPurifier| PyValueError::new_err(e.to_string()))?;
    run(py, purifier, raw_value, default, Bounds { lower, upper })
}

/// Historical names of the identifier purifiers
const ALIASES: [(&str, &str); 8] = [
    ("email", "email_to_ace"),
    ("email_address", "email_to_ace"),
    ("email_idn", "email_to_unicode"),
    ("email_address_idn", "email_to_unicode"),
    ("domain", "domain_to_ace"),
    ("domain_name", "domain_to_ace"),
    ("domain_idn", "domain_to_unicode"),
    ("domain_name_idn", "domain_to_unicode"),
];

/// purify Python module — total input purifiers
#[pymodule]
fn purify(m: &Bound<'_, PyModule>) -> PyResult<()> {
    add_purifiers(m)?;
    m.add_function(wrap_pyfunction!(integer_in_range, m)?)?;
    m.add_function(wrap_pyfunction!(apply, m)?)?;
    for (alias, target) in ALIASES {
        m.add(alias, m.getattr(target)?)?;
    }
    Ok(())
}
