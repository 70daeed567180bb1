//! JavaScript/TypeScript bindings for purify
//!
//! Thin wrapper around `purify-core` compiled to WebAssembly.
//! ZERO logic here — all behavior from the canonical Rust implementation.
//!
//! Every export has the shape `(rawValue, defaultValue) => value` and
//! returns `defaultValue` untouched when the raw value is rejected. The
//! identifier purifiers are also exported under their historical names
//! (`emailAddress`, `domainNameIdn`, …).

use wasm_bindgen::prelude::*;

use purify_core::{Bounds, Purified, Purifier, RawValue};

// ── Conversions ───────────────────────────────────────────

fn with_raw<R>(value: &JsValue, f: impl FnOnce(RawValue<'_>) -> R) -> R {
    if let Some(flag) = value.as_bool() {
        f(RawValue::Boolean(flag))
    } else if let Some(text) = value.as_string() {
        f(RawValue::Text(&text))
    } else if let Some(number) = value.as_f64() {
        f(RawValue::Number(number))
    } else if value.is_null() || value.is_undefined() {
        f(RawValue::Absent)
    } else {
        f(RawValue::Unsupported)
    }
}

fn to_js(value: Purified) -> JsValue {
    match value {
        Purified::Text(text) => JsValue::from_str(&text),
        Purified::Boolean(flag) => JsValue::from_bool(flag),
        Purified::Integer(number) => JsValue::from_f64(number as f64),
        Purified::Float(number) => JsValue::from_f64(number),
        Purified::Json(document) => {
            js_sys::JSON::parse(&document.to_string()).unwrap_or(JsValue::NULL)
        }
    }
}

fn run(purifier: Purifier, raw_value: &JsValue, default_value: JsValue, bounds: Bounds) -> JsValue {
    match with_raw(raw_value, |raw| purifier.apply_within(raw, bounds)) {
        Some(value) => to_js(value),
        None => default_value,
    }
}

// ── Purifiers ─────────────────────────────────────────────

macro_rules! purifiers {
    ($($name:ident as $js:ident => $purifier:ident),* $(,)?) => {
        $(
            #[wasm_bindgen(js_name = $js)]
            pub fn $name(raw_value: JsValue, default_value: JsValue) -> JsValue {
                run(Purifier::$purifier, &raw_value, default_value, Bounds::default())
            }
        )*
    };
}

purifiers! {
    email as email => EmailToAce,
    email_address as emailAddress => EmailToAce,
    email_idn as emailIdn => EmailToUnicode,
    email_address_idn as emailAddressIdn => EmailToUnicode,
    domain as domain => DomainToAce,
    domain_name as domainName => DomainToAce,
    domain_idn as domainIdn => DomainToUnicode,
    domain_name_idn as domainNameIdn => DomainToUnicode,
    domain_relaxed as domainRelaxed => DomainRelaxed,
    domain_relaxed_idn as domainRelaxedIdn => DomainRelaxedIdn,
    email_relaxed as emailRelaxed => EmailRelaxed,
    email_relaxed_idn as emailRelaxedIdn => EmailRelaxedIdn,
    url as url => Url,
    url_with_localhost as urlWithLocalhost => UrlWithLocalhost,
    url_relaxed as urlRelaxed => UrlRelaxed,
    url_relaxed_with_localhost as urlRelaxedWithLocalhost => UrlRelaxedWithLocalhost,
    boolean as boolean => Boolean,
    integer as integer => Integer,
    positive_integer as positiveInteger => PositiveInteger,
    positive_integer_or_zero as positiveIntegerOrZero => PositiveIntegerOrZero,
    float as float => Float,
    positive_float as positiveFloat => PositiveFloat,
    positive_float_or_zero as positiveFloatOrZero => PositiveFloatOrZero,
    json as json => Json,
    visible_unicode as visibleUnicode => VisibleUnicode,
    non_empty_visible_unicode as nonEmptyVisibleUnicode => NonEmptyVisibleUnicode,
    printable_unicode as printableUnicode => PrintableUnicode,
    non_empty_printable_unicode as nonEmptyPrintableUnicode => NonEmptyPrintableUnicode,
    visible_ascii as visibleAscii => VisibleAscii,
    non_empty_visible_ascii as nonEmptyVisibleAscii => NonEmptyVisibleAscii,
    printable_ascii as printableAscii => PrintableAscii,
    non_empty_printable_ascii as nonEmptyPrintableAscii => NonEmptyPrintableAscii,
    alpha_numeric as alphaNumeric => AlphaNumeric,
    non_empty_alpha_numeric as nonEmptyAlphaNumeric => NonEmptyAlphaNumeric,
    alpha_numeric_with_dot as alphaNumericWithDot => AlphaNumericWithDot,
    non_empty_alpha_numeric_with_dot as nonEmptyAlphaNumericWithDot => NonEmptyAlphaNumericWithDot,
    uuid as uuid => Uuid,
    upper_case_uuid as upperCaseUuid => UpperCaseUuid,
    lower_case_uuid as lowerCaseUuid => LowerCaseUuid,
}

/// Integer within `[lower, upper]`; `undefined` bounds are unbounded.
///
/// @param rawValue - value to purify
/// @param lower - inclusive lower bound, or undefined
/// @param upper - inclusive upper bound, or undefined
/// @param defaultValue - returned untouched on rejection
#[wasm_bindgen(js_name = integerInRange)]
pub fn integer_in_range(
    raw_value: JsValue,
    lower: JsValue,
    upper: JsValue,
    default_value: JsValue,
) -> JsValue {
    // integer >= 2.5 holds exactly when integer >= 3
    let bounds = Bounds {
        lower: lower.as_f64().filter(|l| !l.is_nan()).map(|l| l.ceil() as i64),
        upper: upper.as_f64().filter(|u| !u.is_nan()).map(|u| u.floor() as i64),
    };
    run(Purifier::IntegerInRange, &raw_value, default_value, bounds)
}

/// Run a purifier by its kebab-case name, e.g. `"email-to-ace"`.
///
/// @throws Error if the purifier name is unknown
#[wasm_bindgen]
pub fn apply(name: &str, raw_value: JsValue, default_value: JsValue) -> Result<JsValue, JsError> {
    let purifier: Purifier = name.parse().map_err(|e: purify_core::UnknownPurifier| {
        JsError::new(&e.to_string())
    })?;
    Ok(run(purifier, &raw_value, default_value, Bounds::default()))
}
