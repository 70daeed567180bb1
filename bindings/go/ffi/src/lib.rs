//! C-FFI layer for purify — used by Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `purify-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `purify_free_string()`.
//!
//! # Defaults
//!
//! C has no "any value" type, so raw values are always text. A null
//! `default_value` means "no default": a rejected value then yields a null
//! `result` with `accepted == false`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use purify_core::{Purifier, RawValue};

/// Result from a purify FFI call.
/// If `error` is non-null, the arguments were unusable and `error` holds the
/// message. Otherwise `result` holds the purified value, or a copy of the
/// default when `accepted` is false.
/// The caller MUST free both `result` and `error` with `purify_free_string()`.
#[repr(C)]
pub struct PurifyResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
    pub accepted: bool,
}

impl PurifyResult {
    fn accepted(value: String) -> Self {
        PurifyResult {
            result: into_c_string(value),
            error: std::ptr::null_mut(),
            accepted: true,
        }
    }

    fn fallback(default: Option<&str>) -> Self {
        PurifyResult {
            result: default.map_or(std::ptr::null_mut(), |d| into_c_string(d.to_string())),
            error: std::ptr::null_mut(),
            accepted: false,
        }
    }

    fn err(msg: String) -> Self {
        PurifyResult {
            result: std::ptr::null_mut(),
            error: into_c_string(msg),
            accepted: false,
        }
    }
}

/// Interior NULs cannot cross the boundary; such values become empty.
fn into_c_string(value: String) -> *mut c_char {
    CString::new(value).unwrap_or_default().into_raw()
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

unsafe fn run(
    purifier: Purifier,
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    let raw = match cstr_to_str(raw_value) {
        Some(text) => RawValue::Text(text),
        None if raw_value.is_null() => RawValue::Absent,
        None => return PurifyResult::err("raw value is not valid UTF-8".into()),
    };
    let default = cstr_to_str(default_value);
    if default.is_none() && !default_value.is_null() {
        return PurifyResult::err("default value is not valid UTF-8".into());
    }

    match purifier.apply(raw) {
        Some(value) => PurifyResult::accepted(value.to_string()),
        None => PurifyResult::fallback(default),
    }
}

/// Email address with the domain part in ACE (`xn--`) form.
///
/// # Safety
/// `raw_value` and `default_value` must each be null or a valid
/// null-terminated C string.
/// The caller must free the returned strings with `purify_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn purify_email(
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    run(Purifier::EmailToAce, raw_value, default_value)
}

/// Email address with the domain part in Unicode form.
///
/// # Safety
/// See [`purify_email`].
#[no_mangle]
pub unsafe extern "C" fn purify_email_idn(
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    run(Purifier::EmailToUnicode, raw_value, default_value)
}

/// Domain name in ACE (`xn--`) form.
///
/// # Safety
/// See [`purify_email`].
#[no_mangle]
pub unsafe extern "C" fn purify_domain(
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    run(Purifier::DomainToAce, raw_value, default_value)
}

/// Domain name in Unicode form.
///
/// # Safety
/// See [`purify_email`].
#[no_mangle]
pub unsafe extern "C" fn purify_domain_idn(
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    run(Purifier::DomainToUnicode, raw_value, default_value)
}

/// Run any purifier by its kebab-case name, e.g. `"positive-integer"`.
/// Non-text results are rendered as text (`true`, `42`, compact JSON).
///
/// # Safety
/// `name` must be a valid null-terminated UTF-8 C string; see
/// [`purify_email`] for the other arguments.
#[no_mangle]
pub unsafe extern "C" fn purify_apply(
    name: *const c_char,
    raw_value: *const c_char,
    default_value: *const c_char,
) -> PurifyResult {
    let name = match cstr_to_str(name) {
        Some(s) => s,
        None => return PurifyResult::err("null or invalid UTF-8 purifier name".into()),
    };
    match name.parse::<Purifier>() {
        Ok(purifier) => run(purifier, raw_value, default_value),
        Err(e) => PurifyResult::err(e.to_string()),
    }
}

/// Free a string returned by any purify FFI function.
///
/// # Safety
/// `ptr` must have been returned by a purify FFI function, or be null.
/// Must not be called twice on the same pointer.
#[no_mangle]
pub unsafe extern "C" fn purify_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
