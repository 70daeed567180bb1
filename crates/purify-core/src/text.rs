//! Text purifiers — character classes, UUIDs, URLs and relaxed identifiers
//!
//! Every purifier here returns the raw text unchanged when it is accepted,
//! except the relaxed identifier purifiers, which lower-case the domain part.
//! None of them runs the IDN codec; use the [`canonicalizer`] for that.
//!
//! [`canonicalizer`]: crate::canonicalizer

use std::sync::LazyLock;

use regex::Regex;

use crate::canonicalizer::{require_text, settle, split_address};
use crate::error::{Rejection, Result, Stage};
use crate::grammar::{Grammar, Grammars, SyntaxValidator};
use crate::raw::RawValue;

static VISIBLE_UNICODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N}\p{P}\p{S}]*$").expect("built-in class pattern must compile")
});

static PRINTABLE_UNICODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N}\p{P}\p{S}\p{Zs}]*$")
        .expect("built-in class pattern must compile")
});

/// Character repertoire a text value must stay within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repertoire {
    VisibleUnicode,
    PrintableUnicode,
    VisibleAscii,
    PrintableAscii,
    AlphaNumeric,
    AlphaNumericWithDot,
}

impl Repertoire {
    fn name(self) -> &'static str {
        match self {
            Repertoire::VisibleUnicode => "visible unicode",
            Repertoire::PrintableUnicode => "printable unicode",
            Repertoire::VisibleAscii => "visible ascii",
            Repertoire::PrintableAscii => "printable ascii",
            Repertoire::AlphaNumeric => "alphanumeric",
            Repertoire::AlphaNumericWithDot => "alphanumeric with dot",
        }
    }

    fn admits(self, text: &str) -> bool {
        match self {
            Repertoire::VisibleUnicode => VISIBLE_UNICODE.is_match(text),
            Repertoire::PrintableUnicode => PRINTABLE_UNICODE.is_match(text),
            Repertoire::VisibleAscii => text.bytes().all(|b| b.is_ascii_graphic()),
            Repertoire::PrintableAscii => text.bytes().all(|b| b == b' ' || b.is_ascii_graphic()),
            Repertoire::AlphaNumeric => text.bytes().all(|b| b.is_ascii_alphanumeric()),
            Repertoire::AlphaNumericWithDot => {
                text.bytes().all(|b| b == b'.' || b.is_ascii_alphanumeric())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emptiness {
    Allowed,
    Rejected,
}

fn within_repertoire(
    raw: RawValue<'_>,
    repertoire: Repertoire,
    empty: Emptiness,
) -> Result<String> {
    let text = require_text(raw)?;
    if text.is_empty() && empty == Emptiness::Rejected {
        return Err(Rejection::Unmatched("non-empty text"));
    }
    if repertoire.admits(text) {
        Ok(text.to_string())
    } else {
        Err(Rejection::Unmatched(repertoire.name()))
    }
}

/// Text or a rendered number. `integral_only` restricts numbers to whole
/// values.
fn alpha_numeric_text(
    raw: RawValue<'_>,
    repertoire: Repertoire,
    empty: Emptiness,
    integral_only: bool,
) -> Result<String> {
    match raw {
        RawValue::Number(number) if number.is_finite() => {
            if integral_only && number.fract() != 0.0 {
                Err(Rejection::NotANumber(number.to_string()))
            } else {
                Ok(render_number(number))
            }
        }
        RawValue::Number(number) => Err(Rejection::NotANumber(number.to_string())),
        other => within_repertoire(other, repertoire, empty),
    }
}

fn render_number(number: f64) -> String {
    if number == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        number.to_string()
    }
}

// ── Character classes ──────────────────────────────────────

/// Letters, marks, numbers, punctuation and symbols of any script
pub fn visible_unicode<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "visible_unicode",
        within_repertoire(raw.into(), Repertoire::VisibleUnicode, Emptiness::Allowed),
        default,
    )
}

pub fn non_empty_visible_unicode<'r, D: From<String>>(
    raw: impl Into<RawValue<'r>>,
    default: D,
) -> D {
    settle(
        "non_empty_visible_unicode",
        within_repertoire(raw.into(), Repertoire::VisibleUnicode, Emptiness::Rejected),
        default,
    )
}

/// Visible characters plus space separators, any script
pub fn printable_unicode<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "printable_unicode",
        within_repertoire(raw.into(), Repertoire::PrintableUnicode, Emptiness::Allowed),
        default,
    )
}

pub fn non_empty_printable_unicode<'r, D: From<String>>(
    raw: impl Into<RawValue<'r>>,
    default: D,
) -> D {
    settle(
        "non_empty_printable_unicode",
        within_repertoire(raw.into(), Repertoire::PrintableUnicode, Emptiness::Rejected),
        default,
    )
}

/// `0x21..=0x7e`
pub fn visible_ascii<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "visible_ascii",
        within_repertoire(raw.into(), Repertoire::VisibleAscii, Emptiness::Allowed),
        default,
    )
}

pub fn non_empty_visible_ascii<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "non_empty_visible_ascii",
        within_repertoire(raw.into(), Repertoire::VisibleAscii, Emptiness::Rejected),
        default,
    )
}

/// `0x20..=0x7e`
pub fn printable_ascii<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "printable_ascii",
        within_repertoire(raw.into(), Repertoire::PrintableAscii, Emptiness::Allowed),
        default,
    )
}

pub fn non_empty_printable_ascii<'r, D: From<String>>(
    raw: impl Into<RawValue<'r>>,
    default: D,
) -> D {
    settle(
        "non_empty_printable_ascii",
        within_repertoire(raw.into(), Repertoire::PrintableAscii, Emptiness::Rejected),
        default,
    )
}

/// `[a-zA-Z0-9]*`, or a whole finite number rendered as text
pub fn alpha_numeric<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "alpha_numeric",
        alpha_numeric_text(raw.into(), Repertoire::AlphaNumeric, Emptiness::Allowed, true),
        default,
    )
}

pub fn non_empty_alpha_numeric<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "non_empty_alpha_numeric",
        alpha_numeric_text(raw.into(), Repertoire::AlphaNumeric, Emptiness::Rejected, true),
        default,
    )
}

/// `[a-zA-Z0-9.]*`, or any finite number rendered as text
pub fn alpha_numeric_with_dot<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "alpha_numeric_with_dot",
        alpha_numeric_text(
            raw.into(),
            Repertoire::AlphaNumericWithDot,
            Emptiness::Allowed,
            false,
        ),
        default,
    )
}

pub fn non_empty_alpha_numeric_with_dot<'r, D: From<String>>(
    raw: impl Into<RawValue<'r>>,
    default: D,
) -> D {
    settle(
        "non_empty_alpha_numeric_with_dot",
        alpha_numeric_text(
            raw.into(),
            Repertoire::AlphaNumericWithDot,
            Emptiness::Rejected,
            false,
        ),
        default,
    )
}

// ── Grammar-backed pass-through ────────────────────────────

fn conforming(raw: RawValue<'_>, grammar: Grammar) -> Result<&str> {
    let text = require_text(raw)?;
    if Grammars::shared().matches(grammar, text) {
        Ok(text)
    } else {
        Err(Rejection::GrammarMismatch {
            grammar,
            stage: Stage::Final,
        })
    }
}

fn verbatim(raw: RawValue<'_>, grammar: Grammar) -> Result<String> {
    conforming(raw, grammar).map(str::to_string)
}

/// UUID in either case
pub fn uuid<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("uuid", verbatim(raw.into(), Grammar::Uuid), default)
}

pub fn upper_case_uuid<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "upper_case_uuid",
        verbatim(raw.into(), Grammar::UpperCaseUuid),
        default,
    )
}

pub fn lower_case_uuid<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "lower_case_uuid",
        verbatim(raw.into(), Grammar::LowerCaseUuid),
        default,
    )
}

/// http(s) URL on a known top-level domain
pub fn url<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle("url", verbatim(raw.into(), Grammar::HttpUrl), default)
}

pub fn url_with_localhost<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "url_with_localhost",
        verbatim(raw.into(), Grammar::HttpUrlWithLocalhost),
        default,
    )
}

/// http(s) URL on any well-formed top-level domain
pub fn url_relaxed<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "url_relaxed",
        verbatim(raw.into(), Grammar::HttpUrlRelaxed),
        default,
    )
}

pub fn url_relaxed_with_localhost<'r, D: From<String>>(
    raw: impl Into<RawValue<'r>>,
    default: D,
) -> D {
    settle(
        "url_relaxed_with_localhost",
        verbatim(raw.into(), Grammar::HttpUrlRelaxedWithLocalhost),
        default,
    )
}

// ── Relaxed identifiers ────────────────────────────────────

fn lower_domain(raw: RawValue<'_>, grammar: Grammar) -> Result<String> {
    conforming(raw, grammar).map(str::to_lowercase)
}

fn lower_email_domain(raw: RawValue<'_>, grammar: Grammar) -> Result<String> {
    let (local, domain) = split_address(conforming(raw, grammar)?)?;
    Ok(format!("{}@{}", local, domain.to_lowercase()))
}

/// ASCII domain on any well-formed top-level domain, lower-cased
pub fn domain_relaxed<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "domain_relaxed",
        lower_domain(raw.into(), Grammar::DomainAsciiRelaxed),
        default,
    )
}

/// Unicode or ACE domain, lower-cased but not converted
pub fn domain_relaxed_idn<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "domain_relaxed_idn",
        lower_domain(raw.into(), Grammar::DomainUnicodeRelaxed),
        default,
    )
}

/// ASCII email address; the domain part is lower-cased
///
/// The local-part keeps its case, matching the canonicalizer. Older
/// releases of this purifier lower-cased the whole address, so
/// `Me@Example.com` now yields `Me@example.com` rather than
/// `me@example.com`.
pub fn email_relaxed<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "email_relaxed",
        lower_email_domain(raw.into(), Grammar::EmailAsciiRelaxed),
        default,
    )
}

/// Email address with a Unicode or ACE domain part, lower-cased but not
/// converted. The local-part keeps its case, as in [`email_relaxed`].
pub fn email_relaxed_idn<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    settle(
        "email_relaxed_idn",
        lower_email_domain(raw.into(), Grammar::EmailUnicodeRelaxed),
        default,
    )
}
