//! Purifier catalog — name-based dispatch for the CLI and language bindings
//!
//! Front ends that receive a purifier name at runtime resolve it here
//! instead of keeping their own tables. Names are stable kebab-case; host
//! spellings (camelCase aliases and so on) are mapped by each front end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canonicalizer;
use crate::raw::RawValue;
use crate::scalar;
use crate::text;

// ── Purifier names ─────────────────────────────────────────

/// Every purifier exposed through name-based dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Purifier {
    // identifiers
    DomainToAce,
    DomainToUnicode,
    EmailToAce,
    EmailToUnicode,
    DomainRelaxed,
    DomainRelaxedIdn,
    EmailRelaxed,
    EmailRelaxedIdn,
    Url,
    UrlWithLocalhost,
    UrlRelaxed,
    UrlRelaxedWithLocalhost,
    // scalars
    Boolean,
    Integer,
    IntegerInRange,
    PositiveInteger,
    PositiveIntegerOrZero,
    Float,
    PositiveFloat,
    PositiveFloatOrZero,
    Json,
    // text classes
    VisibleUnicode,
    NonEmptyVisibleUnicode,
    PrintableUnicode,
    NonEmptyPrintableUnicode,
    VisibleAscii,
    NonEmptyVisibleAscii,
    PrintableAscii,
    NonEmptyPrintableAscii,
    AlphaNumeric,
    NonEmptyAlphaNumeric,
    AlphaNumericWithDot,
    NonEmptyAlphaNumericWithDot,
    Uuid,
    UpperCaseUuid,
    LowerCaseUuid,
}

impl Purifier {
    pub const ALL: [Purifier; 36] = [
        Purifier::DomainToAce,
        Purifier::DomainToUnicode,
        Purifier::EmailToAce,
        Purifier::EmailToUnicode,
        Purifier::DomainRelaxed,
        Purifier::DomainRelaxedIdn,
        Purifier::EmailRelaxed,
        Purifier::EmailRelaxedIdn,
        Purifier::Url,
        Purifier::UrlWithLocalhost,
        Purifier::UrlRelaxed,
        Purifier::UrlRelaxedWithLocalhost,
        Purifier::Boolean,
        Purifier::Integer,
        Purifier::IntegerInRange,
        Purifier::PositiveInteger,
        Purifier::PositiveIntegerOrZero,
        Purifier::Float,
        Purifier::PositiveFloat,
        Purifier::PositiveFloatOrZero,
        Purifier::Json,
        Purifier::VisibleUnicode,
        Purifier::NonEmptyVisibleUnicode,
        Purifier::PrintableUnicode,
        Purifier::NonEmptyPrintableUnicode,
        Purifier::VisibleAscii,
        Purifier::NonEmptyVisibleAscii,
        Purifier::PrintableAscii,
        Purifier::NonEmptyPrintableAscii,
        Purifier::AlphaNumeric,
        Purifier::NonEmptyAlphaNumeric,
        Purifier::AlphaNumericWithDot,
        Purifier::NonEmptyAlphaNumericWithDot,
        Purifier::Uuid,
        Purifier::UpperCaseUuid,
        Purifier::LowerCaseUuid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Purifier::DomainToAce => "domain-to-ace",
            Purifier::DomainToUnicode => "domain-to-unicode",
            Purifier::EmailToAce => "email-to-ace",
            Purifier::EmailToUnicode => "email-to-unicode",
            Purifier::DomainRelaxed => "domain-relaxed",
            Purifier::DomainRelaxedIdn => "domain-relaxed-idn",
            Purifier::EmailRelaxed => "email-relaxed",
            Purifier::EmailRelaxedIdn => "email-relaxed-idn",
            Purifier::Url => "url",
            Purifier::UrlWithLocalhost => "url-with-localhost",
            Purifier::UrlRelaxed => "url-relaxed",
            Purifier::UrlRelaxedWithLocalhost => "url-relaxed-with-localhost",
            Purifier::Boolean => "boolean",
            Purifier::Integer => "integer",
            Purifier::IntegerInRange => "integer-in-range",
            Purifier::PositiveInteger => "positive-integer",
            Purifier::PositiveIntegerOrZero => "positive-integer-or-zero",
            Purifier::Float => "float",
            Purifier::PositiveFloat => "positive-float",
            Purifier::PositiveFloatOrZero => "positive-float-or-zero",
            Purifier::Json => "json",
            Purifier::VisibleUnicode => "visible-unicode",
            Purifier::NonEmptyVisibleUnicode => "non-empty-visible-unicode",
            Purifier::PrintableUnicode => "printable-unicode",
            Purifier::NonEmptyPrintableUnicode => "non-empty-printable-unicode",
            Purifier::VisibleAscii => "visible-ascii",
            Purifier::NonEmptyVisibleAscii => "non-empty-visible-ascii",
            Purifier::PrintableAscii => "printable-ascii",
            Purifier::NonEmptyPrintableAscii => "non-empty-printable-ascii",
            Purifier::AlphaNumeric => "alpha-numeric",
            Purifier::NonEmptyAlphaNumeric => "non-empty-alpha-numeric",
            Purifier::AlphaNumericWithDot => "alpha-numeric-with-dot",
            Purifier::NonEmptyAlphaNumericWithDot => "non-empty-alpha-numeric-with-dot",
            Purifier::Uuid => "uuid",
            Purifier::UpperCaseUuid => "upper-case-uuid",
            Purifier::LowerCaseUuid => "lower-case-uuid",
        }
    }

    /// One-line description for listings
    pub fn summary(self) -> &'static str {
        match self {
            Purifier::DomainToAce => "domain name, canonical ACE (xn--) form",
            Purifier::DomainToUnicode => "domain name, canonical Unicode form",
            Purifier::EmailToAce => "email address, domain part in ACE form",
            Purifier::EmailToUnicode => "email address, domain part in Unicode form",
            Purifier::DomainRelaxed => "ASCII domain on any TLD, lower-cased",
            Purifier::DomainRelaxedIdn => "Unicode or ACE domain on any TLD, lower-cased",
            Purifier::EmailRelaxed => "ASCII email address on any TLD",
            Purifier::EmailRelaxedIdn => "email address with Unicode or ACE domain on any TLD",
            Purifier::Url => "http(s) URL on a known TLD",
            Purifier::UrlWithLocalhost => "http(s) URL on a known TLD or localhost",
            Purifier::UrlRelaxed => "http(s) URL on any TLD",
            Purifier::UrlRelaxedWithLocalhost => "http(s) URL on any TLD or localhost",
            Purifier::Boolean => "1/on/true/yes or 0/off/false/no",
            Purifier::Integer => "leading integer of a string, or a floored number",
            Purifier::IntegerInRange => "integer within --min/--max",
            Purifier::PositiveInteger => "integer >= 1",
            Purifier::PositiveIntegerOrZero => "integer >= 0",
            Purifier::Float => "finite decimal number",
            Purifier::PositiveFloat => "decimal number > 0",
            Purifier::PositiveFloatOrZero => "decimal number >= 0",
            Purifier::Json => "JSON document",
            Purifier::VisibleUnicode => "letters, marks, numbers, punctuation, symbols",
            Purifier::NonEmptyVisibleUnicode => "non-empty visible-unicode",
            Purifier::PrintableUnicode => "visible-unicode plus spaces",
            Purifier::NonEmptyPrintableUnicode => "non-empty printable-unicode",
            Purifier::VisibleAscii => "ASCII 0x21-0x7e",
            Purifier::NonEmptyVisibleAscii => "non-empty visible-ascii",
            Purifier::PrintableAscii => "ASCII 0x20-0x7e",
            Purifier::NonEmptyPrintableAscii => "non-empty printable-ascii",
            Purifier::AlphaNumeric => "[a-zA-Z0-9] or a whole number",
            Purifier::NonEmptyAlphaNumeric => "non-empty alpha-numeric",
            Purifier::AlphaNumericWithDot => "[a-zA-Z0-9.] or any number",
            Purifier::NonEmptyAlphaNumericWithDot => "non-empty alpha-numeric-with-dot",
            Purifier::Uuid => "UUID, either case",
            Purifier::UpperCaseUuid => "UUID, upper case",
            Purifier::LowerCaseUuid => "UUID, lower case",
        }
    }

    /// Run the purifier; `None` means the caller's default applies.
    pub fn apply(self, raw: RawValue<'_>) -> Option<Purified> {
        self.apply_within(raw, Bounds::default())
    }

    /// As [`Purifier::apply`]; `bounds` only affects `integer-in-range`.
    pub fn apply_within(self, raw: RawValue<'_>, bounds: Bounds) -> Option<Purified> {
        match self {
            Purifier::DomainToAce => canonicalizer::domain_to_ace(raw, None).map(Purified::Text),
            Purifier::DomainToUnicode => {
                canonicalizer::domain_to_unicode(raw, None).map(Purified::Text)
            }
            Purifier::EmailToAce => canonicalizer::email_to_ace(raw, None).map(Purified::Text),
            Purifier::EmailToUnicode => {
                canonicalizer::email_to_unicode(raw, None).map(Purified::Text)
            }
            Purifier::DomainRelaxed => text::domain_relaxed(raw, None).map(Purified::Text),
            Purifier::DomainRelaxedIdn => text::domain_relaxed_idn(raw, None).map(Purified::Text),
            Purifier::EmailRelaxed => text::email_relaxed(raw, None).map(Purified::Text),
            Purifier::EmailRelaxedIdn => text::email_relaxed_idn(raw, None).map(Purified::Text),
            Purifier::Url => text::url(raw, None).map(Purified::Text),
            Purifier::UrlWithLocalhost => text::url_with_localhost(raw, None).map(Purified::Text),
            Purifier::UrlRelaxed => text::url_relaxed(raw, None).map(Purified::Text),
            Purifier::UrlRelaxedWithLocalhost => {
                text::url_relaxed_with_localhost(raw, None).map(Purified::Text)
            }

            Purifier::Boolean => scalar::boolean(raw, None).map(Purified::Boolean),
            Purifier::Integer => scalar::integer(raw, None).map(Purified::Integer),
            Purifier::IntegerInRange => {
                scalar::integer_in_range(raw, bounds.lower, bounds.upper, None)
                    .map(Purified::Integer)
            }
            Purifier::PositiveInteger => scalar::positive_integer(raw, None).map(Purified::Integer),
            Purifier::PositiveIntegerOrZero => {
                scalar::positive_integer_or_zero(raw, None).map(Purified::Integer)
            }
            Purifier::Float => scalar::float(raw, None).map(Purified::Float),
            Purifier::PositiveFloat => scalar::positive_float(raw, None).map(Purified::Float),
            Purifier::PositiveFloatOrZero => {
                scalar::positive_float_or_zero(raw, None).map(Purified::Float)
            }
            Purifier::Json => scalar::json(raw, None).map(Purified::Json),

            Purifier::VisibleUnicode => text::visible_unicode(raw, None).map(Purified::Text),
            Purifier::NonEmptyVisibleUnicode => {
                text::non_empty_visible_unicode(raw, None).map(Purified::Text)
            }
            Purifier::PrintableUnicode => text::printable_unicode(raw, None).map(Purified::Text),
            Purifier::NonEmptyPrintableUnicode => {
                text::non_empty_printable_unicode(raw, None).map(Purified::Text)
            }
            Purifier::VisibleAscii => text::visible_ascii(raw, None).map(Purified::Text),
            Purifier::NonEmptyVisibleAscii => {
                text::non_empty_visible_ascii(raw, None).map(Purified::Text)
            }
            Purifier::PrintableAscii => text::printable_ascii(raw, None).map(Purified::Text),
            Purifier::NonEmptyPrintableAscii => {
                text::non_empty_printable_ascii(raw, None).map(Purified::Text)
            }
            Purifier::AlphaNumeric => text::alpha_numeric(raw, None).map(Purified::Text),
            Purifier::NonEmptyAlphaNumeric => {
                text::non_empty_alpha_numeric(raw, None).map(Purified::Text)
            }
            Purifier::AlphaNumericWithDot => {
                text::alpha_numeric_with_dot(raw, None).map(Purified::Text)
            }
            Purifier::NonEmptyAlphaNumericWithDot => {
                text::non_empty_alpha_numeric_with_dot(raw, None).map(Purified::Text)
            }
            Purifier::Uuid => text::uuid(raw, None).map(Purified::Text),
            Purifier::UpperCaseUuid => text::upper_case_uuid(raw, None).map(Purified::Text),
            Purifier::LowerCaseUuid => text::lower_case_uuid(raw, None).map(Purified::Text),
        }
    }
}

impl fmt::Display for Purifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown purifier '{0}'")]
pub struct UnknownPurifier(pub String);

impl FromStr for Purifier {
    type Err = UnknownPurifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Purifier::ALL
            .into_iter()
            .find(|purifier| purifier.name() == s)
            .ok_or_else(|| UnknownPurifier(s.to_string()))
    }
}

/// Inclusive integer bounds; `None` is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

// ── Purified values ────────────────────────────────────────

/// A value accepted by some purifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Purified {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Json(serde_json::Value),
}

impl Purified {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Purified::Text(text) => serde_json::Value::String(text.clone()),
            Purified::Boolean(value) => serde_json::Value::Bool(*value),
            Purified::Integer(value) => serde_json::Value::from(*value),
            Purified::Float(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Purified::Json(value) => value.clone(),
        }
    }
}

/// Text renders bare; everything else renders as JSON would.
impl fmt::Display for Purified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purified::Text(text) => f.write_str(text),
            Purified::Boolean(value) => write!(f, "{}", value),
            Purified::Integer(value) => write!(f, "{}", value),
            Purified::Float(value) => write!(f, "{}", value),
            Purified::Json(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_round_trip() {
        for purifier in Purifier::ALL {
            assert_eq!(purifier.name().parse::<Purifier>(), Ok(purifier));
            assert_eq!(purifier.to_string(), purifier.name());
        }
    }

    #[test]
    fn test_names_match_serde() {
        for purifier in Purifier::ALL {
            let serialized = serde_json::to_value(purifier).unwrap();
            assert_eq!(serialized, json!(purifier.name()));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Purifier::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Purifier::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "emailAddress".parse::<Purifier>(),
            Err(UnknownPurifier("emailAddress".to_string()))
        );
        assert_eq!(
            UnknownPurifier("x".to_string()).to_string(),
            "unknown purifier 'x'"
        );
    }

    #[test]
    fn test_apply_dispatches() {
        assert_eq!(
            Purifier::EmailToAce.apply(RawValue::from("andreas@cæntersurf.net")),
            Some(Purified::Text("andreas@xn--cntersurf-g3a.net".to_string()))
        );
        assert_eq!(
            Purifier::Boolean.apply(RawValue::from("YES")),
            Some(Purified::Boolean(true))
        );
        assert_eq!(
            Purifier::Integer.apply(RawValue::from("1blabla")),
            Some(Purified::Integer(1))
        );
        assert_eq!(
            Purifier::Float.apply(RawValue::from("-4.5")),
            Some(Purified::Float(-4.5))
        );
        assert_eq!(
            Purifier::Json.apply(RawValue::from("[1]")),
            Some(Purified::Json(json!([1])))
        );
        assert_eq!(Purifier::Uuid.apply(RawValue::from("nope")), None);
    }

    #[test]
    fn test_every_purifier_rejects_absent() {
        for purifier in Purifier::ALL {
            assert_eq!(purifier.apply(RawValue::Absent), None, "{}", purifier);
            assert_eq!(purifier.apply(RawValue::Unsupported), None, "{}", purifier);
        }
    }

    #[test]
    fn test_apply_within_bounds() {
        let bounds = Bounds {
            lower: Some(32),
            upper: Some(100),
        };
        assert_eq!(
            Purifier::IntegerInRange.apply_within(RawValue::from("64"), bounds),
            Some(Purified::Integer(64))
        );
        assert_eq!(
            Purifier::IntegerInRange.apply_within(RawValue::from("101"), bounds),
            None
        );
        assert_eq!(
            Purifier::IntegerInRange.apply(RawValue::from("-5")),
            Some(Purified::Integer(-5))
        );
        // other purifiers ignore bounds
        assert_eq!(
            Purifier::Integer.apply_within(RawValue::from("101"), bounds),
            Some(Purified::Integer(101))
        );
    }

    #[test]
    fn test_purified_rendering() {
        let text = Purified::Text("cæntersurf.net".to_string());
        assert_eq!(text.to_string(), "cæntersurf.net");
        assert_eq!(text.to_json(), json!("cæntersurf.net"));

        assert_eq!(Purified::Boolean(false).to_string(), "false");
        assert_eq!(Purified::Integer(-3).to_json(), json!(-3));
        assert_eq!(Purified::Float(1.5).to_json(), json!(1.5));

        let doc = Purified::Json(json!({"foo": "bar"}));
        assert_eq!(doc.to_string(), r#"{"foo":"bar"}"#);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"foo": "bar"}));
    }
}
