//! Syntax Validator — named grammars for domains, emails, URLs and UUIDs
//!
//! A grammar is a pure predicate: it reports pass/fail and never normalizes.
//! Patterns are compiled once per process and shared read-only.
//!
//! # Grammar families
//!
//! - **relaxed**: structural shape only, any alphabetic top-level label of
//!   two or more characters
//! - **strict**: relaxed shape + known top-level domain + RFC length limits
//! - **unicode**: labels may contain letters, marks and digits of any script;
//!   the email local-part stays ASCII in every family
//!
//! ASCII grammars compile with Unicode mode off so case-insensitive classes
//! cannot fold in look-alikes such as U+212A KELVIN SIGN.

pub mod tld;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest domain accepted by the strict grammars (RFC 1035 presentation form)
pub const MAX_DOMAIN_LEN: usize = 253;

/// Longest local-part accepted by the strict email grammar (RFC 5321)
pub const MAX_LOCAL_PART_LEN: usize = 64;

// ── Pattern fragments ──────────────────────────────────────

macro_rules! ascii_label {
    () => {
        r"[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?"
    };
}

macro_rules! ascii_tld {
    () => {
        r"(?:[a-z]{2,63}|xn--[a-z0-9-]{1,59})"
    };
}

macro_rules! unicode_label {
    () => {
        r"[\p{L}\p{M}\p{N}](?:[\p{L}\p{M}\p{N}-]{0,61}[\p{L}\p{M}\p{N}])?"
    };
}

macro_rules! unicode_tld {
    () => {
        r"(?:[\p{L}\p{M}]{2,63}|xn--[a-z0-9-]{1,59})"
    };
}

macro_rules! local_part {
    () => {
        r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*"
    };
}

const DOMAIN_ASCII: &str = concat!(
    r"(?i-u)^(?:",
    ascii_label!(),
    r"\.)+(?P<tld>",
    ascii_tld!(),
    r")$"
);

const DOMAIN_UNICODE: &str = concat!(
    r"(?i)^(?:",
    unicode_label!(),
    r"\.)+(?P<tld>",
    unicode_tld!(),
    r")$"
);

const EMAIL_ASCII: &str = concat!(
    r"(?i-u)^(?P<local>",
    local_part!(),
    r")@(?P<domain>(?:",
    ascii_label!(),
    r"\.)+(?P<tld>",
    ascii_tld!(),
    r"))$"
);

const EMAIL_UNICODE: &str = concat!(
    r"(?i)^(?P<local>(?-u:",
    local_part!(),
    r"))@(?P<domain>(?:",
    unicode_label!(),
    r"\.)+(?P<tld>",
    unicode_tld!(),
    r"))$"
);

const HTTP_URL: &str = concat!(
    r"(?i-u)^https?://(?:(?P<domain>(?:",
    ascii_label!(),
    r"\.)+(?P<tld>",
    ascii_tld!(),
    r"))|(?P<localhost>localhost))(?::[0-9]{1,5})?(?:[/?#][\x21-\x7e]*)?$"
);

const UUID: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";
const UPPER_CASE_UUID: &str = r"^[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}$";
const LOWER_CASE_UUID: &str = r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

// ── Grammar names ──────────────────────────────────────────

/// A named grammar understood by every [`SyntaxValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grammar {
    DomainAsciiStrict,
    DomainAsciiRelaxed,
    DomainUnicodeRelaxed,
    EmailAsciiStrict,
    EmailAsciiRelaxed,
    EmailUnicodeRelaxed,
    HttpUrl,
    HttpUrlRelaxed,
    HttpUrlWithLocalhost,
    HttpUrlRelaxedWithLocalhost,
    Uuid,
    UpperCaseUuid,
    LowerCaseUuid,
}

impl Grammar {
    pub const ALL: [Grammar; 13] = [
        Grammar::DomainAsciiStrict,
        Grammar::DomainAsciiRelaxed,
        Grammar::DomainUnicodeRelaxed,
        Grammar::EmailAsciiStrict,
        Grammar::EmailAsciiRelaxed,
        Grammar::EmailUnicodeRelaxed,
        Grammar::HttpUrl,
        Grammar::HttpUrlRelaxed,
        Grammar::HttpUrlWithLocalhost,
        Grammar::HttpUrlRelaxedWithLocalhost,
        Grammar::Uuid,
        Grammar::UpperCaseUuid,
        Grammar::LowerCaseUuid,
    ];

    /// Stable kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            Grammar::DomainAsciiStrict => "domain-ascii-strict",
            Grammar::DomainAsciiRelaxed => "domain-ascii-relaxed",
            Grammar::DomainUnicodeRelaxed => "domain-unicode-relaxed",
            Grammar::EmailAsciiStrict => "email-ascii-strict",
            Grammar::EmailAsciiRelaxed => "email-ascii-relaxed",
            Grammar::EmailUnicodeRelaxed => "email-unicode-relaxed",
            Grammar::HttpUrl => "http-url",
            Grammar::HttpUrlRelaxed => "http-url-relaxed",
            Grammar::HttpUrlWithLocalhost => "http-url-with-localhost",
            Grammar::HttpUrlRelaxedWithLocalhost => "http-url-relaxed-with-localhost",
            Grammar::Uuid => "uuid",
            Grammar::UpperCaseUuid => "upper-case-uuid",
            Grammar::LowerCaseUuid => "lower-case-uuid",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unrecognised grammar name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grammar '{0}'")]
pub struct UnknownGrammar(pub String);

impl FromStr for Grammar {
    type Err = UnknownGrammar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| UnknownGrammar(s.to_string()))
    }
}

// ── Validator ──────────────────────────────────────────────

/// Pass/fail predicate over named grammars
pub trait SyntaxValidator {
    fn matches(&self, grammar: Grammar, candidate: &str) -> bool;
}

/// Production validator: regex-backed, compiled once
#[derive(Debug)]
pub struct Grammars {
    domain_ascii: Regex,
    domain_unicode: Regex,
    email_ascii: Regex,
    email_unicode: Regex,
    http_url: Regex,
    uuid: Regex,
    upper_case_uuid: Regex,
    lower_case_uuid: Regex,
}

static SHARED: LazyLock<Grammars> = LazyLock::new(Grammars::new);

impl Grammars {
    /// Compile every grammar. Prefer [`Grammars::shared`].
    pub fn new() -> Self {
        Grammars {
            domain_ascii: compile(DOMAIN_ASCII),
            domain_unicode: compile(DOMAIN_UNICODE),
            email_ascii: compile(EMAIL_ASCII),
            email_unicode: compile(EMAIL_UNICODE),
            http_url: compile(HTTP_URL),
            uuid: compile(UUID),
            upper_case_uuid: compile(UPPER_CASE_UUID),
            lower_case_uuid: compile(LOWER_CASE_UUID),
        }
    }

    /// Process-wide instance, initialized on first use
    pub fn shared() -> &'static Grammars {
        &SHARED
    }

    fn domain_strict(&self, candidate: &str) -> bool {
        candidate.len() <= MAX_DOMAIN_LEN
            && self
                .domain_ascii
                .captures(candidate)
                .is_some_and(|caps| tld::is_known(&caps["tld"]))
    }

    fn email_strict(&self, candidate: &str) -> bool {
        self.email_ascii.captures(candidate).is_some_and(|caps| {
            caps["local"].len() <= MAX_LOCAL_PART_LEN
                && caps["domain"].len() <= MAX_DOMAIN_LEN
                && tld::is_known(&caps["tld"])
        })
    }

    fn http_url(&self, candidate: &str, strict: bool, allow_localhost: bool) -> bool {
        let Some(caps) = self.http_url.captures(candidate) else {
            return false;
        };
        if caps.name("localhost").is_some() {
            return allow_localhost;
        }
        !strict || caps.name("tld").is_some_and(|tld| tld::is_known(tld.as_str()))
    }
}

impl Default for Grammars {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxValidator for Grammars {
    fn matches(&self, grammar: Grammar, candidate: &str) -> bool {
        match grammar {
            Grammar::DomainAsciiStrict => self.domain_strict(candidate),
            Grammar::DomainAsciiRelaxed => self.domain_ascii.is_match(candidate),
            Grammar::DomainUnicodeRelaxed => self.domain_unicode.is_match(candidate),
            Grammar::EmailAsciiStrict => self.email_strict(candidate),
            Grammar::EmailAsciiRelaxed => self.email_ascii.is_match(candidate),
            Grammar::EmailUnicodeRelaxed => self.email_unicode.is_match(candidate),
            Grammar::HttpUrl => self.http_url(candidate, true, false),
            Grammar::HttpUrlRelaxed => self.http_url(candidate, false, false),
            Grammar::HttpUrlWithLocalhost => self.http_url(candidate, true, true),
            Grammar::HttpUrlRelaxedWithLocalhost => self.http_url(candidate, false, true),
            Grammar::Uuid => self.uuid.is_match(candidate),
            Grammar::UpperCaseUuid => self.upper_case_uuid.is_match(candidate),
            Grammar::LowerCaseUuid => self.lower_case_uuid.is_match(candidate),
        }
    }
}

impl<T: SyntaxValidator + ?Sized> SyntaxValidator for &T {
    fn matches(&self, grammar: Grammar, candidate: &str) -> bool {
        (**self).matches(grammar, candidate)
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in grammar pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(grammar: Grammar, candidate: &str) -> bool {
        Grammars::shared().matches(grammar, candidate)
    }

    // ── Names ──────────────────────────────────────────

    #[test]
    fn test_every_pattern_compiles() {
        let grammars = Grammars::new();
        for grammar in Grammar::ALL {
            // Must not panic for any grammar, including on empty input.
            assert!(!grammars.matches(grammar, ""), "{} accepted ''", grammar);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for grammar in Grammar::ALL {
            assert_eq!(grammar.name().parse::<Grammar>().unwrap(), grammar);
        }
        assert!("domain".parse::<Grammar>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&Grammar::EmailUnicodeRelaxed).unwrap();
        assert_eq!(json, "\"email-unicode-relaxed\"");
    }

    // ── Domains ────────────────────────────────────────

    #[test]
    fn test_domain_ascii_strict() {
        assert!(check(Grammar::DomainAsciiStrict, "centersurf.net"));
        assert!(check(Grammar::DomainAsciiStrict, "xn--cntersurf-g3a.net"));
        assert!(check(Grammar::DomainAsciiStrict, "CENTERSURF.NET"));
        assert!(!check(Grammar::DomainAsciiStrict, "centersurf.quuxbar"));
        assert!(!check(Grammar::DomainAsciiStrict, "cæntersurf.net"));
        assert!(!check(Grammar::DomainAsciiStrict, "\x00centersurf.net"));
        assert!(!check(Grammar::DomainAsciiStrict, "localhost"));
        assert!(!check(Grammar::DomainAsciiStrict, "-foo.net"));
        assert!(!check(Grammar::DomainAsciiStrict, "foo..net"));
    }

    #[test]
    fn test_domain_ascii_strict_length_limits() {
        let long_label = "a".repeat(64);
        assert!(!check(Grammar::DomainAsciiStrict, &format!("{}.com", long_label)));

        let label = "a".repeat(63);
        let too_long = format!("{0}.{0}.{0}.{0}.com", label);
        assert!(too_long.len() > MAX_DOMAIN_LEN);
        assert!(!check(Grammar::DomainAsciiStrict, &too_long));
        assert!(check(Grammar::DomainAsciiRelaxed, &too_long));
    }

    #[test]
    fn test_domain_ascii_relaxed() {
        assert!(check(Grammar::DomainAsciiRelaxed, "centersurf.quuxbar"));
        assert!(!check(Grammar::DomainAsciiRelaxed, "/!"));
        assert!(!check(Grammar::DomainAsciiRelaxed, "centersurf.x"));
    }

    #[test]
    fn test_domain_unicode_relaxed() {
        assert!(check(Grammar::DomainUnicodeRelaxed, "cæntersurf.net"));
        assert!(check(Grammar::DomainUnicodeRelaxed, "cæntersurf.quuxbar"));
        assert!(check(Grammar::DomainUnicodeRelaxed, "bar.xn--no"));
        assert!(check(Grammar::DomainUnicodeRelaxed, "пример.рф"));
        assert!(!check(Grammar::DomainUnicodeRelaxed, ""));
        assert!(!check(Grammar::DomainUnicodeRelaxed, "\x00centersurf.net"));
        assert!(!check(Grammar::DomainUnicodeRelaxed, "foo bar.net"));
    }

    // ── Emails ─────────────────────────────────────────

    #[test]
    fn test_email_ascii_strict() {
        assert!(check(Grammar::EmailAsciiStrict, "andreas@centersurf.net"));
        assert!(check(Grammar::EmailAsciiStrict, "Andreas.Lind+tag@centersurf.net"));
        assert!(!check(Grammar::EmailAsciiStrict, "andreas@centersurf.quuxbar"));
        assert!(!check(Grammar::EmailAsciiStrict, ""));
        assert!(!check(Grammar::EmailAsciiStrict, "\x00andreas@centersurf.net"));
        assert!(!check(Grammar::EmailAsciiStrict, "a@b@centersurf.net"));

        let long_local = "a".repeat(MAX_LOCAL_PART_LEN + 1);
        assert!(!check(Grammar::EmailAsciiStrict, &format!("{}@centersurf.net", long_local)));
    }

    #[test]
    fn test_email_ascii_relaxed() {
        assert!(check(Grammar::EmailAsciiRelaxed, "andreas@centersurf.quuxbar"));
        assert!(!check(Grammar::EmailAsciiRelaxed, "andræas@centersurf.quuxbar"));
    }

    #[test]
    fn test_email_unicode_relaxed() {
        assert!(check(Grammar::EmailUnicodeRelaxed, "andreas@cæntersurf.net"));
        assert!(check(Grammar::EmailUnicodeRelaxed, "andreas@cæntersurf.quuxbar"));
        assert!(!check(Grammar::EmailUnicodeRelaxed, "andræas@cæntersurf.quuxbar"));
        assert!(!check(Grammar::EmailUnicodeRelaxed, ""));
        assert!(!check(Grammar::EmailUnicodeRelaxed, "\x00andreas@cæntersurf.net"));
    }

    // ── URLs ───────────────────────────────────────────

    #[test]
    fn test_http_url_strict() {
        assert!(check(Grammar::HttpUrl, "http://centersurf.net/"));
        assert!(check(Grammar::HttpUrl, "https://centersurf.net:8443/a?b=c#d"));
        assert!(!check(Grammar::HttpUrl, "http://centersurf.net/æøå"));
        assert!(!check(Grammar::HttpUrl, "http://centersurf.quuxbar/"));
        assert!(!check(Grammar::HttpUrl, "\x00http://centersurf.net/"));
        assert!(!check(Grammar::HttpUrl, "http://localhost/"));
    }

    #[test]
    fn test_http_url_relaxed_and_localhost() {
        assert!(check(Grammar::HttpUrlRelaxed, "http://centersurf.quuxbar/"));
        assert!(!check(Grammar::HttpUrlRelaxed, "http://localhost/"));
        assert!(check(Grammar::HttpUrlRelaxedWithLocalhost, "http://localhost/"));
        assert!(check(Grammar::HttpUrlWithLocalhost, "http://localhost:3000/"));
        assert!(!check(Grammar::HttpUrlWithLocalhost, "http://centersurf.quuxbar/"));
        assert!(!check(Grammar::HttpUrlRelaxedWithLocalhost, "quuxhttp://localhost/"));
    }

    // ── UUIDs ──────────────────────────────────────────

    #[test]
    fn test_uuid_case_variants() {
        let lower = "550e8400-e29b-41d4-a716-446655440000";
        let upper = "550E8400-E29B-41D4-A716-446655440000";
        let short = "50e8400-e29b-41d4-a716-446655440000";

        assert!(check(Grammar::Uuid, lower));
        assert!(check(Grammar::Uuid, upper));
        assert!(!check(Grammar::Uuid, short));

        assert!(check(Grammar::UpperCaseUuid, upper));
        assert!(!check(Grammar::UpperCaseUuid, lower));

        assert!(check(Grammar::LowerCaseUuid, lower));
        assert!(!check(Grammar::LowerCaseUuid, upper));
    }
}
