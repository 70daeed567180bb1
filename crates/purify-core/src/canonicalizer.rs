//! Identifier canonicalizer — internationalized domains and email addresses
//!
//! Converts domains and the domain part of email addresses between their
//! Unicode and ACE (`xn--`) forms, re-validating the result so inputs whose
//! encoded and decoded forms diverge are rejected.
//!
//! # Pipeline
//!
//! `raw → relaxed grammar → lower-case → IDN codec → TLD guard → final grammar`
//!
//! | operation           | precondition             | final check              |
//! |---------------------|--------------------------|--------------------------|
//! | `domain_to_ace`     | `domain-unicode-relaxed` | `domain-ascii-strict`    |
//! | `domain_to_unicode` | `domain-unicode-relaxed` | `domain-unicode-relaxed` |
//! | `email_to_ace`      | `email-unicode-relaxed`  | `email-ascii-strict`     |
//! | `email_to_unicode`  | `email-unicode-relaxed`  | `email-unicode-relaxed`  |
//!
//! # Guarantees
//!
//! - **Idempotent**: `domain_to_ace(domain_to_ace(x)) == domain_to_ace(x)`
//! - **Round trip**: an accepted ACE form decodes to the Unicode form of `x`
//! - **Case**: domain parts are lower-cased; email local-parts are untouched
//! - **TLD guard**: a decoded top-level label shorter than 2 characters is
//!   rejected even when the codec round trip succeeds

use log::debug;

use crate::error::{Rejection, Result, Stage};
use crate::grammar::{Grammar, Grammars, SyntaxValidator};
use crate::idn::{IdnCodec, Punycode, PUNYCODE};
use crate::raw::RawValue;

/// Shortest accepted top-level label, counted in decoded characters
pub const MIN_TLD_CHARS: usize = 2;

/// Orchestrates a [`SyntaxValidator`] and an [`IdnCodec`].
///
/// Holds only shared references; construct once and reuse freely across
/// threads.
#[derive(Debug)]
pub struct Canonicalizer<'a, V: ?Sized = Grammars, C: ?Sized = Punycode> {
    validator: &'a V,
    codec: &'a C,
}

impl<V: ?Sized, C: ?Sized> Clone for Canonicalizer<'_, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized, C: ?Sized> Copy for Canonicalizer<'_, V, C> {}

impl Canonicalizer<'static> {
    /// Canonicalizer wired to the process-wide grammars and punycode codec
    pub fn shared() -> Self {
        Canonicalizer::new(Grammars::shared(), &PUNYCODE)
    }
}

impl<'a, V, C> Canonicalizer<'a, V, C>
where
    V: SyntaxValidator + ?Sized,
    C: IdnCodec + ?Sized,
{
    pub fn new(validator: &'a V, codec: &'a C) -> Self {
        Canonicalizer { validator, codec }
    }

    // ── Public operations ──────────────────────────────

    /// Domain in ACE form, or `default`.
    pub fn domain_to_ace<'r, D>(&self, raw: impl Into<RawValue<'r>>, default: D) -> D
    where
        D: From<String>,
    {
        settle("domain_to_ace", self.try_domain_to_ace(raw.into()), default)
    }

    /// Domain in Unicode form, or `default`.
    pub fn domain_to_unicode<'r, D>(&self, raw: impl Into<RawValue<'r>>, default: D) -> D
    where
        D: From<String>,
    {
        settle(
            "domain_to_unicode",
            self.try_domain_to_unicode(raw.into()),
            default,
        )
    }

    /// Email with its domain part in ACE form, or `default`.
    pub fn email_to_ace<'r, D>(&self, raw: impl Into<RawValue<'r>>, default: D) -> D
    where
        D: From<String>,
    {
        settle("email_to_ace", self.try_email_to_ace(raw.into()), default)
    }

    /// Email with its domain part in Unicode form, or `default`.
    pub fn email_to_unicode<'r, D>(&self, raw: impl Into<RawValue<'r>>, default: D) -> D
    where
        D: From<String>,
    {
        settle(
            "email_to_unicode",
            self.try_email_to_unicode(raw.into()),
            default,
        )
    }

    // ── Domain pipelines ───────────────────────────────

    fn try_domain_to_ace(&self, raw: RawValue<'_>) -> Result<String> {
        let candidate = require_text(raw)?;
        self.require(Grammar::DomainUnicodeRelaxed, candidate, Stage::Precondition)?;
        let ace = self.encode_domain(candidate)?;
        self.require(Grammar::DomainAsciiStrict, &ace, Stage::Final)?;
        Ok(ace)
    }

    fn try_domain_to_unicode(&self, raw: RawValue<'_>) -> Result<String> {
        let candidate = require_text(raw)?;
        self.require(Grammar::DomainUnicodeRelaxed, candidate, Stage::Precondition)?;
        let unicode = self.decode_domain(candidate)?;
        self.require(Grammar::DomainUnicodeRelaxed, &unicode, Stage::Final)?;
        Ok(unicode)
    }

    // ── Email pipelines ────────────────────────────────

    fn try_email_to_ace(&self, raw: RawValue<'_>) -> Result<String> {
        let candidate = require_text(raw)?;
        self.require(Grammar::EmailUnicodeRelaxed, candidate, Stage::Precondition)?;
        let (local, domain) = split_address(candidate)?;
        let email = format!("{}@{}", local, self.encode_domain(domain)?);
        self.require(Grammar::EmailAsciiStrict, &email, Stage::Final)?;
        Ok(email)
    }

    fn try_email_to_unicode(&self, raw: RawValue<'_>) -> Result<String> {
        let candidate = require_text(raw)?;
        self.require(Grammar::EmailUnicodeRelaxed, candidate, Stage::Precondition)?;
        let (local, domain) = split_address(candidate)?;
        let email = format!("{}@{}", local, self.decode_domain(domain)?);
        self.require(Grammar::EmailUnicodeRelaxed, &email, Stage::Final)?;
        Ok(email)
    }

    // ── Shared steps ───────────────────────────────────

    /// Lower-case, encode, then decode again: the decoded form must pass
    /// the same checks `decode_domain` applies, so the ACE result always
    /// converts back.
    fn encode_domain(&self, domain: &str) -> Result<String> {
        let ace = self.codec.to_ace(&domain.to_lowercase())?;
        let decoded = self.codec.to_unicode(&ace)?.to_lowercase();
        ensure_tld_length(&decoded)?;
        self.require(Grammar::DomainUnicodeRelaxed, &decoded, Stage::Final)?;
        Ok(ace)
    }

    fn decode_domain(&self, domain: &str) -> Result<String> {
        let decoded = self.codec.to_unicode(&domain.to_lowercase())?.to_lowercase();
        ensure_tld_length(&decoded)?;
        Ok(decoded)
    }

    fn require(&self, grammar: Grammar, candidate: &str, stage: Stage) -> Result<()> {
        if self.validator.matches(grammar, candidate) {
            Ok(())
        } else {
            Err(Rejection::GrammarMismatch { grammar, stage })
        }
    }
}

// ── Free functions over the shared canonicalizer ───────────

/// Domain in ACE form, or `default`. See [`Canonicalizer::domain_to_ace`].
pub fn domain_to_ace<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    Canonicalizer::shared().domain_to_ace(raw, default)
}

/// Domain in Unicode form, or `default`.
pub fn domain_to_unicode<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    Canonicalizer::shared().domain_to_unicode(raw, default)
}

/// Email with an ACE domain part, or `default`.
pub fn email_to_ace<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    Canonicalizer::shared().email_to_ace(raw, default)
}

/// Email with a Unicode domain part, or `default`.
pub fn email_to_unicode<'r, D: From<String>>(raw: impl Into<RawValue<'r>>, default: D) -> D {
    Canonicalizer::shared().email_to_unicode(raw, default)
}

// ── Helpers ────────────────────────────────────────────────

pub(crate) fn settle<T, D: From<T>>(operation: &str, outcome: Result<T>, default: D) -> D {
    match outcome {
        Ok(value) => D::from(value),
        Err(reason) => {
            debug!("{}: falling back to default: {}", operation, reason);
            default
        }
    }
}

pub(crate) fn require_text(raw: RawValue<'_>) -> Result<&str> {
    raw.as_text().ok_or(Rejection::TypeMismatch {
        expected: "text",
        found: raw.kind(),
    })
}

/// Split on `@` into exactly one non-empty local-part and domain-part.
pub(crate) fn split_address(address: &str) -> Result<(&str, &str)> {
    let mut fragments = address.split('@');
    match (fragments.next(), fragments.next(), fragments.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            Ok((local, domain))
        }
        _ => Err(Rejection::StructuralMismatch {
            fragments: address.split('@').count(),
        }),
    }
}

/// The decoded domain must have a dot and a top-level label of at least
/// [`MIN_TLD_CHARS`] characters.
fn ensure_tld_length(decoded: &str) -> Result<()> {
    match decoded.rsplit_once('.') {
        Some((_, tld)) if tld.chars().count() >= MIN_TLD_CHARS => Ok(()),
        Some((_, tld)) => Err(Rejection::DegenerateTld {
            tld: tld.to_string(),
        }),
        None => Err(Rejection::DegenerateTld {
            tld: decoded.to_string(),
        }),
    }
}
