//! Purify Core - total input purifiers for untrusted parameters
//!
//! Every purifier takes a raw value of unknown provenance plus a caller
//! supplied default, and returns either a validated, canonical value or the
//! default. No purifier ever panics or returns an error for malformed input.
//!
//! # Architecture
//!
//! ```text
//! RawValue → Syntax Validator (relaxed) → IDN Codec → round-trip check
//!                                              ↓
//!                                   Syntax Validator (strict) → canonical | default
//! ```
//!
//! The identifier [`canonicalizer`] is the only multi-step pipeline. The
//! [`scalar`] and [`text`] purifiers are single-pass checks sharing the same
//! `(raw, default) -> value` contract.
//!
//! # Guarantees
//!
//! - **Total**: malformed input yields the default, never a panic or error
//! - **Pure**: no I/O, no shared mutable state; safe to call from any thread
//! - **Default untouched**: the default is returned verbatim, never inspected
//! - **Canonical**: accepted domains are lower case; email local-parts keep
//!   the caller's casing

pub mod canonicalizer;
pub mod catalog;
pub mod error;
pub mod grammar;
pub mod idn;
pub mod raw;
pub mod scalar;
pub mod text;

pub use canonicalizer::{
    domain_to_ace, domain_to_unicode, email_to_ace, email_to_unicode, Canonicalizer,
};
pub use catalog::{Bounds, Purified, Purifier, UnknownPurifier};
pub use error::{Rejection, Result};
pub use grammar::{Grammar, Grammars, SyntaxValidator, UnknownGrammar};
pub use idn::{CodecError, IdnCodec, Punycode};
pub use raw::RawValue;

/// Version of the purify-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
