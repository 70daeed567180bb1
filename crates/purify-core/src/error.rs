//! Rejection types for the purifiers
//!
//! Every internal step returns `Result<T, Rejection>`. A `Rejection` never
//! crosses a public purifier boundary: the boundary converts it into the
//! caller's default and logs the reason at debug level.

use std::fmt;

use thiserror::Error;

use crate::grammar::Grammar;
use crate::idn::CodecError;

/// Why a raw value was not accepted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// Input has the wrong shape (e.g. a number where text is required)
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Input failed a Syntax Validator grammar
    #[error("{stage} check failed against grammar '{grammar}'")]
    GrammarMismatch { grammar: Grammar, stage: Stage },

    /// Email did not split into exactly one local-part and one domain-part
    #[error("expected 2 non-empty '@' fragments, found {fragments}")]
    StructuralMismatch { fragments: usize },

    /// IDN codec could not encode or decode a label
    #[error("codec failure: {0}")]
    Codec(#[from] CodecError),

    /// Decoded top-level label is missing or shorter than 2 characters
    #[error("top-level label '{tld}' is too short")]
    DegenerateTld { tld: String },

    /// Numeric input is NaN, infinite, unparseable or overflows
    #[error("not a usable number: {0}")]
    NotANumber(String),

    /// Numeric input is outside the permitted bounds
    #[error("{value} is outside the permitted range")]
    OutOfRange { value: String },

    /// Text is not one of the accepted tokens or characters
    #[error("text does not match {0}")]
    Unmatched(&'static str),
}

/// Which validation pass rejected the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Relaxed grammar applied to the raw input
    Precondition,
    /// Strict (or matching) grammar applied to the canonical output
    Final,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Precondition => write!(f, "precondition"),
            Stage::Final => write!(f, "final"),
        }
    }
}

/// Result type alias for purifier internals
pub type Result<T> = std::result::Result<T, Rejection>;
