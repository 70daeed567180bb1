//! IDN codec — Unicode ⇄ ASCII-Compatible Encoding for dotted domains
//!
//! Applies the RFC 3492 punycode transform label by label. This is a plain
//! punycode mapping: no UTS #46 mapping or normalization is performed, so
//! a single encode/decode round trip is the only transformation applied.

use thiserror::Error;

/// Prefix marking an ACE label
pub const ACE_PREFIX: &str = "xn--";

/// Label separators: full stop plus the ideographic and fullwidth variants.
/// Only direct `IdnCodec` callers can reach the variants; every grammar in
/// front of the canonicalizer rejects them.
const LABEL_SEPARATORS: [char; 4] = ['.', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// A label could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("cannot encode label '{label}'")]
    Encode { label: String },

    #[error("cannot decode label '{label}'")]
    Decode { label: String },
}

/// Converts a dotted domain between its Unicode and ACE forms.
///
/// Splits on `.` and on U+3002, U+FF0E and U+FF61; output is always joined
/// with `.`.
pub trait IdnCodec {
    /// Unicode → ACE. ASCII labels pass through unchanged.
    fn to_ace(&self, domain: &str) -> Result<String, CodecError>;

    /// ACE → Unicode. Labels without the `xn--` prefix pass through unchanged.
    fn to_unicode(&self, domain: &str) -> Result<String, CodecError>;
}

/// Production codec backed by the `idna` crate's punycode implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct Punycode;

/// Process-wide codec instance
pub static PUNYCODE: Punycode = Punycode;

impl IdnCodec for Punycode {
    fn to_ace(&self, domain: &str) -> Result<String, CodecError> {
        map_labels(domain, |label| {
            if label.is_ascii() {
                return Ok(label.to_string());
            }
            idna::punycode::encode_str(label)
                .map(|encoded| format!("{}{}", ACE_PREFIX, encoded))
                .ok_or_else(|| CodecError::Encode {
                    label: label.to_string(),
                })
        })
    }

    fn to_unicode(&self, domain: &str) -> Result<String, CodecError> {
        map_labels(domain, |label| match label.strip_prefix(ACE_PREFIX) {
            Some(encoded) => idna::punycode::decode_to_string(&encoded.to_lowercase())
                .ok_or_else(|| CodecError::Decode {
                    label: label.to_string(),
                }),
            None => Ok(label.to_string()),
        })
    }
}

fn map_labels<F>(domain: &str, convert: F) -> Result<String, CodecError>
where
    F: FnMut(&str) -> Result<String, CodecError>,
{
    let labels = domain
        .split(&LABEL_SEPARATORS[..])
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("idn: mapped {} label(s) of {:?}", labels.len(), domain);
    Ok(labels.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Encoding ───────────────────────────────────────

    #[test]
    fn test_to_ace_encodes_non_ascii_label() {
        assert_eq!(
            Punycode.to_ace("cæntersurf.net").unwrap(),
            "xn--cntersurf-g3a.net"
        );
    }

    #[test]
    fn test_to_ace_leaves_ascii_untouched() {
        assert_eq!(Punycode.to_ace("Example.COM").unwrap(), "Example.COM");
    }

    #[test]
    fn test_to_ace_rfc3492_sample() {
        // RFC 3492 §7.1 (B): "bücher"
        assert_eq!(Punycode.to_ace("bücher.de").unwrap(), "xn--bcher-kva.de");
    }

    #[test]
    fn test_to_ace_splits_on_ideographic_full_stop() {
        assert_eq!(
            Punycode.to_ace("cæntersurf\u{3002}net").unwrap(),
            "xn--cntersurf-g3a.net"
        );
    }

    // ── Decoding ───────────────────────────────────────

    #[test]
    fn test_to_unicode_decodes_ace_label() {
        assert_eq!(
            Punycode.to_unicode("xn--cntersurf-g3a.net").unwrap(),
            "cæntersurf.net"
        );
    }

    #[test]
    fn test_to_unicode_is_identity_without_ace_labels() {
        assert_eq!(Punycode.to_unicode("cæntersurf.net").unwrap(), "cæntersurf.net");
        assert_eq!(Punycode.to_unicode("centersurf.net").unwrap(), "centersurf.net");
    }

    #[test]
    fn test_to_unicode_rejects_truncated_ace() {
        let err = Punycode.to_unicode("bar.xn--no").unwrap_err();
        assert_eq!(
            err,
            CodecError::Decode {
                label: "xn--no".into()
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let ace = Punycode.to_ace("bücher.cæntersurf.net").unwrap();
        assert_eq!(Punycode.to_unicode(&ace).unwrap(), "bücher.cæntersurf.net");
    }
}
