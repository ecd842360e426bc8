//! Response body decoding.
//!
//! The board mixes charset declarations unreliably, so the declared charset is
//! only informational: bytes are tried as strict UTF-8 and then as EUC-KR with
//! replacement characters.

use encoding_rs::{Encoding, EUC_KR, UTF_8};

/// Text decoded from a response body.
#[derive(Debug, Clone)]
pub struct DecodedBody {
    pub text: String,
    /// Encoding that produced `text`.
    pub encoding: &'static Encoding,
    /// True when undecodable sequences were replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Resolve the charset a response claims to use.
///
/// Missing labels and the single-byte Western defaults that servers (and
/// HTTP libraries) report when they do not know better are treated as UTF-8.
#[must_use]
pub fn effective_charset(declared: Option<&str>) -> &'static Encoding {
    let Some(label) = declared.map(str::trim).filter(|l| !l.is_empty()) else {
        return UTF_8;
    };

    match Encoding::for_label(label.as_bytes()) {
        // encoding_rs maps ISO-8859-1 and latin1 to windows-1252 per WHATWG
        Some(enc) if enc == encoding_rs::WINDOWS_1252 => UTF_8,
        Some(enc) => enc,
        None => UTF_8,
    }
}

/// Pull the `charset` parameter out of a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decode a body as UTF-8, falling back to EUC-KR.
///
/// Never fails; the fallback substitutes U+FFFD for anything EUC-KR cannot
/// decode either.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> DecodedBody {
    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedBody {
            text: text.to_string(),
            encoding: UTF_8,
            had_replacements: false,
        },
        Err(_) => {
            let (text, had_replacements) = EUC_KR.decode_without_bom_handling(bytes);
            DecodedBody {
                text: text.into_owned(),
                encoding: EUC_KR,
                had_replacements,
            }
        }
    }
}
