//! Latin-1 text for gzip header strings.
//!
//! RFC 1952 stores FNAME and FCOMMENT as zero-terminated ISO 8859-1. Every
//! byte maps to the `char` with the same code point, so decoding cannot fail
//! and any decoded string encodes back to the same bytes.

use crate::error::{GzheadError, Result};

/// Decode latin-1 bytes.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode a string as latin-1.
///
/// Fails on the first character above U+00FF.
pub fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| u8::try_from(ch).map_err(|_| GzheadError::unencodable_text(ch)))
        .collect()
}

/// Check that `text` can be written as a zero-terminated latin-1 string.
pub fn check_cstr(text: &str) -> Result<()> {
    match text.chars().find(|&ch| ch == '\0' || u32::from(ch) > 0xFF) {
        Some(ch) => Err(GzheadError::unencodable_text(ch)),
        None => Ok(()),
    }
}
