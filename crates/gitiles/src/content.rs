//! Decoding of `?format=TEXT` blob bodies.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::{DecodeError, preview};

/// Decode a padded, standard-alphabet base64 body into raw bytes.
///
/// Surrounding ASCII whitespace, such as a trailing newline, is ignored. Whitespace inside the
/// encoded text is not.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] on malformed input. No partial output is ever produced.
pub fn decode_base64(encoded: &[u8]) -> Result<Vec<u8>, DecodeError> {
    BASE64
        .decode(encoded.trim_ascii())
        .map_err(|source| DecodeError::Base64 {
            source,
            payload: preview(encoded),
        })
}

/// Decode a base64 body into text. Invalid UTF-8 sequences are replaced with U+FFFD.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] on malformed input.
pub fn decode_text(encoded: &[u8]) -> Result<String, DecodeError> {
    let bytes = decode_base64(encoded)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
