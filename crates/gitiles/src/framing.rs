//! Decoding of Gitiles' framed JSON responses.
//!
//! Every `?format=JSON` response starts with a line such as `)]}'` that stops the body from
//! being evaluated as script by a cross-site `<script>` include. The line carries no data; it
//! is dropped before the rest of the body is parsed.

use serde::de::DeserializeOwned;

use crate::error::{DecodeError, GitilesError, preview};

/// Strip the framing line from `body` and decode the remainder as JSON.
///
/// The content of the first line is never inspected.
///
/// # Errors
///
/// - [`GitilesError::MalformedResponse`] if `body` contains no `\n`.
/// - [`GitilesError::Decode`] if the remainder is not a single valid JSON document for `T`.
pub fn decode_framed<T: DeserializeOwned>(body: &[u8]) -> Result<T, GitilesError> {
    let json = strip_framing(body)?;
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        json_error(path, err.into_inner(), json)
    })?;
    // The body holds exactly one document; anything but whitespace after it is an error.
    deserializer
        .end()
        .map_err(|err| json_error(".".to_owned(), err, json))?;
    Ok(value)
}

fn json_error(path: String, source: serde_json::Error, json: &[u8]) -> GitilesError {
    GitilesError::Decode(DecodeError::Json {
        path,
        source,
        payload: preview(json),
    })
}

/// Return the bytes after the first `\n` of `body`.
fn strip_framing(body: &[u8]) -> Result<&[u8], GitilesError> {
    let newline = body
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| GitilesError::MalformedResponse {
            payload: preview(body),
        })?;
    Ok(&body[newline + 1..])
}
