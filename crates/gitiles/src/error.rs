//! Error types for the Gitiles SDK.

use http::StatusCode;
use thiserror::Error;

/// Maximum number of payload bytes carried in an error for diagnostics.
pub const PAYLOAD_PREVIEW_LIMIT: usize = 256;

/// Errors raised by an [`HttpClient`](crate::HttpClient) backend.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established or was dropped.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other backend failure.
    #[error("http client error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Failure to decode a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The JSON body did not parse, or did not match the expected schema.
    #[error("invalid JSON at `{path}`: {source} (payload: {payload:?})")]
    Json {
        /// Path to the field that failed, `.` for the document root.
        path: String,
        #[source]
        source: serde_json::Error,
        /// Bounded preview of the JSON body.
        payload: String,
    },

    /// The body was not valid padded standard base64.
    #[error("invalid base64: {source} (payload: {payload:?})")]
    Base64 {
        #[source]
        source: base64::DecodeError,
        /// Bounded preview of the encoded body.
        payload: String,
    },
}

/// Top-level error type for all Gitiles operations.
#[derive(Debug, Error)]
pub enum GitilesError {
    /// The HTTP backend failed to complete the request.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: StatusCode,
        url: String,
        /// Bounded preview of the response body.
        body: String,
    },

    /// The response lacked the leading framing line.
    #[error("malformed response, missing framing line: {payload:?}")]
    MalformedResponse {
        /// Bounded preview of the offending body.
        payload: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The client was configured with an unusable value.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl GitilesError {
    /// Whether the error happened before a body could be decoded, i.e. the network or the
    /// server's status code is at fault.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }
}

/// Render at most [`PAYLOAD_PREVIEW_LIMIT`] bytes of `payload` as text.
pub(crate) fn preview(payload: &[u8]) -> String {
    if payload.len() <= PAYLOAD_PREVIEW_LIMIT {
        return String::from_utf8_lossy(payload).into_owned();
    }
    let mut out = String::from_utf8_lossy(&payload[..PAYLOAD_PREVIEW_LIMIT]).into_owned();
    out.push_str("...");
    out
}
