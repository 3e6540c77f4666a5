//! The seam between the Gitiles client and whatever performs HTTP.

use std::future::Future;

use bytes::Bytes;
use http::header::{ACCEPT, HeaderValue};
use http::{HeaderMap, Method, StatusCode};

use crate::error::HttpClientError;

/// Media type Gitiles serves for `?format=JSON`.
pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type Gitiles serves for `?format=TEXT` (base64 blob content).
pub(crate) const TEXT_MEDIA_TYPE: &str = "text/plain";

/// A read request against the service. Gitiles is read-only, so there is no request body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, already percent-encoded, query string included.
    pub url: String,
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// A `GET` of `url` with no headers set.
    #[must_use]
    pub fn get(url: String) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Ask for the given media type.
    #[must_use]
    pub fn accept(mut self, media_type: &'static str) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(media_type));
        self
    }
}

/// Whatever the server answered, error statuses included.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Performs requests for a [`GitilesClient`](crate::GitilesClient).
///
/// Only failures to obtain a response are errors. A 404 or 500 is an `Ok` response that the
/// client classifies itself.
pub trait HttpClient: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_starts_without_headers() {
        let request = HttpRequest::get("http://gitiles.test/?format=JSON".to_owned());
        assert_eq!(request.method, Method::GET);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn accept_replaces_previous_media_type() {
        let request = HttpRequest::get("http://gitiles.test/".to_owned())
            .accept(TEXT_MEDIA_TYPE)
            .accept(JSON_MEDIA_TYPE);
        let values: Vec<_> = request.headers.get_all(ACCEPT).iter().collect();
        assert_eq!(values, [JSON_MEDIA_TYPE]);
    }
}
