//! The Gitiles service facade.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::content;
use crate::error::{GitilesError, preview};
use crate::framing::decode_framed;
use crate::http_client::{HttpClient, HttpRequest, JSON_MEDIA_TYPE, TEXT_MEDIA_TYPE};
use crate::models::{Blame, Log, Project, TreeAddr, TreeResponse};

/// Default address of a locally running Gitiles.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Bytes escaped in repo names, refs and file paths. `/` is kept since all three are
/// slash-separated in Gitiles URLs.
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Bytes escaped in query values.
const QUERY_ESCAPES: &AsciiSet = &PATH_ESCAPES.add(b'&').add(b'=').add(b'+').add(b'/');

fn encode_path(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_ESCAPES).to_string()
}

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Builder for [`GitilesClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start building a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                base_url: base_url.into(),
                ..ClientConfig::default()
            },
        }
    }

    /// Set the per-request timeout used by the default backend.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build a client on top of the given backend.
    ///
    /// # Errors
    ///
    /// Returns [`GitilesError::InvalidConfig`] if the base URL is not an `http(s)` URL.
    pub fn build_with<C: HttpClient>(self, http: C) -> Result<GitilesClient<C>, GitilesError> {
        let mut config = self.config;
        let trimmed = config.base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(GitilesError::InvalidConfig(format!(
                "base URL '{}' must start with http:// or https://",
                config.base_url
            )));
        }
        config.base_url = trimmed.to_owned();
        Ok(GitilesClient {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Build a client backed by [`ReqwestClient`](crate::ReqwestClient).
    ///
    /// # Errors
    ///
    /// Returns [`GitilesError::InvalidConfig`] if the base URL is not an `http(s)` URL or the
    /// HTTP backend cannot be initialized.
    #[cfg(feature = "reqwest-client")]
    pub fn build(self) -> Result<Gitiles, GitilesError> {
        let http = crate::backends::ReqwestClient::new(self.config.timeout)
            .map_err(|e| GitilesError::InvalidConfig(format!("HTTP backend: {e}")))?;
        self.build_with(http)
    }
}

/// A Gitiles client using the default async backend.
#[cfg(feature = "reqwest-client")]
pub type Gitiles = GitilesClient<crate::backends::ReqwestClient>;

/// Client for a single Gitiles service. Cheap to clone.
///
/// Every call issues a fresh request; nothing is cached between calls.
#[derive(Debug)]
pub struct GitilesClient<C: HttpClient> {
    inner: Arc<ClientInner<C>>,
}

impl<C: HttpClient> Clone for GitilesClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
struct ClientInner<C: HttpClient> {
    http: C,
    config: ClientConfig,
}

impl<C: HttpClient> ClientInner<C> {
    fn url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let query = query
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_ESCAPES)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{path}?{query}", self.config.base_url)
    }

    /// `GET` the given path and return the body of a successful response.
    ///
    /// `path` must already be encoded; query values are encoded here.
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        accept: &'static str,
    ) -> Result<Bytes, GitilesError> {
        let url = self.url(path, query);
        debug!(%url, "sending request");
        let request = HttpRequest::get(url.clone()).accept(accept);
        let response = self.http.send(request).await?;
        debug!(status = %response.status, len = response.body.len(), "received response");

        if !response.status.is_success() {
            return Err(GitilesError::Http {
                status: response.status,
                url,
                body: preview(&response.body),
            });
        }
        Ok(response.body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GitilesError> {
        let body = self.get(path, query, JSON_MEDIA_TYPE).await?;
        decode_framed(&body)
    }
}

impl<C: HttpClient> GitilesClient<C> {
    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Fetch the listing of the tree at `addr`.
    ///
    /// Entries are returned exactly as the service ordered them. Repo, branch and path are
    /// percent-encoded, so names containing `#`, `?` or `%` reach the server intact.
    ///
    /// # Errors
    ///
    /// Transport and status errors are returned unchanged; see
    /// [`decode_framed`] for decoding failures.
    #[instrument(skip(self))]
    pub async fn tree(&self, addr: &TreeAddr) -> Result<TreeResponse, GitilesError> {
        let path = format!(
            "/{}/+/{}/{}",
            encode_path(&addr.repo),
            encode_path(&addr.branch),
            encode_path(addr.request_path())
        );
        self.inner.get_json(&path, &[("format", "JSON")]).await
    }

    /// Fetch the content of the blob at `addr` as text.
    ///
    /// # Errors
    ///
    /// Transport and status errors are returned unchanged; malformed base64 is a
    /// [`GitilesError::Decode`].
    #[instrument(skip(self))]
    pub async fn blob_content(&self, addr: &TreeAddr) -> Result<String, GitilesError> {
        let body = self.fetch_blob(addr).await?;
        Ok(content::decode_text(&body)?)
    }

    /// Fetch the raw bytes of the blob at `addr`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::blob_content`].
    #[instrument(skip(self))]
    pub async fn blob_bytes(&self, addr: &TreeAddr) -> Result<Bytes, GitilesError> {
        let body = self.fetch_blob(addr).await?;
        Ok(Bytes::from(content::decode_base64(&body)?))
    }

    async fn fetch_blob(&self, addr: &TreeAddr) -> Result<Bytes, GitilesError> {
        let path = format!(
            "/{}/+show/{}/{}",
            encode_path(&addr.repo),
            encode_path(&addr.branch),
            encode_path(&addr.path)
        );
        self.inner
            .get(&path, &[("format", "TEXT")], TEXT_MEDIA_TYPE)
            .await
    }

    /// Fetch one page of the commit log for `addr`.
    ///
    /// `start` is the `next` cursor of a previous page. Following the cursor is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Same as [`Self::tree`].
    #[instrument(skip(self))]
    pub async fn log(&self, addr: &TreeAddr, start: Option<&str>) -> Result<Log, GitilesError> {
        let mut path = format!(
            "/{}/+log/{}",
            encode_path(&addr.repo),
            encode_path(&addr.branch)
        );
        if !addr.is_root() {
            path.push('/');
            path.push_str(&encode_path(&addr.path));
        }
        let mut query = vec![("format", "JSON")];
        if let Some(start) = start {
            query.push(("s", start));
        }
        self.inner.get_json(&path, &query).await
    }

    /// Fetch the blame of the file at `addr`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::tree`].
    #[instrument(skip(self))]
    pub async fn blame(&self, addr: &TreeAddr) -> Result<Blame, GitilesError> {
        let path = format!(
            "/{}/+blame/{}/{}",
            encode_path(&addr.repo),
            encode_path(&addr.branch),
            encode_path(&addr.path)
        );
        self.inner.get_json(&path, &[("format", "JSON")]).await
    }

    /// List the projects hosted by the service, keyed by name.
    ///
    /// # Errors
    ///
    /// Same as [`Self::tree`].
    #[instrument(skip(self))]
    pub async fn projects(&self) -> Result<BTreeMap<String, Project>, GitilesError> {
        self.inner.get_json("/", &[("format", "JSON")]).await
    }
}
