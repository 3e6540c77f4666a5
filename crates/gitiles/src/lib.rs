//! Rust SDK for the Gitiles source browsing service.

mod backends;
mod client;
pub mod content;
pub mod error;
pub mod framing;
mod http_client;
pub mod models;

#[cfg(feature = "reqwest-client")]
pub use backends::ReqwestClient;
#[cfg(feature = "reqwest-client")]
pub use client::Gitiles;
pub use client::{ClientBuilder, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GitilesClient};
pub use error::{DecodeError, GitilesError, HttpClientError};
pub use http_client::{HttpClient, HttpRequest, HttpResponse};
pub use models::{EntryKind, TreeAddr, TreeEntry, TreeResponse};
