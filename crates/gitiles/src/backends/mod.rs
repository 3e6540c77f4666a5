//! Concrete [`HttpClient`](crate::HttpClient) backends, one per cargo feature.

#[cfg(feature = "reqwest-client")]
mod reqwest_client;
#[cfg(feature = "reqwest-client")]
pub use reqwest_client::ReqwestClient;
