#![allow(missing_docs, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use tokio::sync::oneshot;

use gitiles::{
    GitilesError, HttpClient, HttpClientError, HttpRequest, HttpResponse, TreeAddr, TreeResponse,
};
use gitiles_browse::service::TreeService;

fn not_found(addr: &TreeAddr) -> GitilesError {
    GitilesError::Transport(HttpClientError::Connection(format!(
        "no such path: {addr}"
    )))
}

/// An in-memory [`TreeService`] whose responses can be held back to control completion order.
#[derive(Debug, Default)]
pub struct MockService {
    /// Listings keyed by request path (`.` for the root).
    pub trees: HashMap<String, TreeResponse>,
    /// Blob texts keyed by path.
    pub blobs: HashMap<String, String>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl MockService {
    pub fn with_tree(mut self, path: &str, tree: TreeResponse) -> Self {
        self.trees.insert(path.to_owned(), tree);
        self
    }

    pub fn with_blob(mut self, path: &str, text: &str) -> Self {
        self.blobs.insert(path.to_owned(), text.to_owned());
        self
    }

    /// Make the next request for `path` wait until the returned sender fires or is dropped.
    pub fn hold(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_owned(), rx);
        tx
    }

    async fn pass_gate(&self, path: &str) {
        let gate = self.gates.lock().unwrap().remove(path);
        if let Some(rx) = gate {
            _ = rx.await;
        }
    }
}

impl TreeService for MockService {
    async fn tree(&self, addr: &TreeAddr) -> Result<TreeResponse, GitilesError> {
        let path = addr.request_path();
        self.pass_gate(path).await;
        self.trees.get(path).cloned().ok_or_else(|| not_found(addr))
    }

    async fn blob_content(&self, addr: &TreeAddr) -> Result<String, GitilesError> {
        self.pass_gate(&addr.path).await;
        self.blobs
            .get(&addr.path)
            .cloned()
            .ok_or_else(|| not_found(addr))
    }
}

/// An [`HttpClient`] serving canned bodies by URL and recording the URLs it was asked for.
#[derive(Debug, Default)]
pub struct CannedHttp {
    pub bodies: HashMap<String, (StatusCode, String)>,
    /// Shared so it can still be read after the client is handed to a `GitilesClient`.
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl CannedHttp {
    pub fn with(mut self, url: &str, status: StatusCode, body: &str) -> Self {
        self.bodies
            .insert(url.to_owned(), (status, body.to_owned()));
        self
    }
}

impl HttpClient for CannedHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.requested.lock().unwrap().push(request.url.clone());
        let (status, body) = self
            .bodies
            .get(&request.url)
            .ok_or_else(|| HttpClientError::Connection(format!("unexpected {}", request.url)))?;
        Ok(HttpResponse {
            status: *status,
            headers: HeaderMap::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        })
    }
}
