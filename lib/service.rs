//! The service a [`Browser`](crate::browser::Browser) reads trees and blobs from.

use std::future::Future;

use gitiles::{GitilesClient, GitilesError, HttpClient, TreeAddr, TreeResponse};

/// Read access to a source tree.
pub trait TreeService: Send + Sync + 'static {
    /// Fetch the listing of the directory at `addr`.
    fn tree(
        &self,
        addr: &TreeAddr,
    ) -> impl Future<Output = Result<TreeResponse, GitilesError>> + Send;

    /// Fetch the text of the file at `addr`.
    fn blob_content(
        &self,
        addr: &TreeAddr,
    ) -> impl Future<Output = Result<String, GitilesError>> + Send;
}

impl<C: HttpClient + 'static> TreeService for GitilesClient<C> {
    async fn tree(&self, addr: &TreeAddr) -> Result<TreeResponse, GitilesError> {
        GitilesClient::tree(self, addr).await
    }

    async fn blob_content(&self, addr: &TreeAddr) -> Result<String, GitilesError> {
        GitilesClient::blob_content(self, addr).await
    }
}
