//! Navigation over a remote source tree.
//!
//! A [`Browser`] keeps a listing pane and a content pane. Every navigation runs as a background
//! task; when it finishes its result is applied only if no newer navigation was started on the
//! same pane in the meantime, so rapid clicking never leaves an older result on screen.

mod generation;

pub use generation::{Generation, GenerationCounter};

use std::sync::Arc;

use gitiles::{EntryKind, GitilesError, TreeAddr, TreeEntry, TreeResponse};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{Instrument as _, debug, info_span, trace, warn};

use crate::service::TreeService;
use crate::view::View;

/// What the content pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPane {
    Text { addr: TreeAddr, text: String },
    Error { addr: TreeAddr, message: String },
}

/// Snapshot of everything the browser displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// The directory whose listing is shown.
    pub addr: TreeAddr,
    pub entries: Vec<TreeEntry>,
    pub content: Option<ContentPane>,
}

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The fetched data is now displayed.
    Applied,
    /// The fetch failed and the error is now displayed.
    Failed(String),
    /// A newer navigation on the same pane started first; the result was discarded.
    Superseded,
    /// The task was cancelled or panicked.
    Aborted,
}

/// Handle to a navigation running in the background.
#[derive(Debug)]
pub struct Navigation {
    generation: Generation,
    handle: JoinHandle<NavigationOutcome>,
}

impl Navigation {
    /// The generation token this navigation was started with.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Cancel the fetch. Its result, if any, is never displayed.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the navigation to finish.
    pub async fn finished(self) -> NavigationOutcome {
        self.handle.await.unwrap_or(NavigationOutcome::Aborted)
    }
}

struct BrowserInner<S, V> {
    service: Arc<S>,
    view: Arc<V>,
    state: Mutex<DisplayState>,
    listing_generation: GenerationCounter,
    content_generation: GenerationCounter,
}

/// Browses a repository through a [`TreeService`], rendering into a [`View`].
///
/// Must be used from within a tokio runtime.
pub struct Browser<S: TreeService, V: View> {
    inner: Arc<BrowserInner<S, V>>,
}

impl<S: TreeService, V: View> Clone for Browser<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TreeService, V: View> Browser<S, V> {
    /// Create a browser positioned at `start`. Nothing is fetched until a navigation is
    /// requested.
    pub fn new(service: Arc<S>, view: Arc<V>, start: TreeAddr) -> Self {
        Self {
            inner: Arc::new(BrowserInner {
                service,
                view,
                state: Mutex::new(DisplayState {
                    addr: start,
                    entries: Vec::new(),
                    content: None,
                }),
                listing_generation: GenerationCounter::default(),
                content_generation: GenerationCounter::default(),
            }),
        }
    }

    /// A copy of the current display state.
    #[must_use]
    pub fn state(&self) -> DisplayState {
        self.inner.state.lock().clone()
    }

    /// Load the listing of the directory at `addr`.
    ///
    /// Listings below the root get a trailing `..` entry.
    pub fn open_tree(&self, addr: TreeAddr) -> Navigation {
        let generation = self.inner.listing_generation.advance();
        debug!(%addr, %generation, "opening tree");
        let inner = Arc::clone(&self.inner);
        let span = info_span!("open_tree", %addr, %generation);
        let handle = tokio::spawn(
            async move {
                let result = inner.service.tree(&addr).await;
                inner.apply_listing(generation, addr, result)
            }
            .instrument(span),
        );
        Navigation { generation, handle }
    }

    /// Load the content of the file at `addr`.
    pub fn open_blob(&self, addr: TreeAddr) -> Navigation {
        let generation = self.inner.content_generation.advance();
        debug!(%addr, %generation, "opening blob");
        let inner = Arc::clone(&self.inner);
        let span = info_span!("open_blob", %addr, %generation);
        let handle = tokio::spawn(
            async move {
                let result = inner.service.blob_content(&addr).await;
                inner.apply_content(generation, addr, result)
            }
            .instrument(span),
        );
        Navigation { generation, handle }
    }

    /// Follow the entry called `name` in the current listing.
    ///
    /// Files open in the content pane and directories (including `..`) replace the listing.
    /// Returns `None` if there is no such entry or it cannot be followed, e.g. a symlink or a
    /// submodule.
    pub fn select(&self, name: &str) -> Option<Navigation> {
        let (kind, target) = {
            let state = self.inner.state.lock();
            let entry = state.entries.iter().find(|e| e.name == name)?;
            (entry.kind(), state.addr.child(name))
        };
        match kind {
            EntryKind::Blob | EntryKind::ExecutableBlob => Some(self.open_blob(target)),
            EntryKind::Tree => Some(self.open_tree(target)),
            EntryKind::Symlink | EntryKind::Commit | EntryKind::Other(_) => {
                debug!(name, ?kind, "entry is not navigable");
                None
            }
        }
    }
}

impl<S: TreeService, V: View> BrowserInner<S, V> {
    fn apply_listing(
        &self,
        generation: Generation,
        addr: TreeAddr,
        result: Result<TreeResponse, GitilesError>,
    ) -> NavigationOutcome {
        let mut state = self.state.lock();
        if !self.listing_generation.is_current(generation) {
            trace!("discarding superseded listing");
            return NavigationOutcome::Superseded;
        }
        match result {
            Ok(mut tree) => {
                if !addr.is_root() {
                    tree.push_parent_entry();
                }
                self.view.show_listing(&addr, &tree.entries);
                state.addr = addr;
                state.entries = tree.entries;
                NavigationOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "failed to load tree");
                let message = e.to_string();
                self.view.alert(&message);
                NavigationOutcome::Failed(message)
            }
        }
    }

    fn apply_content(
        &self,
        generation: Generation,
        addr: TreeAddr,
        result: Result<String, GitilesError>,
    ) -> NavigationOutcome {
        let mut state = self.state.lock();
        if !self.content_generation.is_current(generation) {
            trace!("discarding superseded content");
            return NavigationOutcome::Superseded;
        }
        match result {
            Ok(text) => {
                self.view.show_content(&addr, &text);
                state.content = Some(ContentPane::Text { addr, text });
                NavigationOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "failed to load blob");
                let message = e.to_string();
                self.view.show_error(&addr, &message);
                state.content = Some(ContentPane::Error {
                    addr,
                    message: message.clone(),
                });
                NavigationOutcome::Failed(message)
            }
        }
    }
}
