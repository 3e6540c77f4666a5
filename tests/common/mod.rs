#![allow(dead_code, missing_docs, clippy::unwrap_used)]

pub mod service_mocks;

use std::sync::Mutex;

use gitiles::{TreeAddr, TreeEntry, TreeResponse};
use gitiles_browse::view::View;

/// Builds a tree entry. Only the fields the browser looks at matter.
pub fn entry(name: &str, mode: u32, object_type: &str) -> TreeEntry {
    TreeEntry {
        mode,
        object_type: object_type.to_owned(),
        id: format!("id-{name}"),
        name: name.to_owned(),
    }
}

pub fn tree(entries: Vec<TreeEntry>) -> TreeResponse {
    TreeResponse {
        id: "tree-id".to_owned(),
        entries,
    }
}

/// Everything a [`View`] can be asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Listing { addr: TreeAddr, names: Vec<String> },
    Content { addr: TreeAddr, text: String },
    Error { addr: TreeAddr, message: String },
    Alert(String),
}

/// A view that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The names shown by the most recent listing.
    pub fn last_listing(&self) -> Option<Vec<String>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Listing { names, .. } => Some(names),
            _ => None,
        })
    }
}

impl View for RecordingView {
    fn show_listing(&self, addr: &TreeAddr, entries: &[TreeEntry]) {
        self.events.lock().unwrap().push(ViewEvent::Listing {
            addr: addr.clone(),
            names: entries.iter().map(|e| e.name.clone()).collect(),
        });
    }

    fn show_content(&self, addr: &TreeAddr, text: &str) {
        self.events.lock().unwrap().push(ViewEvent::Content {
            addr: addr.clone(),
            text: text.to_owned(),
        });
    }

    fn show_error(&self, addr: &TreeAddr, message: &str) {
        self.events.lock().unwrap().push(ViewEvent::Error {
            addr: addr.clone(),
            message: message.to_owned(),
        });
    }

    fn alert(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Alert(message.to_owned()));
    }
}
