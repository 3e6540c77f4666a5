//! Commit log models.

use serde::Deserialize;

/// An author or committer signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: String,
    /// Timestamp as formatted by the service, e.g. `Mon Jan 02 15:04:05 2006 -0700`.
    pub time: String,
}

/// A single file change in a commit's tree diff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiffEntry {
    /// Change type, e.g. `add`, `modify`, `delete`, `rename`.
    #[serde(rename = "type")]
    pub change_type: String,
    pub old_id: String,
    pub old_mode: u32,
    pub old_path: String,
    pub new_id: String,
    pub new_mode: u32,
    pub new_path: String,
}

/// A commit as returned by the log endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Object ID of the commit.
    pub commit: String,
    /// Object ID of the commit's root tree.
    pub tree: String,
    pub parents: Vec<String>,
    pub author: Person,
    pub committer: Person,
    pub message: String,
    /// Only present when the log was requested with `name-status`.
    #[serde(default)]
    pub tree_diff: Vec<DiffEntry>,
}

/// One page of a commit log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Log {
    pub log: Vec<Commit>,
    /// Cursor for the next page, if the log continues.
    #[serde(default)]
    pub next: Option<String>,
}
