//! Data models for Gitiles API requests and responses.

mod addr;
mod blame;
mod log;
mod project;
mod tree;

pub use addr::TreeAddr;
pub use blame::{Blame, BlameRegion};
pub use log::{Commit, DiffEntry, Log, Person};
pub use project::Project;
pub use tree::{EntryKind, TreeEntry, TreeResponse, mode};
