//! Tree listing models.

use serde::Deserialize;

/// Well-known git file modes.
pub mod mode {
    /// A directory.
    pub const TREE: u32 = 0o40000;
    /// A regular, non-executable file.
    pub const BLOB: u32 = 0o100644;
    /// An executable file.
    pub const EXECUTABLE: u32 = 0o100755;
    /// A symbolic link.
    pub const SYMLINK: u32 = 0o120000;
    /// A submodule commit.
    pub const GITLINK: u32 = 0o160000;
}

/// The listing of a single tree object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeResponse {
    /// Object ID of the tree.
    pub id: String,
    /// Entries in the order the service returned them.
    pub entries: Vec<TreeEntry>,
}

impl TreeResponse {
    /// Name of the synthetic entry pointing at the parent directory.
    pub const PARENT_NAME: &'static str = "..";

    /// Append a synthetic `..` entry as the last element of the listing.
    pub fn push_parent_entry(&mut self) {
        self.entries.push(TreeEntry {
            mode: mode::TREE,
            object_type: "tree".to_owned(),
            id: String::new(),
            name: Self::PARENT_NAME.to_owned(),
        });
    }

    /// Find an entry by name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// One entry of a tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// POSIX-style file mode, e.g. `0o100644`.
    pub mode: u32,
    /// Object type as reported by the service (`blob`, `tree`, `commit`).
    #[serde(rename = "type")]
    pub object_type: String,
    /// Object ID of the entry.
    pub id: String,
    /// Entry name, relative to the containing tree.
    pub name: String,
}

impl TreeEntry {
    /// Infer the kind of this entry.
    ///
    /// The executable and symlink modes take precedence; every other mode falls back to the
    /// reported object type.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self.mode {
            mode::EXECUTABLE => EntryKind::ExecutableBlob,
            mode::SYMLINK => EntryKind::Symlink,
            _ => EntryKind::from_object_type(&self.object_type),
        }
    }
}

/// The inferred kind of a [`TreeEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Blob,
    ExecutableBlob,
    Symlink,
    Tree,
    /// A submodule.
    Commit,
    /// An object type this SDK does not know about, kept verbatim.
    Other(String),
}

impl EntryKind {
    fn from_object_type(object_type: &str) -> Self {
        match object_type {
            "blob" => Self::Blob,
            "tree" => Self::Tree,
            "commit" => Self::Commit,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether the entry holds file content that can be displayed.
    #[must_use]
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob | Self::ExecutableBlob)
    }
}
