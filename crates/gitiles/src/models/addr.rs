//! Addressing of a location inside a repository.

use std::fmt;

/// A location in a repository: repository name, branch or ref, and a path in the tree.
///
/// An empty path or `"."` denotes the root of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TreeAddr {
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl TreeAddr {
    /// Create an address.
    pub fn new(repo: impl Into<String>, branch: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Whether this address points at the root of the tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_empty() || self.path == "."
    }

    /// The path as used in request URLs, where the root is spelled `.`.
    #[must_use]
    pub fn request_path(&self) -> &str {
        if self.path.is_empty() { "." } else { &self.path }
    }

    /// Address of the entry `name` inside this directory.
    ///
    /// The joined path is lexically cleaned, so `".."` climbs to the parent and a path that
    /// cleans to nothing is the root.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self {
            repo: self.repo.clone(),
            branch: self.branch.clone(),
            path: clean_path(&format!("{}/{name}", self.path)),
        }
    }
}

impl fmt::Display for TreeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/", self.repo, self.branch)?;
        if !self.is_root() {
            f.write_str(&self.path)?;
        }
        Ok(())
    }
}

/// Resolve `.` and `..` segments and drop empty ones. `..` above the root is discarded.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_dot_are_root() {
        assert!(TreeAddr::new("r", "main", "").is_root());
        assert!(TreeAddr::new("r", "main", ".").is_root());
        assert!(!TreeAddr::new("r", "main", "src").is_root());
    }

    #[test]
    fn root_request_path_is_dot() {
        assert_eq!(TreeAddr::new("r", "main", "").request_path(), ".");
        assert_eq!(TreeAddr::new("r", "main", "a/b").request_path(), "a/b");
    }

    #[test]
    fn child_joins_paths() {
        let root = TreeAddr::new("r", "main", "");
        assert_eq!(root.child("src").path, "src");
        assert_eq!(root.child("src").child("lib.rs").path, "src/lib.rs");
        assert_eq!(TreeAddr::new("r", "main", ".").child("README").path, "README");
    }

    #[test]
    fn child_dot_dot_climbs() {
        let nested = TreeAddr::new("r", "main", "a/b");
        assert_eq!(nested.child("..").path, "a");
        assert!(nested.child("..").child("..").is_root());
        assert!(TreeAddr::new("r", "main", "").child("..").is_root());
    }

    #[test]
    fn child_keeps_repo_and_branch() {
        let child = TreeAddr::new("r", "refs/heads/dev", "a").child("b");
        assert_eq!(child.repo, "r");
        assert_eq!(child.branch, "refs/heads/dev");
    }

    #[test]
    fn display_reads_like_a_breadcrumb() {
        assert_eq!(TreeAddr::new("r", "main", "").to_string(), "r:main/");
        assert_eq!(TreeAddr::new("r", "main", "a/b").to_string(), "r:main/a/b");
    }
}
