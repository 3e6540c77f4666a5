//! Blame models.

use serde::Deserialize;

use super::Person;

/// A run of lines attributed to a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlameRegion {
    /// First line of the region, 1-based.
    pub start: u32,
    /// Number of lines in the region.
    pub count: u32,
    /// Path of the file in the blamed commit.
    pub path: String,
    pub commit: String,
    pub author: Person,
}

/// Blame of a single file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Blame {
    pub regions: Vec<BlameRegion>,
}
