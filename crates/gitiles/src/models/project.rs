//! Project (repository) models.

use serde::Deserialize;

/// A repository hosted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub name: String,
    pub clone_url: String,
    #[serde(default)]
    pub description: Option<String>,
}
