//! Collaborator trait accepting the drafted release

use serde::{Deserialize, Serialize};

use gantry_core::error::Result;

/// Identifier of a created or updated release record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseId(pub String);

impl std::fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Create-or-update payload for a release record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseUpsert {
    /// Release display name
    pub name: String,
    /// Release tag
    pub tag: String,
    /// Rendered release body
    pub body: String,
    /// Commitish the tag should point at, when creating
    #[serde(default)]
    pub target_ref: Option<String>,
    /// Whether to mark the release as a prerelease
    pub prerelease: bool,
    /// Whether the published release should become "latest"
    pub make_latest: bool,
    /// Whether the record stays a draft
    pub draft: bool,
}

/// Accepts a drafted release for creation or in-place update
pub trait ReleaseSink {
    /// Create or update the release record
    fn upsert(&self, payload: &ReleaseUpsert) -> Result<ReleaseId>;
}
