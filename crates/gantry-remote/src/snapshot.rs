//! Materialized repository snapshot
//!
//! The CLI feeds the drafter from a JSON snapshot of commits and releases
//! produced by whatever fetched them; the core never fetches anything
//! itself.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gantry_core::error::{RemoteError, Result};

use crate::source::{CommitSource, ReleaseSource};
use crate::types::{CommitInfo, ReleaseSnapshot};

/// A materialized view of the repository state the drafter consumes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoSnapshot {
    /// Repository web URL, used to derive owner/repo for links
    pub repository_url: Option<String>,
    /// Commits since the prior release, oldest first
    pub commits: Vec<CommitInfo>,
    /// Latest published release, if any
    pub prior_release: Option<ReleaseSnapshot>,
    /// Existing draft release, if any
    pub draft_release: Option<ReleaseSnapshot>,
}

impl RepoSnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading repository snapshot");
        let content = std::fs::read_to_string(path)
            .map_err(|_| RemoteError::SnapshotRead(path.to_path_buf()))?;
        let snapshot: Self = serde_json::from_str(&content)?;
        debug!(
            commits = snapshot.commits.len(),
            has_prior = snapshot.prior_release.is_some(),
            has_draft = snapshot.draft_release.is_some(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

impl CommitSource for RepoSnapshot {
    fn commits(&self) -> Result<Vec<CommitInfo>> {
        Ok(self.commits.clone())
    }
}

impl ReleaseSource for RepoSnapshot {
    fn prior_release(&self) -> Result<Option<ReleaseSnapshot>> {
        Ok(self.prior_release.clone())
    }

    fn draft_release(&self) -> Result<Option<ReleaseSnapshot>> {
        Ok(self.draft_release.clone())
    }
}
