//! Collaborator traits supplying commits and releases

use gantry_core::error::Result;

use crate::types::{CommitInfo, ReleaseSnapshot};

/// Supplies the commits reachable since the prior release
///
/// Implementations must return commits oldest-first and should include at
/// most the commits actually reachable since the prior release.
pub trait CommitSource {
    /// Materialize the commit list
    fn commits(&self) -> Result<Vec<CommitInfo>>;
}

/// Supplies the prior published release and any existing draft
pub trait ReleaseSource {
    /// Latest published, non-draft release matching the configured tag
    /// prefix, if any
    fn prior_release(&self) -> Result<Option<ReleaseSnapshot>>;

    /// Existing unpublished draft release, if any
    fn draft_release(&self) -> Result<Option<ReleaseSnapshot>>;
}
