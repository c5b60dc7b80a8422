//! Gantry Remote - Hosting-API boundary for release drafting
//!
//! This crate defines the data the drafter core consumes and produces at
//! the remote hosting boundary: commits with their associated pull
//! requests, release snapshots, the upsert payload, and the collaborator
//! traits that supply and accept them. Fetching is a collaborator concern;
//! the core only ever sees already-materialized data.

mod repository;
mod sink;
mod snapshot;
mod source;
pub mod types;

pub use repository::RepositoryInfo;
pub use sink::{ReleaseId, ReleaseSink, ReleaseUpsert};
pub use snapshot::RepoSnapshot;
pub use source::{CommitSource, ReleaseSource};
pub use types::{CommitInfo, PrAuthor, PullRequestInfo, ReleaseSnapshot, UserInfo};
