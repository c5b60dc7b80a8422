//! Gantry Drafter - Release info assembly
//!
//! Orchestrates the changelog, version resolution and template rendering
//! into the final draft-release payload. The whole pipeline is a pure
//! computation over materialized inputs: identical inputs produce
//! byte-identical output, which is what makes re-running the
//! draft-update workflow safe.

mod drafter;

pub use drafter::{ReleaseDrafter, ReleaseInfo, ReleaseOverrides};
