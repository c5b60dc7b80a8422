//! Gantry Version - Version resolution for release drafting
//!
//! Coerces tag-like strings into semantic versions, derives a bump level
//! from a change set under conservative policy guards, constructs the
//! candidate "next version" points, and resolves the final version under
//! the override/draft/computed precedence rules.

mod coerce;
mod points;
mod policy;
mod resolver;

pub use coerce::{coerce_version, major_from_tag};
pub use points::{next_major, next_minor, next_patch, next_prerelease, VersionPoint};
pub use policy::{resolve_bump, VersionBumpPolicy};
pub use resolver::{resolve, ResolveRequest, ResolvedVersions};
