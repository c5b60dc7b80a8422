//! Version bump policy

use tracing::debug;

use gantry_core::config::VersionResolverConfig;
use gantry_core::types::BumpLevel;

use crate::coerce::major_from_tag;

/// Policy inputs for deriving a bump level from a change set
///
/// Both guards are conservative: with either active, a breaking change
/// bumps minor instead of major. An automatic major bump only happens
/// when the caller opts out of both.
#[derive(Debug, Clone)]
pub struct VersionBumpPolicy {
    /// Bump applied when no breaking change or feature is present
    pub default_bump: BumpLevel,
    /// Breaking changes on a 0.x version bump minor instead of major
    pub pre_one_zero_minor_for_breaking: bool,
    /// Breaking changes bump minor instead of major
    pub no_auto_major: bool,
    /// Major digit of the prior release, 0 when unknown
    pub current_major: u64,
}

impl VersionBumpPolicy {
    /// Build a policy from configuration and the prior release tag
    pub fn from_config(config: &VersionResolverConfig, prior_tag: Option<&str>) -> Self {
        let current_major = prior_tag.and_then(major_from_tag).unwrap_or(0);
        Self {
            default_bump: config.default,
            pre_one_zero_minor_for_breaking: config.pre_one_zero_minor_for_breaking,
            no_auto_major: config.no_auto_major,
            current_major,
        }
    }
}

impl Default for VersionBumpPolicy {
    fn default() -> Self {
        Self::from_config(&VersionResolverConfig::default(), None)
    }
}

/// Derive the bump level for a change set under the policy guards
pub fn resolve_bump(has_breaking: bool, has_feature: bool, policy: &VersionBumpPolicy) -> BumpLevel {
    let bump = if has_breaking {
        if policy.current_major == 0 && policy.pre_one_zero_minor_for_breaking {
            BumpLevel::Minor
        } else if policy.no_auto_major {
            BumpLevel::Minor
        } else {
            BumpLevel::Major
        }
    } else if has_feature {
        BumpLevel::Minor
    } else {
        policy.default_bump
    };

    debug!(has_breaking, has_feature, %bump, "bump resolved");
    bump
}
