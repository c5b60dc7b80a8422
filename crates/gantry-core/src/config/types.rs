//! Configuration types

use serde::{Deserialize, Serialize};

use crate::template::Replacer;
use crate::types::BumpLevel;

use super::defaults;

/// Main configuration for the release drafter
///
/// Field names follow the kebab-case convention of the YAML config file.
/// The drafter core treats a loaded configuration as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DrafterConfig {
    /// Template for the release name; defaults to the tag
    pub name_template: Option<String>,

    /// Template for the release tag; defaults to `<tag-prefix>$RESOLVED_VERSION`
    pub tag_template: Option<String>,

    /// Prefix stripped from incoming tags and prepended to the default tag
    pub tag_prefix: String,

    /// Release body template (required; `$CHANGES` expands here)
    pub template: String,

    /// Text prepended to the rendered body
    pub header: String,

    /// Text appended to the rendered body
    pub footer: String,

    /// Template for a single change line
    pub change_template: String,

    /// Characters to escape in rendered change titles
    pub change_title_escapes: String,

    /// Body used when no semantic changes were found
    pub no_changes_template: String,

    /// Template for a category header
    pub category_template: String,

    /// Ordered changelog categories; records match the first category
    /// listing their commit type
    pub categories: Vec<CategoryConfig>,

    /// Template used to format every version point
    pub version_template: String,

    /// Version bump policy
    pub version_resolver: VersionResolverConfig,

    /// Identifier for prerelease increments (e.g. `rc`)
    pub prerelease_identifier: String,

    /// Author handles excluded from the contributors sentence
    pub exclude_contributors: Vec<String>,

    /// Contributors sentence used when nobody qualifies
    pub no_contributors_template: String,

    /// Ordered search/replace rules applied to the rendered body
    pub replacers: Vec<Replacer>,

    /// Whether the drafted release is marked as a prerelease
    pub prerelease: bool,

    /// Whether the published release should become "latest"
    pub latest: bool,

    /// Target commitish for the release record
    pub commitish: Option<String>,
}

impl Default for DrafterConfig {
    fn default() -> Self {
        Self {
            name_template: None,
            tag_template: None,
            tag_prefix: defaults::DEFAULT_TAG_PREFIX.to_string(),
            template: defaults::DEFAULT_BODY_TEMPLATE.to_string(),
            header: String::new(),
            footer: String::new(),
            change_template: defaults::DEFAULT_CHANGE_TEMPLATE.to_string(),
            change_title_escapes: String::new(),
            no_changes_template: defaults::DEFAULT_NO_CHANGES_TEMPLATE.to_string(),
            category_template: defaults::DEFAULT_CATEGORY_TEMPLATE.to_string(),
            categories: Vec::new(),
            version_template: defaults::DEFAULT_VERSION_TEMPLATE.to_string(),
            version_resolver: VersionResolverConfig::default(),
            prerelease_identifier: defaults::DEFAULT_PRERELEASE_IDENTIFIER.to_string(),
            exclude_contributors: Vec::new(),
            no_contributors_template: defaults::DEFAULT_NO_CONTRIBUTORS_TEMPLATE.to_string(),
            replacers: Vec::new(),
            prerelease: false,
            latest: true,
            commitish: None,
        }
    }
}

/// A changelog category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CategoryConfig {
    /// Section title
    pub title: String,

    /// Commit types collected by this category; the literal token
    /// `breaking` matches any record with the breaking flag
    pub commit_types: Vec<String>,

    /// Wrap the section in a collapsible block when it holds more than
    /// this many items (0 disables collapsing)
    pub collapse_after: usize,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            commit_types: Vec::new(),
            collapse_after: 0,
        }
    }
}

impl CategoryConfig {
    /// Create a category collecting the given commit types
    pub fn new(title: impl Into<String>, commit_types: &[&str]) -> Self {
        Self {
            title: title.into(),
            commit_types: commit_types.iter().map(|t| t.to_string()).collect(),
            collapse_after: 0,
        }
    }

    /// Set the collapse threshold
    pub fn with_collapse_after(mut self, threshold: usize) -> Self {
        self.collapse_after = threshold;
        self
    }
}

/// Version bump policy flags
///
/// Both guards default to on: a breaking change never produces an
/// automatic major bump unless the caller opts out of both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VersionResolverConfig {
    /// Bump applied when no breaking change or feature is present
    pub default: BumpLevel,

    /// Breaking changes on a 0.x version bump minor instead of major
    pub pre_one_zero_minor_for_breaking: bool,

    /// Breaking changes bump minor instead of major
    pub no_auto_major: bool,
}

impl Default for VersionResolverConfig {
    fn default() -> Self {
        Self {
            default: BumpLevel::Patch,
            pre_one_zero_minor_for_breaking: true,
            no_auto_major: true,
        }
    }
}
