//! Changelog types

use serde::{Deserialize, Serialize};

use gantry_core::types::BumpLevel;
use gantry_remote::PullRequestInfo;

/// Closed vocabulary of conventional commit types
///
/// Lines with any other type token are discarded during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Refactoring
    Refactor,
    /// Performance improvement
    Perf,
    /// Tests
    Test,
    /// Build system
    Build,
    /// CI configuration
    Ci,
    /// Chores (maintenance)
    Chore,
    /// Reverting changes
    Revert,
    /// Breaking change alias
    Breaking,
}

impl ChangeType {
    /// The type token as it appears in commit messages and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
            Self::Breaking => "breaking",
        }
    }

    /// Get the default section title for this type
    pub fn default_section(&self) -> &'static str {
        match self {
            Self::Feat => "Features",
            Self::Fix => "Bug Fixes",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Refactor => "Code Refactoring",
            Self::Perf => "Performance Improvements",
            Self::Test => "Tests",
            Self::Build => "Build System",
            Self::Ci => "Continuous Integration",
            Self::Chore => "Chores",
            Self::Revert => "Reverts",
            Self::Breaking => "Breaking Changes",
        }
    }

    /// Version bump weight of this type alone
    pub fn bump_weight(&self) -> BumpLevel {
        match self {
            Self::Breaking => BumpLevel::Major,
            Self::Feat => BumpLevel::Minor,
            _ => BumpLevel::Patch,
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            "breaking" => Ok(Self::Breaking),
            _ => Err(()),
        }
    }
}

/// One semantic unit extracted from a commit message line
///
/// Created once during changelog generation and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Commit type
    pub change_type: ChangeType,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Change description, trimmed, inline PR reference stripped
    pub description: String,
    /// Whether this is a breaking change
    pub breaking: bool,
    /// Full hash of the owning commit
    pub commit_sha: String,
    /// Pull request number, merged PR preferred over inline reference
    pub pr_number: Option<u64>,
    /// Normalized author handle
    pub author: Option<String>,
    /// The merged pull request this record came through, if any
    pub pull_request: Option<PullRequestInfo>,
}

impl ChangeRecord {
    /// First 7 characters of the commit hash
    pub fn short_sha(&self) -> &str {
        let end = self
            .commit_sha
            .char_indices()
            .nth(7)
            .map_or(self.commit_sha.len(), |(i, _)| i);
        &self.commit_sha[..end]
    }

    /// Version bump this record demands
    pub fn bump(&self) -> BumpLevel {
        if self.breaking {
            BumpLevel::Major
        } else {
            self.change_type.bump_weight()
        }
    }

    /// Default section title for this record's type
    pub fn section_title(&self) -> &'static str {
        self.change_type.default_section()
    }
}
