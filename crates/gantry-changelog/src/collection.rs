//! Change collection
//!
//! An ordered, immutable aggregate of change records. Insertion order is
//! commit iteration order (oldest first per the commit source contract)
//! and is preserved for deterministic rendering; filtering operations
//! return new collections.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use gantry_core::types::BumpLevel;
use gantry_remote::CommitInfo;
use gantry_version::{resolve_bump, VersionBumpPolicy};

use crate::parser::parse_message;
use crate::types::{ChangeRecord, ChangeType};

/// An ordered, immutable collection of change records
#[derive(Debug, Clone, Default)]
pub struct ChangeCollection {
    records: Vec<ChangeRecord>,
}

/// A titled group of records sharing a commit type
#[derive(Debug, Clone)]
pub struct CategorizedSection {
    /// Section title from the fixed type table
    pub title: &'static str,
    /// Records of this type, collection order preserved
    pub items: Vec<ChangeRecord>,
}

impl ChangeCollection {
    /// Build a collection from existing records
    pub fn from_records(records: Vec<ChangeRecord>) -> Self {
        Self { records }
    }

    /// Build a collection by parsing every commit message
    ///
    /// Each accepted message line yields one record. The PR number prefers
    /// the first merged associated pull request over an inline reference,
    /// and the author handle normalizes to a plain string whether the PR
    /// author was structured or not.
    #[instrument(skip(commits), fields(commit_count = commits.len()))]
    pub fn from_commits(commits: &[CommitInfo]) -> Self {
        let mut records = Vec::new();

        for commit in commits {
            let merged_pr = commit.merged_pull_request();

            for line in parse_message(&commit.message) {
                let author = merged_pr
                    .and_then(|pr| pr.author.as_ref())
                    .map(|author| author.handle().to_string())
                    .or_else(|| commit.author_handle.clone());

                records.push(ChangeRecord {
                    change_type: line.change_type,
                    scope: line.scope,
                    description: line.description,
                    breaking: line.breaking,
                    commit_sha: commit.sha.clone(),
                    pr_number: merged_pr.map(|pr| pr.number).or(line.pr_number),
                    author,
                    pull_request: merged_pr.cloned(),
                });
            }
        }

        debug!(record_count = records.len(), "change collection built");
        Self { records }
    }

    /// The records in collection order
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Iterate the records in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record is a breaking change
    pub fn has_breaking_changes(&self) -> bool {
        self.records.iter().any(|record| record.breaking)
    }

    /// Whether any record is a feature
    pub fn has_features(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.change_type == ChangeType::Feat)
    }

    /// Records of the given type, as a new collection
    pub fn by_type(&self, change_type: ChangeType) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| record.change_type == change_type)
                .cloned()
                .collect(),
        }
    }

    /// Breaking-change records, as a new collection
    pub fn breaking_changes(&self) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| record.breaking)
                .cloned()
                .collect(),
        }
    }

    /// Derive the version bump for this change set under the policy
    pub fn resolve_version_bump(&self, policy: &VersionBumpPolicy) -> BumpLevel {
        resolve_bump(self.has_breaking_changes(), self.has_features(), policy)
    }

    /// Group records by commit type with their fixed section titles
    pub fn categorize_by_type(&self) -> BTreeMap<ChangeType, CategorizedSection> {
        let mut sections: BTreeMap<ChangeType, CategorizedSection> = BTreeMap::new();

        for record in &self.records {
            sections
                .entry(record.change_type)
                .or_insert_with(|| CategorizedSection {
                    title: record.section_title(),
                    items: Vec::new(),
                })
                .items
                .push(record.clone());
        }

        sections
    }
}

impl<'a> IntoIterator for &'a ChangeCollection {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
