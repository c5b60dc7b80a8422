//! Release info assembly

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use gantry_changelog::{contributors_sentence, render_changes, ChangeCollection};
use gantry_core::config::DrafterConfig;
use gantry_core::error::{ChangelogError, Result};
use gantry_core::template::{apply_replacers, render, Variables};
use gantry_remote::{CommitInfo, ReleaseSnapshot, ReleaseUpsert, RepositoryInfo};
use gantry_version::{resolve, ResolveRequest, VersionBumpPolicy};

/// Explicit caller-supplied overrides
#[derive(Debug, Clone, Default)]
pub struct ReleaseOverrides {
    /// Explicit version, wins over the draft and floors the computation
    pub version: Option<String>,
    /// Literal tag, expanded through the version variables
    pub tag: Option<String>,
    /// Literal name, expanded through the version variables
    pub name: Option<String>,
    /// Request a prerelease-family increment
    pub prerelease_increment: bool,
}

/// The assembled draft release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Release display name
    pub name: String,
    /// Release tag
    pub tag: String,
    /// Rendered release body
    pub body: String,
    /// Resolved version string
    pub resolved_version: String,
    /// Resolved major component
    pub major_version: u64,
    /// Resolved minor component
    pub minor_version: u64,
    /// Resolved patch component
    pub patch_version: u64,
    /// Whether the release is a prerelease
    pub prerelease: bool,
}

impl ReleaseInfo {
    /// Build the create-or-update payload for the release sink
    pub fn to_upsert(&self, config: &DrafterConfig) -> ReleaseUpsert {
        ReleaseUpsert {
            name: self.name.clone(),
            tag: self.tag.clone(),
            body: self.body.clone(),
            target_ref: config.commitish.clone(),
            prerelease: self.prerelease,
            make_latest: config.latest,
            draft: true,
        }
    }
}

/// Assembles the draft release from commits, configuration and the
/// prior/draft release context
pub struct ReleaseDrafter<'a> {
    config: &'a DrafterConfig,
}

impl<'a> ReleaseDrafter<'a> {
    /// Create a drafter over a validated configuration
    pub fn new(config: &'a DrafterConfig) -> Self {
        Self { config }
    }

    /// Assemble the release info
    ///
    /// The draft release's tag feeds version resolution only when no
    /// explicit version override was supplied. Identical inputs yield
    /// byte-identical output.
    #[instrument(skip(self, commits, prior, draft, overrides, repo), fields(commit_count = commits.len()))]
    pub fn assemble(
        &self,
        commits: &[CommitInfo],
        prior: Option<&ReleaseSnapshot>,
        draft: Option<&ReleaseSnapshot>,
        overrides: &ReleaseOverrides,
        repo: Option<&RepositoryInfo>,
    ) -> Result<ReleaseInfo> {
        let config = self.config;
        if config.template.is_empty() {
            return Err(ChangelogError::MissingTemplate("template".to_string()).into());
        }

        let collection = ChangeCollection::from_commits(commits);
        let changes = render_changes(&collection, config, repo);
        let contributors = contributors_sentence(commits, config);

        let prior_tag = prior.map(|release| release.tag_name.as_str());
        let policy = VersionBumpPolicy::from_config(&config.version_resolver, prior_tag);
        let bump = collection.resolve_version_bump(&policy);

        let draft_tag = if overrides.version.is_none() {
            draft.map(|release| release.tag_name.as_str())
        } else {
            None
        };

        let versions = resolve(&ResolveRequest {
            prior_tag,
            override_version: overrides.version.as_deref(),
            draft_tag,
            bump,
            prerelease_increment: overrides.prerelease_increment,
            version_template: &config.version_template,
            prerelease_identifier: &config.prerelease_identifier,
            tag_prefix: &config.tag_prefix,
        });
        let version_variables = versions.template_variables();

        let mut structural = Variables::new();
        structural
            .set("CHANGES", changes)
            .set("CONTRIBUTORS", contributors)
            .set_opt("PREVIOUS_TAG", prior_tag.map(|tag| tag.to_string()))
            .set_opt("OWNER", repo.map(|r| r.owner.clone()))
            .set_opt("REPOSITORY", repo.map(|r| r.repo.clone()));

        let full_template = format!("{}{}{}", config.header, config.template, config.footer);
        let body = render(&full_template, &structural);
        let body = render(&body, &version_variables);
        let body = apply_replacers(&body, &config.replacers);

        let default_tag_template = format!("{}$RESOLVED_VERSION", config.tag_prefix);
        let tag_template = overrides
            .tag
            .as_deref()
            .or(config.tag_template.as_deref())
            .unwrap_or(&default_tag_template);
        let tag = render(tag_template, &version_variables);

        let name_template = overrides
            .name
            .as_deref()
            .or(config.name_template.as_deref())
            .unwrap_or(&default_tag_template);
        let name = render(name_template, &version_variables);

        let resolved = &versions.resolved;
        let release = ReleaseInfo {
            name,
            tag,
            body,
            resolved_version: resolved.complete.clone(),
            major_version: resolved.major,
            minor_version: resolved.minor,
            patch_version: resolved.patch,
            prerelease: config.prerelease || resolved.prerelease.is_some(),
        };

        debug!(bump = %bump, version = %release.resolved_version, "release assembled");
        info!(tag = %release.tag, "draft release ready");
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gantry_core::config::CategoryConfig;

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::new("abc1234567890", message, "Test Author").with_author_handle("octocat")
    }

    fn release(tag: &str) -> ReleaseSnapshot {
        ReleaseSnapshot::new(tag, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    }

    fn assemble(
        config: &DrafterConfig,
        commits: &[CommitInfo],
        prior: Option<&ReleaseSnapshot>,
        draft: Option<&ReleaseSnapshot>,
        overrides: &ReleaseOverrides,
    ) -> ReleaseInfo {
        ReleaseDrafter::new(config)
            .assemble(commits, prior, draft, overrides, None)
            .unwrap()
    }

    #[test]
    fn test_assemble_basic() {
        let config = DrafterConfig::default();
        let commits = vec![make_commit("feat: add parser")];
        let info = assemble(
            &config,
            &commits,
            Some(&release("v1.0.0")),
            None,
            &ReleaseOverrides::default(),
        );

        assert_eq!(info.resolved_version, "1.1.0");
        assert_eq!(info.tag, "v1.1.0");
        assert_eq!(info.name, "v1.1.0");
        assert_eq!(info.major_version, 1);
        assert_eq!(info.minor_version, 1);
        assert_eq!(info.patch_version, 0);
        assert!(info.body.contains("* Add parser"));
        assert!(!info.prerelease);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let config = DrafterConfig {
            categories: vec![
                CategoryConfig::new("Features", &["feat"]),
                CategoryConfig::new("Bug Fixes", &["fix"]),
            ],
            header: "# Release\n\n".to_string(),
            footer: "\n---\n".to_string(),
            ..Default::default()
        };
        let commits = vec![
            make_commit("feat: add parser"),
            make_commit("fix: handle empty input"),
        ];
        let prior = release("v1.2.3");
        let draft = release("v1.3.0");

        let first = assemble(
            &config,
            &commits,
            Some(&prior),
            Some(&draft),
            &ReleaseOverrides::default(),
        );
        let second = assemble(
            &config,
            &commits,
            Some(&prior),
            Some(&draft),
            &ReleaseOverrides::default(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_structural_variables_in_body() {
        let config = DrafterConfig {
            template: "$CHANGES\n\nSince $PREVIOUS_TAG in $OWNER/$REPOSITORY by $CONTRIBUTORS"
                .to_string(),
            ..Default::default()
        };
        let repo = RepositoryInfo::new("acme", "widget");
        let info = ReleaseDrafter::new(&config)
            .assemble(
                &[make_commit("feat: add parser")],
                Some(&release("v1.0.0")),
                None,
                &ReleaseOverrides::default(),
                Some(&repo),
            )
            .unwrap();

        assert!(info.body.contains("Since v1.0.0 in acme/widget by @octocat"));
    }

    #[test]
    fn test_version_variables_in_body_and_name() {
        let config = DrafterConfig {
            template: "$CHANGES".to_string(),
            name_template: Some("Release $RESOLVED_VERSION".to_string()),
            tag_template: Some("widget-v$RESOLVED_VERSION".to_string()),
            ..Default::default()
        };
        let info = assemble(
            &config,
            &[make_commit("fix: handle empty input")],
            Some(&release("v2.0.0")),
            None,
            &ReleaseOverrides::default(),
        );

        assert_eq!(info.name, "Release 2.0.1");
        assert_eq!(info.tag, "widget-v2.0.1");
    }

    #[test]
    fn test_overrides_expand_version_variables() {
        let config = DrafterConfig::default();
        let overrides = ReleaseOverrides {
            tag: Some("hotfix-$RESOLVED_VERSION".to_string()),
            name: Some("Hotfix $RESOLVED_VERSION".to_string()),
            ..Default::default()
        };
        let info = assemble(
            &config,
            &[make_commit("fix: z")],
            Some(&release("v1.0.0")),
            None,
            &overrides,
        );

        assert_eq!(info.tag, "hotfix-1.0.1");
        assert_eq!(info.name, "Hotfix 1.0.1");
    }

    #[test]
    fn test_empty_commits_use_no_changes_template_and_defaults() {
        let config = DrafterConfig::default();
        let info = assemble(&config, &[], None, None, &ReleaseOverrides::default());

        assert!(info.body.contains(&config.no_changes_template));
        assert_eq!(info.resolved_version, "0.1.0");
        assert_eq!(info.tag, "v0.1.0");
    }

    #[test]
    fn test_pre_one_zero_breaking_stays_minor() {
        let config = DrafterConfig::default();
        let info = assemble(
            &config,
            &[make_commit("feat!: rewrite everything")],
            Some(&release("v0.3.2")),
            None,
            &ReleaseOverrides::default(),
        );

        assert_eq!(info.resolved_version, "0.4.0");
    }

    #[test]
    fn test_draft_floor_wins_over_computed() {
        let config = DrafterConfig::default();
        let info = assemble(
            &config,
            &[make_commit("feat: add parser")],
            Some(&release("v1.0.0")),
            Some(&release("v2.0.0")),
            &ReleaseOverrides::default(),
        );

        assert_eq!(info.resolved_version, "2.0.0");
    }

    #[test]
    fn test_draft_prerelease_preserved_and_flagged() {
        let config = DrafterConfig::default();
        let info = assemble(
            &config,
            &[make_commit("feat: add parser")],
            Some(&release("v1.0.0")),
            Some(&release("v2.0.0-rc.1")),
            &ReleaseOverrides::default(),
        );

        assert_eq!(info.resolved_version, "2.0.0-rc.1");
        assert_eq!(info.tag, "v2.0.0-rc.1");
        assert!(info.prerelease);
    }

    #[test]
    fn test_version_override_ignores_draft() {
        let config = DrafterConfig::default();
        let overrides = ReleaseOverrides {
            version: Some("3.0.0".to_string()),
            ..Default::default()
        };
        let info = assemble(
            &config,
            &[make_commit("fix: z")],
            Some(&release("v1.0.0")),
            Some(&release("v9.0.0")),
            &overrides,
        );

        assert_eq!(info.resolved_version, "3.0.0");
    }

    #[test]
    fn test_missing_body_template_is_fatal() {
        let config = DrafterConfig {
            template: String::new(),
            ..Default::default()
        };
        let result = ReleaseDrafter::new(&config).assemble(
            &[],
            None,
            None,
            &ReleaseOverrides::default(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_replacers_run_after_variables() {
        let config = DrafterConfig {
            template: "$CHANGES".to_string(),
            replacers: vec![gantry_core::template::Replacer {
                search: "/parser/g".to_string(),
                replace: "tokenizer".to_string(),
            }],
            ..Default::default()
        };
        let info = assemble(
            &config,
            &[make_commit("feat: improve parser")],
            None,
            None,
            &ReleaseOverrides::default(),
        );

        assert!(info.body.contains("Improve tokenizer"));
        assert!(!info.body.contains("parser"));
    }

    #[test]
    fn test_to_upsert() {
        let config = DrafterConfig {
            commitish: Some("main".to_string()),
            ..Default::default()
        };
        let info = assemble(
            &config,
            &[make_commit("feat: add parser")],
            None,
            None,
            &ReleaseOverrides::default(),
        );
        let upsert = info.to_upsert(&config);

        assert_eq!(upsert.tag, info.tag);
        assert_eq!(upsert.target_ref, Some("main".to_string()));
        assert!(upsert.draft);
        assert!(upsert.make_latest);
    }
}
