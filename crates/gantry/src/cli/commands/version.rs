//! Version command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use gantry_changelog::ChangeCollection;
use gantry_core::config::{load_config, load_config_or_default};
use gantry_remote::{CommitSource, ReleaseSource, RepoSnapshot};
use gantry_version::{resolve, ResolveRequest, VersionBumpPolicy};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Resolve the next version from a repository snapshot
#[derive(Debug, Args)]
#[command(disable_version_flag = true)]
pub struct VersionCommand {
    /// Repository snapshot JSON file (commits and release context)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Configuration file (searched for when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Explicit version override
    #[arg(long = "set-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Request a prerelease-family increment
    #[arg(long)]
    pub prerelease: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(snapshot = %self.snapshot.display(), "executing version command");

        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => load_config_or_default(&std::env::current_dir()?).0,
        };

        let snapshot = RepoSnapshot::from_file(&self.snapshot)?;
        let commits = snapshot.commits()?;
        let prior = snapshot.prior_release()?;
        let draft = snapshot.draft_release()?;

        let prior_tag = prior.as_ref().map(|release| release.tag_name.as_str());
        let policy = VersionBumpPolicy::from_config(&config.version_resolver, prior_tag);
        let collection = ChangeCollection::from_commits(&commits);
        let bump = collection.resolve_version_bump(&policy);

        let draft_tag = if self.version.is_none() {
            draft.as_ref().map(|release| release.tag_name.as_str())
        } else {
            None
        };

        let versions = resolve(&ResolveRequest {
            prior_tag,
            override_version: self.version.as_deref(),
            draft_tag,
            bump,
            prerelease_increment: self.prerelease,
            version_template: &config.version_template,
            prerelease_identifier: &config.prerelease_identifier,
            tag_prefix: &config.tag_prefix,
        });

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "bump": bump.to_string(),
                    "resolved": versions.resolved.complete,
                    "next_major": versions.next_major.complete,
                    "next_minor": versions.next_minor.complete,
                    "next_patch": versions.next_patch.complete,
                    "next_prerelease": versions.next_prerelease.complete,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", versions.resolved.complete);
                } else {
                    println!(
                        "{}",
                        output::key_value("prior", prior_tag.unwrap_or("(none)"))
                    );
                    println!("{}", output::key_value("bump", &bump.to_string()));
                    println!(
                        "{}",
                        output::key_value(
                            "resolved",
                            &output::version_style()
                                .apply_to(&versions.resolved.complete)
                                .to_string()
                        )
                    );
                }
            }
        }

        Ok(())
    }
}
