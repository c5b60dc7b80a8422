//! Draft command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use gantry_core::config::{load_config, load_config_or_default};
use gantry_drafter::{ReleaseDrafter, ReleaseOverrides};
use gantry_remote::{CommitSource, ReleaseSource, RepoSnapshot, RepositoryInfo};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Assemble the draft release payload from a repository snapshot
#[derive(Debug, Args)]
#[command(disable_version_flag = true)]
pub struct DraftCommand {
    /// Repository snapshot JSON file (commits and release context)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Configuration file (searched for when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Explicit version override
    #[arg(long = "set-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Literal tag override (expanded through version variables)
    #[arg(long)]
    pub tag: Option<String>,

    /// Literal name override (expanded through version variables)
    #[arg(long)]
    pub name: Option<String>,

    /// Request a prerelease-family increment
    #[arg(long)]
    pub prerelease: bool,

    /// Print only the rendered release body
    #[arg(long)]
    pub body_only: bool,
}

impl DraftCommand {
    /// Execute the draft command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(snapshot = %self.snapshot.display(), version = ?self.version, "executing draft command");

        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => load_config_or_default(&std::env::current_dir()?).0,
        };

        let snapshot = RepoSnapshot::from_file(&self.snapshot)?;
        let repo = snapshot
            .repository_url
            .as_deref()
            .and_then(|url| RepositoryInfo::from_url(url).ok());

        let commits = snapshot.commits()?;
        let prior = snapshot.prior_release()?;
        let draft = snapshot.draft_release()?;

        let overrides = ReleaseOverrides {
            version: self.version.clone(),
            tag: self.tag.clone(),
            name: self.name.clone(),
            prerelease_increment: self.prerelease,
        };

        let release = ReleaseDrafter::new(&config).assemble(
            &commits,
            prior.as_ref(),
            draft.as_ref(),
            &overrides,
            repo.as_ref(),
        )?;

        if self.body_only {
            println!("{}", release.body);
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                let payload = serde_json::json!({
                    "release": release,
                    "upsert": release.to_upsert(&config),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!(
                        "{}",
                        output::key_value(
                            "tag",
                            &output::tag_style().apply_to(&release.tag).to_string()
                        )
                    );
                    println!("{}", output::key_value("name", &release.name));
                    println!(
                        "{}",
                        output::key_value(
                            "version",
                            &output::version_style()
                                .apply_to(&release.resolved_version)
                                .to_string()
                        )
                    );
                    println!();
                }
                println!("{}", release.body);
            }
        }

        Ok(())
    }
}
