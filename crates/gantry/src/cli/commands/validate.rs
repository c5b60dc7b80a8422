//! Validate command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use gantry_core::config::{load_config, load_config_from_dir};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Validate configuration
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Configuration file (searched for when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(config = ?self.config, "executing validate command");

        let (result, path) = match &self.config {
            Some(path) => (load_config(path), path.clone()),
            None => {
                let cwd = std::env::current_dir()?;
                match load_config_from_dir(&cwd) {
                    Ok((config, path)) => (Ok(config), path),
                    Err(err) => {
                        output::error(&err.to_string());
                        std::process::exit(crate::exit_codes::CONFIG_ERROR);
                    }
                }
            }
        };

        match result {
            Ok(_) => {
                match cli.format {
                    OutputFormat::Json => {
                        let report = serde_json::json!({
                            "valid": true,
                            "path": path,
                        });
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    OutputFormat::Text => {
                        if !cli.quiet {
                            output::success(&format!("{} is valid", path.display()));
                        }
                    }
                }
                Ok(())
            }
            Err(err) => {
                output::error(&err.to_string());
                std::process::exit(crate::exit_codes::VALIDATION_ERROR);
            }
        }
    }
}
