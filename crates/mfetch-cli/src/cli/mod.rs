//! CLI for mfetch.

mod args;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mfetch_core::config;
use std::path::PathBuf;

pub use args::ManifestArgs;
use commands::{run_checksum, run_completions, run_fetch, run_status};

/// Top-level CLI for mfetch.
#[derive(Debug, Parser)]
#[command(name = "mfetch", version)]
#[command(about = "mfetch: keep a manifest of model files present in a local directory", long_about = None)]
pub struct Cli {
    /// Defaults to `fetch` with the configured manifest.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every artifact that is not already in the target directory.
    Fetch {
        #[command(flatten)]
        source: ManifestArgs,
    },

    /// Show which artifacts are present, without touching the network.
    Status {
        #[command(flatten)]
        source: ManifestArgs,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute SHA-256 of a file (e.g. to pin it in a manifest).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Fetch {
            source: ManifestArgs::default(),
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command.unwrap_or_default() {
            CliCommand::Fetch { source } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, &source)?;
            }
            CliCommand::Status { source, json } => {
                let cfg = config::load_or_init()?;
                run_status(&cfg, &source, json)?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
