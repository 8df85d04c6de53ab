//! CLI for the skinfetch splash-art mirror.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skinfetch_core::config;
use skinfetch_core::ledger::Ledger;

use commands::{
    run_abandon, run_candidates, run_exhausted, run_fetch, run_retry, run_status, run_sync,
};

/// Top-level CLI for skinfetch.
#[derive(Debug, Parser)]
#[command(name = "skinfetch")]
#[command(about = "skinfetch: mirror champion splash art into a local wallpaper folder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Refresh the catalog, then download every pending or exhausted skin.
    Sync {
        /// Run up to N downloads at once (default: max_concurrent from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Download pending or exhausted skins already in the ledger (no catalog refresh).
    Fetch {
        /// Run up to N downloads at once (default: max_concurrent from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Show how many skins are in each state.
    Status,

    /// List skins for which no candidate name was found.
    Exhausted,

    /// Stop retrying a skin.
    Abandon {
        /// Skin identifier.
        id: i64,
    },

    /// Retry one skin now, printing the names it tries.
    Retry {
        /// Skin identifier.
        id: i64,
    },

    /// Print the candidate names and URLs for a skin without fetching.
    Candidates {
        /// Skin identifier.
        id: i64,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let ledger = Ledger::open_default().await?;

        match cli.command {
            CliCommand::Sync { jobs } => run_sync(&ledger, &cfg, jobs).await?,
            CliCommand::Fetch { jobs } => run_fetch(&ledger, &cfg, jobs).await?,
            CliCommand::Status => run_status(&ledger).await?,
            CliCommand::Exhausted => run_exhausted(&ledger).await?,
            CliCommand::Abandon { id } => run_abandon(&ledger, id).await?,
            CliCommand::Retry { id } => run_retry(&ledger, &cfg, id).await?,
            CliCommand::Candidates { id } => run_candidates(&ledger, &cfg, id).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
