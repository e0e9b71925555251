//! CLI for the Chorrillos Seguro map-link resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use chorrillos_core::config;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_resolve, run_reverse, run_search, run_serve};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chorrillos")]
#[command(about = "Chorrillos Seguro: resolve map links to coordinates", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/chorrillos/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Follow a map link and print its coordinates.
    Resolve {
        /// Map-sharing URL (short links are expanded).
        url: String,
        /// Print the JSON object served by the HTTP API.
        #[arg(long)]
        json: bool,
    },

    /// Check whether a link looks like a map link. No network access.
    Check {
        url: String,
    },

    /// Look up the address at a coordinate pair.
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        lng: String,
    },

    /// Look up coordinates for a free-text address.
    Search {
        address: String,
    },

    /// Run the HTTP API.
    Serve {
        /// Listen address; overrides `bind` from the config file.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Print a shell completion script.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { url, json } => run_resolve(&cfg, &url, json)?,
            CliCommand::Check { url } => run_check(&url)?,
            CliCommand::Reverse { lat, lng } => run_reverse(&cfg, &lat, &lng)?,
            CliCommand::Search { address } => run_search(&cfg, &address)?,
            CliCommand::Serve { bind } => run_serve(cfg, bind).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
