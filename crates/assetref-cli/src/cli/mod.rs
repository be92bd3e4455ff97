//! CLI for resolving and probing media asset references.

mod commands;

use anyhow::Result;
use assetref_core::config::{self, AssetrefConfig};
use assetref_core::DefaultImageRole;
use clap::{Parser, Subcommand};

use commands::{
    run_completions, run_config, run_defaults, run_man, run_optimize, run_probe, run_resolve,
    run_select,
};

/// Top-level CLI for assetref.
#[derive(Debug, Parser)]
#[command(name = "assetref")]
#[command(about = "Resolve media asset references into fetchable URLs", long_about = None)]
pub struct Cli {
    /// Backend origin for upload paths (overrides config and ASSETREF_API_BASE_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub base_origin: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a reference into a URL.
    Resolve {
        /// Asset reference (URL, path or filename). Omit or pass "" for the default.
        reference: Option<String>,
        /// Reference to use when the input is empty.
        #[arg(long, conflicts_with = "role")]
        fallback: Option<String>,
        /// Use the configured default image for this role as the fallback.
        #[arg(long)]
        role: Option<DefaultImageRole>,
        /// Also print which path-shape rule matched.
        #[arg(long)]
        explain: bool,
    },

    /// Resolve a reference for a sized rendition (sizing not yet applied).
    Optimize {
        reference: Option<String>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long, default_value_t = assetref_core::url_model::DEFAULT_QUALITY)]
        quality: u8,
    },

    /// Resolve a reference and check that it is reachable.
    Probe {
        reference: String,
    },

    /// Pick the first reachable reference, in order, or the fallback.
    Select {
        /// Candidate references in preference order.
        candidates: Vec<String>,
        #[arg(long, conflicts_with = "role")]
        fallback: Option<String>,
        #[arg(long)]
        role: Option<DefaultImageRole>,
        /// Print every probe attempt.
        #[arg(long)]
        report: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the default images and what they resolve to.
    Defaults,

    /// Print the effective configuration as TOML.
    Config,

    /// Generate shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print a man page (roff) to stdout.
    Man,
}

/// Config from disk/environment, with the `--base-origin` flag on top.
fn effective_config(base_origin: Option<String>) -> Result<AssetrefConfig> {
    config::load_or_init_with(base_origin)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = effective_config(cli.base_origin)?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                reference,
                fallback,
                role,
                explain,
            } => run_resolve(&cfg, reference.as_deref(), fallback.as_deref(), role, explain)?,
            CliCommand::Optimize {
                reference,
                width,
                height,
                quality,
            } => run_optimize(&cfg, reference.as_deref(), width, height, quality)?,
            CliCommand::Probe { reference } => run_probe(&cfg, &reference).await?,
            CliCommand::Select {
                candidates,
                fallback,
                role,
                report,
                json,
            } => run_select(&cfg, &candidates, fallback.as_deref(), role, report, json).await?,
            CliCommand::Defaults => run_defaults(&cfg)?,
            CliCommand::Config => run_config(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
