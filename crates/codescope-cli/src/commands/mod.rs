//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use codescope_client::{ClientConfig, HttpAnalysisService};
use std::path::PathBuf;
use std::sync::Arc;

pub mod analyze;
pub mod format;
pub mod health;
pub mod share;

/// CodeScope - memory leak, style and AI review for source files
#[derive(Parser)]
#[command(name = "codescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis server URL (overrides CODESCOPE_SERVER_URL and the config file)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Path to a config file (defaults to <config dir>/codescope/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file for memory leaks, code issues and AI findings
    Analyze(analyze::AnalyzeArgs),

    /// Format a file in place
    Format(format::FormatArgs),

    /// Share a file and copy the link to the clipboard
    Share(share::ShareArgs),

    /// Check that the analysis server is up
    Health,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = ClientConfig::load(self.config.as_deref(), self.server.as_deref())?;
        let service = Arc::new(HttpAnalysisService::from_config(&config)?);

        match self.command {
            Commands::Analyze(args) => analyze::execute(args, service).await,
            Commands::Format(args) => format::execute(args, service).await,
            Commands::Share(args) => share::execute(args, service).await,
            Commands::Health => health::execute(service).await,
        }
    }
}
