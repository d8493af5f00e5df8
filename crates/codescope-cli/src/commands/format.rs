//! Format command.

use anyhow::{Context, Result};
use clap::Args;
use codescope_client::HttpAnalysisService;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::Session;

#[derive(Args)]
pub struct FormatArgs {
    /// Source file to format in place
    pub file: PathBuf,

    /// Language identifier (inferred from the extension when omitted)
    #[arg(short, long)]
    pub language: Option<String>,
}

pub async fn execute(args: FormatArgs, service: Arc<HttpAnalysisService>) -> Result<()> {
    let session = Session::open(service, &args.file, args.language.as_deref())
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    match session.controller.format().await {
        Ok(true) => {
            println!(
                "{} Formatted {}",
                "✓".green().bold(),
                session.editor.path().display().to_string().cyan()
            );
            Ok(())
        }
        Ok(false) => {
            println!(
                "{} Server returned no formatted code; {} is unchanged",
                "ℹ".blue().bold(),
                session.editor.path().display()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(panel) = session.panel.current() {
                eprintln!("{}", panel);
            }
            Err(e).context("Format did not complete")
        }
    }
}
