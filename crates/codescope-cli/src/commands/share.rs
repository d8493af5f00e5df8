//! Share command.
//!
//! A failed share is only logged, so the command still exits cleanly.

use anyhow::{Context, Result};
use clap::Args;
use codescope_client::HttpAnalysisService;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::Session;

#[derive(Args)]
pub struct ShareArgs {
    /// Source file to share
    pub file: PathBuf,

    /// Language identifier (inferred from the extension when omitted)
    #[arg(short, long)]
    pub language: Option<String>,
}

pub async fn execute(args: ShareArgs, service: Arc<HttpAnalysisService>) -> Result<()> {
    let session = Session::open(service, &args.file, args.language.as_deref())
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if let Some(url) = session.controller.share().await {
        println!("  {}", url.cyan());
    }

    Ok(())
}
