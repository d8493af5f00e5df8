//! Analyze command.

use anyhow::{Context, Result};
use clap::Args;
use codescope_client::HttpAnalysisService;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::{spinner, Session};
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Source file to analyze
    pub file: PathBuf,

    /// Language identifier (inferred from the extension when omitted)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Write the results panel to this HTML file instead of stdout
    #[arg(long)]
    pub html: Option<PathBuf>,
}

pub async fn execute(args: AnalyzeArgs, service: Arc<HttpAnalysisService>) -> Result<()> {
    let session = Session::open(service, &args.file, args.language.as_deref())
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let progress = spinner(&format!("Analyzing {} ({})", args.file.display(), session.language));
    let result = session.controller.analyze().await;
    progress.finish_and_clear();

    let panel = session.panel.current().map(|html| html.into_string()).unwrap_or_default();

    match &args.html {
        Some(path) => {
            std::fs::write(path, &panel)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Results written to {}",
                "✓".green().bold(),
                path.display().to_string().cyan()
            );
            if let Ok(response) = &result {
                println!();
                output::print_analysis(response);
            }
        }
        None => println!("{}", panel),
    }

    result.map(|_| ()).context("Analysis did not complete")
}
