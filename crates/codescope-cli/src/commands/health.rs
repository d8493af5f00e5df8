//! Server health command.

use anyhow::{bail, Result};
use codescope_client::HttpAnalysisService;
use colored::Colorize;
use std::sync::Arc;

pub async fn execute(service: Arc<HttpAnalysisService>) -> Result<()> {
    print!("  {} ... ", service.base_url());

    if service.health_check().await? {
        println!("{}", "healthy".green());
        Ok(())
    } else {
        println!("{}", "unreachable".red());
        bail!("Analysis server at {} is not healthy", service.base_url())
    }
}
