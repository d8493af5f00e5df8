//! CodeScope CLI
//!
//! Analyze, format and share source files through a remote analysis server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod host;
mod output;

use commands::Cli;

/// Initialize tracing with optional file logging.
///
/// Logs go to stderr so stdout stays clean for rendered HTML.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) {
    let default_filter = if verbose {
        "codescope=debug,codescope_core=debug,codescope_client=debug"
    } else {
        "codescope=info,codescope_core=info,codescope_client=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match log_file.and_then(|path| Some((path.parent()?, path.file_name()?))) {
        Some((dir, file_name)) => {
            let dir = if dir.as_os_str().is_empty() {
                std::path::Path::new(".")
            } else {
                dir
            };
            let _ = std::fs::create_dir_all(dir);
            let appender = tracing_appender::rolling::never(dir, file_name);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(appender)
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.verbose);
    cli.execute().await
}
