use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use estuary::app::AppContext;
use estuary::cli::{commands, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Cli::parse().run_options();

    // RUST_LOG wins; otherwise --verbose turns on per-request debug lines
    let default_level = if options.verbose { "estuary=debug,info" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let feeds_path = options.feeds_path.clone();

    let mut ctx = AppContext::new(options).context("Failed to initialise fetcher")?;
    commands::generate(&mut ctx)
        .await
        .with_context(|| format!("Failed to build pages from {}", feeds_path.display()))?;

    Ok(())
}
