//! # songseek
//!
//! Command-line driver for the songseek resolver: search a catalog, resolve
//! a play URL, list the registered backends. Results go to stdout as JSON,
//! logs go to stderr.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songseek=info,songseek_providers=info".into()),
        )
        .init();

    info!("Starting songseek v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let output = cli.run().await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
