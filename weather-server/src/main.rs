//! Binary crate for the `weather-server` HTTP facade.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - HTTP routing and error-to-status translation

use clap::Parser;

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
