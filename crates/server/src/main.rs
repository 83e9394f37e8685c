//! ingestq REST server binary
//!
//! Accepts ingestion submissions over HTTP, schedules their batches by
//! priority, and serves status lookups.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use clap::Parser;
use ingestq_core::config::Config;
use ingestq_core::error::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ingestq-server")]
#[command(about = "Priority batch ingestion service")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply if it does not exist
    #[arg(long, default_value = "ingestq.toml")]
    config: PathBuf,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_file(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        batch_size = config.scheduler.batch_size,
        "Starting ingestq server"
    );

    ingestq_server::run_server(config).await
}
