//! REST adapter for the ingestq scheduling engine
//!
//! This crate wraps the scheduler in a thin axum API: submissions come in
//! through `POST /api/v1/ingest`, status lookups through
//! `GET /api/v1/status/{ingestion_id}`. All scheduling semantics live in
//! `ingestq-scheduler`; this layer only validates the wire payload and
//! translates core errors into HTTP responses.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod api;
mod rest_server;

// Re-export error types from core
pub use ingestq_core::error::{Error, Result, ResultExt};
pub use rest_server::build_router;

use ingestq_core::config::Config;
use ingestq_scheduler::Scheduler;
use tracing::info;

/// Run the REST server with the given configuration.
///
/// Builds a scheduler with the default delay-based runner, binds the
/// configured address, and serves until Ctrl+C triggers a graceful shutdown.
pub async fn run_server(config: Config) -> Result<()> {
    let scheduler = Scheduler::new(&config.scheduler);
    let app = build_router(scheduler, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to {addr}"))?;

    info!("REST API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("ingestq server shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => tracing::error!("Error setting up signal handler: {e}"),
    }
}
