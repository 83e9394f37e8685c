//! Core types for the ingestq priority batch ingestion service
//!
//! This crate provides the foundational pieces shared by the scheduler and
//! the REST server:
//!
//! - **Types**: work items, batches, ingestions, and their status enums
//! - **Rollup**: derivation of an ingestion's aggregate status from its batches
//! - **Configuration**: system configuration management
//! - **Error handling**: unified error types

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use config::{Config, SchedulerConfig, ServerConfig};
pub use error::{Error, Result, ResultExt};
pub use types::{Batch, BatchStatus, Ingestion, IngestionStatus, Priority, WorkItemId};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
