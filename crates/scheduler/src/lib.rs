//! Priority batch scheduling engine
//!
//! This crate implements the core of the ingestion service: splitting
//! submissions into fixed-size batches, ordering them in a priority job
//! queue, and draining that queue with a single batch-processor loop that
//! is the sole writer of batch and ingestion status.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod processor;
pub mod queue;
pub mod runner;
pub mod splitter;
pub mod status;

// Re-export for ease of use
pub use processor::Scheduler;
pub use runner::{BatchRunner, DelayRunner};
pub use status::StatusStore;
