//! Request and response models for the ingestion API

pub mod models;

pub use models::{IngestRequest, IngestResponse, StatusResponse};
