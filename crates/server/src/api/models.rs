//! Wire models for API operations

use ingestq_core::error::{Error, Result};
use ingestq_core::types::{Batch, Ingestion, IngestionStatus, Priority, WorkItemId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Submission payload
#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct IngestRequest {
    /// Ordered work-item identifiers; must be non-empty
    pub ids: Vec<WorkItemId>,
    /// Priority class: "HIGH", "MEDIUM", or "LOW"
    pub priority: String,
}

impl IngestRequest {
    /// Parse the priority class, rejecting unrecognized values at the
    /// boundary before any scheduler state is touched
    pub fn parse_priority(&self) -> Result<Priority> {
        Priority::from_str(&self.priority).map_err(|_| {
            Error::invalid_submission(format!(
                "unrecognized priority class '{}'",
                self.priority
            ))
        })
    }
}

/// Acknowledgment for an accepted submission
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct IngestResponse {
    pub ingestion_id: Uuid,
}

/// Status lookup response; batches appear in original split order
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StatusResponse {
    pub ingestion_id: Uuid,
    pub status: IngestionStatus,
    pub batches: Vec<Batch>,
}

impl From<Ingestion> for StatusResponse {
    fn from(ingestion: Ingestion) -> Self {
        Self {
            ingestion_id: ingestion.ingestion_id,
            status: ingestion.status,
            batches: ingestion.batches,
        }
    }
}
