//! Data model for ingestions, batches, and their statuses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Opaque work-item identifier as supplied by the client.
///
/// Wire payloads may carry either strings or integers; the core never
/// interprets the identifier's structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum WorkItemId {
    Int(i64),
    Str(String),
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkItemId::Int(n) => write!(f, "{n}"),
            WorkItemId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for WorkItemId {
    fn from(n: i64) -> Self {
        WorkItemId::Int(n)
    }
}

impl From<&str> for WorkItemId {
    fn from(s: &str) -> Self {
        WorkItemId::Str(s.to_string())
    }
}

/// Lifecycle state of a single batch.
///
/// Transitions are monotonic: `yet_to_start -> triggered -> completed`,
/// no reversals and no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BatchStatus {
    YetToStart,
    Triggered,
    Completed,
}

/// Aggregate status of an ingestion, derived from its batches (never set
/// directly)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IngestionStatus {
    YetToStart,
    Triggered,
    Completed,
}

impl IngestionStatus {
    /// Derive the aggregate status from a set of batches.
    ///
    /// `yet_to_start` iff every batch is `yet_to_start`, `completed` iff every
    /// batch is `completed`, and `triggered` for any mixed combination.
    pub fn roll_up(batches: &[Batch]) -> Self {
        if batches.iter().all(|b| b.status == BatchStatus::YetToStart) {
            IngestionStatus::YetToStart
        } else if batches.iter().all(|b| b.status == BatchStatus::Completed) {
            IngestionStatus::Completed
        } else {
            IngestionStatus::Triggered
        }
    }
}

/// Priority class of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Integer rank used for queue ordering; lower rank is serviced first
    pub const fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// A fixed-size slice of an ingestion's work items, the unit of scheduling
/// and status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Batch {
    pub batch_id: Uuid,
    pub ids: Vec<WorkItemId>,
    pub status: BatchStatus,
}

impl Batch {
    /// Create a new batch in the initial state
    pub fn new(ids: Vec<WorkItemId>) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            ids,
            status: BatchStatus::YetToStart,
        }
    }
}

/// A single client submission, decomposed into batches.
///
/// `batches` preserves the original split order and must be returned in that
/// order by status lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Ingestion {
    pub ingestion_id: Uuid,
    pub status: IngestionStatus,
    pub batches: Vec<Batch>,
    pub created_at: DateTime<Utc>,
}

impl Ingestion {
    /// Create a new ingestion with all batches in the initial state
    pub fn new(ingestion_id: Uuid, batches: Vec<Batch>) -> Self {
        Self {
            ingestion_id,
            status: IngestionStatus::roll_up(&batches),
            batches,
            created_at: Utc::now(),
        }
    }

    /// Recompute the derived status after a batch status change
    pub fn recompute_status(&mut self) {
        self.status = IngestionStatus::roll_up(&self.batches);
    }
}
