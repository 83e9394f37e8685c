//! Authoritative ingestion/batch state, written by the batch processor

use dashmap::DashMap;
use ingestq_core::error::{Error, Result};
use ingestq_core::types::{BatchStatus, Ingestion};
use tracing::warn;
use uuid::Uuid;

/// Mapping from ingestion identifier to its current aggregate state and the
/// individual states of its batches.
///
/// Ingestion identifiers are never reused, and each entry is mutated under
/// the map's per-entry lock, so readers always observe a batch status as one
/// of the three defined values.
#[derive(Debug, Default)]
pub struct StatusStore {
    ingestions: DashMap<Uuid, Ingestion>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a freshly created ingestion
    pub fn insert(&self, ingestion: Ingestion) {
        self.ingestions.insert(ingestion.ingestion_id, ingestion);
    }

    /// Snapshot of an ingestion's current state
    pub fn get(&self, ingestion_id: Uuid) -> Result<Ingestion> {
        self.ingestions
            .get(&ingestion_id)
            .map(|entry| entry.value().clone())
            .ok_or(Error::NotFound(ingestion_id))
    }

    /// Apply a batch status change and recompute the owning ingestion's
    /// aggregate status.
    ///
    /// A queue entry referencing a batch that is missing from its ingestion
    /// should not occur; if it does, the update is logged and skipped so the
    /// processor loop keeps running.
    pub fn set_batch_status(&self, ingestion_id: Uuid, batch_id: Uuid, status: BatchStatus) {
        let Some(mut entry) = self.ingestions.get_mut(&ingestion_id) else {
            warn!(
                %ingestion_id,
                %batch_id,
                "Ingestion missing for queued batch, skipping status update"
            );
            return;
        };

        match entry.batches.iter_mut().find(|b| b.batch_id == batch_id) {
            Some(batch) => batch.status = status,
            None => {
                warn!(
                    %ingestion_id,
                    %batch_id,
                    "Batch missing from its ingestion, skipping status update"
                );
                return;
            }
        }

        entry.recompute_status();
    }
}
