//! Batch processor: the single drain loop over the priority job queue

use crate::queue::{JobQueue, QueueEntry};
use crate::runner::{BatchRunner, DelayRunner};
use crate::splitter::split_into_batches;
use crate::status::StatusStore;
use ingestq_core::config::SchedulerConfig;
use ingestq_core::error::{Error, Result};
use ingestq_core::types::{BatchStatus, Ingestion, Priority, WorkItemId};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Scheduler owning the job queue, the status store, and the run/idle flag.
///
/// The drain loop is the only writer of batch and ingestion status; at most
/// one loop instance is active at any time regardless of how many
/// submissions arrive concurrently. Independent instances can coexist, which
/// tests rely on.
pub struct Scheduler {
    queue: Mutex<JobQueue>,
    store: StatusStore,
    runner: Arc<dyn BatchRunner>,
    running: AtomicBool,
    seq: AtomicU64,
    batch_size: usize,
    // Self-handle so submissions can hand the drain task an owned reference
    this: Weak<Scheduler>,
}

impl Scheduler {
    /// Create a scheduler with the default delay-based runner
    pub fn new(config: &SchedulerConfig) -> Arc<Self> {
        Self::with_runner(config, Arc::new(DelayRunner::from_config(config)))
    }

    /// Create a scheduler with an injected processing step
    pub fn with_runner(config: &SchedulerConfig, runner: Arc<dyn BatchRunner>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            queue: Mutex::new(JobQueue::new()),
            store: StatusStore::new(),
            runner,
            running: AtomicBool::new(false),
            seq: AtomicU64::new(0),
            batch_size: config.batch_size,
            this: this.clone(),
        })
    }

    /// Accept a submission: split it into batches, seed the status store,
    /// enqueue one entry per batch, and start the drain loop if it is idle.
    ///
    /// Returns the generated ingestion identifier without waiting for any
    /// processing; a status lookup issued immediately after is guaranteed to
    /// find the ingestion. Validation happens before any state mutation, so
    /// a rejected submission leaves no trace.
    pub async fn submit(&self, ids: Vec<WorkItemId>, priority: Priority) -> Result<Uuid> {
        if ids.is_empty() {
            return Err(Error::invalid_submission(
                "work-item list cannot be empty".to_string(),
            ));
        }

        let ingestion_id = Uuid::new_v4();
        let batches = split_into_batches(&ids, self.batch_size);
        let arrival = Instant::now();
        let rank = priority.rank();

        let entries: Vec<QueueEntry> = batches
            .iter()
            .map(|batch| QueueEntry {
                rank,
                arrival,
                seq: self.seq.fetch_add(1, Ordering::Relaxed),
                ingestion_id,
                batch_id: batch.batch_id,
                ids: batch.ids.clone(),
            })
            .collect();

        info!(
            %ingestion_id,
            batches = batches.len(),
            items = ids.len(),
            priority = %priority,
            "Accepted ingestion"
        );

        // Seed the store before enqueueing so no queue entry can ever be
        // dequeued for an ingestion the store does not know about.
        self.store.insert(Ingestion::new(ingestion_id, batches));

        {
            let mut queue = self.queue.lock().await;
            for entry in entries {
                queue.push(entry);
            }
        }

        self.start_if_idle();
        Ok(ingestion_id)
    }

    /// Snapshot of an ingestion's current state
    pub fn status(&self, ingestion_id: Uuid) -> Result<Ingestion> {
        self.store.get(ingestion_id)
    }

    /// Spawn the drain loop unless one is already running
    fn start_if_idle(&self) {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            // Upgrade only fails while the scheduler is being dropped, at
            // which point there is nothing left to drain.
            if let Some(scheduler) = self.this.upgrade() {
                tokio::spawn(async move {
                    scheduler.drain().await;
                });
            } else {
                self.running.store(false, Ordering::Release);
            }
        }
    }

    /// Drain the queue one entry at a time until it is empty.
    ///
    /// The ordering is re-derived at every pop, so entries enqueued by a
    /// later submission overtake earlier ones when they carry a more urgent
    /// rank, even mid-drain.
    async fn drain(&self) {
        debug!("Batch processor started");

        loop {
            let popped = self.queue.lock().await.pop();
            match popped {
                Ok(entry) => {
                    self.process_entry(entry).await;
                    // Let concurrent submissions enqueue before the next
                    // ordering pass.
                    tokio::task::yield_now().await;
                }
                // Only EmptyQueue is produced here: the queue is drained.
                Err(_) => {
                    self.running.store(false, Ordering::Release);

                    // A submission may have pushed between the failed pop and
                    // clearing the flag without being able to start a loop of
                    // its own. Reclaim the flag and keep draining rather than
                    // strand those entries.
                    if !self.queue.lock().await.is_empty()
                        && self
                            .running
                            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                            .is_ok()
                    {
                        continue;
                    }

                    debug!("Batch processor idle");
                    return;
                }
            }
        }
    }

    /// Run one dequeued batch to completion, updating status around the
    /// processing step
    async fn process_entry(&self, entry: QueueEntry) {
        debug!(
            ingestion_id = %entry.ingestion_id,
            batch_id = %entry.batch_id,
            rank = entry.rank,
            items = entry.ids.len(),
            "Processing batch"
        );

        self.store
            .set_batch_status(entry.ingestion_id, entry.batch_id, BatchStatus::Triggered);

        self.runner.run(entry.batch_id, &entry.ids).await;

        self.store
            .set_batch_status(entry.ingestion_id, entry.batch_id, BatchStatus::Completed);

        debug!(
            ingestion_id = %entry.ingestion_id,
            batch_id = %entry.batch_id,
            "Batch completed"
        );
    }
}
