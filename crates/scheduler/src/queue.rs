//! Priority job queue holding batches awaiting the processor

use ingestq_core::error::{Error, Result};
use ingestq_core::types::WorkItemId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;
use uuid::Uuid;

/// One schedulable unit: a single batch awaiting processing.
///
/// Transient: exists only between submission and extraction by the batch
/// processor. References the batch it represents; the ingestion in the
/// status store remains the owner.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    /// Priority rank; lower is serviced first
    pub rank: u8,
    /// Monotonic timestamp taken at submission, tie-break after rank
    pub arrival: Instant,
    /// Process-wide insertion counter, final tie-break for stability
    pub seq: u64,
    pub ingestion_id: Uuid,
    pub batch_id: Uuid,
    pub ids: Vec<WorkItemId>,
}

impl QueueEntry {
    fn key(&self) -> (u8, Instant, u64) {
        (self.rank, self.arrival, self.seq)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // BinaryHeap is a max-heap; the comparison is inverted so that popping
    // yields the entry with the smallest (rank, arrival, seq) key.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Priority-ordered queue of batches awaiting a worker.
///
/// Total order: rank ascending, then arrival ascending, then insertion
/// sequence ascending. The `seq` component makes the order deterministic
/// even for entries submitted together, so same-ingestion batches are never
/// perturbed relative to each other.
#[derive(Debug, Default)]
pub struct JobQueue {
    heap: BinaryHeap<QueueEntry>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; batch_id distinctness is the caller's responsibility
    pub fn push(&mut self, entry: QueueEntry) {
        self.heap.push(entry);
    }

    /// Remove and return the most urgent entry, or `Error::EmptyQueue` if
    /// none remain
    pub fn pop(&mut self) -> Result<QueueEntry> {
        self.heap.pop().ok_or(Error::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u8, arrival: Instant, seq: u64) -> QueueEntry {
        QueueEntry {
            rank,
            arrival,
            seq,
            ingestion_id: Uuid::new_v4(),
            batch_id: Uuid::new_v4(),
            ids: vec![WorkItemId::from(1)],
        }
    }

    #[test]
    fn pop_returns_lowest_rank_first() {
        let now = Instant::now();
        let mut queue = JobQueue::new();
        queue.push(entry(3, now, 0));
        queue.push(entry(1, now, 1));
        queue.push(entry(2, now, 2));

        assert_eq!(queue.pop().unwrap().rank, 1);
        assert_eq!(queue.pop().unwrap().rank, 2);
        assert_eq!(queue.pop().unwrap().rank, 3);
    }

    #[test]
    fn equal_ranks_are_served_in_arrival_order() {
        let early = Instant::now();
        let late = early + std::time::Duration::from_millis(10);
        let mut queue = JobQueue::new();
        queue.push(entry(2, late, 0));
        queue.push(entry(2, early, 1));

        assert_eq!(queue.pop().unwrap().arrival, early);
        assert_eq!(queue.pop().unwrap().arrival, late);
    }

    #[test]
    fn equal_rank_and_arrival_fall_back_to_insertion_order() {
        let now = Instant::now();
        let mut queue = JobQueue::new();
        for seq in 0..5 {
            queue.push(entry(1, now, seq));
        }
        for expected in 0..5 {
            assert_eq!(queue.pop().unwrap().seq, expected);
        }
    }

    #[test]
    fn later_high_priority_overtakes_earlier_low_priority() {
        let early = Instant::now();
        let late = early + std::time::Duration::from_millis(10);
        let mut queue = JobQueue::new();
        queue.push(entry(3, early, 0));
        queue.push(entry(1, late, 1));

        let first = queue.pop().unwrap();
        assert_eq!(first.rank, 1);
        assert_eq!(first.arrival, late);
    }

    #[test]
    fn pop_on_empty_queue_signals_empty() {
        let mut queue = JobQueue::new();
        assert!(matches!(queue.pop(), Err(Error::EmptyQueue)));
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
