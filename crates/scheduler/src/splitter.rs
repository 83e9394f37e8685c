//! Splitting a submission's work items into fixed-size batches

use ingestq_core::types::{Batch, WorkItemId};

/// Partition an ordered sequence of work items into contiguous batches of at
/// most `batch_size` items.
///
/// Produces ceil(len / batch_size) batches covering the input with no gaps,
/// no overlap, and no reordering. An empty input yields no batches; callers
/// reject empty submissions before reaching this point. `batch_size` must be
/// at least 1, which configuration validation guarantees.
pub fn split_into_batches(ids: &[WorkItemId], batch_size: usize) -> Vec<Batch> {
    debug_assert!(batch_size > 0, "batch_size must be at least 1");
    ids.chunks(batch_size)
        .map(|chunk| Batch::new(chunk.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingestq_core::types::BatchStatus;
    use pretty_assertions::assert_eq;

    fn ids(n: i64) -> Vec<WorkItemId> {
        (0..n).map(WorkItemId::from).collect()
    }

    #[test]
    fn splits_into_ceil_len_over_size_batches() {
        for (len, size, expected) in [(5, 3, 2), (6, 3, 2), (7, 3, 3), (1, 3, 1), (3, 1, 3)] {
            let batches = split_into_batches(&ids(len), size);
            assert_eq!(batches.len(), expected, "len={len} size={size}");
            assert!(batches.iter().all(|b| b.ids.len() <= size));
        }
    }

    #[test]
    fn concatenation_preserves_input_order() {
        let input = ids(10);
        let batches = split_into_batches(&input, 3);
        let rejoined: Vec<WorkItemId> = batches.into_iter().flat_map(|b| b.ids).collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn only_the_last_batch_is_short() {
        let batches = split_into_batches(&ids(8), 3);
        assert_eq!(batches[0].ids.len(), 3);
        assert_eq!(batches[1].ids.len(), 3);
        assert_eq!(batches[2].ids.len(), 2);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(split_into_batches(&[], 3).is_empty());
    }

    #[test]
    fn batches_start_yet_to_start_with_distinct_ids() {
        let batches = split_into_batches(&ids(6), 3);
        assert!(batches.iter().all(|b| b.status == BatchStatus::YetToStart));
        assert_ne!(batches[0].batch_id, batches[1].batch_id);
    }
}
