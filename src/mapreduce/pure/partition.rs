//! Static work partitioning across a fixed worker pool
//!
//! Every phase splits its items with the same ceiling-division rule, so
//! worker `i` always owns a predictable contiguous slice.

use std::ops::Range;

/// Pure: Compute the half-open item range owned by `worker` out of `workers`
///
/// Each worker gets `ceil(items / workers)` consecutive items; trailing
/// workers may receive a shorter or empty range.
///
/// # Panics
///
/// Panics if `workers` is zero. Worker counts are validated before any
/// phase starts.
///
/// # Examples
///
/// ```
/// use wordrank::mapreduce::pure::partition::partition;
///
/// assert_eq!(partition(10, 3, 0), 0..4);
/// assert_eq!(partition(10, 3, 2), 8..10);
/// assert!(partition(2, 4, 3).is_empty());
/// ```
pub fn partition(items: usize, workers: usize, worker: usize) -> Range<usize> {
    assert!(workers > 0, "partition requires at least one worker");
    let chunk = items.div_ceil(workers);
    let begin = worker.saturating_mul(chunk).min(items);
    let end = begin.saturating_add(chunk).min(items);
    begin..end
}

/// Pure: All worker ranges in worker order
pub fn partitions(items: usize, workers: usize) -> Vec<Range<usize>> {
    (0..workers)
        .map(|worker| partition(items, workers, worker))
        .collect()
}

/// Split `slice` into one disjoint mutable sub-slice per busy worker
///
/// The sub-slices follow [`partition`] exactly and are tagged with the
/// owning worker's index. Workers whose range is empty are left out, so
/// callers never spawn a thread with nothing to do.
pub fn split_for_workers<T>(
    mut slice: &mut [T],
    workers: usize,
) -> Vec<(usize, Range<usize>, &mut [T])> {
    let items = slice.len();
    let mut parts = Vec::with_capacity(workers.min(items));
    for worker in 0..workers {
        let range = partition(items, workers, worker);
        // later ranges are empty too
        if range.is_empty() {
            break;
        }
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(range.len());
        parts.push((worker, range, head));
        slice = tail;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(partitions(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_uneven_split() {
        assert_eq!(partitions(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let ranges = partitions(3, 5);
        assert_eq!(ranges[0], 0..1);
        assert_eq!(ranges[2], 2..3);
        assert!(ranges[3].is_empty());
        assert!(ranges[4].is_empty());
    }

    #[test]
    fn test_no_items() {
        assert!(partitions(0, 3).iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_single_worker_owns_everything() {
        assert_eq!(partition(7, 1, 0), 0..7);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_panics() {
        partition(3, 0, 0);
    }

    #[test]
    fn test_split_for_workers_is_disjoint() {
        let mut data = vec![0usize; 10];
        for (worker, range, part) in split_for_workers(&mut data, 3) {
            assert_eq!(range.len(), part.len());
            for slot in part.iter_mut() {
                *slot = worker + 1;
            }
        }
        assert_eq!(data, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn test_split_skips_idle_workers() {
        let mut data = vec![0u8; 3];
        let parts = split_for_workers(&mut data, 5000);
        let owners: Vec<(usize, Range<usize>)> = parts
            .into_iter()
            .map(|(worker, range, _)| (worker, range))
            .collect();
        assert_eq!(owners, vec![(0, 0..1), (1, 1..2), (2, 2..3)]);

        let mut empty: Vec<u8> = Vec::new();
        assert!(split_for_workers(&mut empty, 4).is_empty());
    }
}
