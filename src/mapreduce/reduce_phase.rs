//! Reduce phase execution
//!
//! Fragment statistics are grouped into per-document runs, then each
//! reduce worker combines and reduces the documents it owns, writing
//! into its own slice of the per-document results array.

use crate::mapreduce::errors::{MapReduceError, MapReduceResult, ReduceError};
use crate::mapreduce::pure::fibonacci::FibonacciCache;
use crate::mapreduce::pure::partition::split_for_workers;
use crate::mapreduce::pure::ranking::reduce_document;
use crate::mapreduce::types::{
    Document, DocumentAggregate, DocumentResult, Fragment, FragmentStat, LengthHistogram,
    LongestWords,
};
use std::thread;
use tracing::{debug, trace};

/// Outcome of reducing one document
pub type DocumentOutcome = Result<DocumentResult, ReduceError>;

/// Document-level statistics after the combine step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedStat {
    pub histogram: LengthHistogram,
    pub longest_words: LongestWords,
}

/// Group fragment statistics into one aggregate per document
///
/// Fragments must appear in document id order, and within a document in
/// consecutive offset order starting at zero and covering the whole
/// document. Anything else is rejected rather than silently regrouped.
pub fn group_by_document<'a>(
    documents: &'a [Document],
    fragments: &[Fragment],
    stats: &'a [FragmentStat],
) -> MapReduceResult<Vec<DocumentAggregate<'a>>> {
    debug_assert_eq!(fragments.len(), stats.len());
    let mut aggregates = Vec::with_capacity(documents.len());
    let mut index = 0;

    for document in documents {
        let begin = index;
        let mut expected_offset = 0u64;
        while index < fragments.len() && fragments[index].document_id == document.id {
            let fragment = &fragments[index];
            if fragment.offset != expected_offset {
                return Err(out_of_order(index, fragment));
            }
            expected_offset = fragment.end();
            index += 1;
        }
        if expected_offset != document.byte_length {
            let fragment = fragments.get(index).copied().unwrap_or(Fragment {
                document_id: document.id,
                offset: expected_offset,
                length: 0,
            });
            return Err(out_of_order(index, &fragment));
        }

        aggregates.push(DocumentAggregate {
            document,
            fragments: &stats[begin..index],
        });
    }

    if let Some(fragment) = fragments.get(index) {
        return Err(out_of_order(index, fragment));
    }

    Ok(aggregates)
}

fn out_of_order(index: usize, fragment: &Fragment) -> MapReduceError {
    MapReduceError::NonContiguousFragments {
        index,
        document_id: fragment.document_id,
        offset: fragment.offset,
    }
}

/// Pure: Merge the fragment statistics of one document, in fragment order
pub fn combine(fragments: &[FragmentStat]) -> CombinedStat {
    fragments
        .iter()
        .fold(CombinedStat::default(), |mut combined, fragment| {
            combined.histogram.merge(&fragment.histogram);
            combined.longest_words.merge(&fragment.longest_words);
            combined
        })
}

/// A single reduce worker with its private Fibonacci memo
pub struct ReduceWorker {
    worker_id: usize,
    fibonacci: FibonacciCache,
}

impl ReduceWorker {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            fibonacci: FibonacciCache::new(),
        }
    }

    /// Combine then reduce one document
    pub fn reduce(&mut self, aggregate: &DocumentAggregate<'_>) -> DocumentOutcome {
        let combined = combine(aggregate.fragments);
        trace!(
            "Reduce worker {} combined {} fragments of {} into {} words",
            self.worker_id,
            aggregate.fragments.len(),
            aggregate.document.name.display(),
            combined.histogram.total()
        );
        reduce_document(
            aggregate.document,
            &combined.histogram,
            combined.longest_words,
            &mut self.fibonacci,
        )
    }

    /// Process `aggregates` in order, writing outcome `i` into `results[i]`
    pub fn run(&mut self, aggregates: &[DocumentAggregate<'_>], results: &mut [DocumentOutcome]) {
        debug_assert_eq!(aggregates.len(), results.len());
        for (aggregate, slot) in aggregates.iter().zip(results.iter_mut()) {
            *slot = self.reduce(aggregate);
        }
    }
}

/// Run the reduce phase over `aggregates` with `workers` threads
///
/// Returns one outcome per document, indexed like `aggregates`.
pub fn run_reduce_phase(
    aggregates: &[DocumentAggregate<'_>],
    workers: usize,
) -> MapReduceResult<Vec<DocumentOutcome>> {
    let mut results: Vec<DocumentOutcome> = aggregates
        .iter()
        .map(|aggregate| Ok(DocumentResult::without_words(aggregate.document)))
        .collect();

    let panicked = thread::scope(|scope| {
        let handles: Vec<_> = split_for_workers(&mut results, workers)
            .into_iter()
            .map(|(worker_id, range, slots)| {
                let assigned = &aggregates[range.clone()];
                let handle = scope.spawn(move || {
                    debug!("Reduce worker {} owns documents {:?}", worker_id, range);
                    ReduceWorker::new(worker_id).run(assigned, slots);
                });
                (worker_id, handle)
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|(worker_id, handle)| handle.join().err().map(|_| worker_id))
            .collect::<Vec<_>>()
    });

    if let Some(&worker) = panicked.first() {
        return Err(MapReduceError::WorkerPanicked {
            phase: "reduce",
            worker,
        });
    }

    Ok(results)
}
