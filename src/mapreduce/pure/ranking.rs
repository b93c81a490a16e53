//! Rank computation and final ordering of document results

use crate::mapreduce::errors::ReduceError;
use crate::mapreduce::pure::fibonacci::FibonacciCache;
use crate::mapreduce::types::{Document, DocumentResult, LengthHistogram, LongestWords};
use std::cmp::Ordering;

/// Pure: Fibonacci-weighted average of word lengths
///
/// `rank = Σ fib(len + 1) * count(len) / Σ count(len)`. A histogram with
/// no words ranks 0.0. Returns `None` when a weight does not fit the
/// Fibonacci cache.
pub fn weighted_rank(
    histogram: &LengthHistogram,
    fibonacci: &mut FibonacciCache,
) -> Option<f64> {
    let total = histogram.total();
    if total == 0 {
        return Some(0.0);
    }

    let mut weighted = 0.0f64;
    for (length, count) in histogram.iter() {
        let weight = fibonacci.get(length + 1)?;
        weighted += weight as f64 * count as f64;
    }

    Some(weighted / total as f64)
}

/// Pure: Reduce a merged histogram to the document's final result
///
/// The extrema come straight from the histogram. If the rank cannot be
/// weighted, the error carries the result with those extrema and a 0.0
/// rank.
pub fn reduce_document(
    document: &Document,
    histogram: &LengthHistogram,
    longest_words: LongestWords,
    fibonacci: &mut FibonacciCache,
) -> Result<DocumentResult, ReduceError> {
    let Some(max_word_length) = histogram.max_length() else {
        return Ok(DocumentResult::without_words(document));
    };

    let mut result = DocumentResult {
        rank: 0.0,
        name: document.name.clone(),
        id: document.id,
        max_word_length,
        occurrences_at_max_length: histogram.count(max_word_length),
        longest_words,
    };

    match weighted_rank(histogram, fibonacci) {
        Some(rank) => {
            result.rank = rank;
            Ok(result)
        }
        None => Err(ReduceError::FibonacciOverflow {
            document_id: document.id,
            length: max_word_length,
            unranked: Box::new(result),
        }),
    }
}

/// Pure: Output order; higher rank first, then lower id
pub fn compare_results(a: &DocumentResult, b: &DocumentResult) -> Ordering {
    b.rank.total_cmp(&a.rank).then_with(|| a.id.cmp(&b.id))
}

/// Sort results into output order
pub fn sort_results(results: &mut [DocumentResult]) {
    results.sort_by(compare_results);
}
