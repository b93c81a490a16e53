//! Core data types for the word-length MapReduce pipeline
//!
//! Documents and fragments describe the work; fragment and document
//! statistics carry the results between phases.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A document discovered from the input manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 0-based position in the manifest
    pub id: usize,
    /// Path as written in the manifest
    pub name: PathBuf,
    /// Size of the file in bytes
    pub byte_length: u64,
}

impl Document {
    pub fn new(id: usize, name: impl Into<PathBuf>, byte_length: u64) -> Self {
        Self {
            id,
            name: name.into(),
            byte_length,
        }
    }
}

/// A contiguous byte range of one document, processed as one unit of map work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub document_id: usize,
    pub offset: u64,
    pub length: usize,
}

impl Fragment {
    /// Offset one past the last byte of this fragment
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }
}

/// Word length to occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthHistogram {
    counts: BTreeMap<usize, u64>,
}

impl LengthHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one word of the given length; empty words are ignored
    pub fn record(&mut self, length: usize) {
        if length > 0 {
            *self.counts.entry(length).or_insert(0) += 1;
        }
    }

    /// Add every count of `other` into this histogram
    pub fn merge(&mut self, other: &LengthHistogram) {
        for (&length, &count) in &other.counts {
            *self.counts.entry(length).or_insert(0) += count;
        }
    }

    pub fn count(&self, length: usize) -> u64 {
        self.counts.get(&length).copied().unwrap_or(0)
    }

    /// Total number of words
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Longest recorded word length, if any word was recorded
    pub fn max_length(&self) -> Option<usize> {
        self.counts
            .iter()
            .rev()
            .find(|(_, &count)| count > 0)
            .map(|(&length, _)| length)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate `(length, count)` pairs in ascending length order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().map(|(&length, &count)| (length, count))
    }
}

impl FromIterator<(usize, u64)> for LengthHistogram {
    fn from_iter<I: IntoIterator<Item = (usize, u64)>>(iter: I) -> Self {
        let mut histogram = LengthHistogram::new();
        for (length, count) in iter {
            if length > 0 && count > 0 {
                *histogram.counts.entry(length).or_insert(0) += count;
            }
        }
        histogram
    }
}

/// The set of words reaching the longest length seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongestWords {
    length: usize,
    words: BTreeSet<Vec<u8>>,
}

impl LongestWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate: a longer word replaces the set, an equal one joins it
    pub fn offer(&mut self, word: &[u8]) {
        if word.is_empty() || word.len() < self.length {
            return;
        }
        if word.len() > self.length {
            self.length = word.len();
            self.words.clear();
        }
        self.words.insert(word.to_vec());
    }

    /// Fold another set in, keeping only the words at the larger length
    pub fn merge(&mut self, other: &LongestWords) {
        for word in &other.words {
            self.offer(word);
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.words.iter().map(Vec::as_slice)
    }
}

/// Statistics collected from a single fragment by a map worker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentStat {
    pub histogram: LengthHistogram,
    pub longest_words: LongestWords,
}

impl FragmentStat {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record one word found in the fragment
    pub fn record_word(&mut self, word: &[u8]) {
        self.histogram.record(word.len());
        self.longest_words.offer(word);
    }
}

/// All fragment statistics belonging to one document
#[derive(Debug, Clone, Copy)]
pub struct DocumentAggregate<'a> {
    pub document: &'a Document,
    pub fragments: &'a [FragmentStat],
}

/// Final per-document result produced by the reduce phase
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    pub rank: f64,
    pub name: PathBuf,
    pub id: usize,
    pub max_word_length: usize,
    pub occurrences_at_max_length: u64,
    /// Carried for callers; never written to the report
    pub longest_words: LongestWords,
}

impl DocumentResult {
    /// Result for a document that produced no words
    pub fn without_words(document: &Document) -> Self {
        Self {
            rank: 0.0,
            name: document.name.clone(),
            id: document.id,
            max_word_length: 0,
            occurrences_at_max_length: 0,
            longest_words: LongestWords::new(),
        }
    }
}
