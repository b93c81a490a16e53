//! Structured error types for MapReduce phases
//!
//! Fragment and reduce errors are recoverable at the smallest unit of
//! work. The engine decides whether to contain them or fail the run.

use crate::mapreduce::types::DocumentResult;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while producing statistics for one fragment
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Failed to read {} at offset {offset}", .path.display())]
    Io {
        document_id: usize,
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Word in {} at fragment offset {offset} runs past the {limit}-byte scratch window",
        .path.display()
    )]
    WordTooLong {
        document_id: usize,
        path: PathBuf,
        offset: u64,
        limit: usize,
    },
}

impl FragmentError {
    pub fn document_id(&self) -> usize {
        match self {
            Self::Io { document_id, .. } | Self::WordTooLong { document_id, .. } => *document_id,
        }
    }
}

/// Failure while reducing one document
#[derive(Debug, Error)]
pub enum ReduceError {
    /// `unranked` keeps the document's real extrema with a 0.0 rank
    #[error("Document {document_id}: Fibonacci weight for word length {length} overflows u128")]
    FibonacciOverflow {
        document_id: usize,
        length: usize,
        unranked: Box<DocumentResult>,
    },
}

impl ReduceError {
    /// The result to report when the error is contained
    pub fn into_unranked(self) -> DocumentResult {
        match self {
            Self::FibonacciOverflow { unranked, .. } => *unranked,
        }
    }
}

/// Main error type for the MapReduce engine
#[derive(Debug, Error)]
pub enum MapReduceError {
    #[error(transparent)]
    Fragment(#[from] FragmentError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error("Fragment {index} (document {document_id}, offset {offset}) is out of document order")]
    NonContiguousFragments {
        index: usize,
        document_id: usize,
        offset: u64,
    },

    #[error("{phase} worker {worker} panicked")]
    WorkerPanicked { phase: &'static str, worker: usize },
}

/// Result type for MapReduce operations
pub type MapReduceResult<T> = Result<T, MapReduceError>;
