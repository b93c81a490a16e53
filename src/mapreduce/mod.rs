//! MapReduce engine for word-length document ranking
//!
//! Splits documents into fixed-size byte fragments, maps fragments to
//! word-length statistics on a fixed pool of threads, then combines and
//! reduces them into ranked per-document results.

pub mod errors;
pub mod map_phase;
pub mod pure;
pub mod reduce_phase;
pub mod separators;
pub mod types;

pub use errors::{FragmentError, MapReduceError, MapReduceResult, ReduceError};
pub use separators::SeparatorSet;
pub use types::{Document, DocumentResult, Fragment, FragmentStat, LengthHistogram, LongestWords};

use crate::abstractions::document_source::DocumentSource;
use map_phase::{run_map_phase, FragmentOutcome};
use pure::fragmentation::fragment_all;
use pure::ranking::sort_results;
use reduce_phase::{group_by_document, run_reduce_phase, DocumentOutcome};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Configuration for a MapReduce run
#[derive(Debug, Clone)]
pub struct MapReduceConfig {
    /// Number of worker threads per phase
    pub workers: usize,
    /// Fragment size in bytes
    pub fragment_size: usize,
    /// Fail on the first recoverable error instead of containing it
    pub strict: bool,
    pub separators: SeparatorSet,
}

impl MapReduceConfig {
    pub fn new(workers: usize, fragment_size: usize) -> Self {
        Self {
            workers,
            fragment_size,
            strict: false,
            separators: SeparatorSet::default(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_separators(mut self, separators: SeparatorSet) -> Self {
        self.separators = separators;
        self
    }
}

/// Results of a MapReduce run, in output order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<DocumentResult>,
    pub fragments: usize,
    /// Fragments whose statistics were replaced by empty ones
    pub fragment_errors: usize,
    /// Documents reported with a 0.0 rank after an error
    pub document_errors: usize,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.fragment_errors > 0 || self.document_errors > 0
    }
}

/// Runs the fragment → map → combine → reduce → sort pipeline
pub struct MapReduceEngine<S: DocumentSource> {
    config: MapReduceConfig,
    source: S,
}

impl<S: DocumentSource> MapReduceEngine<S> {
    /// Create an engine; `workers` and `fragment_size` must be positive
    pub fn new(config: MapReduceConfig, source: S) -> Self {
        assert!(config.workers > 0, "worker count must be positive");
        assert!(config.fragment_size > 0, "fragment size must be positive");
        Self { config, source }
    }

    /// Rank `documents`, whose ids must equal their positions
    pub fn run(&self, documents: &[Document]) -> MapReduceResult<RunReport> {
        debug_assert!(documents.iter().enumerate().all(|(i, d)| d.id == i));
        let started = Instant::now();
        let config = &self.config;

        let fragments = fragment_all(documents, config.fragment_size);
        info!(
            "Ranking {} documents in {} fragments of {} bytes with {} workers",
            documents.len(),
            fragments.len(),
            config.fragment_size,
            config.workers
        );

        let outcomes = run_map_phase(
            &self.source,
            documents,
            &fragments,
            config.fragment_size,
            &config.separators,
            config.workers,
        )?;
        debug!("Map phase finished after {:?}", started.elapsed());

        let (stats, fragment_errors) = self.contain_fragment_errors(outcomes)?;
        let aggregates = group_by_document(documents, &fragments, &stats)?;

        let outcomes = run_reduce_phase(&aggregates, config.workers)?;
        debug!("Reduce phase finished after {:?}", started.elapsed());

        let (mut results, document_errors) = self.contain_document_errors(documents, outcomes)?;
        sort_results(&mut results);

        info!(
            "Ranked {} documents in {:?} ({} fragment errors, {} document errors)",
            results.len(),
            started.elapsed(),
            fragment_errors,
            document_errors
        );

        Ok(RunReport {
            results,
            fragments: fragments.len(),
            fragment_errors,
            document_errors,
        })
    }

    /// Apply the error policy to map outcomes
    fn contain_fragment_errors(
        &self,
        outcomes: Vec<FragmentOutcome>,
    ) -> MapReduceResult<(Vec<FragmentStat>, usize)> {
        let mut errors = 0;
        let mut stats = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(stat) => stats.push(stat),
                Err(e) if self.config.strict => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping fragment of document {}: {}", e.document_id(), e);
                    errors += 1;
                    stats.push(FragmentStat::empty());
                }
            }
        }
        Ok((stats, errors))
    }

    /// Apply the error policy to reduce outcomes
    fn contain_document_errors(
        &self,
        documents: &[Document],
        outcomes: Vec<DocumentOutcome>,
    ) -> MapReduceResult<(Vec<DocumentResult>, usize)> {
        let mut errors = 0;
        let mut results = Vec::with_capacity(outcomes.len());
        for (document, outcome) in documents.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) if self.config.strict => return Err(e.into()),
                Err(e) => {
                    warn!("Reporting {} without a rank: {}", document.name.display(), e);
                    errors += 1;
                    results.push(e.into_unranked());
                }
            }
        }
        Ok((results, errors))
    }
}
