//! Map phase execution
//!
//! Each map worker owns a contiguous run of fragments, a private reader
//! and a scratch buffer of at most `2 * fragment_size` bytes, grown only
//! as far as the fragments it maps require. It resolves the fragment's
//! boundaries so that a word split across fragments is counted once, by
//! the fragment in which it starts, and writes one outcome per fragment
//! into the slice of the shared results array it exclusively owns.

use crate::abstractions::document_source::{read_at, DocumentSource};
use crate::mapreduce::errors::{FragmentError, MapReduceError, MapReduceResult};
use crate::mapreduce::pure::partition::split_for_workers;
use crate::mapreduce::pure::tokenize::tokenize;
use crate::mapreduce::separators::SeparatorSet;
use crate::mapreduce::types::{Document, Fragment, FragmentStat};
use std::io;
use std::thread;
use tracing::{debug, trace};

/// Outcome of mapping one fragment
pub type FragmentOutcome = Result<FragmentStat, FragmentError>;

/// Where the words owned by a fragment lie inside the scratch buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// The fragment lies entirely inside a word owned by an earlier fragment
    Empty,
    /// Tokenize `buffer[start..end]`
    Bytes { start: usize, end: usize },
}

/// A single map worker
pub struct MapWorker<'a, S: DocumentSource> {
    worker_id: usize,
    fragment_size: usize,
    source: &'a S,
    documents: &'a [Document],
    separators: &'a SeparatorSet,
    buffer: Vec<u8>,
    current: Option<(usize, S::Reader)>,
}

impl<'a, S: DocumentSource> MapWorker<'a, S> {
    pub fn new(
        worker_id: usize,
        fragment_size: usize,
        source: &'a S,
        documents: &'a [Document],
        separators: &'a SeparatorSet,
    ) -> Self {
        Self {
            worker_id,
            fragment_size,
            source,
            documents,
            separators,
            buffer: Vec::new(),
            current: None,
        }
    }

    /// Process `fragments` in order, writing outcome `i` into `results[i]`
    pub fn run(&mut self, fragments: &[Fragment], results: &mut [FragmentOutcome]) {
        debug_assert_eq!(fragments.len(), results.len());
        for (fragment, slot) in fragments.iter().zip(results.iter_mut()) {
            *slot = self.process(fragment);
        }
    }

    /// Produce the statistics owned by one fragment
    pub fn process(&mut self, fragment: &Fragment) -> FragmentOutcome {
        let documents = self.documents;
        let document = &documents[fragment.document_id];
        trace!(
            "Map worker {} processing {} [{}, {})",
            self.worker_id,
            document.name.display(),
            fragment.offset,
            fragment.end()
        );

        let io_error = |source: io::Error| FragmentError::Io {
            document_id: document.id,
            path: document.name.clone(),
            offset: fragment.offset,
            source,
        };

        match self.resolve_window(document, fragment).map_err(io_error)? {
            Some(Window::Bytes { start, end }) => {
                Ok(tokenize(&self.buffer[start..end], self.separators))
            }
            Some(Window::Empty) => Ok(FragmentStat::empty()),
            None => Err(FragmentError::WordTooLong {
                document_id: document.id,
                path: document.name.clone(),
                offset: fragment.offset,
                limit: self.window_limit(),
            }),
        }
    }

    /// Largest window a fragment may resolve to: itself plus one lookahead
    pub fn window_limit(&self) -> usize {
        self.fragment_size.saturating_mul(2)
    }

    /// Bytes of scratch buffer currently allocated
    pub fn scratch_len(&self) -> usize {
        self.buffer.len()
    }

    /// Read the fragment plus any lookback/lookahead bytes it needs
    ///
    /// Returns `Ok(None)` when the last word runs past the scratch buffer.
    fn resolve_window(
        &mut self,
        document: &Document,
        fragment: &Fragment,
    ) -> io::Result<Option<Window>> {
        let fragment_size = self.fragment_size;
        let separators = self.separators;
        let reader = open_reader(&mut self.current, self.source, document)?;
        let length = fragment.length;
        if length == 0 {
            return Ok(Some(Window::Empty));
        }

        // Lookahead never exceeds the bytes left in the document.
        let remaining = document.byte_length.saturating_sub(fragment.end());
        let lookahead_len = usize::try_from(remaining)
            .unwrap_or(usize::MAX)
            .min(fragment_size);
        let needed = length.saturating_add(lookahead_len);
        if self.buffer.len() < needed {
            self.buffer.resize(needed, 0);
        }
        let buffer = &mut self.buffer;

        let read = read_at(reader, fragment.offset, &mut buffer[..length])?;
        if read < length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} bytes, found {}", length, read),
            ));
        }

        // A fragment starting mid-word leaves that word to the previous fragment.
        let mut start = 0;
        if fragment.offset > 0 && separators.is_word_byte(buffer[0]) {
            let mut previous = [0u8; 1];
            let found = read_at(reader, fragment.offset - 1, &mut previous)?;
            if found == 1 && separators.is_word_byte(previous[0]) {
                match separators.find_separator(&buffer[..length]) {
                    Some(position) => start = position,
                    None => return Ok(Some(Window::Empty)),
                }
            }
        }

        // A fragment ending mid-word extends into the next fragment's bytes.
        let mut end = length;
        if remaining > 0 && separators.is_word_byte(buffer[length - 1]) {
            let lookahead = &mut buffer[length..length + lookahead_len];
            let available = read_at(reader, fragment.end(), lookahead)?;
            match separators.find_separator(&lookahead[..available]) {
                Some(position) => end += position,
                None if (available as u64) >= remaining => end += remaining as usize,
                None => return Ok(None),
            }
        }

        Ok(Some(Window::Bytes { start, end }))
    }
}

/// Reuse the open reader while consecutive fragments share a document
fn open_reader<'r, S: DocumentSource>(
    current: &'r mut Option<(usize, S::Reader)>,
    source: &S,
    document: &Document,
) -> io::Result<&'r mut S::Reader> {
    let reuse = matches!(current, Some((id, _)) if *id == document.id);
    if !reuse {
        *current = None;
        *current = Some((document.id, source.open(document)?));
    }
    match current {
        Some((_, reader)) => Ok(reader),
        None => Err(io::Error::other("document reader unavailable")),
    }
}

/// Run the map phase over `fragments` with `workers` threads
///
/// Returns one outcome per fragment, indexed like `fragments`.
pub fn run_map_phase<S: DocumentSource>(
    source: &S,
    documents: &[Document],
    fragments: &[Fragment],
    fragment_size: usize,
    separators: &SeparatorSet,
    workers: usize,
) -> MapReduceResult<Vec<FragmentOutcome>> {
    let mut results: Vec<FragmentOutcome> = fragments
        .iter()
        .map(|_| Ok(FragmentStat::empty()))
        .collect();

    let panicked = thread::scope(|scope| {
        let handles: Vec<_> = split_for_workers(&mut results, workers)
            .into_iter()
            .map(|(worker_id, range, slots)| {
                let assigned = &fragments[range.clone()];
                let handle = scope.spawn(move || {
                    debug!(
                        "Map worker {} owns fragments {:?} ({} fragments)",
                        worker_id,
                        range,
                        assigned.len()
                    );
                    let mut worker =
                        MapWorker::new(worker_id, fragment_size, source, documents, separators);
                    worker.run(assigned, slots);
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
            phase: "map",
            worker,
        });
    }

    Ok(results)
}
