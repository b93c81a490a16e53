//! Splitting documents into fixed-size byte fragments

use crate::mapreduce::types::{Document, Fragment};

/// Pure: Cut one document into fragments of `fragment_size` bytes
///
/// Fragments are emitted in offset order and tile `[0, byte_length)`;
/// only the last one may be shorter. An empty document yields none.
pub fn fragment_document(document: &Document, fragment_size: usize) -> Vec<Fragment> {
    assert!(fragment_size > 0, "fragment size must be positive");
    let step = fragment_size as u64;
    let mut fragments = Vec::with_capacity(document.byte_length.div_ceil(step) as usize);

    let mut offset = 0u64;
    while offset < document.byte_length {
        let length = step.min(document.byte_length - offset) as usize;
        fragments.push(Fragment {
            document_id: document.id,
            offset,
            length,
        });
        offset = offset.saturating_add(step);
    }

    fragments
}

/// Pure: Fragment all documents in ascending id order
///
/// Each document's fragments are appended before the next document's,
/// which is the ordering the combine stage relies on.
pub fn fragment_all(documents: &[Document], fragment_size: usize) -> Vec<Fragment> {
    debug_assert!(documents.windows(2).all(|w| w[0].id < w[1].id));
    documents
        .iter()
        .flat_map(|document| fragment_document(document, fragment_size))
        .collect()
}
