//! Document discovery
//!
//! Turns manifest paths into [`Document`]s by reading each file's byte
//! length from its metadata.

use crate::error::{ErrorCode, Result, WordRankError};
use crate::mapreduce::types::Document;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Documents found on disk, plus how many could not be inspected
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub documents: Vec<Document>,
    /// Documents treated as empty because their metadata was unreadable
    pub failures: usize,
}

/// Build documents in manifest order, with ids equal to their position
///
/// In strict mode the first unreadable path aborts discovery. Otherwise
/// the document is kept with a byte length of zero so that it is still
/// reported, and a warning is logged.
pub fn discover_documents(paths: &[PathBuf], strict: bool) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    for (id, path) in paths.iter().enumerate() {
        let byte_length = match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            Ok(_) => {
                let err = WordRankError::input_with_code(
                    ErrorCode::INPUT_READ_FAILED,
                    "Not a regular file",
                    Some(path.clone()),
                );
                contain(err, strict, &mut discovery.failures)?;
                0
            }
            Err(e) => {
                let code = match e.kind() {
                    std::io::ErrorKind::NotFound => ErrorCode::INPUT_NOT_FOUND,
                    std::io::ErrorKind::PermissionDenied => ErrorCode::INPUT_PERMISSION_DENIED,
                    _ => ErrorCode::INPUT_READ_FAILED,
                };
                let err = WordRankError::input_with_code(
                    code,
                    "Cannot read file metadata",
                    Some(path.clone()),
                )
                .with_source(e);
                contain(err, strict, &mut discovery.failures)?;
                0
            }
        };

        debug!("Document {} is {} ({} bytes)", id, path.display(), byte_length);
        discovery
            .documents
            .push(Document::new(id, path.clone(), byte_length));
    }

    Ok(discovery)
}

fn contain(err: WordRankError, strict: bool, failures: &mut usize) -> Result<()> {
    if strict {
        return Err(err);
    }
    warn!("{}; treating it as empty", err.user_message());
    *failures += 1;
    Ok(())
}
