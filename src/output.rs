//! CSV report writer
//!
//! One headerless record per document, in ranked order:
//! `name,rank,max_word_length,occurrences_at_max_length`.

use crate::error::{Result, WordRankError};
use crate::mapreduce::types::DocumentResult;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Default folder prefix removed from document names in the report
pub const DEFAULT_STRIP_PREFIX: &str = "tests/files/";

/// Pure: The name written for `path`, without a leading `prefix`
pub fn display_name(path: &Path, prefix: &str) -> String {
    let name = path.to_string_lossy();
    name.strip_prefix(prefix).unwrap_or(&name).to_string()
}

/// Write `results` as CSV records to any writer
pub fn write_results<W: Write>(
    writer: W,
    results: &[DocumentResult],
    strip_prefix: &str,
) -> csv::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for result in results {
        csv.write_record([
            display_name(&result.name, strip_prefix),
            format!("{:.2}", result.rank),
            result.max_word_length.to_string(),
            result.occurrences_at_max_length.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report to it
pub fn write_report(path: &Path, results: &[DocumentResult], strip_prefix: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        WordRankError::output("Cannot create output file", Some(path.to_path_buf())).with_source(e)
    })?;

    write_results(io::BufWriter::new(file), results, strip_prefix).map_err(|e| {
        WordRankError::output("Failed to write CSV records", Some(path.to_path_buf()))
            .with_source(e)
    })?;

    info!("Wrote {} records to {}", results.len(), path.display());
    Ok(())
}
