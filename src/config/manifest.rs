//! Input manifest parsing
//!
//! ```text
//! <fragment size>
//! <document count>
//! <path 0>
//! ...
//! ```

use crate::error::{ErrorCode, Result, WordRankError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Largest fragment size whose `2 * size` scratch window fits in a `usize`
pub const MAX_FRAGMENT_SIZE: usize = usize::MAX / 2;

/// Fragment size and document paths read from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub fragment_size: usize,
    pub documents: Vec<PathBuf>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            WordRankError::config_with_code(ErrorCode::MANIFEST_NOT_FOUND, "Cannot open manifest")
                .with_source(e)
                .with_context(path.display())
        })?;
        Self::from_reader(file).map_err(|e| e.with_context(path.display()))
    }

    /// Parse a manifest; lines past the declared document count are ignored
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut lines = BufReader::new(reader).lines();
        let mut next_line = |what: &str| -> Result<String> {
            match lines.next() {
                Some(Ok(line)) => Ok(line.trim().to_string()),
                Some(Err(e)) => Err(WordRankError::config_with_code(
                    ErrorCode::MANIFEST_NOT_FOUND,
                    format!("Cannot read {}", what),
                )
                .with_source(e)),
                None => Err(WordRankError::config_with_code(
                    ErrorCode::MANIFEST_MISSING_LINE,
                    format!("Missing {}", what),
                )),
            }
        };

        let fragment_size: usize = parse_number(&next_line("fragment size")?, "fragment size")?;
        if fragment_size == 0 {
            return Err(WordRankError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "fragment size must be positive",
            ));
        }
        if fragment_size > MAX_FRAGMENT_SIZE {
            return Err(WordRankError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "fragment size {} exceeds the maximum of {}",
                    fragment_size, MAX_FRAGMENT_SIZE
                ),
            ));
        }

        let count: usize = parse_number(&next_line("document count")?, "document count")?;
        let mut documents = Vec::with_capacity(count.min(4096));
        for index in 0..count {
            let what = format!("path of document {}", index);
            let line = next_line(&what)?;
            if line.is_empty() {
                return Err(WordRankError::config_with_code(
                    ErrorCode::MANIFEST_EMPTY_PATH,
                    format!("Blank {}", what),
                ));
            }
            documents.push(PathBuf::from(line));
        }

        Ok(Self {
            fragment_size,
            documents,
        })
    }
}

fn parse_number(line: &str, what: &str) -> Result<usize> {
    line.parse().map_err(|e| {
        WordRankError::config_with_code(
            ErrorCode::MANIFEST_INVALID_NUMBER,
            format!("{} is not a non-negative integer: {:?}", what, line),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Manifest> {
        Manifest::from_reader(text.as_bytes())
    }

    #[test]
    fn test_parse_manifest() {
        let manifest = parse("1024\n2\ntests/files/a.txt\n  tests/files/b.txt  \n").unwrap();
        assert_eq!(manifest.fragment_size, 1024);
        assert_eq!(
            manifest.documents,
            vec![
                PathBuf::from("tests/files/a.txt"),
                PathBuf::from("tests/files/b.txt")
            ]
        );
    }

    #[test]
    fn test_extra_lines_ignored() {
        let manifest = parse("8\n1\na.txt\nb.txt\n\n").unwrap();
        assert_eq!(manifest.documents.len(), 1);
    }

    #[test]
    fn test_zero_documents() {
        let manifest = parse("8\n0\n").unwrap();
        assert!(manifest.documents.is_empty());
    }

    #[test]
    fn test_missing_path_line() {
        let err = parse("8\n3\na.txt\nb.txt").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MANIFEST_MISSING_LINE);
        assert!(err.to_string().contains("document 2"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(
            parse("abc\n1\na\n").unwrap_err().code(),
            ErrorCode::MANIFEST_INVALID_NUMBER
        );
        assert_eq!(
            parse("8\n-1\n").unwrap_err().code(),
            ErrorCode::MANIFEST_INVALID_NUMBER
        );
        assert_eq!(parse("").unwrap_err().code(), ErrorCode::MANIFEST_MISSING_LINE);
    }

    #[test]
    fn test_zero_fragment_size_rejected() {
        let err = parse("0\n1\na.txt\n").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_oversized_fragment_size_rejected() {
        let text = format!("{}\n1\na.txt\n", usize::MAX);
        let err = parse(&text).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert_eq!(err.exit_code(), 2);

        let largest = parse(&format!("{}\n1\na.txt\n", MAX_FRAGMENT_SIZE)).unwrap();
        assert_eq!(largest.fragment_size, MAX_FRAGMENT_SIZE);
    }

    #[test]
    fn test_blank_path_rejected() {
        let err = parse("8\n2\na.txt\n   \n").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MANIFEST_EMPTY_PATH);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/manifest.txt")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MANIFEST_NOT_FOUND);
    }
}
