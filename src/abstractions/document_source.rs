//! Document byte access abstraction
//!
//! Map workers read documents through [`DocumentSource`] so that the
//! pipeline can run against the filesystem or against in-memory bytes
//! in tests and benchmarks.

use crate::mapreduce::types::Document;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Trait for opening documents for random-access reads
///
/// Each worker opens its own reader; readers are never shared between
/// threads.
pub trait DocumentSource: Sync {
    type Reader: Read + Seek;

    /// Open a private reader for the document
    fn open(&self, document: &Document) -> io::Result<Self::Reader>;
}

/// Fill as much of `buf` as possible starting at `offset`
///
/// Returns the number of bytes read, which is less than `buf.len()` only
/// at end of file.
pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Real implementation reading documents from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealDocumentSource;

impl RealDocumentSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for RealDocumentSource {
    type Reader = File;

    fn open(&self, document: &Document) -> io::Result<File> {
        File::open(&document.name)
    }
}

/// Mock implementation serving documents from memory
///
/// Document `i` is served from `contents[i]`; a `None` entry fails to
/// open with `NotFound`.
#[derive(Debug, Default)]
pub struct MockDocumentSource {
    contents: Vec<Option<Arc<[u8]>>>,
    opens: AtomicUsize,
}

impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source with one readable document per entry
    pub fn with_documents<I, B>(documents: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut source = Self::new();
        for bytes in documents {
            source.add_document(bytes);
        }
        source
    }

    /// Append a readable document and return its id
    pub fn add_document(&mut self, bytes: impl AsRef<[u8]>) -> usize {
        self.contents.push(Some(Arc::from(bytes.as_ref())));
        self.contents.len() - 1
    }

    /// Append a document that fails to open and return its id
    pub fn add_unreadable(&mut self) -> usize {
        self.contents.push(None);
        self.contents.len() - 1
    }

    /// Documents with ids and lengths matching this source
    pub fn documents(&self) -> Vec<Document> {
        self.contents
            .iter()
            .enumerate()
            .map(|(id, bytes)| {
                let length = bytes.as_ref().map_or(0, |b| b.len() as u64);
                Document::new(id, format!("mem/doc{}.txt", id), length)
            })
            .collect()
    }

    /// Number of times any document was opened
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl DocumentSource for MockDocumentSource {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self, document: &Document) -> io::Result<Self::Reader> {
        self.opens.fetch_add(1, Ordering::Relaxed);
        match self.contents.get(document.id) {
            Some(Some(bytes)) => Ok(Cursor::new(Arc::clone(bytes))),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory document {}", document.id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_at_stops_at_eof() {
        let mut reader = Cursor::new(b"hello world".to_vec());
        let mut buf = [0u8; 8];
        assert_eq!(read_at(&mut reader, 6, &mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"world");
    }

    #[test]
    fn test_read_at_past_end() {
        let mut reader = Cursor::new(b"abc".to_vec());
        let mut buf = [0u8; 4];
        assert_eq!(read_at(&mut reader, 10, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_real_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"some text").unwrap();
        let document = Document::new(0, file.path(), 9);

        let mut reader = RealDocumentSource::new().open(&document).unwrap();
        let mut buf = [0u8; 4];
        read_at(&mut reader, 5, &mut buf).unwrap();
        assert_eq!(&buf, b"text");
    }

    #[test]
    fn test_mock_source() {
        let mut source = MockDocumentSource::with_documents(["abc"]);
        source.add_unreadable();
        let documents = source.documents();

        assert_eq!(documents[0].byte_length, 3);
        assert!(source.open(&documents[0]).is_ok());
        let err = source.open(&documents[1]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(source.open_count(), 2);
    }
}
