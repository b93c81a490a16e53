//! Abstraction layers for external dependencies
//!
//! This module provides trait-based abstractions over document storage
//! to enable testing without touching the filesystem.

pub mod document_source;

pub use document_source::{read_at, DocumentSource, MockDocumentSource, RealDocumentSource};
