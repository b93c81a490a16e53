//! Pure functional pieces of the MapReduce pipeline
//!
//! Everything here is free of I/O and shared state so it can be tested
//! and reused on its own.

pub mod fibonacci;
pub mod fragmentation;
pub mod partition;
pub mod ranking;
pub mod tokenize;
