//! # wordrank
//!
//! Ranks text documents by a Fibonacci-weighted average of their word
//! lengths, using a two-phase parallel map/reduce over raw file bytes.
//!
//! ## Usage
//!
//! ```bash
//! wordrank [-v] [--strict] [--strip-prefix PREFIX] [--config PATH] <WORKERS> <INPUT> <OUTPUT>
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Document byte access behind a trait, with a real and an in-memory source
//! - `app` - Logging setup, fatal error handling and run orchestration
//! - `cli` - Command-line arguments
//! - `config` - Run configuration layering and manifest parsing
//! - `documents` - Document discovery from manifest paths
//! - `error` - Crate-level error type and error codes
//! - `mapreduce` - Fragmenting, map, combine, reduce and ranking
//! - `output` - CSV report writing
pub mod abstractions;
pub mod app;
pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod mapreduce;
pub mod output;

pub use error::{Result, WordRankError};
pub use mapreduce::{MapReduceConfig, MapReduceEngine, RunReport};
