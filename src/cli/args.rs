//! CLI argument structures

use crate::app::RunRequest;
use clap::Parser;
use std::path::PathBuf;

/// Rank text documents by their word-length distribution
#[derive(Parser, Debug)]
#[command(name = "wordrank")]
#[command(about = "wordrank - Rank documents by a Fibonacci-weighted average word length", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of worker threads used by each phase
    pub workers: usize,

    /// Manifest listing the fragment size and the documents to rank
    pub input: PathBuf,

    /// CSV file receiving one line per document
    pub output: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Fail on the first unreadable fragment or over-long word
    #[arg(long)]
    pub strict: bool,

    /// Folder prefix removed from document names in the report
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<String>,

    /// Optional TOML run configuration
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl From<Cli> for RunRequest {
    fn from(cli: Cli) -> Self {
        Self {
            workers: cli.workers,
            input: cli.input,
            output: cli.output,
            strict: cli.strict,
            strip_prefix: cli.strip_prefix,
            config: cli.config,
        }
    }
}
