//! Run orchestration
//!
//! Resolves the run configuration, reads the manifest, discovers the
//! documents, runs the engine and writes the report. Nothing is written
//! when any step fails.

use crate::abstractions::RealDocumentSource;
use crate::config::{FileConfig, Manifest, RunConfig};
use crate::documents::discover_documents;
use crate::error::{ErrorCode, Result, WordRankError};
use crate::mapreduce::{MapReduceConfig, MapReduceEngine, RunReport};
use crate::output::write_report;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything a single run needs from the command line
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub workers: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    /// `--strict` given; never turns strict mode off
    pub strict: bool,
    pub strip_prefix: Option<String>,
    pub config: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(workers: usize, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            workers,
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }
}

/// Layer defaults, config file, environment and flags, in that order
pub fn resolve_config<F>(request: &RunRequest, env_lookup: F) -> Result<RunConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RunConfig::new();
    if let Some(path) = &request.config {
        debug!("Loading run configuration from {}", path.display());
        config.merge_file(FileConfig::load(path)?)?;
    }
    config.merge_env_with(env_lookup)?;

    if request.strict {
        config.strict = true;
    }
    if let Some(prefix) = &request.strip_prefix {
        config.strip_prefix = prefix.clone();
    }
    Ok(config)
}

/// Execute a run against the real filesystem and process environment
pub fn execute(request: &RunRequest) -> Result<RunReport> {
    execute_with_env(request, |key| std::env::var(key).ok())
}

/// Execute a run with a custom environment lookup
pub fn execute_with_env<F>(request: &RunRequest, env_lookup: F) -> Result<RunReport>
where
    F: Fn(&str) -> Option<String>,
{
    if request.workers == 0 {
        return Err(WordRankError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            "worker count must be positive",
        ));
    }

    let config = resolve_config(request, env_lookup)?;
    let manifest = Manifest::load(&request.input)?;
    info!(
        "Manifest {} lists {} documents, fragment size {}",
        request.input.display(),
        manifest.documents.len(),
        manifest.fragment_size
    );

    let discovery = discover_documents(&manifest.documents, config.strict)?;

    let engine_config = MapReduceConfig::new(request.workers, manifest.fragment_size)
        .with_strict(config.strict)
        .with_separators(config.separator_set());
    let engine = MapReduceEngine::new(engine_config, RealDocumentSource::new());
    let mut report = engine.run(&discovery.documents)?;
    report.document_errors += discovery.failures;

    write_report(&request.output, &report.results, &config.strip_prefix)?;

    if report.has_errors() {
        warn!(
            "Completed with {} skipped fragments and {} documents without a rank",
            report.fragment_errors, report.document_errors
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_zero_workers_rejected() {
        let request = RunRequest::new(0, "in.txt", "out.csv");
        let err = execute_with_env(&request, no_env).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }

    #[test]
    fn test_flags_override_environment() {
        let request = RunRequest::new(1, "in.txt", "out.csv")
            .with_strict(true)
            .with_strip_prefix("cli/");
        let config = resolve_config(&request, |key| match key {
            "WORDRANK_STRICT" => Some("false".into()),
            "WORDRANK_STRIP_PREFIX" => Some("env/".into()),
            _ => None,
        })
        .unwrap();

        assert!(config.strict);
        assert_eq!(config.strip_prefix, "cli/");
    }

    #[test]
    fn test_environment_applies_without_flags() {
        let request = RunRequest::new(1, "in.txt", "out.csv");
        let config = resolve_config(&request, |key| {
            (key == "WORDRANK_STRICT").then(|| "true".to_string())
        })
        .unwrap();
        assert!(config.strict);
    }

    #[test]
    fn test_end_to_end_run() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        fs::write(&doc, "foo bar bazzz").unwrap();
        let manifest = dir.path().join("manifest.txt");
        fs::write(&manifest, format!("4\n1\n{}\n", doc.display())).unwrap();
        let output = dir.path().join("out.csv");

        let prefix = format!("{}/", dir.path().display());
        let request = RunRequest::new(2, &manifest, &output).with_strip_prefix(prefix);
        let report = execute_with_env(&request, no_env).unwrap();

        assert_eq!(report.results.len(), 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "doc.txt,4.67,5,1\n");
    }

    #[test]
    fn test_strict_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("manifest.txt");
        fs::write(&manifest, "4\n1\nmissing.txt\n").unwrap();
        let output = dir.path().join("out.csv");

        let request = RunRequest::new(1, &manifest, &output).with_strict(true);
        let err = execute_with_env(&request, no_env).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!output.exists());
    }
}
