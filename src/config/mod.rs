//! Run configuration
//!
//! Settings come from built-in defaults, an optional TOML file,
//! `WORDRANK_*` environment variables and command-line flags, each layer
//! overriding the previous one.

pub mod manifest;

pub use manifest::Manifest;

use crate::error::{ErrorCode, Result, WordRankError};
use crate::mapreduce::separators::{SeparatorSet, DEFAULT_SEPARATORS};
use crate::output::DEFAULT_STRIP_PREFIX;
use serde::Deserialize;
use std::path::Path;

pub const ENV_STRICT: &str = "WORDRANK_STRICT";
pub const ENV_STRIP_PREFIX: &str = "WORDRANK_STRIP_PREFIX";
pub const ENV_LOG: &str = "WORDRANK_LOG";

/// Contents of a TOML run configuration file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub strict: Option<bool>,
    pub strip_prefix: Option<String>,
    pub separators: Option<String>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WordRankError::config_with_code(ErrorCode::CONFIG_NOT_FOUND, "Cannot read config file")
                .with_source(e)
                .with_context(path.display())
        })?;
        Self::from_toml(&content).map_err(|e| e.with_context(path.display()))
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub strict: bool,
    pub strip_prefix: String,
    /// Separator bytes; NUL is always added when the table is built
    pub separators: Vec<u8>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strict: false,
            strip_prefix: DEFAULT_STRIP_PREFIX.to_string(),
            separators: DEFAULT_SEPARATORS.as_bytes().to_vec(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the fields set in a config file
    pub fn merge_file(&mut self, file: FileConfig) -> Result<()> {
        if let Some(strict) = file.strict {
            self.strict = strict;
        }
        if let Some(prefix) = file.strip_prefix {
            self.strip_prefix = prefix;
        }
        if let Some(separators) = file.separators {
            if separators.is_empty() {
                return Err(WordRankError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    "separators must not be empty",
                ));
            }
            self.separators = separators.into_bytes();
        }
        Ok(())
    }

    /// Apply `WORDRANK_*` variables using a custom lookup
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STRICT) {
            self.strict = parse_bool(&value).ok_or_else(|| {
                WordRankError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{} must be true or false, got {:?}", ENV_STRICT, value),
                )
            })?;
        }

        if let Some(prefix) = lookup(ENV_STRIP_PREFIX) {
            self.strip_prefix = prefix;
        }

        Ok(())
    }

    pub fn separator_set(&self) -> SeparatorSet {
        SeparatorSet::from_bytes(&self.separators)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
