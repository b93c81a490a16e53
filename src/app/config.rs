//! Application configuration
//!
//! Process-wide settings that are not part of a run: verbosity and the
//! log filter.

use crate::config::ENV_LOG;

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// `EnvFilter` directive overriding the verbosity-derived level
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_filter: None,
        }
    }

    /// Pick up the log filter from `WORDRANK_LOG`, if set
    pub fn from_env(verbose: u8) -> Self {
        Self::new(verbose).with_log_filter(std::env::var(ENV_LOG).ok())
    }

    pub fn with_log_filter(mut self, filter: Option<String>) -> Self {
        self.log_filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// The directive handed to the subscriber
    pub fn filter_directive(&self) -> &str {
        self.log_filter.as_deref().unwrap_or_else(|| self.log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(3).log_level(), "trace");
    }

    #[test]
    fn test_log_filter_overrides_level() {
        let config = AppConfig::new(2).with_log_filter(Some("wordrank=info".into()));
        assert_eq!(config.filter_directive(), "wordrank=info");

        let blank = AppConfig::new(1).with_log_filter(Some("  ".into()));
        assert_eq!(blank.filter_directive(), "debug");
    }
}
