use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::mapreduce::errors::{FragmentError, MapReduceError, ReduceError};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The unified error type for the wordrank crate
#[derive(Error, Debug)]
pub enum WordRankError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Input error: {message}")]
    Input {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Processing error: {message}")]
    Processing {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Output error: {message}")]
    Output {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] {message}")]
    Internal {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl WordRankError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an input error with specific code and path
    pub fn input_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a processing error with specific code
    pub fn processing_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Processing {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an output error with default code
    pub fn output(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Output {
            code: ErrorCode::OUTPUT_WRITE_FAILED,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an internal error with specific code
    pub fn internal_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Processing { source: src, .. }
            | Self::Output { source: src, .. }
            | Self::Internal { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Input { message, .. }
            | Self::Processing { message, .. }
            | Self::Output { message, .. }
            | Self::Internal { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Input { .. } => 3,
            Self::Processing { .. } => 4,
            Self::Output { .. } => 5,
            Self::Internal { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Input { code, .. }
            | Self::Processing { code, .. }
            | Self::Output { code, .. }
            | Self::Internal { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Input { message, path, .. } => match path {
                Some(p) => format!("Cannot read document {}: {}", p.display(), message),
                None => format!("Input error: {}", message),
            },
            Self::Processing { message, .. } => format!("Processing failed: {}", message),
            Self::Output { message, path, .. } => match path {
                Some(p) => format!("Cannot write report {}: {}", p.display(), message),
                None => format!("Output error: {}", message),
            },
            Self::Internal { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        msg
    }
}

/// Type alias for Results using WordRankError
pub type Result<T> = std::result::Result<T, WordRankError>;

impl From<MapReduceError> for WordRankError {
    fn from(err: MapReduceError) -> Self {
        let message = err.to_string();
        let converted = match &err {
            MapReduceError::Fragment(FragmentError::Io { path, .. }) => WordRankError::input_with_code(
                ErrorCode::INPUT_READ_FAILED,
                message,
                Some(path.clone()),
            ),
            MapReduceError::Fragment(FragmentError::WordTooLong { .. }) => {
                WordRankError::processing_with_code(ErrorCode::PROCESSING_WORD_TOO_LONG, message)
            }
            MapReduceError::Reduce(ReduceError::FibonacciOverflow { .. }) => {
                WordRankError::processing_with_code(
                    ErrorCode::PROCESSING_FIBONACCI_OVERFLOW,
                    message,
                )
            }
            MapReduceError::NonContiguousFragments { .. } => {
                WordRankError::processing_with_code(ErrorCode::PROCESSING_FRAGMENT_ORDER, message)
            }
            MapReduceError::WorkerPanicked { .. } => {
                WordRankError::internal_with_code(ErrorCode::INTERNAL_WORKER_PANICKED, message)
            }
        };
        converted.with_source(err)
    }
}

impl From<toml::de::Error> for WordRankError {
    fn from(err: toml::de::Error) -> Self {
        WordRankError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}
