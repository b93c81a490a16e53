//! Application module
//!
//! Logging setup, fatal error handling and the run orchestration used by
//! the binary.

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::{execute, RunRequest};
