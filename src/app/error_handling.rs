//! Error handling utilities

use crate::error::{describe_error_code, WordRankError};
use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `WordRankError`: shows the user message always, the developer
///   message (with the full cause chain) in verbose mode
/// - For other errors: shows the error and exits with 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    std::process::exit(report_error(&error, verbose))
}

/// Print the error to stderr and return the process exit code
pub fn report_error(error: &anyhow::Error, verbose: u8) -> i32 {
    if let Some(err) = error.downcast_ref::<WordRankError>() {
        eprintln!("{}", err.user_message());
        if verbose >= 1 {
            eprintln!("E{:04}: {}", err.code(), describe_error_code(err.code()));
            eprintln!("\nContext Chain:\n{}", err.developer_message());
        }
        err.exit_code()
    } else {
        eprintln!("Error: {error}");
        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
        1
    }
}
