/// Error code registry for wordrank
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Input (document access) errors
/// - 3000-3999: Processing errors
/// - 4000-4999: Output errors
/// - 9000-9999: Internal errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const MANIFEST_NOT_FOUND: u16 = 1010;
    pub const MANIFEST_MISSING_LINE: u16 = 1011;
    pub const MANIFEST_INVALID_NUMBER: u16 = 1012;
    pub const MANIFEST_EMPTY_PATH: u16 = 1013;

    // Input errors (2000-2999)
    pub const INPUT_NOT_FOUND: u16 = 2001;
    pub const INPUT_PERMISSION_DENIED: u16 = 2002;
    pub const INPUT_READ_FAILED: u16 = 2003;

    // Processing errors (3000-3999)
    pub const PROCESSING_WORD_TOO_LONG: u16 = 3001;
    pub const PROCESSING_FIBONACCI_OVERFLOW: u16 = 3002;
    pub const PROCESSING_FRAGMENT_ORDER: u16 = 3003;

    // Output errors (4000-4999)
    pub const OUTPUT_WRITE_FAILED: u16 = 4001;

    // Internal errors (9000-9999)
    pub const INTERNAL_WORKER_PANICKED: u16 = 9001;
}

/// Get a human-readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Invalid TOML in configuration file",
        ErrorCode::CONFIG_INVALID_VALUE => "Invalid configuration value",
        ErrorCode::MANIFEST_NOT_FOUND => "Input manifest could not be read",
        ErrorCode::MANIFEST_MISSING_LINE => "Input manifest ended early",
        ErrorCode::MANIFEST_INVALID_NUMBER => "Input manifest holds a malformed number",
        ErrorCode::MANIFEST_EMPTY_PATH => "Input manifest lists an empty document path",

        ErrorCode::INPUT_NOT_FOUND => "Document not found",
        ErrorCode::INPUT_PERMISSION_DENIED => "Permission denied reading document",
        ErrorCode::INPUT_READ_FAILED => "Failed to read document bytes",

        ErrorCode::PROCESSING_WORD_TOO_LONG => "Word exceeds the supported length",
        ErrorCode::PROCESSING_FIBONACCI_OVERFLOW => "Word length too large for rank weights",
        ErrorCode::PROCESSING_FRAGMENT_ORDER => "Fragments are not grouped by document",

        ErrorCode::OUTPUT_WRITE_FAILED => "Failed to write the report",

        ErrorCode::INTERNAL_WORKER_PANICKED => "A worker thread panicked",

        _ => "Unknown error code",
    }
}
