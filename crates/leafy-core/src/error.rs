//! Error metadata
//!
//! Every error type in the pipeline describes how it should be reported: a
//! stable machine-readable code, whether trying again could help, and the log
//! level it deserves. Observers read this when they render a notice.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like validation rejections
    Debug,
    /// Warning level - for recoverable issues like a failed optimization
    Warn,
    /// Error level - for failures that lose a file
    Error,
}

/// Metadata describing how an error should be presented and handled
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is transient (worth another attempt)
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}
