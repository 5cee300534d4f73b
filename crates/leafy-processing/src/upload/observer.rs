//! Progress notices for a running batch.

use std::fmt::Display;

use leafy_core::{ErrorMetadata, FailedFile, LogLevel};
use leafy_storage::TransferError;

#[cfg(feature = "image")]
use crate::image::NormalizeError;
use crate::report::OptimizationReport;
use crate::validator::ValidationError;

/// Receives user-facing notices while a batch runs.
///
/// Every method has a no-op default so callers only implement what they
/// display. Notices are delivered in order, from the task running the batch.
pub trait UploadObserver: Send + Sync {
    /// A file was refused before processing.
    fn on_rejected(&self, _name: &str, _error: &ValidationError) {}

    /// Image normalization is starting.
    fn on_optimizing(&self, _name: &str) {}

    fn on_optimized(&self, _name: &str, _report: &OptimizationReport) {}

    /// Normalization failed; the original bytes are uploaded instead.
    #[cfg(feature = "image")]
    fn on_optimization_failed(&self, _name: &str, _error: &NormalizeError) {}

    /// A transient failure; `next_attempt` will start after the backoff.
    fn on_retry(
        &self,
        _name: &str,
        _next_attempt: u32,
        _max_attempts: u32,
        _error: &TransferError,
    ) {
    }

    fn on_uploaded(&self, _name: &str, _urls: &[String]) {}

    fn on_failed(&self, _failure: &FailedFile) {}

    /// Batch finished with at least one success. Not called otherwise.
    fn on_complete(&self, _urls: &[String]) {}
}

/// Discards every notice.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl UploadObserver for NoopObserver {}

/// Writes every notice to `tracing`. Error notices are logged at the level
/// the error asks for, with its code.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

fn log_error<E>(name: &str, error: &E, message: &str)
where
    E: ErrorMetadata + Display,
{
    let error_code = error.error_code();
    let recoverable = error.is_recoverable();

    match error.log_level() {
        LogLevel::Debug => tracing::debug!(
            file_name = %name,
            error_code = %error_code,
            recoverable = recoverable,
            error = %error,
            "{}",
            message
        ),
        LogLevel::Warn => tracing::warn!(
            file_name = %name,
            error_code = %error_code,
            recoverable = recoverable,
            error = %error,
            "{}",
            message
        ),
        LogLevel::Error => tracing::error!(
            file_name = %name,
            error_code = %error_code,
            recoverable = recoverable,
            error = %error,
            "{}",
            message
        ),
    }
}

impl UploadObserver for TracingObserver {
    fn on_rejected(&self, name: &str, error: &ValidationError) {
        log_error(name, error, "File rejected");
    }

    fn on_optimizing(&self, name: &str) {
        tracing::info!(file_name = %name, "Optimizing image");
    }

    fn on_optimized(&self, name: &str, report: &OptimizationReport) {
        tracing::info!(
            file_name = %name,
            quality = report.quality,
            encode_passes = report.encode_passes,
            "{}",
            report
        );
    }

    #[cfg(feature = "image")]
    fn on_optimization_failed(&self, name: &str, error: &NormalizeError) {
        log_error(name, error, "Image optimization failed, uploading original");
    }

    fn on_retry(&self, name: &str, next_attempt: u32, max_attempts: u32, error: &TransferError) {
        let message = format!("Retrying upload ({}/{})", next_attempt, max_attempts);
        log_error(name, error, &message);
    }

    fn on_uploaded(&self, name: &str, urls: &[String]) {
        tracing::info!(file_name = %name, urls = ?urls, "File uploaded");
    }

    fn on_failed(&self, failure: &FailedFile) {
        tracing::error!(
            file_name = %failure.name,
            attempts = failure.attempts,
            reason = %failure.reason,
            "Upload failed"
        );
    }

    fn on_complete(&self, urls: &[String]) {
        tracing::info!(count = urls.len(), "Upload complete");
    }
}
