//! Transfer with retry.

use std::sync::Arc;

use leafy_core::{AttemptOutcome, FailedFile, RetryConfig, UploadAttempt, UploadPayload};
use leafy_storage::UploadTransport;

use super::observer::UploadObserver;

/// Every attempt made for one payload, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReport {
    pub file_name: String,
    pub attempts: Vec<UploadAttempt>,
}

impl TransferReport {
    /// URLs from the successful attempt, if any.
    pub fn urls(&self) -> Option<&[String]> {
        self.attempts.last().and_then(|attempt| match &attempt.outcome {
            AttemptOutcome::Success { urls } => Some(urls.as_slice()),
            _ => None,
        })
    }

    /// Reason of the final failed attempt; `None` on success.
    pub fn failure_reason(&self) -> Option<&str> {
        self.attempts.last().and_then(|attempt| match &attempt.outcome {
            AttemptOutcome::RetryableFailure { reason }
            | AttemptOutcome::TerminalFailure { reason } => Some(reason.as_str()),
            AttemptOutcome::Success { .. } => None,
        })
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempts.len() as u32
    }

    pub fn into_failed_file(self) -> Option<FailedFile> {
        let reason = self.failure_reason()?.to_string();
        Some(FailedFile {
            attempts: self.attempt_count(),
            name: self.file_name,
            reason,
        })
    }
}

/// Sends payloads through a transport, retrying transient failures.
///
/// Attempts are strictly sequential. After failed attempt `n` the wait is
/// `base_delay * n`; a terminal failure or the last attempt ends the loop
/// without waiting.
#[derive(Clone)]
pub struct TransferOrchestrator {
    transport: Arc<dyn UploadTransport>,
    retry: RetryConfig,
}

impl TransferOrchestrator {
    pub fn new(transport: Arc<dyn UploadTransport>, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub async fn transfer(
        &self,
        name: &str,
        payload: &UploadPayload,
        observer: &dyn UploadObserver,
    ) -> TransferReport {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempts = Vec::with_capacity(max_attempts as usize);

        for attempt_number in 1..=max_attempts {
            match self.transport.upload(payload).await {
                Ok(urls) => {
                    tracing::debug!(
                        file_name = %name,
                        attempt = attempt_number,
                        backend = %self.transport.backend_type(),
                        "Upload attempt succeeded"
                    );
                    attempts.push(UploadAttempt {
                        attempt_number,
                        outcome: AttemptOutcome::Success { urls },
                    });
                    break;
                }
                Err(e) => {
                    let reason = e.to_string();

                    if !e.is_retryable() {
                        tracing::debug!(
                            file_name = %name,
                            attempt = attempt_number,
                            error = %e,
                            "Upload failed with a terminal error"
                        );
                        attempts.push(UploadAttempt {
                            attempt_number,
                            outcome: AttemptOutcome::TerminalFailure { reason },
                        });
                        break;
                    }

                    attempts.push(UploadAttempt {
                        attempt_number,
                        outcome: AttemptOutcome::RetryableFailure { reason },
                    });

                    if attempt_number == max_attempts {
                        break;
                    }

                    observer.on_retry(name, attempt_number + 1, max_attempts, &e);
                    tokio::time::sleep(self.retry.delay_after(attempt_number)).await;
                }
            }
        }

        TransferReport {
            file_name: name.to_string(),
            attempts,
        }
    }
}
