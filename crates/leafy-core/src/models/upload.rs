use serde::{Deserialize, Serialize};

/// Result of one network transfer try
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success { urls: Vec<String> },
    RetryableFailure { reason: String },
    TerminalFailure { reason: String },
}

/// One try inside a retry loop. `attempt_number` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadAttempt {
    pub attempt_number: u32,
    pub outcome: AttemptOutcome,
}

impl UploadAttempt {
    /// First public URL returned by the endpoint, only present on success.
    pub fn result_url(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::Success { urls } => urls.first().map(String::as_str),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Success { .. })
    }
}

/// A file that passed validation but could not be transferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub name: String,
    pub reason: String,
    pub attempts: u32,
}

/// A file refused by validation; it never reached normalization or transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedFile {
    pub name: String,
    pub reason: String,
}

/// Aggregated result of one batch.
///
/// `succeeded_urls` is in completion order. Validation rejections appear only
/// in `rejected_files`, so `succeeded_urls.len() + failed_files.len()` never
/// exceeds the number of files that passed validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub succeeded_urls: Vec<String>,
    pub failed_files: Vec<FailedFile>,
    pub rejected_files: Vec<RejectedFile>,
}

impl BatchOutcome {
    /// URLs to report on completion, or `None` when nothing succeeded.
    ///
    /// A batch with zero successes produces no completion notification.
    pub fn completed_urls(&self) -> Option<&[String]> {
        if self.succeeded_urls.is_empty() {
            None
        } else {
            Some(&self.succeeded_urls)
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty() || !self.rejected_files.is_empty()
    }
}
