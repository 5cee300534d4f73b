//! Transport abstraction trait
//!
//! This module defines the `UploadTransport` trait every destination
//! implements, and the error type whose classification drives retries.

use crate::TransportBackend;
use async_trait::async_trait;
use leafy_core::constants::{RETRYABLE_ERROR_FRAGMENTS, RETRYABLE_STATUS_CODES};
use leafy_core::{ErrorMetadata, LogLevel, UploadPayload};
use thiserror::Error;

/// Transfer operation errors
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Upload failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("No URLs returned from upload")]
    NoUrls,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TransferError {
    /// HTTP status of the failed response, if the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransferError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transient failures: the message mentions a timeout, network or
    /// connection problem, or the status is one of the gateway codes.
    /// Everything else is terminal.
    pub fn is_retryable(&self) -> bool {
        if let Some(status) = self.status() {
            if RETRYABLE_STATUS_CODES.contains(&status) {
                return true;
            }
        }

        let message = self.to_string().to_lowercase();
        RETRYABLE_ERROR_FRAGMENTS
            .iter()
            .any(|fragment| message.contains(fragment))
    }
}

impl ErrorMetadata for TransferError {
    fn error_code(&self) -> &'static str {
        match self {
            TransferError::Status { .. } => "UPLOAD_STATUS",
            TransferError::Network(_) => "NETWORK_ERROR",
            TransferError::Timeout(_) => "TIMEOUT",
            TransferError::NoUrls => "NO_URLS_RETURNED",
            TransferError::InvalidResponse(_) => "INVALID_RESPONSE",
            TransferError::InvalidKey(_) => "INVALID_KEY",
            TransferError::IoError(_) => "IO_ERROR",
            TransferError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        self.is_retryable()
    }

    fn log_level(&self) -> LogLevel {
        if self.is_retryable() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        }
    }
}

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

/// Destination for upload payloads
///
/// "Send bytes + filename + content-type, receive the public URLs." The
/// pipeline neither knows nor cares how the destination stores the data.
/// Implementations are constructed by the caller and injected; there is no
/// process-wide client.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload one payload and return the public URL(s) it is reachable at.
    async fn upload(&self, payload: &UploadPayload) -> TransferResult<Vec<String>>;

    /// Get the transport backend type
    fn backend_type(&self) -> TransportBackend;
}
