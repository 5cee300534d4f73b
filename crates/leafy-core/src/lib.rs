//! Leafy Core Library
//!
//! This crate provides the configuration, error metadata, constants and shared
//! models used by every stage of the Leafy media upload pipeline.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod transport_types;

// Re-export commonly used types
pub use config::{megabytes_to_bytes, NormalizeConfig, RetryConfig, TransportConfig, UploadConfig};
pub use error::{ErrorMetadata, LogLevel};
pub use models::{
    AttemptOutcome, BatchOutcome, FailedFile, MediaKind, NormalizedPayload, PendingFile,
    RejectedFile, UploadAttempt, UploadPayload,
};
pub use transport_types::TransportBackend;
