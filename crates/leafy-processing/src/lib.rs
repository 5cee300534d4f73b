//! Leafy Processing Library
//!
//! The upload pipeline proper: validate → normalize (images) → transfer, one
//! file at a time, with per-file failures reported and aggregated into a
//! [`BatchOutcome`](leafy_core::BatchOutcome).

#[cfg(feature = "image")]
pub mod compression;
#[cfg(feature = "image")]
pub mod image;
pub mod report;
pub mod upload;
pub mod validator;

#[cfg(feature = "image")]
pub use compression::{JpegEncoder, LossyEncoder};
#[cfg(feature = "image")]
pub use crate::image::{ImageNormalizer, NormalizeError};
pub use report::{format_file_size, OptimizationReport};
pub use upload::{
    NoopObserver, TracingObserver, TransferOrchestrator, TransferReport, UploadObserver,
    UploadPipeline,
};
pub use validator::{MediaValidator, ValidationError};
