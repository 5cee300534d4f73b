//! Batch upload: per-file stages, retrying transfer and progress notices.

pub mod observer;
pub mod pipeline;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

pub use observer::{NoopObserver, TracingObserver, UploadObserver};
pub use pipeline::UploadPipeline;
pub use transfer::{TransferOrchestrator, TransferReport};
