//! Upload pipeline: validate → normalize → transfer, per file

use std::sync::Arc;

use leafy_core::{BatchOutcome, FailedFile, PendingFile, RejectedFile, UploadConfig, UploadPayload};
use leafy_storage::{TransferError, UploadTransport};

#[cfg(feature = "image")]
use crate::image::ImageNormalizer;
#[cfg(feature = "image")]
use crate::report::OptimizationReport;
use crate::validator::MediaValidator;

use super::observer::UploadObserver;
use super::transfer::TransferOrchestrator;

/// Drives a batch of files through the upload stages.
///
/// Files are processed one at a time, in input order; each file's stages
/// (including its whole retry loop) finish before the next file starts. A
/// failure only ever affects the file it happened on.
pub struct UploadPipeline {
    validator: MediaValidator,
    #[cfg(feature = "image")]
    normalizer: Option<ImageNormalizer>,
    orchestrator: TransferOrchestrator,
    max_number_of_files: usize,
}

impl UploadPipeline {
    pub fn new(config: &UploadConfig, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            validator: MediaValidator::from_config(config),
            #[cfg(feature = "image")]
            normalizer: Some(ImageNormalizer::new(config.normalize.clone())),
            orchestrator: TransferOrchestrator::new(transport, config.retry.clone()),
            max_number_of_files: config.max_number_of_files,
        }
    }

    /// Replace the image normalizer.
    #[cfg(feature = "image")]
    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Upload images as-is.
    #[cfg(feature = "image")]
    pub fn without_normalizer(mut self) -> Self {
        self.normalizer = None;
        self
    }

    /// Run a whole batch and return what happened to every file.
    ///
    /// `observer.on_complete` fires once at the end, and only when at least
    /// one file was uploaded. The returned outcome is always complete.
    pub async fn run_batch(
        &self,
        files: Vec<PendingFile>,
        observer: &dyn UploadObserver,
    ) -> BatchOutcome {
        if files.len() > self.max_number_of_files {
            tracing::warn!(
                file_count = files.len(),
                max_number_of_files = self.max_number_of_files,
                "Batch is larger than the configured file count, processing all files"
            );
        }

        let mut outcome = BatchOutcome::default();

        for file in files {
            let name = file.name.clone();

            if let Err(e) = self.validator.validate(&file) {
                observer.on_rejected(&name, &e);
                outcome.rejected_files.push(RejectedFile {
                    name,
                    reason: e.to_string(),
                });
                continue;
            }

            let payload = self.prepare(file, observer).await;
            let report = self.orchestrator.transfer(&name, &payload, observer).await;

            let urls = report.urls().map(<[String]>::to_vec).unwrap_or_default();
            if let Some(url) = urls.first() {
                observer.on_uploaded(&name, &urls);
                outcome.succeeded_urls.push(url.clone());
                continue;
            }

            let attempts = report.attempt_count();
            let failure = report.into_failed_file().unwrap_or(FailedFile {
                name,
                reason: TransferError::NoUrls.to_string(),
                attempts,
            });
            observer.on_failed(&failure);
            outcome.failed_files.push(failure);
        }

        tracing::info!(
            succeeded = outcome.succeeded_urls.len(),
            failed = outcome.failed_files.len(),
            rejected = outcome.rejected_files.len(),
            "Upload batch finished"
        );

        if let Some(urls) = outcome.completed_urls() {
            observer.on_complete(urls);
        }

        outcome
    }

    /// Turn a validated file into what gets sent. Images are normalized when
    /// possible; anything else, or an image that fails to normalize, is sent
    /// unchanged.
    #[cfg(feature = "image")]
    async fn prepare(&self, file: PendingFile, observer: &dyn UploadObserver) -> UploadPayload {
        let normalizer = match &self.normalizer {
            Some(normalizer) if file.is_image() => normalizer,
            _ => return UploadPayload::from(file),
        };

        observer.on_optimizing(&file.name);

        match normalizer.normalize(&file).await {
            Ok(normalized) => {
                let report = OptimizationReport {
                    original_size: normalized.original_size,
                    compressed_size: normalized.encoded_size as u64,
                    side: normalized.dimensions.0,
                    quality: normalized.quality,
                    encode_passes: normalized.encode_passes,
                };
                observer.on_optimized(&file.name, &report);
                UploadPayload::from(normalized)
            }
            Err(e) => {
                observer.on_optimization_failed(&file.name, &e);
                UploadPayload::from(file)
            }
        }
    }

    #[cfg(not(feature = "image"))]
    async fn prepare(&self, file: PendingFile, _observer: &dyn UploadObserver) -> UploadPayload {
        UploadPayload::from(file)
    }
}
