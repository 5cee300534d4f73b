//! Scripted transport and recording observer shared by the upload tests.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use leafy_core::{FailedFile, PendingFile, UploadPayload};
use leafy_storage::{TransferError, TransferResult, TransportBackend, UploadTransport};

use super::observer::UploadObserver;
#[cfg(feature = "image")]
use crate::image::NormalizeError;
use crate::report::OptimizationReport;
use crate::validator::ValidationError;

pub fn status(status: u16) -> TransferError {
    TransferError::Status {
        status,
        message: format!("status {}", status),
    }
}

pub fn payload(name: &str) -> UploadPayload {
    UploadPayload {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        data: Bytes::from_static(b"payload"),
    }
}

pub fn png_file(name: &str, width: u32, height: u32) -> PendingFile {
    let img = image::RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 200]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    PendingFile::new(name, "image/png", out.into_inner())
}

type Fallback = Box<dyn Fn() -> TransferError + Send + Sync>;

/// Answers uploads from a fixed script, then from `fallback` once the script
/// runs out. Records every payload it receives.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<TransferResult<Vec<String>>>>,
    fallback: Option<Fallback>,
    sent: Mutex<Vec<UploadPayload>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<TransferResult<Vec<String>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn always(error: impl Fn() -> TransferError + Send + Sync + 'static) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(Box::new(error)),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<UploadPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadTransport for ScriptedTransport {
    async fn upload(&self, payload: &UploadPayload) -> TransferResult<Vec<String>> {
        self.sent.lock().unwrap().push(payload.clone());

        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }

        match &self.fallback {
            Some(error) => Err(error()),
            None => Err(TransferError::ConfigError("script exhausted".to_string())),
        }
    }

    fn backend_type(&self) -> TransportBackend {
        TransportBackend::Http
    }
}

/// Flattens notices into `kind:name` strings.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
    completions: Mutex<Vec<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<Vec<String>> {
        self.completions.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl UploadObserver for RecordingObserver {
    fn on_rejected(&self, name: &str, _error: &ValidationError) {
        self.push(format!("rejected:{}", name));
    }

    fn on_optimizing(&self, name: &str) {
        self.push(format!("optimizing:{}", name));
    }

    fn on_optimized(&self, name: &str, _report: &OptimizationReport) {
        self.push(format!("optimized:{}", name));
    }

    #[cfg(feature = "image")]
    fn on_optimization_failed(&self, name: &str, _error: &NormalizeError) {
        self.push(format!("optimization_failed:{}", name));
    }

    fn on_retry(&self, name: &str, next_attempt: u32, max_attempts: u32, _error: &TransferError) {
        self.push(format!("retry:{}:{}/{}", name, next_attempt, max_attempts));
    }

    fn on_uploaded(&self, name: &str, _urls: &[String]) {
        self.push(format!("uploaded:{}", name));
    }

    fn on_failed(&self, failure: &FailedFile) {
        self.push(format!("failed:{}", failure.name));
    }

    fn on_complete(&self, urls: &[String]) {
        self.completions.lock().unwrap().push(urls.to_vec());
    }
}
