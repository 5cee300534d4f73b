use bytes::Bytes;

use super::file::PendingFile;

/// Output of the image normalizer: a square, re-encoded image.
#[derive(Clone, Debug)]
pub struct NormalizedPayload {
    pub file_name: String,
    pub bytes: Bytes,
    /// Square side in pixels (width == height)
    pub dimensions: (u32, u32),
    pub encoded_size: usize,
    pub original_size: u64,
    pub mime_type: &'static str,
    /// Quality factor of the encode pass that produced `bytes`
    pub quality: f32,
    /// 1 or 2
    pub encode_passes: u8,
}

/// What the transfer orchestrator actually sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPayload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadPayload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<NormalizedPayload> for UploadPayload {
    fn from(payload: NormalizedPayload) -> Self {
        Self {
            file_name: payload.file_name,
            content_type: payload.mime_type.to_string(),
            data: payload.bytes,
        }
    }
}

/// Unmodified passthrough (videos, or images whose normalization failed).
impl From<PendingFile> for UploadPayload {
    fn from(file: PendingFile) -> Self {
        Self {
            file_name: file.name,
            content_type: file.mime_type,
            data: file.data,
        }
    }
}
