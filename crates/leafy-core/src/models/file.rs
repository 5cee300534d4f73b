use bytes::Bytes;

/// Broad media category derived from a MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type by its top-level type. Case-insensitive.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let normalized = mime_type.trim().to_ascii_lowercase();
        if normalized.starts_with("image/") {
            Some(MediaKind::Image)
        } else if normalized.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// A user-selected file waiting to go through the pipeline.
///
/// `size_bytes` is the size the caller declared at selection time; validation
/// only ever looks at declared metadata.
#[derive(Clone, Debug)]
pub struct PendingFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub data: Bytes,
}

impl PendingFile {
    /// Create a pending file whose declared size is the length of `data`.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: data.len() as u64,
            data,
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.mime_type)
    }

    pub fn is_image(&self) -> bool {
        self.kind() == Some(MediaKind::Image)
    }
}
