use leafy_core::{ErrorMetadata, LogLevel, PendingFile, UploadConfig};

use crate::report::format_file_size;

/// Reasons a file is refused before any processing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {name} exceeds the {limit} limit ({size} bytes, max {max} bytes)")]
    FileTooLarge {
        name: String,
        size: u64,
        max: u64,
        limit: String,
    },

    #[error("Invalid file type: {name} must be an image or video file (got {content_type})")]
    InvalidFileType { name: String, content_type: String },
}

impl ValidationError {
    pub fn file_name(&self) -> &str {
        match self {
            ValidationError::FileTooLarge { name, .. } => name,
            ValidationError::InvalidFileType { name, .. } => name,
        }
    }
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ValidationError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Media file validator
///
/// Checks declared metadata only: size against the ceiling, MIME type against
/// the prefix allowlist. No file content is read.
#[derive(Clone, Debug)]
pub struct MediaValidator {
    max_file_size: u64,
    allowed_mime_prefixes: Vec<String>,
}

impl MediaValidator {
    pub fn new(max_file_size: u64, allowed_mime_prefixes: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_mime_prefixes: allowed_mime_prefixes
                .into_iter()
                .map(|p| p.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.max_file_size_bytes,
            config.allowed_mime_prefixes.clone(),
        )
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validate file size. A file of exactly the limit is accepted.
    pub fn validate_file_size(&self, name: &str, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                name: name.to_string(),
                size,
                max: self.max_file_size,
                limit: format_file_size(self.max_file_size),
            });
        }

        Ok(())
    }

    /// Validate the MIME type against the prefix allowlist (case-insensitive).
    pub fn validate_content_type(
        &self,
        name: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let normalized = content_type.trim().to_ascii_lowercase();

        if !self
            .allowed_mime_prefixes
            .iter()
            .any(|prefix| normalized.starts_with(prefix.as_str()))
        {
            return Err(ValidationError::InvalidFileType {
                name: name.to_string(),
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a pending file: size first, then type.
    pub fn validate(&self, file: &PendingFile) -> Result<(), ValidationError> {
        self.validate_file_size(&file.name, file.size_bytes)?;
        self.validate_content_type(&file.name, &file.mime_type)?;
        Ok(())
    }
}
