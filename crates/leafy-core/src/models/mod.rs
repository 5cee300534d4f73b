//! Pipeline values
//!
//! Everything here is transient: a value is created by one stage, consumed by
//! the next, and never mutated in between.

pub mod file;
pub mod payload;
pub mod upload;

pub use file::{MediaKind, PendingFile};
pub use payload::{NormalizedPayload, UploadPayload};
pub use upload::{AttemptOutcome, BatchOutcome, FailedFile, RejectedFile, UploadAttempt};
