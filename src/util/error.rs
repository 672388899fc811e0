//! Error types for modalmatch.

use thiserror::Error;

/// Errors raised while populating a detector from model-store documents.
///
/// All of these are fatal at configuration time: detection must not run
/// against a model it only partially holds, so any load failure aborts
/// detector construction.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    /// A required attachment is absent from a document.
    #[error("document `{object_id}` is missing attachment `{attachment}`")]
    MissingAttachment {
        object_id: String,
        attachment: &'static str,
    },
    /// An attachment was present but failed to deserialize.
    #[error("document `{object_id}` has a malformed `{attachment}` attachment: {reason}")]
    MalformedAttachment {
        object_id: String,
        attachment: &'static str,
        reason: String,
    },
    /// The pose arrays do not line up with the template blob.
    #[error(
        "document `{object_id}`: {templates} templates but {rotations} rotations / {translations} translations"
    )]
    PoseCountMismatch {
        object_id: String,
        templates: usize,
        rotations: usize,
        translations: usize,
    },
}

/// Errors surfaced during a detection cycle.
#[derive(Debug, Error, PartialEq)]
pub enum DetectError {
    /// A match referenced pose data absent from the pose table.
    ///
    /// The loader guarantees index alignment between the engine and the
    /// pose table, so hitting this means the engine and the loaded model
    /// have diverged. Not a recoverable runtime condition.
    #[error("no pose entry for class `{class_id}` template {template_index}")]
    PoseLookup {
        class_id: String,
        template_index: usize,
    },
}

/// Errors from constructing or converting frame buffers.
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer does not hold exactly the required elements.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Reading or writing an image file failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}
