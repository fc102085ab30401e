//! Error types for glyphnorm-recog

use thiserror::Error;

/// Errors that can occur during detection, normalization and classification
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphnorm_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] glyphnorm_transform::TransformError),

    /// I/O error (label files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Every row or every column matches the background
    #[error("empty drawing: no ink detected")]
    EmptyDrawing,

    /// The crop region collapsed to zero width or height
    #[error("degenerate crop: {width}x{height}")]
    DegenerateCrop { width: u32, height: u32 },

    /// Scaling or padding arithmetic produced a malformed glyph
    #[error("invariant violation: {context}")]
    InvariantViolation { context: String },

    /// An inference engine failed or returned malformed scores
    #[error("inference error: {0}")]
    Inference(String),

    /// No classifier has been published yet
    #[error("classifier not ready")]
    NotReady,

    /// Classifier loading failed; the slot will never become ready
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),
}

impl RecogError {
    /// True for the "no ink" conditions, which are handled identically.
    pub fn is_empty_drawing(&self) -> bool {
        matches!(
            self,
            RecogError::EmptyDrawing | RecogError::DegenerateCrop { .. }
        )
    }
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
