use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with [`SilhouetteError`].
pub type SilhouetteResult<T> = std::result::Result<T, SilhouetteError>;

/// Error types that can occur while converting an image to an SVG silhouette.
///
/// Every failure is terminal for the conversion attempt; nothing is retried
/// or recovered internally.
#[derive(Debug, Error)]
pub enum SilhouetteError {
    /// Input path does not resolve to an existing file.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// Input exists but could not be decoded as a raster image.
    #[error("invalid image format: {0}")]
    InvalidImage(#[source] image::ImageError),
    /// Binarization, tracing, or serialization failed; carries the
    /// underlying cause's message.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
}

impl SilhouetteError {
    /// Wrap any cause into a [`SilhouetteError::ConversionFailed`].
    pub(crate) fn conversion(cause: impl std::fmt::Display) -> Self {
        SilhouetteError::ConversionFailed(cause.to_string())
    }
}
