pub mod background;
pub mod error;
pub mod svg;
pub mod vectorizer;

pub use error::{SilhouetteError, SilhouetteResult};
pub use svg::{PathSegment, Point, SvgDocument, TracedCurve};
pub use vectorizer::ImageVectorizer;
pub use vectorizer::trace::{CurveTracer, TraceOptions};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::RgbImage;

use crate::background::strip_background;

/// Entry point for configuring and running silhouette conversion.
#[derive(Debug, Clone)]
pub struct Silhouette {
    /// Fixed tracing parameters used when converting.
    trace_options: TraceOptions,
}

impl Silhouette {
    pub fn new() -> Self {
        Self {
            trace_options: TraceOptions::default(),
        }
    }

    /// Replace the tracing options used by [`Silhouette::convert`].
    pub fn with_trace_options(mut self, options: TraceOptions) -> Self {
        self.trace_options = options;
        self
    }

    /// Get a reference to the tracing options.
    pub fn trace_options(&self) -> &TraceOptions {
        &self.trace_options
    }

    /// Load a single image and strip its near-white background, returning a
    /// handle from which the vector artefacts can be derived.
    ///
    /// Fails with [`SilhouetteError::NotFound`] when the path does not exist
    /// at call time and [`SilhouetteError::InvalidImage`] when the file
    /// cannot be decoded as a raster image.
    pub fn for_image(&self, image_path: impl AsRef<Path>) -> SilhouetteResult<StrippedImage> {
        let path = image_path.as_ref();
        if !path.exists() {
            return Err(SilhouetteError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let decoded = image::open(path).map_err(SilhouetteError::InvalidImage)?;
        let rgb = decoded.to_rgb8();
        let stripped = strip_background(&rgb);
        Ok(StrippedImage::new(rgb, stripped))
    }

    /// Run the full pipeline: strip the background, trace the remainder,
    /// and write the SVG document to `output_path`.
    ///
    /// The document is rendered in memory and written with a single call,
    /// so either a complete well-formed SVG file is produced or no output
    /// file at all.
    pub fn convert(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> SilhouetteResult<()> {
        let stripped = self.for_image(input_path)?;
        let document = stripped.trace(&CurveTracer, &self.trace_options)?;
        fs::write(output_path.as_ref(), document.to_string())
            .map_err(SilhouetteError::conversion)?;
        Ok(())
    }
}

impl Default for Silhouette {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of loading an image and removing its background, from which the
/// vector artefacts can be derived.
#[derive(Debug, Clone)]
pub struct StrippedImage {
    rgb_image: Arc<RgbImage>,
    stripped: Arc<RgbImage>,
}

impl StrippedImage {
    fn new(rgb_image: RgbImage, stripped: RgbImage) -> Self {
        Self {
            rgb_image: Arc::new(rgb_image),
            stripped: Arc::new(stripped),
        }
    }

    /// Get a reference to the original RGB image.
    pub fn rgb_image(&self) -> &RgbImage {
        self.rgb_image.as_ref()
    }

    /// Get a reference to the background-stripped image.
    pub fn stripped(&self) -> &RgbImage {
        self.stripped.as_ref()
    }

    /// Save the background-stripped image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> SilhouetteResult<()> {
        self.stripped
            .save(path)
            .map_err(SilhouetteError::conversion)?;
        Ok(())
    }

    /// Trace the stripped image using the specified vectorizer and options.
    pub fn trace<V>(&self, vectorizer: &V, options: &V::Options) -> SilhouetteResult<V::Output>
    where
        V: ImageVectorizer,
    {
        vectorizer.vectorize(self.stripped.as_ref(), options)
    }
}
