use image::{GrayImage, RgbImage};
use visioncortex::{ColorImage, CompoundPathElement, PathSimplifyMode, PointF64};

use crate::svg::{PathSegment, Point, SvgDocument, TracedCurve};
use crate::{SilhouetteError, SilhouetteResult};

use super::ImageVectorizer;

/// Connectivity used when splitting the bitmap into regions. Four-way
/// keeps diagonally-touching corner pixels in separate regions, so
/// ambiguous corners resolve the same way on every run.
const DIAGONAL_CLUSTERING: bool = false;

/// Options for tracing the stripped image into curves.
///
/// These are fixed pipeline constants; [`TraceOptions::default`] is the
/// only configuration the converter uses.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Path simplification mode for traced boundaries.
    pub mode: PathSimplifyMode,
    /// Regions smaller than this many pixels on a side are discarded.
    pub filter_speckle: usize,
    /// Angle in degrees above which a boundary point becomes a corner.
    pub corner_threshold: i32,
    /// Minimum segment length during subdivision.
    pub length_threshold: f64,
    /// Subdivision iteration ceiling during curve fitting.
    pub max_iterations: usize,
    /// Angle in degrees below which adjacent curves are spliced.
    pub splice_threshold: i32,
    /// Grayscale intensity at or above which a pixel is traced.
    pub binarize_threshold: u8,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            mode: PathSimplifyMode::Spline,
            filter_speckle: 1,
            corner_threshold: 60,
            length_threshold: 4.0,
            max_iterations: 10,
            splice_threshold: 45,
            binarize_threshold: 128,
        }
    }
}

/// Vectorizer backend that binarizes the stripped image and traces the
/// remaining regions into closed curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveTracer;

impl ImageVectorizer for CurveTracer {
    type Options = TraceOptions;
    type Output = SvgDocument;

    fn vectorize(&self, image: &RgbImage, options: &TraceOptions) -> SilhouetteResult<SvgDocument> {
        let gray = reload_as_gray(image)?;
        Ok(trace_gray(&gray, options))
    }
}

/// Write the stripped image to a scoped temporary PNG and read it back as
/// grayscale. The round trip mirrors the on-disk handoff the tracer input
/// format expects; the temporary file is removed when the guard drops,
/// on success and failure alike.
fn reload_as_gray(image: &RgbImage) -> SilhouetteResult<GrayImage> {
    let temp = tempfile::Builder::new()
        .prefix("silhouette-")
        .suffix(".png")
        .tempfile()
        .map_err(SilhouetteError::conversion)?;
    image.save(temp.path()).map_err(SilhouetteError::conversion)?;
    let gray = image::open(temp.path())
        .map_err(SilhouetteError::conversion)?
        .to_luma8();
    Ok(gray)
}

/// Binarize the grayscale image and trace every surviving region into
/// closed curves. Coordinates stay in the pixel space of `gray`.
fn trace_gray(gray: &GrayImage, options: &TraceOptions) -> SvgDocument {
    let (width, height) = gray.dimensions();
    let bitmap = gray_to_color_image(gray).to_binary_image(|color| {
        color.r >= options.binarize_threshold
    });
    let clusters = bitmap.to_clusters(DIAGONAL_CLUSTERING);

    let filter_speckle_area = options.filter_speckle * options.filter_speckle;
    let corner_threshold = f64::from(options.corner_threshold).to_radians();
    let splice_threshold = f64::from(options.splice_threshold).to_radians();

    let mut curves = Vec::new();
    for i in 0..clusters.len() {
        let cluster = clusters.get_cluster(i);
        if cluster.size() < filter_speckle_area {
            continue;
        }
        let compound = cluster.to_compound_path(
            options.mode,
            corner_threshold,
            options.length_threshold,
            options.max_iterations,
            splice_threshold,
        );
        curves.extend(compound.iter().filter_map(curve_from_element));
    }

    SvgDocument {
        width,
        height,
        curves,
    }
}

/// Expand a grayscale image into the RGBA layout the tracer consumes.
fn gray_to_color_image(gray: &GrayImage) -> ColorImage {
    let (w, h) = gray.dimensions();
    let (width, height) = (w as usize, h as usize);
    let mut pixels = vec![0u8; 4 * width * height];

    for (i, gray_pixel) in gray.pixels().enumerate() {
        let v = gray_pixel.0[0];
        let idx = i * 4;
        pixels[idx] = v;
        pixels[idx + 1] = v;
        pixels[idx + 2] = v;
        pixels[idx + 3] = 255;
    }

    ColorImage {
        pixels,
        width,
        height,
    }
}

/// Map one traced path element into the tagged curve model.
fn curve_from_element(element: &CompoundPathElement) -> Option<TracedCurve> {
    match element {
        CompoundPathElement::PathI32(path) => curve_from_polygon(
            path.path
                .iter()
                .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                .collect(),
        ),
        CompoundPathElement::PathF64(path) => {
            curve_from_polygon(path.path.iter().map(|p| Point::new(p.x, p.y)).collect())
        }
        CompoundPathElement::Spline(spline) => curve_from_spline(&spline.points),
    }
}

/// Pair up polygon vertices into corner segments. An odd remainder folds
/// back to the start point, a no-op once the path closes.
fn curve_from_polygon(mut points: Vec<Point>) -> Option<TracedCurve> {
    // Closed polygons may repeat the first vertex at the end.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let (start, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut segments = Vec::with_capacity(rest.len().div_ceil(2));
    for pair in rest.chunks(2) {
        let segment = match pair {
            [control, end] => PathSegment::Corner {
                control: *control,
                end: *end,
            },
            [control] => PathSegment::Corner {
                control: *control,
                end: *start,
            },
            _ => unreachable!(),
        };
        segments.push(segment);
    }

    Some(TracedCurve {
        start: *start,
        segments,
    })
}

/// Chunk spline control points into cubic segments: a start point followed
/// by (control1, control2, end) triples.
fn curve_from_spline(points: &[PointF64]) -> Option<TracedCurve> {
    let (start, rest) = points.split_first()?;
    let segments: Vec<PathSegment> = rest
        .chunks_exact(3)
        .map(|triple| PathSegment::Smooth {
            control1: Point::new(triple[0].x, triple[0].y),
            control2: Point::new(triple[1].x, triple[1].y),
            end: Point::new(triple[2].x, triple[2].y),
        })
        .collect();
    if segments.is_empty() {
        return None;
    }

    Some(TracedCurve {
        start: Point::new(start.x, start.y),
        segments,
    })
}
