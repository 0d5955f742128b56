use std::fmt;

/// A point in raster pixel-coordinate space; no scaling transform applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_coord(self.x), format_coord(self.y))
    }
}

/// One segment of a traced curve.
///
/// A corner is a sharp directional change described by a corner control
/// point and an end point; a smooth segment is a cubic curve with two
/// control points and an end point. Keeping the two shapes as a tagged
/// variant keeps the path-data emission branch-free per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Corner {
        control: Point,
        end: Point,
    },
    Smooth {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl PathSegment {
    /// Path-data fragment for this segment: two line-tos for a corner,
    /// a single cubic command for a smooth segment.
    fn to_path_data(&self) -> String {
        match self {
            PathSegment::Corner { control, end } => format!("L{control}L{end}"),
            PathSegment::Smooth {
                control1,
                control2,
                end,
            } => format!("C{control1} {control2} {end}"),
        }
    }
}

/// A closed curve traced from the binary mask: a start point followed by
/// an ordered sequence of segments, implicitly closed back to the start.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedCurve {
    pub start: Point,
    pub segments: Vec<PathSegment>,
}

impl TracedCurve {
    /// Build the `d` attribute: one move-to, the segment commands, and an
    /// explicit close.
    pub fn path_data(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len() + 2);
        parts.push(format!("M{}", self.start));
        for segment in &self.segments {
            parts.push(segment.to_path_data());
        }
        parts.push("z".to_string());
        parts.join(" ")
    }
}

/// The finished vector artifact: traced curves plus the pixel dimensions
/// of the grayscale image they were traced from.
///
/// The `Display` implementation renders the complete SVG markup, one
/// black-filled `<path>` element per curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub width: u32,
    pub height: u32,
    pub curves: Vec<TracedCurve>,
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            self.width, self.height
        )?;
        for curve in &self.curves {
            writeln!(f, r#"<path d="{}" fill="black"/>"#, curve.path_data())?;
        }
        writeln!(f, "</svg>")
    }
}

/// Format a coordinate with at most two decimal places, dropping trailing
/// zeros so integral values print bare. The `{:.2}` form always contains a
/// decimal point, which is what makes the trim safe.
fn format_coord(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
