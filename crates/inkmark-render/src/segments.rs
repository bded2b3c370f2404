//! Conversion of strokes into styled line segments.

use inkmark_core::{InkPoint, RenderModel, StrokeId, ToolPalette};
use kurbo::Line;
use peniko::Color;

/// Segments shorter than this are not worth drawing.
pub const MIN_SEGMENT_LENGTH: f64 = 0.5;

/// One straight piece of a stroke, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSegment {
    pub line: Line,
    pub color: Color,
    pub width: f64,
    /// Owning stroke, `None` for the stroke being drawn.
    pub stroke: Option<StrokeId>,
}

/// Segments between consecutive points of one stroke.
///
/// Color and width come from the later point of each pair.
pub fn stroke_segments<'a>(
    points: &'a [InkPoint],
    palette: &'a ToolPalette,
    stroke: Option<StrokeId>,
) -> impl Iterator<Item = RenderSegment> + 'a {
    points.windows(2).filter_map(move |pair| {
        let (prev, point) = (&pair[0], &pair[1]);
        if prev.position.distance(point.position) < MIN_SEGMENT_LENGTH {
            return None;
        }

        let color = palette.color_of(point.tool)?;
        Some(RenderSegment {
            line: Line::new(prev.position, point.position),
            color: color.into(),
            width: palette.width_of(point.tool, point.pressure, point.velocity),
            stroke,
        })
    })
}

/// All segments of a render model, back to front.
///
/// The stroke being drawn goes on top and only once it has two points.
pub fn segments(model: &RenderModel, palette: &ToolPalette) -> Vec<RenderSegment> {
    let mut out: Vec<RenderSegment> = model
        .committed
        .iter()
        .flat_map(|stroke| stroke_segments(stroke.points(), palette, Some(stroke.id())))
        .collect();

    if model.in_progress.len() > 1 {
        out.extend(stroke_segments(&model.in_progress, palette, None));
    }
    out
}
