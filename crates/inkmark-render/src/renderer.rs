//! Renderer trait abstraction.

use crate::segments::{RenderSegment, segments};
use inkmark_core::{RenderModel, ToolPalette};
use kurbo::Circle;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// What to paint.
    pub model: &'a RenderModel,
    /// Tool colors and widths.
    pub palette: &'a ToolPalette,
    /// Outline color of the eraser footprint.
    pub eraser_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(model: &'a RenderModel, palette: &'a ToolPalette) -> Self {
        Self {
            model,
            palette,
            eraser_color: Color::from_rgba8(128, 128, 128, 160),
        }
    }

    /// Set the eraser outline color.
    pub fn with_eraser_color(mut self, color: Color) -> Self {
        self.eraser_color = color;
        self
    }
}

/// Trait for host drawing surfaces.
///
/// The engine never touches pixels; hosts implement this over whatever
/// surface overlays the document.
pub trait Renderer {
    /// Called before anything is drawn for a frame.
    fn begin_frame(&mut self, _ctx: &RenderContext) -> RenderResult<()> {
        Ok(())
    }

    /// Draw one line segment with a round cap.
    fn draw_segment(&mut self, segment: &RenderSegment) -> RenderResult<()>;

    /// Draw the eraser footprint.
    fn draw_eraser(&mut self, _eraser: &Circle, _color: Color) -> RenderResult<()> {
        Ok(())
    }

    /// Called after the frame is complete.
    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Paint a frame. Returns the number of segments drawn.
pub fn paint<R: Renderer + ?Sized>(ctx: &RenderContext, renderer: &mut R) -> RenderResult<usize> {
    renderer.begin_frame(ctx)?;

    let segments = segments(ctx.model, ctx.palette);
    for segment in &segments {
        renderer.draw_segment(segment)?;
    }
    if let Some(eraser) = &ctx.model.eraser {
        renderer.draw_eraser(eraser, ctx.eraser_color)?;
    }

    renderer.end_frame()?;
    log::trace!("Painted {} segments", segments.len());
    Ok(segments.len())
}

/// Renderer that keeps the frame in memory.
///
/// Useful for hosts that ship draw lists across a bridge instead of drawing
/// directly.
#[derive(Debug, Clone, Default)]
pub struct SegmentRecorder {
    pub segments: Vec<RenderSegment>,
    pub eraser: Option<(Circle, Color)>,
}

impl SegmentRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for SegmentRecorder {
    fn begin_frame(&mut self, _ctx: &RenderContext) -> RenderResult<()> {
        self.segments.clear();
        self.eraser = None;
        Ok(())
    }

    fn draw_segment(&mut self, segment: &RenderSegment) -> RenderResult<()> {
        self.segments.push(*segment);
        Ok(())
    }

    fn draw_eraser(&mut self, eraser: &Circle, color: Color) -> RenderResult<()> {
        self.eraser = Some((*eraser, color));
        Ok(())
    }
}
