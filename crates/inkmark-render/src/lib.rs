//! inkmark Render Library
//!
//! Turns a session's render model into styled line segments and drives a
//! host-provided [`Renderer`] with them.

mod renderer;
pub mod segments;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, SegmentRecorder, paint};
pub use segments::{MIN_SEGMENT_LENGTH, RenderSegment, segments, stroke_segments};
