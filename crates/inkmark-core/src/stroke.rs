//! Ink points and committed strokes.

use crate::tools::ToolKind;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// A single captured or interpolated sample of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    /// Position in canvas pixel space.
    pub position: Point,
    /// Tool active when the point was captured.
    pub tool: ToolKind,
    /// Host timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Contact pressure, always positive.
    pub pressure: f64,
    /// Speed relative to the previous point, in px/ms.
    pub velocity: f64,
}

impl InkPoint {
    /// Create the first point of a gesture (zero velocity).
    pub fn new(position: Point, tool: ToolKind, timestamp_ms: u64, pressure: f64) -> Self {
        Self {
            position,
            tool,
            timestamp_ms,
            pressure,
            velocity: 0.0,
        }
    }

    /// Return a copy with the given velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// A committed, smoothed stroke.
///
/// Strokes are never empty and never change after commit; erasing builds a
/// filtered copy that keeps the original id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrokeRepr")]
pub struct Stroke {
    id: StrokeId,
    points: Vec<InkPoint>,
}

/// Wire form of a stroke, checked before it becomes a [`Stroke`].
#[derive(Deserialize)]
struct StrokeRepr {
    id: StrokeId,
    points: Vec<InkPoint>,
}

/// Rejected stroke data.
#[derive(Debug, Error)]
#[error("stroke {0} has no points")]
pub struct EmptyStrokeError(pub StrokeId);

impl TryFrom<StrokeRepr> for Stroke {
    type Error = EmptyStrokeError;

    fn try_from(repr: StrokeRepr) -> Result<Self, Self::Error> {
        Self::with_id(repr.id, repr.points).ok_or(EmptyStrokeError(repr.id))
    }
}

impl Stroke {
    /// Create a stroke from points. Returns `None` for an empty list.
    pub fn new(points: Vec<InkPoint>) -> Option<Self> {
        Self::with_id(Uuid::new_v4(), points)
    }

    pub(crate) fn with_id(id: StrokeId, points: Vec<InkPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self { id, points })
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tool of the gesture that produced this stroke.
    pub fn tool(&self) -> ToolKind {
        self.points[0].tool
    }

    pub fn first(&self) -> &InkPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &InkPoint {
        &self.points[self.points.len() - 1]
    }

    /// Axis-aligned bounding box of all points.
    pub fn bounds(&self) -> Rect {
        let first = self.points[0].position;
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p.position))
    }

    /// Polyline through every point, for hosts that paint paths.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0].position);
        for point in self.points.iter().skip(1) {
            path.line_to(point.position);
        }
        path
    }

    /// Points farther than `radius` from `center`, or `None` when the
    /// remainder is too short to draw a segment.
    pub(crate) fn without_points_near(&self, center: Point, radius: f64) -> Option<Self> {
        let kept: Vec<InkPoint> = self
            .points
            .iter()
            .filter(|p| p.position.distance(center) > radius)
            .copied()
            .collect();

        if kept.len() <= 1 {
            return None;
        }
        Self::with_id(self.id, kept)
    }
}
