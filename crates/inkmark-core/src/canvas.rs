//! The committed stroke set.

use crate::stroke::{Stroke, StrokeId};
use kurbo::{Point, Rect};
use std::sync::Arc;

/// Ordered set of committed strokes (back to front).
///
/// Strokes are shared between clones, so history snapshots are cheap, but
/// a stroke can never be mutated in place: every change builds a new
/// collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeCollection {
    strokes: Vec<Arc<Stroke>>,
}

impl StrokeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stroke on top of the others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(Arc::new(stroke));
    }

    /// Get a stroke by ID.
    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id).map(Arc::as_ref)
    }

    /// Strokes in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().map(Arc::as_ref)
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.len()).sum()
    }

    /// Bounding box of all strokes.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter()
            .map(Stroke::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Remove every point within `radius` of `center`.
    ///
    /// Strokes left with one point or none are dropped, whether or not the
    /// eraser touched them. Untouched strokes stay shared with `self`.
    pub fn erase_at(&self, center: Point, radius: f64) -> Self {
        let strokes = self
            .strokes
            .iter()
            .filter_map(|stroke| {
                let hit = stroke
                    .points()
                    .iter()
                    .any(|p| p.position.distance(center) <= radius);
                if !hit && stroke.len() > 1 {
                    return Some(Arc::clone(stroke));
                }
                stroke.without_points_near(center, radius).map(Arc::new)
            })
            .collect();

        Self { strokes }
    }
}
