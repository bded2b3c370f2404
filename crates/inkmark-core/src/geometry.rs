//! Pure geometry helpers shared by capture and smoothing.

use crate::stroke::InkPoint;

/// Upper bound for point velocity, in px/ms.
pub const MAX_VELOCITY: f64 = 10.0;

/// Base minimum spacing between kept points, in px.
const BASE_DENSITY_THRESHOLD: f64 = 0.3;

/// Euclidean distance between two points.
pub fn distance(a: &InkPoint, b: &InkPoint) -> f64 {
    a.position.distance(b.position)
}

/// Speed from `p1` to `p2` in px/ms, capped at [`MAX_VELOCITY`].
///
/// Time deltas below one millisecond (including out-of-order timestamps)
/// count as one millisecond.
pub fn velocity(p1: &InkPoint, p2: &InkPoint) -> f64 {
    let dt = p2.timestamp_ms.saturating_sub(p1.timestamp_ms).max(1) as f64;
    (distance(p1, p2) / dt).min(MAX_VELOCITY)
}

/// Uniform Catmull-Rom interpolation of one axis, `t` in `[0, 1]`.
pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Quadratic Bezier with the control point coincident with `p0`.
///
/// This collapses to a linear interpolation; the smoother relies on that.
pub fn quadratic_bezier(p0: f64, p1: f64, t: f64) -> f64 {
    (1.0 - t) * p0 + t * p1
}

/// Minimum distance a point must keep from its predecessor.
///
/// Fast strokes tolerate sparser points; harder presses also widen the gap.
pub fn density_threshold(velocity: f64, pressure: f64) -> f64 {
    BASE_DENSITY_THRESHOLD * (1.0 + velocity * 0.1) * (1.0 + pressure * 0.2)
}
