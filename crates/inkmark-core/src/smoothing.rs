//! Stroke smoothing and point-density reduction.
//!
//! A finished gesture is resampled with a blend of a Catmull-Rom spline and
//! a linear Bezier fit. Slow segments lean on the spline and get more
//! samples; fast segments lean on the straight fit with fewer samples.

use crate::geometry::{catmull_rom, density_threshold, distance, quadratic_bezier, velocity};
use crate::stroke::InkPoint;
use kurbo::Point;

const MIN_SEGMENT_STEPS: f64 = 4.0;
const MAX_SEGMENT_STEPS: f64 = 12.0;
const MAX_BEZIER_WEIGHT: f64 = 0.7;

/// Interpolation steps for a segment moving at `velocity`.
fn segment_steps(velocity: f64) -> usize {
    (8.0 + velocity * 4.0)
        .floor()
        .clamp(MIN_SEGMENT_STEPS, MAX_SEGMENT_STEPS) as usize
}

/// Smooth the raw points of one gesture.
///
/// Inputs shorter than three points are returned unchanged. The last point
/// of the output is always the last input point.
pub fn smooth(points: &[InkPoint]) -> Vec<InkPoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points[points.len() - 1];
    let mut smoothed = Vec::with_capacity(points.len() * (MAX_SEGMENT_STEPS as usize + 1) + 2);
    smoothed.push(points[0]);

    for i in 0..points.len() - 1 {
        let p0 = if i == 0 { &points[0] } else { &points[i - 1] };
        let p1 = &points[i];
        let p2 = &points[i + 1];
        let p3 = points.get(i + 2).unwrap_or(p2);

        let v = velocity(p1, p2);
        let steps = segment_steps(v);
        let weight = (v * 0.3).min(MAX_BEZIER_WEIGHT);

        for step in 0..=steps {
            let t = step as f64 / steps as f64;

            let catmull_x = catmull_rom(p0.x(), p1.x(), p2.x(), p3.x(), t);
            let catmull_y = catmull_rom(p0.y(), p1.y(), p2.y(), p3.y(), t);
            let bezier_x = quadratic_bezier(p1.x(), p2.x(), t);
            let bezier_y = quadratic_bezier(p1.y(), p2.y(), t);

            let position = Point::new(
                catmull_x * (1.0 - weight) + bezier_x * weight,
                catmull_y * (1.0 - weight) + bezier_y * weight,
            );
            smoothed.push(InkPoint::new(position, p1.tool, p1.timestamp_ms, p1.pressure).with_velocity(v));
        }
    }

    smoothed.push(last);

    let mut reduced = reduce_density(&smoothed);
    pin_last(&mut reduced, last);
    reduced
}

/// Drop points that sit too close to the previously kept point.
///
/// The first point is always kept. Running this on its own output is a
/// no-op.
pub fn reduce_density(points: &[InkPoint]) -> Vec<InkPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut kept = Vec::with_capacity(points.len());
    kept.push(*first);

    for point in &points[1..] {
        let prev = &kept[kept.len() - 1];
        if distance(prev, point) > density_threshold(point.velocity, point.pressure) {
            kept.push(*point);
        }
    }

    kept
}

/// Make `last` the final point without ever replacing the first one.
fn pin_last(points: &mut Vec<InkPoint>, last: InkPoint) {
    if points.last() == Some(&last) {
        return;
    }
    if points.len() > 1 {
        let tail = points.len() - 1;
        points[tail] = last;
    } else {
        points.push(last);
    }
}
