//! Low-level 2D geometry used by the raycaster.
//!
//! All functions are total: parallel, degenerate or non-finite input yields
//! "no intersection" instead of NaN.

use std::f32::consts::TAU;

use umbra_shared::Vec2;

/// Intersections closer than this fraction of a segment to its start are
/// ignored, so a wall touching the viewer does not blind it.
pub const MIN_HIT_FRACTION: f32 = 1e-6;

/// Intersection of segment `a_start -> a_end` with segment `b_start -> b_end`.
///
/// Returns the fraction `t` along `a` (0 at `a_start`, 1 at `a_end`) of the
/// crossing point, or `None` if the segments miss, are parallel or either
/// has zero length.
#[inline]
#[must_use]
pub fn segment_intersection(a_start: Vec2, a_end: Vec2, b_start: Vec2, b_end: Vec2) -> Option<f32> {
    let r = a_end - a_start;
    let s = b_end - b_start;
    let r_len2 = r.length_squared();
    let s_len2 = s.length_squared();
    if r_len2 <= f32::EPSILON || s_len2 <= f32::EPSILON {
        return None;
    }

    let denom = r.perp_dot(s);
    if denom.abs() <= f32::EPSILON * (r_len2 * s_len2).sqrt() {
        return None;
    }

    let qp = b_start - a_start;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Shortest distance from `point` to the segment `start -> end`.
#[inline]
#[must_use]
pub fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let line = end - start;
    let len2 = line.length_squared();
    if len2 <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(line) / len2).clamp(0.0, 1.0);
    point.distance(start + line * t)
}

/// Normalizes an angle into `[0, TAU)`.
#[inline]
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Crossing-number point-in-polygon test.
#[must_use]
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };

    let mut inside = false;
    let mut previous = last;
    for &current in vertices {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x =
                (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y) + current.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Shoelace area of a simple polygon.
#[must_use]
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut previous = vertices[vertices.len() - 1];
    for &current in vertices {
        twice_area += previous.perp_dot(current);
        previous = current;
    }
    twice_area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_segments() {
        let t = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!((t.unwrap() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_and_degenerate() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        assert_eq!(segment_intersection(a, b, Vec2::new(0.0, 1.0), Vec2::new(4.0, 1.0)), None);
        assert_eq!(segment_intersection(a, b, Vec2::new(2.0, 0.0), Vec2::new(2.0, 0.0)), None);
        assert_eq!(segment_intersection(a, a, Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)), None);
    }

    #[test]
    fn test_missing_segments() {
        let t = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        assert_eq!(t, None);
    }

    #[test]
    fn test_point_segment_distance() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);
        assert!((point_segment_distance(Vec2::new(5.0, 3.0), start, end) - 3.0).abs() < 1e-6);
        assert!((point_segment_distance(Vec2::new(13.0, 4.0), start, end) - 5.0).abs() < 1e-6);
        assert!((point_segment_distance(Vec2::new(3.0, 4.0), start, start) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-std::f32::consts::FRAC_PI_2) - 3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!(normalize_angle(TAU) < 1e-5);
        assert!(normalize_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_point_in_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!(point_in_polygon(Vec2::new(1.0, 1.0), &square));
        assert!(!point_in_polygon(Vec2::new(3.0, 1.0), &square));
        assert!(!point_in_polygon(Vec2::new(1.0, 1.0), &[]));
        assert!((polygon_area(&square) - 4.0).abs() < 1e-6);
    }
}
