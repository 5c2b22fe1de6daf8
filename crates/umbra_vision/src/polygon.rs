//! # Visibility Polygon
//!
//! Angular raycasting against the wall segments near a viewer.
//!
//! ## Ray Set
//!
//! - Three rays per segment endpoint, at the endpoint's angle and
//!   `ANGLE_EPSILON` either side of it. The offset rays slip past the corner
//!   and land on whatever lies behind it, so silhouette edges are exact.
//! - One ray every `SWEEP_STEP_DEGREES` so open arcs stay round.
//! - A closing ray just short of 360 degrees to seal the wraparound seam.
//!
//! Each ray stops at the nearest wall strictly inside the vision radius, or
//! at the radius. Endpoints sorted by angle form a star-shaped fan around
//! the viewer.

use std::f32::consts::TAU;

use umbra_shared::Vec2;

use crate::geometry::{normalize_angle, point_in_polygon, polygon_area, MIN_HIT_FRACTION};
use crate::segment::WallSegment;

/// Angular offset of the corner rays, in radians.
pub const ANGLE_EPSILON: f32 = 1e-4;

/// Spacing of the uniform sweep rays, in degrees.
pub const SWEEP_STEP_DEGREES: f32 = 4.0;

/// Final sweep ray, just short of a full turn.
const CLOSING_ANGLE: f32 = TAU * (359.9999 / 360.0);

/// Star-shaped region a viewer can see directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityPolygon {
    /// Viewer position.
    pub origin: Vec2,
    /// Vision radius used for the cast.
    pub radius: f32,
    /// Ray endpoints sorted by angle around `origin`.
    pub points: Vec<Vec2>,
}

impl VisibilityPolygon {
    /// A polygon with no area: the viewer sees nothing.
    #[must_use]
    pub const fn empty(origin: Vec2, radius: f32) -> Self {
        Self {
            origin,
            radius,
            points: Vec::new(),
        }
    }

    /// Whether the polygon has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of ray endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether `point` lies inside the polygon.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        if self.points.len() < 3 || self.origin.distance_squared(point) > self.radius * self.radius {
            return false;
        }
        point == self.origin || point_in_polygon(point, &self.points)
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}

/// Casts the visibility polygon of a viewer at `origin`.
///
/// Segments farther than `radius` and degenerate segments are ignored. A
/// non-positive or non-finite radius yields an empty polygon.
#[must_use]
pub fn compute_polygon(origin: Vec2, radius: f32, segments: &[WallSegment]) -> VisibilityPolygon {
    if !(radius.is_finite() && radius > 0.0) {
        return VisibilityPolygon::empty(origin, radius);
    }

    let nearby: Vec<WallSegment> = segments
        .iter()
        .filter(|segment| !segment.is_degenerate() && segment.distance_to(origin) <= radius)
        .copied()
        .collect();

    let angles = ray_angles(origin, &nearby);
    let mut hits: Vec<(f32, Vec2)> = angles
        .into_iter()
        .map(|angle| (normalize_angle(angle), cast_ray(origin, angle, radius, &nearby)))
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    VisibilityPolygon {
        origin,
        radius,
        points: hits.into_iter().map(|(_, point)| point).collect(),
    }
}

fn ray_angles(origin: Vec2, segments: &[WallSegment]) -> Vec<f32> {
    let sweep_rays = (360.0 / SWEEP_STEP_DEGREES) as usize;
    let mut angles = Vec::with_capacity(segments.len() * 6 + sweep_rays + 1);

    for segment in segments {
        for endpoint in [segment.start, segment.end] {
            let Some(direction) = (endpoint - origin).try_normalize() else {
                continue;
            };
            let angle = direction.angle();
            angles.extend([angle - ANGLE_EPSILON, angle, angle + ANGLE_EPSILON]);
        }
    }

    angles.extend((0..sweep_rays).map(|i| (i as f32 * SWEEP_STEP_DEGREES).to_radians()));
    angles.push(CLOSING_ANGLE);
    angles
}

/// Endpoint of a single ray: the nearest hit strictly inside `radius`, or
/// the full-radius point.
fn cast_ray(origin: Vec2, angle: f32, radius: f32, segments: &[WallSegment]) -> Vec2 {
    let far = origin + Vec2::from_angle(angle) * radius;
    let mut nearest = far;
    let mut nearest_d2 = radius * radius;

    for segment in segments {
        let Some(t) = segment.intersect(origin, far) else {
            continue;
        };
        if t < MIN_HIT_FRACTION {
            continue;
        }
        let hit = origin + (far - origin) * t;
        let d2 = origin.distance_squared(hit);
        if d2 < nearest_d2 {
            nearest_d2 = d2;
            nearest = hit;
        }
    }
    nearest
}
