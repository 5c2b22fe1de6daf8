//! Line-of-sight queries.
//!
//! The visibility polygon is what gets drawn; entity occlusion uses the exact
//! test here instead, so a player standing just past a sweep ray's chord is
//! not hidden by polygon approximation error.

use serde::{Deserialize, Serialize};
use umbra_shared::Vec2;

use crate::geometry::MIN_HIT_FRACTION;
use crate::polygon::VisibilityPolygon;
use crate::segment::WallSegment;

/// Hits this close to the target (as a fraction of the sight line) do not
/// block it: a wall the target stands against is not in the way.
const TARGET_TOLERANCE: f32 = 1e-5;

/// How a point appears to a viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityClass {
    /// Outside the vision radius.
    Hidden,
    /// In range but behind a wall; rendered dim.
    SeenBlocked,
    /// In range with a clear line of sight.
    Visible,
}

impl VisibilityClass {
    /// Whether the point is fully visible.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Whether no segment crosses the sight line strictly before `target`.
#[must_use]
pub fn line_of_sight(origin: Vec2, target: Vec2, segments: &[WallSegment]) -> bool {
    if origin == target {
        return true;
    }
    !segments.iter().any(|segment| {
        segment
            .intersect(origin, target)
            .is_some_and(|t| t >= MIN_HIT_FRACTION && t < 1.0 - TARGET_TOLERANCE)
    })
}

/// Whether a viewer at `origin` with vision `radius` fully sees `target`.
///
/// Always false beyond the radius (or for a non-finite distance), always
/// true at the origin itself.
#[must_use]
pub fn is_visible(origin: Vec2, target: Vec2, radius: f32, segments: &[WallSegment]) -> bool {
    classify(origin, target, radius, segments).is_visible()
}

/// Classifies `target` relative to a viewer.
#[must_use]
pub fn classify(origin: Vec2, target: Vec2, radius: f32, segments: &[WallSegment]) -> VisibilityClass {
    let d2 = origin.distance_squared(target);
    if d2 == 0.0 {
        return VisibilityClass::Visible;
    }
    let in_range = d2 <= radius * radius;
    if !in_range {
        return VisibilityClass::Hidden;
    }
    if line_of_sight(origin, target, segments) {
        VisibilityClass::Visible
    } else {
        VisibilityClass::SeenBlocked
    }
}

/// Classifies `target` against an already cast polygon instead of the
/// exact sight line. Matches what the fog renderer shows.
#[must_use]
pub fn classify_in_polygon(polygon: &VisibilityPolygon, target: Vec2) -> VisibilityClass {
    let d2 = polygon.origin.distance_squared(target);
    let in_range = d2 <= polygon.radius * polygon.radius;
    if d2 == 0.0 {
        VisibilityClass::Visible
    } else if !in_range {
        VisibilityClass::Hidden
    } else if polygon.contains(target) {
        VisibilityClass::Visible
    } else {
        VisibilityClass::SeenBlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::compute_polygon;

    fn wall() -> WallSegment {
        WallSegment::new(Vec2::new(2.0, 0.0), Vec2::new(2.0, 5.0))
    }

    #[test]
    fn test_radius_cutoff() {
        let origin = Vec2::new(0.0, 0.0);
        assert!(!is_visible(origin, Vec2::new(10.1, 0.0), 10.0, &[]));
        assert!(is_visible(origin, Vec2::new(10.0, 0.0), 10.0, &[]));
        assert!(!is_visible(origin, Vec2::new(f32::NAN, 0.0), 10.0, &[]));
    }

    #[test]
    fn test_origin_always_visible() {
        let origin = Vec2::new(2.0, 2.0);
        assert!(is_visible(origin, origin, 0.0, &[wall()]));
    }

    #[test]
    fn test_blocked_and_clear() {
        let origin = Vec2::new(0.0, 2.0);
        assert_eq!(classify(origin, Vec2::new(4.0, 2.0), 10.0, &[wall()]), VisibilityClass::SeenBlocked);
        assert_eq!(classify(origin, Vec2::new(1.0, 2.0), 10.0, &[wall()]), VisibilityClass::Visible);
        assert_eq!(classify(origin, Vec2::new(0.0, 20.0), 10.0, &[wall()]), VisibilityClass::Hidden);
    }

    #[test]
    fn test_wall_at_target_does_not_block() {
        let origin = Vec2::new(0.0, 2.0);
        assert!(is_visible(origin, Vec2::new(2.0, 2.0), 10.0, &[wall()]));
    }

    #[test]
    fn test_polygon_classification_agrees_in_the_open() {
        let origin = Vec2::new(0.0, 2.0);
        let polygon = compute_polygon(origin, 10.0, &[wall()]);
        for target in [Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0), Vec2::new(-5.0, -3.0), Vec2::new(0.0, 20.0)] {
            assert_eq!(
                classify_in_polygon(&polygon, target),
                classify(origin, target, 10.0, &[wall()]),
                "disagreement at {target:?}"
            );
        }
    }
}
