//! # Vision Engine
//!
//! Entry point used by the tick loop. Holds the segment index of the live
//! map, published once per map generation and shared read-only.
//!
//! Until a map is published every query degrades instead of failing: the
//! polygon is empty and only the viewer's own position counts as visible.
//! Wards ignore walls, so they keep working without a map.

use std::sync::Arc;

use umbra_shared::{MapData, Team, Vec2};

use crate::occlusion::{self, VisibilityClass};
use crate::polygon::{self, VisibilityPolygon};
use crate::segment::SegmentIndex;
use crate::ward::{VisionMask, Ward};

/// Visibility queries against the published wall set.
#[derive(Clone, Debug, Default)]
pub struct VisionEngine {
    index: Option<Arc<SegmentIndex>>,
}

impl VisionEngine {
    /// Creates an engine with no published map.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: None }
    }

    /// Creates an engine over an already built index.
    #[must_use]
    pub const fn with_index(index: Arc<SegmentIndex>) -> Self {
        Self { index: Some(index) }
    }

    /// Builds and publishes the segment index of `map`.
    pub fn publish_map(&mut self, map: &MapData) {
        self.publish(Arc::new(SegmentIndex::from_map(map)));
    }

    /// Publishes a new segment index, replacing the previous one.
    pub fn publish(&mut self, index: Arc<SegmentIndex>) {
        tracing::debug!(segments = index.len(), "Wall segments published");
        self.index = Some(index);
    }

    /// Drops the published index.
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Whether a wall set has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.index.is_some()
    }

    /// The published index, if any.
    #[must_use]
    pub fn index(&self) -> Option<&Arc<SegmentIndex>> {
        self.index.as_ref()
    }

    /// Visibility polygon of a viewer. Empty before publication.
    #[must_use]
    pub fn compute_polygon(&self, origin: Vec2, radius: f32) -> VisibilityPolygon {
        let Some(index) = &self.index else {
            tracing::trace!("No wall set published, returning empty polygon");
            return VisibilityPolygon::empty(origin, radius);
        };
        let nearby = index.query_circle(origin, radius);
        polygon::compute_polygon(origin, radius, &nearby)
    }

    /// Classifies `target` relative to a viewer.
    #[must_use]
    pub fn classify(&self, origin: Vec2, target: Vec2, radius: f32) -> VisibilityClass {
        match &self.index {
            Some(index) => {
                let nearby = index.query_circle(origin, radius);
                occlusion::classify(origin, target, radius, &nearby)
            }
            None if origin == target => VisibilityClass::Visible,
            None => VisibilityClass::Hidden,
        }
    }

    /// Whether a viewer with direct sight sees `target`.
    #[must_use]
    pub fn is_visible(&self, origin: Vec2, target: Vec2, radius: f32) -> bool {
        self.classify(origin, target, radius).is_visible()
    }

    /// Whether any source of `mask` reveals `target`.
    #[must_use]
    pub fn mask_reveals(&self, mask: &VisionMask, target: Vec2) -> bool {
        mask.sources().iter().any(|source| {
            if source.ignores_occlusion {
                source.reveals(target, &[])
            } else {
                self.is_visible(source.origin, target, source.radius)
            }
        })
    }

    /// Whether a viewer of `team` sees `target` with its own sight or any
    /// allied ward.
    #[must_use]
    pub fn sees_with_wards(&self, origin: Vec2, radius: f32, team: Team, wards: &[Ward], target: Vec2) -> bool {
        self.mask_reveals(&VisionMask::for_viewer(origin, radius, team, wards), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_shared::{Rect, TilePos, Wall};

    fn corridor_map() -> MapData {
        // a vertical wall column at x tile 5
        let walls = (0..10).map(|row| Wall::at_tile(TilePos::new(5, row), 32.0)).collect();
        MapData {
            width: 320.0,
            height: 320.0,
            tile_size: 32.0,
            walls,
            red_spawn_rect: Rect::new(0.0, 0.0, 64.0, 320.0),
            blue_spawn_rect: Rect::new(256.0, 0.0, 64.0, 320.0),
            plaza_rect: Rect::new(96.0, 96.0, 64.0, 64.0),
        }
    }

    #[test]
    fn test_unpublished_engine_degrades() {
        let engine = VisionEngine::new();
        let origin = Vec2::new(10.0, 10.0);
        assert!(!engine.is_published());
        assert!(engine.compute_polygon(origin, 100.0).is_empty());
        assert!(engine.is_visible(origin, origin, 100.0));
        assert!(!engine.is_visible(origin, Vec2::new(20.0, 10.0), 100.0));

        let ward = Ward::new(Vec2::new(20.0, 10.0), 5.0, Team::Red);
        assert!(engine.sees_with_wards(origin, 100.0, Team::Red, &[ward], Vec2::new(22.0, 10.0)));
    }

    #[test]
    fn test_published_engine_occludes() {
        let mut engine = VisionEngine::new();
        engine.publish_map(&corridor_map());

        let viewer = Vec2::new(100.0, 100.0);
        assert!(engine.is_visible(viewer, Vec2::new(140.0, 100.0), 150.0));
        assert!(!engine.is_visible(viewer, Vec2::new(220.0, 100.0), 150.0));
        assert_eq!(
            engine.classify(viewer, Vec2::new(220.0, 100.0), 150.0),
            VisibilityClass::SeenBlocked
        );

        // within 100 px every ray towards the wall meets it
        let polygon = engine.compute_polygon(viewer, 100.0);
        assert!(!polygon.is_empty());
        assert!(polygon.points.iter().all(|p| p.x <= 160.0 + 1e-3));

        engine.clear();
        assert!(engine.compute_polygon(viewer, 150.0).is_empty());
    }
}
