//! # Wall Segments
//!
//! Every wall tile contributes its four edges. Shared edges between
//! neighbouring walls are kept; a duplicate only costs one extra
//! intersection test.
//!
//! `SegmentIndex` buckets the segments of a map into a uniform grid so a
//! vision query only tests segments near the viewer. It is built once per
//! map and shared read-only behind an `Arc`.

use umbra_shared::{MapData, Rect, Vec2};

use crate::geometry::{point_segment_distance, segment_intersection};

/// Bucket side in tiles.
pub const BUCKET_TILES: f32 = 4.0;

/// One occluding edge of a wall tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    /// First endpoint.
    pub start: Vec2,
    /// Second endpoint.
    pub end: Vec2,
}

impl WallSegment {
    /// Creates a segment between two points.
    #[inline]
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// The four edges of `rect`: top, right, bottom, left.
    #[must_use]
    pub fn edges_of(rect: Rect) -> [Self; 4] {
        let [top_left, top_right, bottom_right, bottom_left] = rect.corners();
        [
            Self::new(top_left, top_right),
            Self::new(top_right, bottom_right),
            Self::new(bottom_right, bottom_left),
            Self::new(bottom_left, top_left),
        ]
    }

    /// Whether both endpoints coincide.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start.distance_squared(self.end) <= f32::EPSILON
    }

    /// Shortest distance from `point` to this segment.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point_segment_distance(point, self.start, self.end)
    }

    /// Fraction along `from -> to` at which this segment crosses it.
    #[inline]
    #[must_use]
    pub fn intersect(&self, from: Vec2, to: Vec2) -> Option<f32> {
        segment_intersection(from, to, self.start, self.end)
    }
}

/// Derives the occluding segments of every wall in a map.
#[must_use]
pub fn wall_segments(map: &MapData) -> Vec<WallSegment> {
    map.walls
        .iter()
        .flat_map(|wall| WallSegment::edges_of(wall.bounds(map.tile_size)))
        .collect()
}

/// Uniform-grid spatial index over wall segments.
#[derive(Clone, Debug)]
pub struct SegmentIndex {
    segments: Vec<WallSegment>,
    bucket_size: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<u32>>,
}

impl SegmentIndex {
    /// Indexes `segments` over a `width x height` pixel area.
    ///
    /// Segments reaching outside the area are filed in the edge buckets.
    #[must_use]
    pub fn new(segments: Vec<WallSegment>, width: f32, height: f32, bucket_size: f32) -> Self {
        let bucket_size = if bucket_size.is_finite() && bucket_size > 0.0 {
            bucket_size
        } else {
            width.max(height).max(1.0)
        };
        let cols = bucket_count(width, bucket_size);
        let rows = bucket_count(height, bucket_size);
        let mut buckets = vec![Vec::new(); cols * rows];

        for (i, segment) in segments.iter().enumerate() {
            let (start, end) = (segment.start, segment.end);
            let (min_col, max_col) = span(start.x.min(end.x), start.x.max(end.x), bucket_size, cols);
            let (min_row, max_row) = span(start.y.min(end.y), start.y.max(end.y), bucket_size, rows);
            for row in min_row..=max_row {
                for col in min_col..=max_col {
                    buckets[row * cols + col].push(i as u32);
                }
            }
        }

        Self {
            segments,
            bucket_size,
            cols,
            rows,
            buckets,
        }
    }

    /// Indexes every wall of a map.
    #[must_use]
    pub fn from_map(map: &MapData) -> Self {
        let index = Self::new(wall_segments(map), map.width, map.height, map.tile_size * BUCKET_TILES);
        tracing::debug!(
            walls = map.walls.len(),
            segments = index.len(),
            buckets = index.cols * index.rows,
            "Segment index built"
        );
        index
    }

    /// Every indexed segment.
    #[must_use]
    pub fn segments(&self) -> &[WallSegment] {
        &self.segments
    }

    /// Number of indexed segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the index holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Non-degenerate segments within `radius` of `center`.
    #[must_use]
    pub fn query_circle(&self, center: Vec2, radius: f32) -> Vec<WallSegment> {
        if !(radius.is_finite() && radius >= 0.0) || self.segments.is_empty() {
            return Vec::new();
        }

        let (min_col, max_col) = span(center.x - radius, center.x + radius, self.bucket_size, self.cols);
        let (min_row, max_row) = span(center.y - radius, center.y + radius, self.bucket_size, self.rows);

        let mut candidates: Vec<u32> = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                candidates.extend_from_slice(&self.buckets[row * self.cols + col]);
            }
        }
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .map(|i| self.segments[i as usize])
            .filter(|segment| !segment.is_degenerate() && segment.distance_to(center) <= radius)
            .collect()
    }
}

fn bucket_count(extent: f32, bucket_size: f32) -> usize {
    if extent.is_finite() && extent > 0.0 {
        ((extent / bucket_size).ceil() as usize).max(1)
    } else {
        1
    }
}

/// Inclusive bucket range covering `[min, max]`, clamped to `0..count`.
fn span(min: f32, max: f32, bucket_size: f32, count: usize) -> (usize, usize) {
    let last = count.saturating_sub(1);
    let clamp = |v: f32| ((v / bucket_size).floor().max(0.0) as usize).min(last);
    (clamp(min), clamp(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_shared::{TilePos, Wall};

    fn single_wall_map() -> MapData {
        MapData {
            width: 320.0,
            height: 320.0,
            tile_size: 32.0,
            walls: vec![Wall::at_tile(TilePos::new(2, 2), 32.0)],
            red_spawn_rect: Rect::new(0.0, 0.0, 32.0, 320.0),
            blue_spawn_rect: Rect::new(288.0, 0.0, 32.0, 320.0),
            plaza_rect: Rect::new(128.0, 128.0, 64.0, 64.0),
        }
    }

    #[test]
    fn test_wall_edges() {
        let segments = wall_segments(&single_wall_map());
        assert_eq!(segments.len(), 4);
        // top edge of tile (2, 2)
        assert_eq!(segments[0], WallSegment::new(Vec2::new(64.0, 64.0), Vec2::new(96.0, 64.0)));
        assert!(segments.iter().all(|s| !s.is_degenerate()));
    }

    #[test]
    fn test_query_circle() {
        let index = SegmentIndex::from_map(&single_wall_map());
        assert_eq!(index.query_circle(Vec2::new(80.0, 40.0), 26.0).len(), 1);
        assert_eq!(index.query_circle(Vec2::new(80.0, 80.0), 20.0).len(), 4);
        assert!(index.query_circle(Vec2::new(300.0, 300.0), 50.0).is_empty());
        assert!(index.query_circle(Vec2::new(80.0, 80.0), f32::NAN).is_empty());
    }

    #[test]
    fn test_query_matches_brute_force() {
        let mut walls = Vec::new();
        for i in 0..10 {
            walls.push(Wall::at_tile(TilePos::new(i, (i * 7) % 10), 32.0));
        }
        let map = MapData { walls, ..single_wall_map() };
        let index = SegmentIndex::from_map(&map);

        for &(x, y, r) in &[(16.0, 16.0, 100.0), (160.0, 200.0, 64.0), (-50.0, 400.0, 500.0)] {
            let center = Vec2::new(x, y);
            let expected = index.segments().iter().filter(|s| s.distance_to(center) <= r).count();
            assert_eq!(index.query_circle(center, r).len(), expected);
        }
    }

    #[test]
    fn test_degenerate_segments_are_dropped() {
        let point = Vec2::new(10.0, 10.0);
        let index = SegmentIndex::new(vec![WallSegment::new(point, point)], 100.0, 100.0, 32.0);
        assert_eq!(index.len(), 1);
        assert!(index.query_circle(point, 5.0).is_empty());
    }
}
