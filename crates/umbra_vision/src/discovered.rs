//! # Discovered Tiles
//!
//! Per-player memory of every map tile that has ever been within vision
//! range. Discovery uses plain distance, not line of sight: a tile behind a
//! wall still counts once the viewer has been close enough.
//!
//! Tiles only ever go from undiscovered to discovered. A new map needs a new
//! grid.

use umbra_shared::{MapData, Rect, Team, TilePos, Vec2};

/// Boolean tile grid of what a player has explored.
#[derive(Clone, PartialEq)]
pub struct DiscoveredGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<bool>,
    discovered: usize,
}

impl DiscoveredGrid {
    /// Creates a grid with every column of the home strip revealed.
    ///
    /// A column counts as home if its tile centre lies within the strip
    /// widened by `buffer_tiles` on each side.
    #[must_use]
    pub fn new(width: usize, height: usize, tile_size: f32, home: Rect, buffer_tiles: u32) -> Self {
        let mut grid = Self {
            width,
            height,
            tile_size,
            cells: vec![false; width * height],
            discovered: 0,
        };

        let buffer = buffer_tiles as f32 * tile_size;
        let (left, right) = (home.x - buffer, home.right() + buffer);
        for col in 0..width {
            let center_x = (col as f32 + 0.5) * tile_size;
            if center_x >= left && center_x <= right {
                for row in 0..height {
                    grid.mark(col, row);
                }
            }
        }

        tracing::trace!(width, height, revealed = grid.discovered, "Discovery grid created");
        grid
    }

    /// Creates a grid for one player on `map`, revealing the team's strip.
    #[must_use]
    pub fn for_map(map: &MapData, team: Team, buffer_tiles: u32) -> Self {
        Self::new(
            map.width_tiles(),
            map.height_tiles(),
            map.tile_size,
            map.home_zone(team).rect(),
            buffer_tiles,
        )
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Tile side in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn mark(&mut self, col: usize, row: usize) -> bool {
        let cell = &mut self.cells[row * self.width + col];
        if *cell {
            false
        } else {
            *cell = true;
            self.discovered += 1;
            true
        }
    }

    /// Marks every tile whose centre lies within `radius` of `position`.
    ///
    /// Returns how many tiles were newly discovered.
    pub fn update(&mut self, position: Vec2, radius: f32) -> usize {
        if self.cells.is_empty() || !(radius.is_finite() && radius >= 0.0) {
            return 0;
        }
        let ts = self.tile_size();
        let Some((min_col, max_col)) = clip_span(position.x - radius, position.x + radius, ts, self.width) else {
            return 0;
        };
        let Some((min_row, max_row)) = clip_span(position.y - radius, position.y + radius, ts, self.height) else {
            return 0;
        };

        let r2 = radius * radius;
        let mut newly = 0;
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let center = TilePos::new(col as i32, row as i32).center(ts);
                if center.distance_squared(position) <= r2 && self.mark(col, row) {
                    newly += 1;
                }
            }
        }
        newly
    }

    /// Whether a tile has been discovered. Out-of-range tiles never are.
    #[must_use]
    pub fn is_discovered(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        let (col, row) = (col as usize, row as usize);
        col < self.width && row < self.height && self.cells[row * self.width + col]
    }

    /// Whether the tile under a world position has been discovered.
    #[must_use]
    pub fn is_discovered_at(&self, point: Vec2) -> bool {
        let tile = TilePos::from_world(point, self.tile_size());
        self.is_discovered(tile.col, tile.row)
    }

    /// Number of discovered tiles.
    #[must_use]
    pub const fn discovered_count(&self) -> usize {
        self.discovered
    }

    /// Share of the map discovered, in `[0, 1]`.
    #[must_use]
    pub fn explored_fraction(&self) -> f32 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.discovered as f32 / self.cells.len() as f32
        }
    }

    /// Rows of discovery flags, top to bottom, for minimap rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

impl std::fmt::Debug for DiscoveredGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveredGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("discovered", &self.discovered)
            .finish_non_exhaustive()
    }
}

/// Inclusive tile range covering `[min, max]` clipped to `0..count`, or
/// `None` if it misses the grid entirely.
fn clip_span(min: f32, max: f32, tile_size: f32, count: usize) -> Option<(usize, usize)> {
    let first = (min / tile_size).floor();
    let last = (max / tile_size).floor();
    if last < 0.0 || first >= count as f32 {
        return None;
    }
    let first = first.max(0.0) as usize;
    let last = (last as usize).min(count - 1);
    Some((first, last))
}
