//! # Map Geometry
//!
//! The emission boundary between maze grid space and world space.
//!
//! ```text
//!  map col:  0 .. S-1 | S ........................ W-S | W-S+1 .. W-1
//!            red strip |        maze grid (gw cols)     |  blue strip
//!  grid col:           | 0 ......................... gw-1
//! ```
//!
//! The last grid column is the seam column: it overlaps the first column of
//! the blue strip and is always carved open.

use umbra_shared::{Rect, TilePos, Vec2};

use crate::config::MazeConfig;
use crate::grid::{GridPos, GridRect};

/// Derived layout of a map: dimensions, zone rectangles and the
/// grid-to-world conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapGeometry {
    /// Map width in tiles.
    pub width_tiles: i32,
    /// Map height in tiles.
    pub height_tiles: i32,
    /// Tile side in pixels.
    pub tile_size: f32,
    /// Spawn strip width in tiles.
    pub spawn_width_tiles: i32,
    /// Maze grid width in cells.
    pub grid_width: usize,
    /// Maze grid height in cells.
    pub grid_height: usize,
    /// Plaza footprint in grid coordinates.
    pub plaza_grid: GridRect,
    /// Red spawn strip in world space.
    pub red_spawn: Rect,
    /// Blue spawn strip in world space.
    pub blue_spawn: Rect,
    /// Plaza in world space.
    pub plaza: Rect,
}

impl MapGeometry {
    /// Derives the geometry for a config.
    #[must_use]
    pub fn from_config(config: &MazeConfig) -> Self {
        let ts = config.tile_size;
        let width_tiles = config.map_width_tiles as i32;
        let height_tiles = config.map_height_tiles as i32;
        let spawn_width_tiles = config.spawn_width_tiles as i32;
        let (plaza_col, plaza_row) = config.plaza_tile_origin();
        let plaza_size = config.plaza_size_tiles as f32 * ts;

        Self {
            width_tiles,
            height_tiles,
            tile_size: ts,
            spawn_width_tiles,
            grid_width: config.grid_width(),
            grid_height: config.grid_height(),
            plaza_grid: config.plaza_grid_rect(),
            red_spawn: Rect::new(0.0, 0.0, spawn_width_tiles as f32 * ts, height_tiles as f32 * ts),
            blue_spawn: Rect::new(
                (width_tiles - spawn_width_tiles) as f32 * ts,
                0.0,
                spawn_width_tiles as f32 * ts,
                height_tiles as f32 * ts,
            ),
            plaza: Rect::new(plaza_col as f32 * ts, plaza_row as f32 * ts, plaza_size, plaza_size),
        }
    }

    /// Map width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size
    }

    /// Map height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height_tiles as f32 * self.tile_size
    }

    /// World-space centre of a grid cell.
    #[must_use]
    pub fn grid_to_world(&self, pos: GridPos) -> Vec2 {
        let spawn_px = self.spawn_width_tiles as f32 * self.tile_size;
        Vec2::new(
            spawn_px + pos.col as f32 * self.tile_size + self.tile_size / 2.0,
            pos.row as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// Every tile of the outer map border, clockwise from the top-left.
    pub fn border_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        let (w, h) = (self.width_tiles, self.height_tiles);
        let top = (0..w).map(|col| TilePos::new(col, 0));
        let right = (1..h).map(move |row| TilePos::new(w - 1, row));
        let bottom = (0..w - 1).rev().map(move |col| TilePos::new(col, h - 1));
        let left = (1..h - 1).rev().map(|row| TilePos::new(0, row));
        top.chain(right).chain(bottom).chain(left)
    }
}
