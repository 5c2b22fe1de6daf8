//! # Maze Generator
//!
//! Builds an arena map in five stages:
//!
//! 1. **Spanning tree**: randomized Prim growth over every other cell,
//!    giving a perfect maze.
//! 2. **Thinning**: interior walls are opened at random, adding loops.
//! 3. **Plaza surroundings**: square blocks of growing size are opened
//!    around the plaza with decreasing probability.
//! 4. **Guaranteed openings**: the plaza with a one-cell ring and the seam
//!    column against the far spawn strip are always cleared.
//! 5. **Emission**: remaining wall cells become world-space walls, and the
//!    outer border is walled unconditionally.
//!
//! ## Connectivity
//!
//! The top and bottom grid rows lie under the map border and are never
//! opened. Every relaxation write opens a cell or block that already touches
//! an open cell, so a flood fill from the start cell reaches every open cell
//! after each stage.
//!
//! ## Failure Semantics
//!
//! The config is validated once in [`MazeGenerator::new`]. Generation itself
//! cannot fail: carve and jump targets outside the grid are dropped.

use std::collections::HashSet;

use rand::Rng;
use umbra_shared::{MapData, TilePos, Wall};

use crate::config::MazeConfig;
use crate::error::ProceduralResult;
use crate::geometry::MapGeometry;
use crate::grid::{Cell, GridPos, GridRect, MazeGrid};
use crate::seed::MapSeed;

/// Cells opened by each stage of one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Cells opened by the spanning tree, start included.
    pub tree_cells: usize,
    /// Cells opened by thinning.
    pub thinned: usize,
    /// Cells opened by each plaza carving pass.
    pub plaza_opened: Vec<usize>,
    /// Cells opened by the plaza ring and seam column.
    pub guaranteed: usize,
}

/// A carved grid before emission.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    /// Final WALL/PATH grid.
    pub grid: MazeGrid,
    /// First cell of the spanning tree.
    pub start: GridPos,
    /// Per-stage statistics.
    pub stats: PassStats,
}

/// Procedural arena generator.
///
/// Holds only validated configuration; all randomness is supplied per call.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    config: MazeConfig,
    geometry: MapGeometry,
}

impl MazeGenerator {
    /// Creates a generator for a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn new(config: MazeConfig) -> ProceduralResult<Self> {
        config.validate()?;
        let geometry = MapGeometry::from_config(&config);
        Ok(Self { config, geometry })
    }

    /// The generator's configuration.
    #[must_use]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// The derived map geometry.
    #[must_use]
    pub fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    /// Generates a complete map.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MapData {
        let layout = self.generate_layout(rng);
        let map = self.emit(&layout.grid);
        tracing::info!(
            width_tiles = self.geometry.width_tiles,
            height_tiles = self.geometry.height_tiles,
            open_cells = layout.grid.path_count(),
            walls = map.walls.len(),
            "Map generated"
        );
        map
    }

    /// Generates a map from the maze sub-stream of `seed`.
    #[must_use]
    pub fn generate_seeded(&self, seed: MapSeed) -> MapData {
        let mut rng = seed.derive(MapSeed::MAZE).rng();
        self.generate(&mut rng)
    }

    /// Runs every carving stage without emitting walls.
    pub fn generate_layout<R: Rng + ?Sized>(&self, rng: &mut R) -> MazeLayout {
        let mut grid = MazeGrid::new(self.geometry.grid_width, self.geometry.grid_height);
        let mut stats = PassStats::default();

        let start = self.carve_spanning_tree(&mut grid, rng);
        stats.tree_cells = grid.path_count();
        stats.thinned = self.thin_walls(&mut grid, rng);
        stats.plaza_opened = self.carve_plaza_surroundings(&mut grid, rng);
        stats.guaranteed = self.carve_guaranteed_openings(&mut grid);

        tracing::debug!(?start, ?stats, "Maze layout carved");
        MazeLayout { grid, start, stats }
    }

    /// Cells relaxation may open: the whole grid minus its top and bottom rows.
    fn open_area(&self) -> GridRect {
        GridRect::new(
            0,
            1,
            self.geometry.grid_width as i32,
            self.geometry.grid_height as i32 - 2,
        )
    }

    /// Grows a perfect maze from a random start cell on even columns and
    /// odd rows. Returns the start cell.
    pub fn carve_spanning_tree<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) -> GridPos {
        let open_area = self.open_area();
        let max_col = (grid.width() as i32 - 1) / 2;
        let max_row = (grid.height() as i32 - 3) / 2;
        let start = GridPos::new(2 * rng.gen_range(0..=max_col), 1 + 2 * rng.gen_range(0..=max_row));
        grid.carve(start);

        let mut frontier: Vec<GridPos> = Vec::new();
        let mut queued: HashSet<GridPos> = HashSet::new();
        for next in start.neighbors() {
            if grid.is_wall(next) && queued.insert(next) {
                frontier.push(next);
            }
        }

        while !frontier.is_empty() {
            let cell = frontier.swap_remove(rng.gen_range(0..frontier.len()));

            let open: Vec<GridPos> = cell.neighbors().into_iter().filter(|&n| grid.is_path(n)).collect();
            let &[neighbor] = open.as_slice() else {
                continue;
            };

            let jump = cell.jump_from(neighbor);
            if !open_area.contains(jump) || !grid.is_wall(jump) {
                continue;
            }
            grid.carve(cell);
            grid.carve(jump);

            for next in jump.neighbors() {
                if grid.is_wall(next) && queued.insert(next) {
                    frontier.push(next);
                }
            }
        }

        tracing::debug!(cells = grid.path_count(), "Spanning tree carved");
        start
    }

    /// Opens interior walls with `wall_removal_chance`. Returns the number
    /// of cells opened.
    pub fn thin_walls<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) -> usize {
        let chance = self.config.wall_removal_chance;
        let interior = GridRect::new(1, 1, grid.width() as i32 - 2, grid.height() as i32 - 2);

        let mut opened = 0;
        for pos in interior.cells() {
            if !grid.is_wall(pos) {
                continue;
            }
            if rng.gen_bool(chance) && grid.touches_path(pos) && grid.carve(pos) {
                opened += 1;
            }
        }

        tracing::debug!(opened, chance, "Thinning pass done");
        opened
    }

    /// Runs one block-carving pass per entry of `plaza_removal_chances`.
    ///
    /// Pass `i` opens `(i + 2)`-sized blocks centred on candidates scanned
    /// around the plaza, skipping candidates within `i + 1` cells of it.
    /// Returns the cells opened per pass.
    pub fn carve_plaza_surroundings<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) -> Vec<usize> {
        let plaza = self.geometry.plaza_grid;
        let open_area = self.open_area();
        let influence = self.config.plaza_influence_tiles as i32;

        let mut per_pass = Vec::with_capacity(self.config.plaza_removal_chances.len());
        for (pass, &chance) in self.config.plaza_removal_chances.iter().enumerate() {
            let pass = pass as i32;
            let block_size = pass + 2;
            let exclusion = plaza.expand(pass + 1);
            let window = plaza.expand(influence + pass + 1);

            let mut opened = 0;
            for pos in window.cells() {
                if !grid.in_bounds(pos) || exclusion.contains(pos) {
                    continue;
                }
                if !rng.gen_bool(chance) {
                    continue;
                }
                let Some(block) = GridRect::centered(pos, block_size).intersection(open_area) else {
                    continue;
                };
                if grid.rect_touches_path(block) {
                    opened += grid.carve_rect(block);
                }
            }

            tracing::debug!(pass, block_size, chance, opened, "Plaza carving pass done");
            per_pass.push(opened);
        }
        per_pass
    }

    /// Clears the plaza with its one-cell ring and the seam column.
    /// Returns the number of cells opened.
    pub fn carve_guaranteed_openings(&self, grid: &mut MazeGrid) -> usize {
        let ring = grid.carve_rect(self.geometry.plaza_grid.expand(1));

        let seam_col = grid.width() as i32 - 1;
        let seam = GridRect::new(seam_col, 1, 1, grid.height() as i32 - 2);
        let opened = ring + grid.carve_rect(seam);

        tracing::debug!(opened, "Guaranteed openings carved");
        opened
    }

    /// Converts a carved grid into the broadcast map.
    ///
    /// Wall cells inside the plaza are skipped; the border ring is appended
    /// afterwards. Each tile carries at most one wall.
    #[must_use]
    pub fn emit(&self, grid: &MazeGrid) -> MapData {
        let geometry = &self.geometry;
        let ts = geometry.tile_size;
        let mut placed: HashSet<TilePos> = HashSet::new();
        let mut walls = Vec::new();

        for (pos, _) in grid.iter().filter(|&(_, cell)| cell == Cell::Wall) {
            let world = geometry.grid_to_world(pos);
            if geometry.plaza.contains(world) {
                continue;
            }
            let tile = TilePos::from_world(world, ts);
            if placed.insert(tile) {
                walls.push(Wall::at_tile(tile, ts));
            }
        }

        for tile in geometry.border_tiles() {
            if placed.insert(tile) {
                walls.push(Wall::at_tile(tile, ts));
            }
        }

        MapData {
            width: geometry.width(),
            height: geometry.height(),
            tile_size: ts,
            walls,
            red_spawn_rect: geometry.red_spawn,
            blue_spawn_rect: geometry.blue_spawn,
            plaza_rect: geometry.plaza,
        }
    }
}
