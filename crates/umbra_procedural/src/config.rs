//! # Maze Configuration
//!
//! Map dimensions and carving probabilities, loaded from TOML:
//!
//! ```toml
//! map_width_tiles = 64
//! map_height_tiles = 40
//! tile_size = 32.0
//! spawn_width_tiles = 4
//! plaza_size_tiles = 6
//! wall_removal_chance = 0.25
//! plaza_removal_chances = [0.125, 0.05, 0.035]
//! plaza_influence_tiles = 6
//! ```
//!
//! Missing keys fall back to the defaults in `umbra_shared::constants`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_shared::{MAP_HEIGHT_TILES, MAP_WIDTH_TILES, PLAZA_SIZE_TILES, SPAWN_WIDTH_TILES, TILE_SIZE};

use crate::error::{ProceduralError, ProceduralResult};
use crate::grid::GridRect;

/// Narrowest spawn strip: the border column plus one open column.
pub const MIN_SPAWN_WIDTH_TILES: u32 = 2;

/// Input configuration for the maze generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Full map width in tiles, spawn strips included.
    pub map_width_tiles: u32,
    /// Full map height in tiles.
    pub map_height_tiles: u32,
    /// Tile side length in pixels.
    pub tile_size: f32,
    /// Width of each spawn strip in tiles.
    pub spawn_width_tiles: u32,
    /// Side length of the central plaza in tiles.
    pub plaza_size_tiles: u32,
    /// Chance that the thinning pass opens a given interior wall.
    pub wall_removal_chance: f64,
    /// One carving pass per entry; pass `i` opens blocks of `i + 2` cells
    /// with the given chance. Keep these decreasing.
    pub plaza_removal_chances: Vec<f64>,
    /// How far past the plaza the plaza carving passes look for candidates.
    pub plaza_influence_tiles: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        let wall_removal_chance = 0.25;
        Self {
            map_width_tiles: MAP_WIDTH_TILES,
            map_height_tiles: MAP_HEIGHT_TILES,
            tile_size: TILE_SIZE,
            spawn_width_tiles: SPAWN_WIDTH_TILES,
            plaza_size_tiles: PLAZA_SIZE_TILES,
            wall_removal_chance,
            plaza_removal_chances: vec![
                wall_removal_chance / 2.0,
                wall_removal_chance / 5.0,
                wall_removal_chance / 7.0,
            ],
            plaza_influence_tiles: PLAZA_SIZE_TILES,
        }
    }
}

impl MazeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the values are invalid.
    pub fn from_toml_str(source: &str) -> ProceduralResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_toml_file(path: &Path) -> ProceduralResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ProceduralError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Maze grid width: the area between the spawn strips plus the seam
    /// column shared with the far strip.
    #[must_use]
    pub fn grid_width(&self) -> usize {
        (self.map_width_tiles as usize + 1).saturating_sub(2 * self.spawn_width_tiles as usize)
    }

    /// Maze grid height (the full map height).
    #[must_use]
    pub fn grid_height(&self) -> usize {
        self.map_height_tiles as usize
    }

    /// Top-left map tile of the plaza, centred on the map.
    #[must_use]
    pub fn plaza_tile_origin(&self) -> (i32, i32) {
        let col = self.map_width_tiles.saturating_sub(self.plaza_size_tiles) / 2;
        let row = self.map_height_tiles.saturating_sub(self.plaza_size_tiles) / 2;
        (col as i32, row as i32)
    }

    /// Plaza footprint in maze grid coordinates.
    #[must_use]
    pub fn plaza_grid_rect(&self) -> GridRect {
        let (col, row) = self.plaza_tile_origin();
        let size = self.plaza_size_tiles as i32;
        GridRect::new(col - self.spawn_width_tiles as i32, row, size, size)
    }

    /// Checks every value the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> ProceduralResult<()> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ProceduralError::InvalidTileSize(self.tile_size));
        }
        if self.spawn_width_tiles < MIN_SPAWN_WIDTH_TILES {
            return Err(ProceduralError::SpawnTooNarrow {
                spawn_width_tiles: self.spawn_width_tiles,
                min: MIN_SPAWN_WIDTH_TILES,
            });
        }
        if self.grid_width() < 3 {
            return Err(ProceduralError::MapTooNarrow {
                width_tiles: self.map_width_tiles,
                spawn_width_tiles: self.spawn_width_tiles,
            });
        }
        if self.map_height_tiles < 3 {
            return Err(ProceduralError::MapTooShort {
                height_tiles: self.map_height_tiles,
            });
        }

        // The plaza and its one-cell ring must sit inside the maze grid and
        // clear of the top and bottom border rows.
        let ring = self.plaza_grid_rect().expand(1);
        let fits = ring.col >= 0
            && ring.col + ring.width <= self.grid_width() as i32
            && ring.row >= 1
            && ring.row + ring.height < self.grid_height() as i32;
        if !fits {
            return Err(ProceduralError::PlazaDoesNotFit {
                plaza_size_tiles: self.plaza_size_tiles,
                grid_width: self.grid_width(),
                grid_height: self.grid_height(),
            });
        }

        check_probability("wall_removal_chance", self.wall_removal_chance)?;
        for &chance in &self.plaza_removal_chances {
            check_probability("plaza_removal_chances", chance)?;
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> ProceduralResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ProceduralError::InvalidProbability { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MazeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grid_width(), 64 - 8 + 1);
        assert_eq!(config.plaza_tile_origin(), (29, 17));
        assert_eq!(config.plaza_grid_rect(), GridRect::new(25, 17, 6, 6));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MazeConfig::from_toml_str("map_width_tiles = 48\nwall_removal_chance = 0.1\n").unwrap();
        assert_eq!(config.map_width_tiles, 48);
        assert_eq!(config.map_height_tiles, MAP_HEIGHT_TILES);
        assert!((config.wall_removal_chance - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        let narrow = MazeConfig { map_width_tiles: 9, ..MazeConfig::default() };
        assert!(matches!(narrow.validate(), Err(ProceduralError::MapTooNarrow { .. })));

        let big_plaza = MazeConfig { plaza_size_tiles: 39, ..MazeConfig::default() };
        assert!(matches!(big_plaza.validate(), Err(ProceduralError::PlazaDoesNotFit { .. })));

        let bad_chance = MazeConfig { wall_removal_chance: 1.5, ..MazeConfig::default() };
        assert!(matches!(
            bad_chance.validate(),
            Err(ProceduralError::InvalidProbability { field: "wall_removal_chance", .. })
        ));

        // no strip at all puts the seam column past the right edge; a
        // one-tile strip is all border wall
        for spawn_width_tiles in [0, 1] {
            let thin_spawn = MazeConfig { spawn_width_tiles, ..MazeConfig::default() };
            assert!(matches!(
                thin_spawn.validate(),
                Err(ProceduralError::SpawnTooNarrow { min: MIN_SPAWN_WIDTH_TILES, .. })
            ));
        }
        let two_wide = MazeConfig { spawn_width_tiles: 2, ..MazeConfig::default() };
        assert!(two_wide.validate().is_ok());

        let bad_tile = MazeConfig { tile_size: 0.0, ..MazeConfig::default() };
        assert!(matches!(bad_tile.validate(), Err(ProceduralError::InvalidTileSize(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            MazeConfig::from_toml_str("map_width_tiles = \"wide\""),
            Err(ProceduralError::Parse(_))
        ));
    }
}
