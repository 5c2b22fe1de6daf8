//! # Procedural Error Types
//!
//! Everything that can go wrong before generation starts. Generation itself
//! is infallible for a validated config.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a maze configuration.
#[derive(Error, Debug)]
pub enum ProceduralError {
    /// Tile size must be a positive, finite number of pixels.
    #[error("invalid tile size: {0}")]
    InvalidTileSize(f32),

    /// The two spawn strips leave no room for a maze between them.
    #[error("map too narrow: {width_tiles} tiles cannot fit two spawn strips of {spawn_width_tiles} plus a maze")]
    MapTooNarrow {
        /// Configured map width.
        width_tiles: u32,
        /// Configured spawn strip width.
        spawn_width_tiles: u32,
    },

    /// A spawn strip needs at least one open column inside the border.
    #[error("spawn strip of {spawn_width_tiles} tiles is narrower than {min} tiles")]
    SpawnTooNarrow {
        /// Configured spawn strip width.
        spawn_width_tiles: u32,
        /// Narrowest strip accepted.
        min: u32,
    },

    /// The map needs at least one row between the top and bottom border.
    #[error("map too short: {height_tiles} tiles")]
    MapTooShort {
        /// Configured map height.
        height_tiles: u32,
    },

    /// The plaza (plus its carved ring) does not fit inside the maze area.
    #[error("plaza of {plaza_size_tiles} tiles does not fit inside a {grid_width}x{grid_height} maze")]
    PlazaDoesNotFit {
        /// Configured plaza size.
        plaza_size_tiles: u32,
        /// Maze grid width.
        grid_width: usize,
        /// Maze grid height.
        grid_height: usize,
    },

    /// A carving probability outside `[0, 1]`.
    #[error("invalid probability for {field}: {value}")]
    InvalidProbability {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Malformed TOML.
    #[error("failed to parse maze config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for procedural operations.
pub type ProceduralResult<T> = Result<T, ProceduralError>;
