//! # UMBRA Procedural Generation
//!
//! Deterministic arena generation: a maze between two spawn strips with a
//! central plaza.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same map
//! 2. **Connected**: Every open cell is reachable from every other
//! 3. **Enclosed**: The map border is always fully walled
//! 4. **Infallible**: A validated config always yields a usable map
//!
//! ## Core Components
//!
//! - `MazeConfig`: Dimensions and carving probabilities (TOML)
//! - `MazeGenerator`: Carving stages and wall emission
//! - `MazeGrid`: Transient WALL/PATH grid in maze coordinates
//! - `MapGeometry`: Grid-to-world conversion and zone rectangles
//! - `MapSeed`: Seeds and derived random streams
//!
//! ## Example
//!
//! ```rust,ignore
//! use umbra_procedural::{MapSeed, MazeConfig, MazeGenerator};
//!
//! let generator = MazeGenerator::new(MazeConfig::default())?;
//! let map = generator.generate_seeded(MapSeed::new(12345));
//!
//! assert!(map.walls.iter().all(|wall| !map.is_in_plaza(wall.center())));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod seed;

pub use config::{MazeConfig, MIN_SPAWN_WIDTH_TILES};
pub use error::{ProceduralError, ProceduralResult};
pub use geometry::MapGeometry;
pub use grid::{Cell, GridPos, GridRect, MazeGrid};
pub use maze::{MazeGenerator, MazeLayout, PassStats};
pub use seed::MapSeed;
