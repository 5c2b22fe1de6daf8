//! # Sessions
//!
//! `MapSession` owns the live map and its derived wall index. Both are
//! wrapped in `Arc` and replaced together on regeneration, so a reader
//! holding the old pair keeps a consistent view.
//!
//! `PlayerSession` owns everything vision needs for one player, including
//! the discovery grid. Nothing here is shared between players.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use umbra_procedural::{MapSeed, MazeConfig, MazeGenerator};
use umbra_shared::{MapData, Team, TilePos, Vec2};
use umbra_vision::{DiscoveredGrid, SegmentIndex};

use crate::error::UmbraResult;

/// Arena-unique player id.
pub type PlayerId = u32;

/// The live map of an arena.
pub struct MapSession {
    generator: MazeGenerator,
    seed: MapSeed,
    generation: u64,
    map: Arc<MapData>,
    segments: Arc<SegmentIndex>,
    wall_tiles: HashSet<TilePos>,
}

impl MapSession {
    /// Generates the first map for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the maze configuration is invalid.
    pub fn new(config: MazeConfig, seed: MapSeed) -> UmbraResult<Self> {
        let generator = MazeGenerator::new(config)?;
        let (map, segments, wall_tiles) = build(&generator, seed);
        tracing::info!(seed = seed.value(), walls = map.walls.len(), "Map session started");
        Ok(Self {
            generator,
            seed,
            generation: 0,
            map,
            segments,
            wall_tiles,
        })
    }

    /// Replaces the map and its wall index with a fresh one.
    pub fn regenerate(&mut self, seed: MapSeed) {
        let (map, segments, wall_tiles) = build(&self.generator, seed);
        self.map = map;
        self.segments = segments;
        self.wall_tiles = wall_tiles;
        self.seed = seed;
        self.generation += 1;
        tracing::info!(
            seed = seed.value(),
            generation = self.generation,
            walls = self.map.walls.len(),
            "Map regenerated"
        );
    }

    /// The current map payload.
    #[must_use]
    pub const fn map(&self) -> &Arc<MapData> {
        &self.map
    }

    /// Wall segments of the current map.
    #[must_use]
    pub const fn segments(&self) -> &Arc<SegmentIndex> {
        &self.segments
    }

    /// Seed of the current map.
    #[must_use]
    pub const fn seed(&self) -> MapSeed {
        self.seed
    }

    /// How many times the map has been regenerated.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Maze settings used for every generation.
    #[must_use]
    pub fn config(&self) -> &MazeConfig {
        self.generator.config()
    }

    /// Random open tile centre in `team`'s spawn strip, using the cached
    /// wall set.
    pub fn spawn_point<R: Rng + ?Sized>(&self, team: Team, rng: &mut R) -> Vec2 {
        self.map.spawn_point_among(team, &self.wall_tiles, rng)
    }

    /// Whether `point` is inside the map and not inside a wall tile.
    #[must_use]
    pub fn is_open(&self, point: Vec2) -> bool {
        let inside = point.x >= 0.0 && point.y >= 0.0 && point.x < self.map.width && point.y < self.map.height;
        inside && !self.wall_tiles.contains(&TilePos::from_world(point, self.map.tile_size))
    }
}

fn build(generator: &MazeGenerator, seed: MapSeed) -> (Arc<MapData>, Arc<SegmentIndex>, HashSet<TilePos>) {
    let map = generator.generate_seeded(seed);
    let segments = SegmentIndex::from_map(&map);
    let wall_tiles = map.wall_tiles();
    (Arc::new(map), Arc::new(segments), wall_tiles)
}

/// One player's vision state.
#[derive(Clone, Debug)]
pub struct PlayerSession {
    id: PlayerId,
    team: Team,
    position: Vec2,
    vision_radius: f32,
    discovered: DiscoveredGrid,
}

impl PlayerSession {
    /// Creates a session with an explicit discovery grid.
    #[must_use]
    pub const fn new(id: PlayerId, team: Team, position: Vec2, vision_radius: f32, discovered: DiscoveredGrid) -> Self {
        Self {
            id,
            team,
            position,
            vision_radius,
            discovered,
        }
    }

    /// Creates a session on `map` with the team's home strip revealed.
    #[must_use]
    pub fn for_map(id: PlayerId, team: Team, position: Vec2, vision_radius: f32, map: &MapData, buffer_tiles: u32) -> Self {
        Self::new(id, team, position, vision_radius, DiscoveredGrid::for_map(map, team, buffer_tiles))
    }

    /// Player id.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Player team.
    #[must_use]
    pub const fn team(&self) -> Team {
        self.team
    }

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the player.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Vision radius in pixels.
    #[must_use]
    pub const fn vision_radius(&self) -> f32 {
        self.vision_radius
    }

    /// Changes the vision radius, e.g. from a stat change.
    pub fn set_vision_radius(&mut self, radius: f32) {
        self.vision_radius = radius;
    }

    /// Tiles this player has explored.
    #[must_use]
    pub const fn discovered(&self) -> &DiscoveredGrid {
        &self.discovered
    }

    /// Marks everything in range of the current position as discovered.
    ///
    /// Returns how many tiles were new.
    pub fn discover(&mut self) -> usize {
        self.discovered.update(self.position, self.vision_radius)
    }

    /// Starts over on a new map: new position, fresh discovery grid.
    pub fn respawn(&mut self, position: Vec2, map: &MapData, buffer_tiles: u32) {
        self.position = position;
        self.discovered = DiscoveredGrid::for_map(map, self.team, buffer_tiles);
    }
}
