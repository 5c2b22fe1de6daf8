//! The map payload.
//!
//! `MapData` is what the server sends to every newly joined client: enough
//! to rebuild collision geometry, wall segments and zone checks locally.
//! It is immutable for the lifetime of a map; regeneration produces a new one.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::{Rect, Vec2};
use crate::zone::{Team, Zone};

/// Position of a tile in the full map grid (spawn strips included).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    /// Column, 0 at the left edge.
    pub col: i32,
    /// Row, 0 at the top edge.
    pub row: i32,
}

impl TilePos {
    /// Creates a new tile position.
    #[inline]
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// World-space centre of this tile.
    #[inline]
    #[must_use]
    pub fn center(self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.col as f32 + 0.5) * tile_size,
            (self.row as f32 + 0.5) * tile_size,
        )
    }

    /// The tile containing a world-space point.
    #[inline]
    #[must_use]
    pub fn from_world(point: Vec2, tile_size: f32) -> Self {
        Self {
            col: (point.x / tile_size).floor() as i32,
            row: (point.y / tile_size).floor() as i32,
        }
    }
}

/// A wall tile, identified by its world-space centre.
///
/// Every wall is exactly one tile in size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Centre X in pixels.
    pub x: f32,
    /// Centre Y in pixels.
    pub y: f32,
}

impl Wall {
    /// Creates a wall centred on `(x, y)`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Wall covering `tile`.
    #[must_use]
    pub fn at_tile(tile: TilePos, tile_size: f32) -> Self {
        let center = tile.center(tile_size);
        Self::new(center.x, center.y)
    }

    /// Centre point.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Axis-aligned bounds of the wall tile.
    #[must_use]
    pub fn bounds(&self, tile_size: f32) -> Rect {
        Rect::centered(self.center(), tile_size)
    }

    /// The tile this wall occupies.
    #[must_use]
    pub fn tile(&self, tile_size: f32) -> TilePos {
        TilePos::from_world(self.center(), tile_size)
    }
}

/// Generated map, as broadcast to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    /// Map width in pixels.
    pub width: f32,
    /// Map height in pixels.
    pub height: f32,
    /// Side length of one tile in pixels.
    pub tile_size: f32,
    /// Every wall tile, border ring included.
    pub walls: Vec<Wall>,
    /// Red team spawn strip.
    pub red_spawn_rect: Rect,
    /// Blue team spawn strip.
    pub blue_spawn_rect: Rect,
    /// Central plaza.
    pub plaza_rect: Rect,
}

impl MapData {
    /// Map width in tiles.
    #[must_use]
    pub fn width_tiles(&self) -> usize {
        (self.width / self.tile_size).round().max(0.0) as usize
    }

    /// Map height in tiles.
    #[must_use]
    pub fn height_tiles(&self) -> usize {
        (self.height / self.tile_size).round().max(0.0) as usize
    }

    /// All named zones of the map.
    #[must_use]
    pub fn zones(&self) -> [Zone; 3] {
        [
            Zone::RedSpawn(self.red_spawn_rect),
            Zone::BlueSpawn(self.blue_spawn_rect),
            Zone::Plaza(self.plaza_rect),
        ]
    }

    /// The zone containing `point`, if any.
    #[must_use]
    pub fn zone_at(&self, point: Vec2) -> Option<Zone> {
        self.zones().into_iter().find(|zone| zone.contains(point))
    }

    /// Whether `point` lies inside the plaza.
    #[must_use]
    pub fn is_in_plaza(&self, point: Vec2) -> bool {
        Zone::Plaza(self.plaza_rect).contains(point)
    }

    /// The spawn strip a team starts in.
    #[must_use]
    pub const fn home_zone(&self, team: Team) -> Zone {
        match team {
            Team::Red => Zone::RedSpawn(self.red_spawn_rect),
            Team::Blue => Zone::BlueSpawn(self.blue_spawn_rect),
        }
    }

    /// Set of tiles occupied by walls.
    #[must_use]
    pub fn wall_tiles(&self) -> HashSet<TilePos> {
        self.walls.iter().map(|wall| wall.tile(self.tile_size)).collect()
    }

    /// Picks a random open tile centre inside `team`'s spawn strip.
    ///
    /// Falls back to the strip's centre if every tile in it is walled.
    /// Builds the wall set on every call; callers that already hold one
    /// should use [`MapData::spawn_point_among`].
    pub fn spawn_point<R: Rng + ?Sized>(&self, team: Team, rng: &mut R) -> Vec2 {
        self.spawn_point_among(team, &self.wall_tiles(), rng)
    }

    /// [`MapData::spawn_point`] against a precomputed set of wall tiles.
    pub fn spawn_point_among<R: Rng + ?Sized>(&self, team: Team, walls: &HashSet<TilePos>, rng: &mut R) -> Vec2 {
        let home = self.home_zone(team);

        let first = TilePos::from_world(Vec2::new(home.rect().x, home.rect().y), self.tile_size);
        let cols = (home.rect().width / self.tile_size).round() as i32;
        let rows = (home.rect().height / self.tile_size).round() as i32;

        let open: Vec<TilePos> = (first.row..first.row + rows)
            .flat_map(|row| (first.col..first.col + cols).map(move |col| TilePos::new(col, row)))
            .filter(|tile| !walls.contains(tile))
            .collect();

        if open.is_empty() {
            return home.rect().center();
        }
        open[rng.gen_range(0..open.len())].center(self.tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_map() -> MapData {
        let tile = 10.0;
        let mut walls = Vec::new();
        for col in 0..8 {
            walls.push(Wall::at_tile(TilePos::new(col, 0), tile));
            walls.push(Wall::at_tile(TilePos::new(col, 3), tile));
        }
        MapData {
            width: 80.0,
            height: 40.0,
            tile_size: tile,
            walls,
            red_spawn_rect: Rect::new(0.0, 0.0, 20.0, 40.0),
            blue_spawn_rect: Rect::new(60.0, 0.0, 20.0, 40.0),
            plaza_rect: Rect::new(30.0, 10.0, 20.0, 20.0),
        }
    }

    #[test]
    fn test_tile_world_conversion() {
        let tile = TilePos::new(3, 2);
        let center = tile.center(32.0);
        assert_eq!(center, Vec2::new(112.0, 80.0));
        assert_eq!(TilePos::from_world(center, 32.0), tile);
        assert_eq!(TilePos::from_world(Vec2::new(-1.0, 5.0), 32.0), TilePos::new(-1, 0));
    }

    #[test]
    fn test_zone_classification() {
        let map = small_map();
        assert_eq!(map.width_tiles(), 8);
        assert_eq!(map.height_tiles(), 4);
        assert!(map.is_in_plaza(Vec2::new(35.0, 15.0)));
        assert!(matches!(map.zone_at(Vec2::new(5.0, 5.0)), Some(Zone::RedSpawn(_))));
        assert!(matches!(map.zone_at(Vec2::new(75.0, 5.0)), Some(Zone::BlueSpawn(_))));
        assert!(map.zone_at(Vec2::new(25.0, 5.0)).is_none());
    }

    #[test]
    fn test_spawn_point_avoids_walls() {
        let map = small_map();
        let walls = map.wall_tiles();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let point = map.spawn_point(Team::Blue, &mut rng);
            assert!(map.blue_spawn_rect.contains(point));
            assert!(!walls.contains(&TilePos::from_world(point, map.tile_size)));
        }
    }

    #[test]
    fn test_spawn_point_among_matches_spawn_point() {
        let map = small_map();
        let walls = map.wall_tiles();
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        for team in Team::ALL {
            for _ in 0..20 {
                assert_eq!(map.spawn_point(team, &mut a), map.spawn_point_among(team, &walls, &mut b));
            }
        }

        // with every strip tile walled the strip centre is used
        let mut solid = HashSet::new();
        for row in 0..4 {
            solid.extend([TilePos::new(0, row), TilePos::new(1, row)]);
        }
        assert_eq!(map.spawn_point_among(Team::Red, &solid, &mut a), map.red_spawn_rect.center());
    }

    #[test]
    fn test_payload_field_names() {
        let json = serde_json::to_string(&small_map()).unwrap();
        assert!(json.contains("\"tileSize\""));
        assert!(json.contains("\"redSpawnRect\""));
        assert!(json.contains("\"plazaRect\""));
    }
}
