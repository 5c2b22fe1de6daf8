//! # Gameplay Constants
//!
//! Defaults baked into both client and server. Server config files may
//! override the map dimensions; the tick rate is a protocol constant.

// =============================================================================
// SIMULATION
// =============================================================================

/// Server tick rate (updates per second). One tick every 50 ms.
pub const TICK_RATE: u32 = 20;

/// Maximum players per arena
pub const MAX_PLAYERS: usize = 16;

// =============================================================================
// MAP
// =============================================================================

/// Side length of one map tile in pixels
pub const TILE_SIZE: f32 = 32.0;

/// Default map width in tiles
pub const MAP_WIDTH_TILES: u32 = 64;

/// Default map height in tiles
pub const MAP_HEIGHT_TILES: u32 = 40;

/// Default width of each spawn strip in tiles
pub const SPAWN_WIDTH_TILES: u32 = 4;

/// Default side length of the central plaza in tiles
pub const PLAZA_SIZE_TILES: u32 = 6;

// =============================================================================
// VISION
// =============================================================================

/// Default player vision radius in pixels
pub const VISION_RADIUS: f32 = 6.0 * TILE_SIZE;

/// Default ward vision radius in pixels
pub const WARD_RADIUS: f32 = 4.0 * TILE_SIZE;

/// Wards a team may hold at once
pub const MAX_WARDS_PER_TEAM: usize = 6;

/// Extra tiles past the home spawn strip revealed at session start
pub const DISCOVERY_BUFFER_TILES: u32 = 1;
