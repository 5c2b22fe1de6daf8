//! # UMBRA Shared
//!
//! Common types used by both client and server.
//!
//! ## CRITICAL RULE
//!
//! This crate is the geometry contract. It must NEVER depend on:
//! - rendering or window crates
//! - transport crates
//!
//! The server generates a `MapData`, the transport layer ships it, and the
//! client rebuilds the exact same walls and zones from it.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod map;
pub mod math;
pub mod zone;

pub use constants::{
    DISCOVERY_BUFFER_TILES, MAP_HEIGHT_TILES, MAP_WIDTH_TILES, MAX_PLAYERS, MAX_WARDS_PER_TEAM, PLAZA_SIZE_TILES,
    SPAWN_WIDTH_TILES, TICK_RATE, TILE_SIZE, VISION_RADIUS, WARD_RADIUS,
};
pub use map::{MapData, TilePos, Wall};
pub use math::{Rect, Vec2};
pub use zone::{Team, Zone};
