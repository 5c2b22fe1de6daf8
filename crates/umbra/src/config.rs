//! # Server Configuration
//!
//! One TOML file drives the whole server:
//!
//! ```toml
//! seed = 42
//! tick_rate = 20
//! vision_radius = 192.0
//! ward_radius = 128.0
//! ward_lifetime_ticks = 600
//!
//! [maze]
//! map_width_tiles = 64
//! map_height_tiles = 40
//!
//! [simulation]
//! bots = 6
//! run_ticks = 600
//! ```
//!
//! Every key is optional. Without a `seed` each start picks a fresh one.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use umbra_procedural::{MapSeed, MazeConfig};
use umbra_shared::{
    DISCOVERY_BUFFER_TILES, MAX_PLAYERS, MAX_WARDS_PER_TEAM, TICK_RATE, VISION_RADIUS, WARD_RADIUS,
};

use crate::error::{UmbraError, UmbraResult};

/// Top-level server configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Map seed; time-derived when absent.
    pub seed: Option<u64>,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Player cap per arena.
    pub max_players: usize,
    /// Player vision radius in pixels.
    pub vision_radius: f32,
    /// Ward reveal radius in pixels.
    pub ward_radius: f32,
    /// Ticks a ward lasts. `0` keeps wards forever.
    pub ward_lifetime_ticks: u64,
    /// Wards one team may hold at once; the oldest gives way.
    pub max_wards_per_team: usize,
    /// Columns past the home strip revealed at session start.
    pub discovery_buffer_tiles: u32,
    /// Maze layout.
    pub maze: MazeConfig,
    /// Headless simulation driven by `umbra_server`.
    pub simulation: SimulationConfig,
}

/// Simulated players for the headless server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wandering bots, split evenly between teams.
    pub bots: usize,
    /// Ticks to run before shutting down.
    pub run_ticks: u64,
    /// Bot speed in pixels per tick.
    pub bot_speed: f32,
    /// Each bot drops a ward this often. `0` disables wards.
    pub ward_interval_ticks: u64,
    /// Regenerate the map this often. `0` keeps one map.
    pub reset_interval_ticks: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICK_RATE,
            max_players: MAX_PLAYERS,
            vision_radius: VISION_RADIUS,
            ward_radius: WARD_RADIUS,
            ward_lifetime_ticks: u64::from(TICK_RATE) * 30,
            max_wards_per_team: MAX_WARDS_PER_TEAM,
            discovery_buffer_tiles: DISCOVERY_BUFFER_TILES,
            maze: MazeConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bots: 6,
            run_ticks: u64::from(TICK_RATE) * 30,
            bot_speed: 6.0,
            ward_interval_ticks: u64::from(TICK_RATE) * 10,
            reset_interval_ticks: 0,
        }
    }
}

impl ServerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(source: &str) -> UmbraResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_toml_file(path: &Path) -> UmbraResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| UmbraError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "Server config loaded");
        Ok(config)
    }

    /// Checks every value, including the maze section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> UmbraResult<()> {
        if self.tick_rate == 0 || self.tick_rate > 1000 {
            return Err(invalid("tick_rate", format!("{} is outside 1..=1000", self.tick_rate)));
        }
        if self.max_players == 0 {
            return Err(invalid("max_players", "must be at least 1".to_owned()));
        }
        if self.max_wards_per_team == 0 {
            return Err(invalid("max_wards_per_team", "must be at least 1".to_owned()));
        }
        if !(self.vision_radius.is_finite() && self.vision_radius > 0.0) {
            return Err(invalid("vision_radius", format!("{} is not a positive distance", self.vision_radius)));
        }
        if !(self.ward_radius.is_finite() && self.ward_radius >= 0.0) {
            return Err(invalid("ward_radius", format!("{} is not a distance", self.ward_radius)));
        }
        if !(self.simulation.bot_speed.is_finite() && self.simulation.bot_speed >= 0.0) {
            return Err(invalid("simulation.bot_speed", format!("{} is not a speed", self.simulation.bot_speed)));
        }
        self.maze.validate()?;
        Ok(())
    }

    /// The configured seed, or one taken from the clock.
    #[must_use]
    pub fn resolved_seed(&self) -> MapSeed {
        self.seed.map_or_else(clock_seed, MapSeed::new)
    }

    /// Ward lifetime, `None` for permanent wards.
    #[must_use]
    pub const fn ward_lifetime(&self) -> Option<u64> {
        match self.ward_lifetime_ticks {
            0 => None,
            ticks => Some(ticks),
        }
    }
}

fn invalid(field: &'static str, reason: String) -> UmbraError {
    UmbraError::InvalidSetting { field, reason }
}

fn clock_seed() -> MapSeed {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or_else(|_| MapSeed::default(), |elapsed| MapSeed::new(elapsed.as_nanos() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_rate, 20);
        assert_eq!(config.ward_lifetime(), Some(600));
    }

    #[test]
    fn test_partial_document() {
        let config = ServerConfig::from_toml_str(
            r"
            seed = 7
            ward_lifetime_ticks = 0

            [maze]
            map_width_tiles = 48
            map_height_tiles = 30
            plaza_size_tiles = 4

            [simulation]
            bots = 2
            ",
        )
        .unwrap();

        assert_eq!(config.resolved_seed(), MapSeed::new(7));
        assert_eq!(config.ward_lifetime(), None);
        assert_eq!(config.maze.map_width_tiles, 48);
        assert_eq!(config.maze.spawn_width_tiles, MazeConfig::default().spawn_width_tiles);
        assert_eq!(config.simulation.bots, 2);
        assert_eq!(config.simulation.run_ticks, SimulationConfig::default().run_ticks);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ServerConfig::from_toml_str("tick_rate = 0").unwrap_err();
        assert!(matches!(err, UmbraError::InvalidSetting { field: "tick_rate", .. }));

        let err = ServerConfig::from_toml_str("max_wards_per_team = 0").unwrap_err();
        assert!(matches!(err, UmbraError::InvalidSetting { field: "max_wards_per_team", .. }));

        let err = ServerConfig::from_toml_str("vision_radius = -1.0").unwrap_err();
        assert!(matches!(err, UmbraError::InvalidSetting { field: "vision_radius", .. }));

        let err = ServerConfig::from_toml_str("[maze]\nmap_width_tiles = 6").unwrap_err();
        assert!(matches!(err, UmbraError::Procedural(_)));

        assert!(matches!(
            ServerConfig::from_toml_str("tick_rate = \"fast\""),
            Err(UmbraError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_toml_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, UmbraError::ConfigIo { .. }));
        assert!(err.to_string().contains("exist.toml"));
    }
}
