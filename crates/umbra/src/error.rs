//! # Server Error Types
//!
//! Failures at the server edge: loading configuration and addressing
//! players. The tick itself never fails.

use std::path::PathBuf;

use thiserror::Error;
use umbra_procedural::ProceduralError;

use crate::session::PlayerId;

/// Errors raised by the arena server.
#[derive(Error, Debug)]
pub enum UmbraError {
    /// The maze section of the config is invalid.
    #[error(transparent)]
    Procedural(#[from] ProceduralError),

    /// Config file could not be read.
    #[error("failed to read server config {}: {source}", path.display())]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed TOML.
    #[error("failed to parse server config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A server setting outside its valid range.
    #[error("invalid server setting {field}: {reason}")]
    InvalidSetting {
        /// Name of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// No player with this id is in the arena.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// The arena already holds its maximum number of players.
    #[error("arena full: {max} players")]
    ArenaFull {
        /// Player cap.
        max: usize,
    },
}

/// Result type for server operations.
pub type UmbraResult<T> = Result<T, UmbraError>;
