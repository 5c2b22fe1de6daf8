//! # UMBRA
//!
//! The arena server crate, tying maze generation and fog of war together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              UMBRA ARENA                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐   │
//! │  │  procedural     │     │  MapSession     │     │  vision         │   │
//! │  │                 │────>│                 │────>│                 │   │
//! │  │  • Spanning tree│     │  • MapData      │     │  • Polygon      │   │
//! │  │  • Relaxation   │     │  • Segments     │     │  • Line of sight│   │
//! │  │  • Emission     │     │  • Generation # │     │  • Wards        │   │
//! │  └─────────────────┘     └────────┬────────┘     └────────┬────────┘   │
//! │                                   │                       │            │
//! │                          ┌────────v────────┐              │            │
//! │                          │  Arena::tick    │<─────────────┘            │
//! │                          │                 │                           │
//! │                          │  • PlayerSession│                           │
//! │                          │  • Discovery    │                           │
//! │                          │  • VisionFrame  │                           │
//! │                          └─────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `arena`: players, wards and the per-tick vision pass
//! - `session`: map and player ownership
//! - `tick`: fixed-timestep loop
//! - `config`: TOML server configuration

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod arena;
pub mod config;
pub mod error;
pub mod session;
pub mod tick;

pub use umbra_procedural as procedural;
pub use umbra_shared as shared;
pub use umbra_vision as vision;

pub use arena::{Arena, ArenaSettings, VisionFrame};
pub use config::{ServerConfig, SimulationConfig};
pub use error::{UmbraError, UmbraResult};
pub use session::{MapSession, PlayerId, PlayerSession};
pub use tick::{TickLoop, TickStats};
