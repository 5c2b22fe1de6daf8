//! # UMBRA Vision
//!
//! Fog of war for an authoritative server: what each player sees right now
//! and what they have ever seen.
//!
//! ## Layers
//!
//! - **Polygon**: the raycast fan around a viewer, sent to the client for
//!   fog rendering
//! - **Line of sight**: exact per-entity occlusion, deciding which other
//!   players a viewer is told about
//! - **Wards**: team-owned circles that reveal through walls
//! - **Discovery**: per-player tile memory for the minimap
//!
//! ## Core Components
//!
//! - `SegmentIndex`: wall edges bucketed for fast radius queries
//! - `VisionEngine`: polygon and visibility queries against the live map
//! - `VisionMask`: union of a viewer's sight and allied wards
//! - `DiscoveredGrid`: monotonic explored-tile grid
//!
//! ## Example
//!
//! ```rust,ignore
//! use umbra_vision::VisionEngine;
//!
//! let mut engine = VisionEngine::new();
//! engine.publish_map(&map);
//!
//! let polygon = engine.compute_polygon(viewer, 192.0);
//! let sees_enemy = engine.is_visible(viewer, enemy, 192.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod discovered;
pub mod engine;
pub mod geometry;
pub mod occlusion;
pub mod polygon;
pub mod segment;
pub mod ward;

pub use discovered::DiscoveredGrid;
pub use engine::VisionEngine;
pub use occlusion::{classify, classify_in_polygon, is_visible, line_of_sight, VisibilityClass};
pub use polygon::{compute_polygon, VisibilityPolygon};
pub use segment::{wall_segments, SegmentIndex, WallSegment};
pub use ward::{VisionMask, VisionSource, Ward};
