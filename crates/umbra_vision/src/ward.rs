//! # Wards and Vision Sources
//!
//! A viewer's vision is the union of several sources: its own
//! occlusion-aware sight and every ward its team has placed. Ward vision
//! ignores walls entirely.

use serde::{Deserialize, Serialize};
use umbra_shared::{Team, Vec2};

use crate::occlusion;
use crate::segment::WallSegment;

/// A stationary, team-owned vision source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    /// Centre in world space.
    pub position: Vec2,
    /// Reveal radius in pixels.
    pub radius: f32,
    /// Owning team; only its members see through the ward.
    pub team: Team,
    /// Tick at which the ward disappears, if it ever does.
    pub expires_at_tick: Option<u64>,
}

impl Ward {
    /// Creates a permanent ward.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, team: Team) -> Self {
        Self {
            position,
            radius,
            team,
            expires_at_tick: None,
        }
    }

    /// The same ward, expiring at `tick`.
    #[must_use]
    pub fn expiring_at(mut self, tick: u64) -> Self {
        self.expires_at_tick = Some(tick);
        self
    }

    /// Whether the ward is gone by `tick`.
    #[must_use]
    pub fn is_expired(&self, tick: u64) -> bool {
        self.expires_at_tick.is_some_and(|expiry| tick >= expiry)
    }

    /// Whether `point` is within the reveal radius.
    #[must_use]
    pub fn covers(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }

    /// This ward as a vision source.
    #[must_use]
    pub const fn source(&self) -> VisionSource {
        VisionSource::ward(self.position, self.radius)
    }
}

/// A circle of vision, optionally blocked by walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionSource {
    /// Centre of the circle.
    pub origin: Vec2,
    /// Radius in pixels.
    pub radius: f32,
    /// Walls do not block this source.
    pub ignores_occlusion: bool,
}

impl VisionSource {
    /// A viewer's own, occlusion-aware sight.
    #[must_use]
    pub const fn viewer(origin: Vec2, radius: f32) -> Self {
        Self {
            origin,
            radius,
            ignores_occlusion: false,
        }
    }

    /// A ward's sight through walls.
    #[must_use]
    pub const fn ward(origin: Vec2, radius: f32) -> Self {
        Self {
            origin,
            radius,
            ignores_occlusion: true,
        }
    }

    /// Whether this source reveals `point` given the nearby walls.
    #[must_use]
    pub fn reveals(&self, point: Vec2, segments: &[WallSegment]) -> bool {
        if self.ignores_occlusion {
            self.origin.distance_squared(point) <= self.radius * self.radius
        } else {
            occlusion::is_visible(self.origin, point, self.radius, segments)
        }
    }
}

/// Union of the vision sources available to one viewer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisionMask {
    sources: Vec<VisionSource>,
}

impl VisionMask {
    /// Unions a set of sources.
    #[must_use]
    pub fn union<I: IntoIterator<Item = VisionSource>>(sources: I) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// A viewer's own sight plus every ward owned by `team`.
    #[must_use]
    pub fn for_viewer(origin: Vec2, radius: f32, team: Team, wards: &[Ward]) -> Self {
        let own = std::iter::once(VisionSource::viewer(origin, radius));
        let allied = wards.iter().filter(|ward| ward.team == team).map(Ward::source);
        Self::union(own.chain(allied))
    }

    /// Adds a source.
    pub fn push(&mut self, source: VisionSource) {
        self.sources.push(source);
    }

    /// Sources in the mask.
    #[must_use]
    pub fn sources(&self) -> &[VisionSource] {
        &self.sources
    }

    /// Whether any source reveals `point`.
    ///
    /// `segments` must include every wall near the occlusion-aware sources.
    #[must_use]
    pub fn reveals(&self, point: Vec2, segments: &[WallSegment]) -> bool {
        self.sources.iter().any(|source| source.reveals(point, segments))
    }
}
