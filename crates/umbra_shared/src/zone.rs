//! Named map zones and team ownership.

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Vec2};

/// The two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Spawns on the left edge of the map.
    Red,
    /// Spawns on the right edge of the map.
    Blue,
}

impl Team {
    /// Both teams, red first.
    pub const ALL: [Self; 2] = [Self::Red, Self::Blue];

    /// The opposing team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

/// A named axis-aligned region of the map.
///
/// The set is closed: every zone a map has is one of these variants, and
/// point classification is a `match`, never a lookup by name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Zone {
    /// Red team spawn strip (left edge).
    RedSpawn(Rect),
    /// Blue team spawn strip (right edge).
    BlueSpawn(Rect),
    /// Open square at the map centre.
    Plaza(Rect),
}

impl Zone {
    /// The zone's bounds.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        match self {
            Self::RedSpawn(rect) | Self::BlueSpawn(rect) | Self::Plaza(rect) => *rect,
        }
    }

    /// Whether `point` lies inside the zone.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect().contains(point)
    }

    /// Payload name of the zone.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RedSpawn(_) => "redSpawn",
            Self::BlueSpawn(_) => "blueSpawn",
            Self::Plaza(_) => "plaza",
        }
    }

    /// The team whose home this zone is, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<Team> {
        match self {
            Self::RedSpawn(_) => Some(Team::Red),
            Self::BlueSpawn(_) => Some(Team::Blue),
            Self::Plaza(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_dispatch() {
        let plaza = Zone::Plaza(Rect::new(10.0, 10.0, 5.0, 5.0));
        assert!(plaza.contains(Vec2::new(12.0, 12.0)));
        assert!(!plaza.contains(Vec2::new(2.0, 12.0)));
        assert_eq!(plaza.name(), "plaza");
        assert_eq!(plaza.owner(), None);

        let red = Zone::RedSpawn(Rect::new(0.0, 0.0, 5.0, 50.0));
        assert_eq!(red.owner(), Some(Team::Red));
        assert_eq!(Team::Red.opponent(), Team::Blue);
    }
}
