use serde::{Deserialize, Serialize};

use super::Player;

/// Index of a planet within its [`GameState`](crate::GameState).
pub type PlanetId = usize;

/// A 2-D position on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A fleet in flight between two planets.
///
/// Each planet launches at most one transporter at a time; the transporter is
/// stored on its source planet until it arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transporter {
    pub owner: Player,
    pub source: PlanetId,
    pub destination: PlanetId,
    pub ships: f64,
    pub turns_remaining: u32,
}

/// A planet on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub owner: Player,
    pub ships: f64,
    pub growth_rate: f64,
    pub position: Vec2,
    #[serde(default)]
    pub transporter: Option<Transporter>,
}

impl Planet {
    #[must_use]
    pub fn new(id: PlanetId, owner: Player, ships: f64, growth_rate: f64, position: Vec2) -> Self {
        Self {
            id,
            owner,
            ships,
            growth_rate,
            position,
            transporter: None,
        }
    }

    /// Returns `true` if `player` can launch a transporter from this planet this tick.
    #[must_use]
    pub fn is_launchable_by(&self, player: Player) -> bool {
        self.owner == player && self.transporter.is_none() && self.ships > 0.0
    }

    #[must_use]
    pub fn distance_to(&self, other: &Planet) -> f64 {
        self.position.distance(other.position)
    }
}
