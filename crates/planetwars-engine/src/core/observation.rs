//! Partial-information snapshots.
//!
//! An [`Observation`] has the same shape as a [`GameState`] but each planet's
//! ship count is a [`ShipCount`]: either known, or hidden from the observer.
//! Policies that consume observations decide explicitly how an unknown count
//! folds into their scores rather than relying on a sentinel number.

use serde::{Deserialize, Serialize};

use crate::{GameState, Planet, PlanetId, Player, Vec2};

/// A ship count that may be hidden from the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ShipCount {
    Known(f64),
    Unknown,
}

impl ShipCount {
    /// Returns the known count, or `fallback` when hidden.
    #[must_use]
    pub fn unwrap_or(self, fallback: f64) -> f64 {
        match self {
            ShipCount::Known(ships) => ships,
            ShipCount::Unknown => fallback,
        }
    }

    #[must_use]
    pub fn known(self) -> Option<f64> {
        match self {
            ShipCount::Known(ships) => Some(ships),
            ShipCount::Unknown => None,
        }
    }
}

/// A planet as seen by one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedPlanet {
    pub id: PlanetId,
    pub owner: Player,
    pub ships: ShipCount,
    pub growth_rate: f64,
    pub position: Vec2,
}

impl ObservedPlanet {
    fn from_planet(planet: &Planet, ships: ShipCount) -> Self {
        Self {
            id: planet.id,
            owner: planet.owner,
            ships,
            growth_rate: planet.growth_rate,
            position: planet.position,
        }
    }

    #[must_use]
    pub fn distance_to(&self, other: &ObservedPlanet) -> f64 {
        self.position.distance(other.position)
    }
}

/// A snapshot in which some ship counts may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub planets: Vec<ObservedPlanet>,
    pub tick: u32,
}

impl Observation {
    /// Observes the whole state with every ship count known.
    #[must_use]
    pub fn full(state: &GameState) -> Self {
        Self {
            planets: state
                .planets
                .iter()
                .map(|p| ObservedPlanet::from_planet(p, ShipCount::Known(p.ships)))
                .collect(),
            tick: state.tick,
        }
    }

    /// Observes the state from `viewer`'s side: ship counts on planets owned by
    /// the opponent are hidden.
    #[must_use]
    pub fn for_player(state: &GameState, viewer: Player) -> Self {
        let hidden = viewer.opponent();
        Self {
            planets: state
                .planets
                .iter()
                .map(|p| {
                    let ships = if p.owner == hidden && hidden != Player::Neutral {
                        ShipCount::Unknown
                    } else {
                        ShipCount::Known(p.ships)
                    };
                    ObservedPlanet::from_planet(p, ships)
                })
                .collect(),
            tick: state.tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState::new(vec![
            Planet::new(0, Player::Player1, 30.0, 1.0, Vec2::new(0.0, 0.0)),
            Planet::new(1, Player::Player2, 40.0, 1.0, Vec2::new(10.0, 0.0)),
            Planet::new(2, Player::Neutral, 5.0, 0.5, Vec2::new(5.0, 5.0)),
        ])
    }

    #[test]
    fn test_full_observation_knows_everything() {
        let obs = Observation::full(&sample_state());
        assert!(obs.planets.iter().all(|p| p.ships.is_known()));
        assert_eq!(obs.planets[1].ships, ShipCount::Known(40.0));
    }

    #[test]
    fn test_player_observation_hides_opponent_only() {
        let obs = Observation::for_player(&sample_state(), Player::Player1);
        assert_eq!(obs.planets[0].ships, ShipCount::Known(30.0));
        assert_eq!(obs.planets[1].ships, ShipCount::Unknown);
        assert_eq!(obs.planets[2].ships, ShipCount::Known(5.0));
    }

    #[test]
    fn test_unwrap_or_folds_unknown() {
        assert!((ShipCount::Unknown.unwrap_or(0.0)).abs() < f64::EPSILON);
        assert!((ShipCount::Known(3.0).unwrap_or(0.0) - 3.0).abs() < f64::EPSILON);
        assert_eq!(ShipCount::Unknown.known(), None);
    }
}
