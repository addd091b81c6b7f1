//! Phase-aware heuristic policy.
//!
//! The policy classifies the match into a [`Phase`] from the signed ship
//! differential (own ships minus opponent ships, neutral excluded) and applies
//! a direct rule per phase:
//!
//! | Phase | Differential | Source maximizes | Target minimizes | Ships sent |
//! |-------|--------------|------------------|------------------|------------|
//! | Early | `< 200` | `ships` | `ships - growth` | `max(5, 0.4 * ships)` |
//! | Mid | `< 600` | `ships + 2 * growth` | `ships - 2 * growth` | `max(10, 0.5 * ships)` |
//! | Late | `>= 600` | `growth` | `growth - ships / 2` | `0.6 * ships` |
//!
//! Sources are the player's planets holding ships; targets are opponent
//! planets only. With [`DistanceMode::Aware`], each target's cost also grows by
//! `distance / scale`, where the scale is 10, 20 and 40 for the early, mid and
//! late phases. Ties go to the first planet in snapshot order.
//!
//! # Partial Information
//!
//! The policy works on an [`Observation`], so it serves both full snapshots
//! (via [`Observation::full`]) and partial ones. Unknown ship counts fold as:
//!
//! - **Source scores and standings**: unknown counts as 0 ships
//! - **Target cost**: an unknown target costs `+inf` in every phase, so a hidden
//!   enemy planet is never mistaken for an easy target

use planetwars_engine::{
    Action, GameState, Observation, ObservedPlanet, PlanetId, Player, ShipCount,
};

use crate::{
    candidates::{first_max_by, first_min_by},
    config::DistanceMode,
};

/// Coarse match progress derived from the ship differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    #[display("early")]
    Early,
    #[display("mid")]
    Mid,
    #[display("late")]
    Late,
}

impl Phase {
    pub const MID_THRESHOLD: f64 = 200.0;
    pub const LATE_THRESHOLD: f64 = 600.0;

    #[must_use]
    pub fn from_differential(differential: f64) -> Self {
        if differential < Self::MID_THRESHOLD {
            Phase::Early
        } else if differential < Self::LATE_THRESHOLD {
            Phase::Mid
        } else {
            Phase::Late
        }
    }

    fn source_score(self, ships: f64, growth_rate: f64) -> f64 {
        match self {
            Phase::Early => ships,
            Phase::Mid => ships + 2.0 * growth_rate,
            Phase::Late => growth_rate,
        }
    }

    fn target_cost(self, ships: ShipCount, growth_rate: f64) -> f64 {
        let Some(ships) = ships.known() else {
            return f64::INFINITY;
        };
        match self {
            Phase::Early => ships - growth_rate,
            Phase::Mid => ships - 2.0 * growth_rate,
            Phase::Late => growth_rate - ships / 2.0,
        }
    }

    fn distance_scale(self) -> f64 {
        match self {
            Phase::Early => 10.0,
            Phase::Mid => 20.0,
            Phase::Late => 40.0,
        }
    }

    fn ships_to_send(self, source_ships: f64) -> f64 {
        match self {
            Phase::Early => f64::max(5.0, source_ships * 0.4),
            Phase::Mid => f64::max(10.0, source_ships * 0.5),
            Phase::Late => source_ships * 0.6,
        }
    }
}

/// Aggregate ship and planet counts for one player and its opponent.
///
/// Only planets holding ships count towards the player's planet count; every
/// opponent planet counts. Unknown ship counts contribute 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standings {
    pub own_ships: f64,
    pub opponent_ships: f64,
    pub own_planets: usize,
    pub opponent_planets: usize,
}

impl Standings {
    /// Ratio of the opponent's ships below which the player is losing.
    pub const LOSING_RATIO: f64 = 0.8;

    #[must_use]
    pub fn from_observation(observation: &Observation, player: Player) -> Self {
        let opponent = player.opponent();
        let mut standings = Self {
            own_ships: 0.0,
            opponent_ships: 0.0,
            own_planets: 0,
            opponent_planets: 0,
        };
        for planet in &observation.planets {
            let ships = planet.ships.unwrap_or(0.0);
            if planet.owner == player && ships > 0.0 {
                standings.own_ships += ships;
                standings.own_planets += 1;
            } else if planet.owner == opponent && opponent != Player::Neutral {
                standings.opponent_ships += ships;
                standings.opponent_planets += 1;
            }
        }
        standings
    }

    /// Own ships minus opponent ships.
    #[must_use]
    pub fn differential(&self) -> f64 {
        self.own_ships - self.opponent_ships
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_differential(self.differential())
    }

    /// Behind on ships (below 80% of the opponent) or on planet count.
    #[must_use]
    pub fn is_losing(&self) -> bool {
        self.own_ships < self.opponent_ships * Self::LOSING_RATIO
            || self.own_planets < self.opponent_planets
    }
}

/// A move resolved by the heuristic policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMove {
    pub phase: Phase,
    pub source: PlanetId,
    pub target: PlanetId,
    pub ships: f64,
}

impl HeuristicMove {
    #[must_use]
    pub fn into_action(self, player: Player) -> Action {
        Action::launch(player, self.source, self.target, self.ships)
    }

    /// Whether `snapshot` would carry the move out for `player`.
    ///
    /// The source may still have a transporter in flight, or hold fewer ships
    /// than the phase floor; the engine ignores such launches.
    #[must_use]
    pub fn is_playable(&self, snapshot: &GameState, player: Player) -> bool {
        snapshot.is_legal_launch(player, self.source, self.target, self.ships)
    }
}

/// Rule-based policy selecting one launch per turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy {
    distance: DistanceMode,
}

impl HeuristicPolicy {
    #[must_use]
    pub const fn new(distance: DistanceMode) -> Self {
        Self { distance }
    }

    /// Planets `player` may launch from: owned and holding ships.
    pub fn sources(
        observation: &Observation,
        player: Player,
    ) -> impl Iterator<Item = &ObservedPlanet> {
        observation
            .planets
            .iter()
            .filter(move |p| p.owner == player && p.ships.unwrap_or(0.0) > 0.0)
    }

    /// Opponent planets; neutral planets are never heuristic targets.
    pub fn targets(
        observation: &Observation,
        player: Player,
    ) -> impl Iterator<Item = &ObservedPlanet> {
        observation
            .planets
            .iter()
            .filter(move |p| p.owner != player && p.owner != Player::Neutral)
    }

    /// Resolves the heuristic move, or `None` without a source or target.
    #[must_use]
    pub fn propose(&self, observation: &Observation, player: Player) -> Option<HeuristicMove> {
        let phase = Standings::from_observation(observation, player).phase();
        let source = first_max_by(Self::sources(observation, player), |p| {
            phase.source_score(p.ships.unwrap_or(0.0), p.growth_rate)
        })?;
        let target = first_min_by(Self::targets(observation, player), |p| {
            let cost = phase.target_cost(p.ships, p.growth_rate);
            match self.distance {
                DistanceMode::Naive => cost,
                DistanceMode::Aware => cost + source.distance_to(p) / phase.distance_scale(),
            }
        })?;

        Some(HeuristicMove {
            phase,
            source: source.id,
            target: target.id,
            ships: phase.ships_to_send(source.ships.unwrap_or(0.0)),
        })
    }
}
