use serde::{Deserialize, Serialize};

use crate::{Action, GameParams, Planet, PlanetId, Player, SimulationError, Transporter};

/// A full-information snapshot of a match.
///
/// Planets are stored in id order: `planets[i].id == i`. Cloning produces an
/// independent copy that can be stepped without affecting the original, which
/// is how forward models get their private simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub planets: Vec<Planet>,
    #[serde(default)]
    pub tick: u32,
}

impl GameState {
    #[must_use]
    pub fn new(planets: Vec<Planet>) -> Self {
        Self { planets, tick: 0 }
    }

    #[must_use]
    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id)
    }

    pub fn planets_of(&self, owner: Player) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(move |p| p.owner == owner)
    }

    /// Planets `player` can launch from this tick: owned, idle and holding ships.
    pub fn launchable(&self, player: Player) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(move |p| p.is_launchable_by(player))
    }

    /// Planets `player` may attack: everything it does not own, neutral included.
    pub fn targets(&self, player: Player) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(move |p| p.owner != player)
    }

    pub fn transporters(&self) -> impl Iterator<Item = &Transporter> {
        self.planets.iter().filter_map(|p| p.transporter.as_ref())
    }

    /// Ships owned by `player`, on planets and in flight.
    #[must_use]
    pub fn total_ships(&self, player: Player) -> f64 {
        let on_planets: f64 = self.planets_of(player).map(|p| p.ships).sum();
        let in_flight: f64 = self
            .transporters()
            .filter(|t| t.owner == player)
            .map(|t| t.ships)
            .sum();
        on_planets + in_flight
    }

    #[must_use]
    pub fn planet_count(&self, player: Player) -> usize {
        self.planets_of(player).count()
    }

    /// Ship lead of `player` over its opponent. Higher is better for `player`.
    #[must_use]
    pub fn score(&self, player: Player) -> f64 {
        self.total_ships(player) - self.total_ships(player.opponent())
    }

    #[must_use]
    pub fn is_terminal(&self, params: &GameParams) -> bool {
        self.tick >= params.max_ticks
            || !self.has_presence(Player::Player1)
            || !self.has_presence(Player::Player2)
    }

    /// Returns the player holding more ships, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Player> {
        let lead = self.score(Player::Player1);
        if lead > 0.0 {
            Some(Player::Player1)
        } else if lead < 0.0 {
            Some(Player::Player2)
        } else {
            None
        }
    }

    fn has_presence(&self, player: Player) -> bool {
        self.planets_of(player).next().is_some() || self.transporters().any(|t| t.owner == player)
    }

    /// Returns `true` if [`GameState::step`] would carry out this launch.
    ///
    /// The source must be idle, owned by `player` and hold at least `ships`
    /// ships, the destination must be another existing planet, and `ships`
    /// must be positive.
    #[must_use]
    pub fn is_legal_launch(
        &self,
        player: Player,
        source: PlanetId,
        destination: PlanetId,
        ships: f64,
    ) -> bool {
        let (Some(planet), Some(_)) = (self.planet(source), self.planet(destination)) else {
            return false;
        };
        planet.is_launchable_by(player)
            && source != destination
            && ships > 0.0
            && ships <= planet.ships
    }

    /// Resolves one tick with the given actions.
    ///
    /// Illegal launches are ignored. A launch naming a planet that does not exist
    /// is an error and leaves the state partially updated.
    pub fn step(&mut self, params: &GameParams, actions: &[Action]) -> Result<(), SimulationError> {
        for action in actions {
            self.launch(params, action)?;
        }
        for planet in &mut self.planets {
            if planet.owner != Player::Neutral {
                planet.ships += planet.growth_rate;
            }
        }
        self.advance_transporters();
        self.tick += 1;
        Ok(())
    }

    fn launch(&mut self, params: &GameParams, action: &Action) -> Result<(), SimulationError> {
        let Action::Launch {
            player,
            source,
            destination,
            ships,
        } = *action
        else {
            return Ok(());
        };
        for id in [source, destination] {
            if id >= self.planets.len() {
                return Err(SimulationError::UnknownPlanet { id });
            }
        }

        if !self.is_legal_launch(player, source, destination, ships) {
            log::trace!(
                "ignoring launch of {ships} ships by {player} from #{source} to #{destination}"
            );
            return Ok(());
        }

        let distance = self.planets[source].distance_to(&self.planets[destination]);
        let planet = &mut self.planets[source];
        planet.ships -= ships;
        planet.transporter = Some(Transporter {
            owner: player,
            source,
            destination,
            ships,
            turns_remaining: transit_turns(distance, params.transporter_speed),
        });
        Ok(())
    }

    fn advance_transporters(&mut self) {
        let mut arrivals = vec![];
        for planet in &mut self.planets {
            if let Some(transporter) = &mut planet.transporter {
                transporter.turns_remaining = transporter.turns_remaining.saturating_sub(1);
                if transporter.turns_remaining == 0 {
                    arrivals.extend(planet.transporter.take());
                }
            }
        }

        for transporter in arrivals {
            let Some(target) = self.planets.get_mut(transporter.destination) else {
                continue;
            };
            if target.owner == transporter.owner {
                target.ships += transporter.ships;
                continue;
            }
            target.ships -= transporter.ships;
            if target.ships < 0.0 {
                target.owner = transporter.owner;
                target.ships = -target.ships;
            }
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn transit_turns(distance: f64, speed: f64) -> u32 {
    ((distance / speed).ceil() as u32).max(1)
}
