use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{GameParams, GameState, Planet, Player, Vec2};

/// Generates point-symmetric maps from a seed.
///
/// Half of the planets are placed in the left half of the map and each is
/// mirrored through the map centre, so both players start from equivalent
/// positions. The first generated planet becomes Player 1's home and its
/// mirror Player 2's home; every other planet starts neutral.
///
/// The same seed and parameters always produce the same map.
#[derive(Debug, Clone)]
pub struct GameStateFactory {
    params: GameParams,
}

impl GameStateFactory {
    #[must_use]
    pub fn new(params: GameParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &GameParams {
        &self.params
    }

    /// Generates the map for `seed`.
    ///
    /// The parameters must pass [`GameParams::validate`]; empty ranges make
    /// sampling panic.
    #[must_use]
    pub fn create_game(&self, seed: u64) -> GameState {
        let params = &self.params;
        let mut rng = Pcg32::seed_from_u64(seed);
        let pairs = (params.num_planets / 2).max(1);

        let mut planets = Vec::with_capacity(pairs * 2);
        for i in 0..pairs {
            let position = Vec2::new(
                rng.random_range(0.0..params.width / 2.0),
                rng.random_range(0.0..params.height),
            );
            let mirrored = Vec2::new(params.width - position.x, params.height - position.y);
            let growth_rate = rng.random_range(params.min_growth_rate..=params.max_growth_rate);

            let (owners, ships) = if i == 0 {
                ([Player::Player1, Player::Player2], params.home_ships)
            } else {
                let ships = rng
                    .random_range(params.min_initial_ships..=params.max_initial_ships)
                    .floor();
                ([Player::Neutral, Player::Neutral], ships)
            };

            for (owner, position) in owners.into_iter().zip([position, mirrored]) {
                planets.push(Planet::new(planets.len(), owner, ships, growth_rate, position));
            }
        }

        GameState::new(planets)
    }
}
