use serde::{Deserialize, Serialize};

use super::{PlanetId, Player};

/// What an agent submits for one tick.
///
/// [`Action::DoNothing`] is the no-op sentinel returned whenever no valid move
/// exists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    #[default]
    DoNothing,
    Launch {
        player: Player,
        source: PlanetId,
        destination: PlanetId,
        ships: f64,
    },
}

impl Action {
    #[must_use]
    pub const fn launch(
        player: Player,
        source: PlanetId,
        destination: PlanetId,
        ships: f64,
    ) -> Self {
        Action::Launch {
            player,
            source,
            destination,
            ships,
        }
    }

    /// Returns the acting player, or `None` for the no-op sentinel.
    #[must_use]
    pub fn player(&self) -> Option<Player> {
        match self {
            Action::DoNothing => None,
            Action::Launch { player, .. } => Some(*player),
        }
    }
}
