//! Game engine for two-player Planet Wars.
//!
//! The crate holds everything the decision engine consumes but does not own:
//!
//! - [`core`] - Value types describing a snapshot: [`Player`], [`Planet`],
//!   [`Transporter`], [`Action`] and the partial-information [`Observation`].
//! - [`engine`] - Turn resolution on [`GameState`], map generation through
//!   [`GameStateFactory`], and the [`ForwardModel`] seam used to score candidate
//!   plans, with [`RolloutModel`] as the reference implementation.
//!
//! # Example
//!
//! ```
//! use planetwars_engine::{Action, GameParams, GameStateFactory, Player};
//!
//! let params = GameParams::default();
//! let mut state = GameStateFactory::new(params.clone()).create_game(7);
//!
//! let home = state.planets_of(Player::Player1).next().unwrap().id;
//! let target = state.targets(Player::Player1).next().unwrap().id;
//! let launch = Action::launch(Player::Player1, home, target, 5.0);
//!
//! state.step(&params, &[launch]).unwrap();
//! assert_eq!(state.tick, 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Failure raised while resolving turns or running a forward model.
///
/// These are not ordinary game conditions: they indicate a malformed plan or
/// snapshot, and callers have no corrective strategy for them.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("plan has an odd number of genes ({len})")]
    OddGenomeLength { len: usize },
    #[display("action refers to unknown planet #{id}")]
    UnknownPlanet { id: usize },
}
