//! Turn resolution, map generation and forward models.
//!
//! - [`GameParams`] - Map and rule parameters
//! - [`GameState`] - A full-information snapshot and its turn resolution
//! - [`GameStateFactory`] - Seeded, point-symmetric map generation
//! - [`ForwardModel`] / [`RolloutModel`] - Scoring a plan by simulating it
//!
//! # Turn Order
//!
//! [`GameState::step`] resolves one tick as follows:
//!
//! 1. Legal launches leave their source planet (illegal ones are ignored)
//! 2. Every owned planet grows by its growth rate
//! 3. Transporters advance; arrivals reinforce or attack their destination

pub use self::{factory::*, forward_model::*, game_params::*, game_state::*};

mod factory;
mod forward_model;
mod game_params;
mod game_state;
