//! Hybrid decision engine for two-player Planet Wars.
//!
//! Each turn an agent picks one launch (or nothing) for the player it is bound
//! to, combining two deciders:
//!
//! 1. **Heuristic Policy** ([`heuristic`]) - Classifies the match into an early,
//!    mid or late phase from the ship differential and applies a direct rule per
//!    phase. Cheap, and good enough while the player is ahead.
//!
//! 2. **Rolling-Horizon Planner** ([`search`]) - Evolves short plans (genomes)
//!    against a [`ForwardModel`](planetwars_engine::ForwardModel) and plays the
//!    first move of the best one, warm-starting from its previous plan.
//!
//! The [`gate`] decides which one runs, according to the configured
//! [`Strategy`](config::Strategy).
//!
//! # Architecture
//!
//! ```text
//! Agent (bind / decide)
//!     ↓
//! DecisionGate ── ahead ──→ HeuristicPolicy
//!     ↓ losing
//! RollingHorizonPlanner
//!     ↓ breeds with                ↓ scores with
//! operators (seed, mutate, shift)  FitnessEvaluator → ForwardModel
//! ```
//!
//! # Supporting Modules
//!
//! - [`genome`] - Gene-pair encoding of plans and clamped decoding
//! - [`candidates`] - Source and target lists a genome decodes against
//! - [`config`] - Serde-loadable agent configuration and its validation
//!
//! # Example
//!
//! ```
//! use planetwars_agent::{
//!     agent::{Agent, HybridAgent},
//!     config::AgentConfig,
//! };
//! use planetwars_engine::{GameParams, GameStateFactory, Player, RolloutModel};
//!
//! let params = GameParams::default();
//! let state = GameStateFactory::new(params.clone()).create_game(3);
//!
//! let mut config = AgentConfig::default();
//! config.planner.population_size = 8;
//! config.planner.generations = 2;
//! config.planner.elite_count = 2;
//!
//! let mut agent = HybridAgent::new(RolloutModel::new(params));
//! agent.bind(Player::Player1, config, None).unwrap();
//! let action = agent.decide(&state).unwrap();
//! assert!(action.is_do_nothing() || action.player() == Some(Player::Player1));
//! ```

pub mod agent;
pub mod candidates;
pub mod config;
pub mod fitness;
pub mod gate;
pub mod genome;
pub mod heuristic;
pub mod operators;
pub mod search;
