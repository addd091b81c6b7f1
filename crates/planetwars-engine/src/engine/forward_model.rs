//! Forward models: scoring a plan by simulating it.
//!
//! A plan is a flat sequence of genes in `[0, 1)`, read in pairs
//! `(source selector, target selector)`. The forward model owns the
//! interpretation of the whole sequence; callers only see the resulting score.
//!
//! The model always receives an owned [`GameState`], so each evaluation runs on
//! its own copy and evaluations can run concurrently.

use std::fmt;

use crate::{Action, GameParams, GameState, Player, SimulationError};

/// Predicts the outcome of following a plan from a given state.
pub trait ForwardModel: fmt::Debug + Send + Sync {
    /// Simulates `genes` for `player` starting from `state` and returns an
    /// outcome score (higher is better for `player`).
    fn run(&self, genes: &[f32], state: GameState, player: Player) -> Result<f64, SimulationError>;
}

impl<M> ForwardModel for &M
where
    M: ForwardModel + ?Sized,
{
    fn run(&self, genes: &[f32], state: GameState, player: Player) -> Result<f64, SimulationError> {
        (**self).run(genes, state, player)
    }
}

/// Reference forward model: plays one gene pair per tick against an idle opponent.
///
/// Each pair selects a source among the player's launchable planets and a
/// target among the planets it does not own, using `floor(gene * len)`
/// clamped to the list. The player sends `send_fraction` of the source's
/// ships. Simulation stops early once the state is terminal. The result is the
/// player's ship lead at the end of the rollout.
#[derive(Debug, Clone)]
pub struct RolloutModel {
    params: GameParams,
    send_fraction: f64,
}

impl RolloutModel {
    #[must_use]
    pub fn new(params: GameParams) -> Self {
        Self {
            params,
            send_fraction: 0.5,
        }
    }

    #[must_use]
    pub fn with_send_fraction(mut self, send_fraction: f64) -> Self {
        self.send_fraction = send_fraction;
        self
    }

    fn decode_pair(&self, state: &GameState, player: Player, pair: &[f32]) -> Action {
        let sources: Vec<_> = state.launchable(player).collect();
        let targets: Vec<_> = state.targets(player).collect();
        let (Some(source), Some(target)) = (
            selector_index(pair[0], sources.len()),
            selector_index(pair[1], targets.len()),
        ) else {
            return Action::DoNothing;
        };
        let (source, target) = (sources[source], targets[target]);
        Action::launch(player, source.id, target.id, source.ships * self.send_fraction)
    }
}

impl ForwardModel for RolloutModel {
    fn run(
        &self,
        genes: &[f32],
        mut state: GameState,
        player: Player,
    ) -> Result<f64, SimulationError> {
        if genes.len() % 2 != 0 {
            return Err(SimulationError::OddGenomeLength { len: genes.len() });
        }
        for pair in genes.chunks_exact(2) {
            if state.is_terminal(&self.params) {
                break;
            }
            let action = self.decode_pair(&state, player, pair);
            state.step(&self.params, &[action])?;
        }
        Ok(state.score(player))
    }
}

/// Maps a selector gene onto an index in `[0, len - 1]`, or `None` for an empty list.
///
/// The index is `floor(gene * len)` clamped to the list, so every gene value
/// decodes, including `0.0`, `1.0`, values outside `[0, 1]` and NaN (index 0).
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn selector_index(gene: f32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(((gene * len as f32).floor() as usize).min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStateFactory, Planet, Vec2};

    fn outpost_map() -> GameState {
        GameState::new(vec![
            Planet::new(0, Player::Player1, 100.0, 1.0, Vec2::new(0.0, 0.0)),
            Planet::new(1, Player::Neutral, 10.0, 1.0, Vec2::new(3.0, 0.0)),
            Planet::new(2, Player::Player2, 5.0, 0.0, Vec2::new(300.0, 0.0)),
        ])
    }

    #[test]
    fn test_odd_genome_is_rejected() {
        let model = RolloutModel::new(GameParams::default());
        let err = model.run(&[0.5; 3], outpost_map(), Player::Player1).unwrap_err();
        assert_eq!(err, SimulationError::OddGenomeLength { len: 3 });
    }

    #[test]
    fn test_rollout_does_not_touch_caller_state() {
        let model = RolloutModel::new(GameParams::default());
        let state = outpost_map();
        let before = state.clone();
        model.run(&[0.0, 0.0, 0.0, 0.0], state.clone(), Player::Player1).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_capturing_plan_beats_idle_plan() {
        let model = RolloutModel::new(GameParams::default());
        let params = GameParams::default();
        let mut idle_state = outpost_map();
        // capturing costs 10 ships up front and then doubles growth
        let active = model.run(&[0.0; 32], outpost_map(), Player::Player1).unwrap();
        for _ in 0..16 {
            idle_state.step(&params, &[]).unwrap();
        }
        let idle = idle_state.score(Player::Player1);
        assert!(active > idle, "{active} <= {idle}");
    }

    #[test]
    fn test_rollout_is_deterministic() {
        let model = RolloutModel::new(GameParams::default());
        let state = GameStateFactory::new(GameParams::default()).create_game(3);
        let genes = [0.1, 0.9, 0.4, 0.3, 0.99, 0.0];
        let a = model.run(&genes, state.clone(), Player::Player2).unwrap();
        let b = model.run(&genes, state, Player::Player2).unwrap();
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selector_index_clamps_boundaries() {
        assert_eq!(selector_index(0.0, 3), Some(0));
        assert_eq!(selector_index(1.0, 3), Some(2));
        assert_eq!(selector_index(0.999, 2), Some(1));
        assert_eq!(selector_index(-0.5, 4), Some(0));
        assert_eq!(selector_index(0.5, 0), None);
    }
}
