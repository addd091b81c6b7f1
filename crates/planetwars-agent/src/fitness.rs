//! Fitness evaluation of genomes.
//!
//! A genome's fitness is the forward model's outcome for the plan plus a small
//! activity bonus:
//!
//! ```text
//! fitness = model.run(genes, copy of snapshot, player) + activity_bonus * #(genes > 0.5)
//! ```
//!
//! The bonus nudges the search away from idle plans that converge towards all
//! low genes. Scores are only comparable within one decision.
//!
//! Each evaluation hands the model its own clone of the snapshot, so
//! evaluations share no mutable state and may run in any order or in parallel.
//!
//! A NaN outcome scores as `f64::NEG_INFINITY`, so it ranks below every real
//! plan instead of above it under `f64::total_cmp`.

use planetwars_engine::{ForwardModel, GameState, Player, SimulationError};

use crate::genome::Genome;

/// Scores genomes for one player against a forward model.
#[derive(Debug)]
pub struct FitnessEvaluator<'a, M>
where
    M: ForwardModel + ?Sized,
{
    model: &'a M,
    player: Player,
    activity_bonus: f64,
}

impl<'a, M> FitnessEvaluator<'a, M>
where
    M: ForwardModel + ?Sized,
{
    #[must_use]
    pub fn new(model: &'a M, player: Player, activity_bonus: f64) -> Self {
        Self {
            model,
            player,
            activity_bonus,
        }
    }

    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    /// Evaluates `genome` on an independent copy of `snapshot`.
    ///
    /// Never returns NaN: an undefined score becomes `f64::NEG_INFINITY`.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate(
        &self,
        genome: &Genome,
        snapshot: &GameState,
    ) -> Result<f64, SimulationError> {
        let outcome = self.model.run(genome.genes(), snapshot.clone(), self.player)?;
        let fitness = outcome + self.activity_bonus * genome.active_gene_count() as f64;
        if fitness.is_nan() {
            log::warn!("forward model returned NaN for {}, ranking it last", self.player);
            return Ok(f64::NEG_INFINITY);
        }
        Ok(fitness)
    }
}

#[cfg(test)]
mod tests {
    use planetwars_engine::{Planet, Vec2};

    use super::*;

    /// Scores a plan by the sum of its genes and mutates the copy it receives.
    #[derive(Debug)]
    struct GeneSum;

    impl ForwardModel for GeneSum {
        fn run(
            &self,
            genes: &[f32],
            mut state: GameState,
            _player: Player,
        ) -> Result<f64, SimulationError> {
            state.planets.clear();
            Ok(genes.iter().copied().map(f64::from).sum())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl ForwardModel for Broken {
        fn run(
            &self,
            genes: &[f32],
            _state: GameState,
            _player: Player,
        ) -> Result<f64, SimulationError> {
            Err(SimulationError::OddGenomeLength { len: genes.len() })
        }
    }

    #[derive(Debug)]
    struct Undefined;

    impl ForwardModel for Undefined {
        fn run(
            &self,
            _genes: &[f32],
            _state: GameState,
            _player: Player,
        ) -> Result<f64, SimulationError> {
            Ok(f64::NAN)
        }
    }

    fn snapshot() -> GameState {
        GameState::new(vec![Planet::new(0, Player::Player1, 1.0, 1.0, Vec2::default())])
    }

    #[test]
    fn test_bonus_counts_genes_above_midpoint() {
        let evaluator = FitnessEvaluator::new(&GeneSum, Player::Player1, 0.01);
        let genome = Genome::from_genes(vec![0.75, 0.5, 0.25, 1.0]);
        let score = evaluator.evaluate(&genome, &snapshot()).unwrap();
        assert!((score - (2.5 + 0.02)).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_is_copied() {
        let evaluator = FitnessEvaluator::new(&GeneSum, Player::Player1, 0.0);
        let state = snapshot();
        evaluator.evaluate(&Genome::from_genes(vec![0.1, 0.2]), &state).unwrap();
        assert_eq!(state.planets.len(), 1);
    }

    #[test]
    fn test_nan_outcome_ranks_last() {
        let evaluator = FitnessEvaluator::new(&Undefined, Player::Player1, 0.01);
        let score = evaluator
            .evaluate(&Genome::from_genes(vec![0.9, 0.9]), &snapshot())
            .unwrap();
        assert!(score.is_infinite() && score.is_sign_negative());
        assert!(score.total_cmp(&-1e300).is_lt());
    }

    #[test]
    fn test_simulation_failure_propagates() {
        let evaluator = FitnessEvaluator::new(&Broken, Player::Player2, 0.01);
        let err = evaluator
            .evaluate(&Genome::from_genes(vec![0.1, 0.2]), &snapshot())
            .unwrap_err();
        assert_eq!(err, SimulationError::OddGenomeLength { len: 2 });
    }
}
