//! Rolling-horizon evolutionary planner.
//!
//! Each decision runs a short evolutionary search over plans (genomes) and
//! plays the first move of the best plan found. The best plan is kept in
//! [`PlannerState`] and, on the next decision, advanced by one move to seed the
//! search again (the shift buffer), so consecutive decisions refine one plan
//! instead of starting from scratch.
//!
//! # Algorithm
//!
//! 1. **Seed** - Shift-and-mutate the previous best plan, or build a greedy
//!    [`smart_seed`](operators::smart_seed) when there is none (or warm start is off)
//! 2. **Breed** - Fill a population with mutated copies of the incumbent; slot 0
//!    holds the unmutated incumbent and slot 1 a fresh greedy seed
//! 3. **Evaluate** - Score every member on its own copy of the snapshot
//!    (in parallel when enabled)
//! 4. **Select** - Sort by descending fitness; the top elite becomes the incumbent
//! 5. **Anneal** - Decay the mutation rate towards its floor
//! 6. Repeat 2-5 for the configured number of generations
//! 7. **Decode** - Turn the incumbent's first gene pair into a launch
//!
//! Because the incumbent is always re-entered unmutated, the best fitness never
//! decreases from one generation to the next for a deterministic forward model.
//!
//! # Mutation Schedule
//!
//! The mutation rate lives in [`PlannerState`] and is multiplied by
//! `mutation_decay` after every generation, never dropping below
//! `mutation_floor`. It is not reset between decisions, so it keeps decreasing
//! over the course of a match until the agent is bound again.
//!
//! # Parallelization
//!
//! Evaluation uses a rayon parallel map over the population. All randomness is
//! drawn on the calling thread while breeding, so parallel and sequential
//! evaluation produce the same outcome for the same random source.

use planetwars_engine::{Action, ForwardModel, GameState, Player, SimulationError};
use rand::Rng;
use rayon::prelude::*;

use crate::{
    candidates::Candidates,
    config::{ConfigError, PlannerConfig},
    fitness::FitnessEvaluator,
    genome::Genome,
    operators,
};

/// Planner memory carried from one decision to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerState {
    best: Option<Genome>,
    mutation_rate: f64,
}

impl PlannerState {
    /// Fresh state: no prior plan, mutation rate at its initial value.
    #[must_use]
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            best: None,
            mutation_rate: config.initial_mutation_rate,
        }
    }

    /// Best plan from the previous decision, if any.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn anneal(&mut self, config: &PlannerConfig) {
        self.mutation_rate =
            (self.mutation_rate * config.mutation_decay).max(config.mutation_floor);
    }
}

/// A genome together with its fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    fitness: f64,
}

impl Individual {
    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

/// One evaluated generation, sorted by descending fitness.
///
/// The sort is stable, so members with equal fitness keep their breeding
/// order and the incumbent in slot 0 wins ties.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Evaluates every genome against `snapshot` and sorts the result.
    pub fn evaluate<M>(
        genomes: Vec<Genome>,
        evaluator: &FitnessEvaluator<'_, M>,
        snapshot: &GameState,
        parallel: bool,
    ) -> Result<Self, SimulationError>
    where
        M: ForwardModel + ?Sized,
    {
        let score = |genome: Genome| -> Result<Individual, SimulationError> {
            let fitness = evaluator.evaluate(&genome, snapshot)?;
            Ok(Individual { genome, fitness })
        };
        let mut individuals = if parallel {
            genomes.into_par_iter().map(score).collect::<Result<Vec<_>, SimulationError>>()?
        } else {
            genomes.into_iter().map(score).collect::<Result<Vec<_>, SimulationError>>()?
        };

        // sort by fitness descending
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Ok(Self { individuals })
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The top `count` individuals.
    #[must_use]
    pub fn elites(&self, count: usize) -> &[Individual] {
        &self.individuals[..count.min(self.individuals.len())]
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|ind| ind.fitness).sum::<f64>() / self.individuals.len() as f64
    }
}

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    /// Mutation rate used to breed this generation
    pub mutation_rate: f64,
}

/// Result of one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub genome: Genome,
    pub fitness: f64,
    pub generations: Vec<GenerationSummary>,
}

/// Evolutionary planner for one player.
///
/// The planner itself is stateless; everything that persists between
/// decisions is passed in as a [`PlannerState`].
#[derive(Debug)]
pub struct RollingHorizonPlanner<'a, M>
where
    M: ForwardModel + ?Sized,
{
    config: &'a PlannerConfig,
    model: &'a M,
    player: Player,
}

impl<'a, M> RollingHorizonPlanner<'a, M>
where
    M: ForwardModel + ?Sized,
{
    /// Creates a planner after validating `config`.
    pub fn new(
        config: &'a PlannerConfig,
        model: &'a M,
        player: Player,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            player,
        })
    }

    /// Plans and returns one action for `snapshot`.
    ///
    /// Returns [`Action::DoNothing`] without searching when the player has no
    /// planet to launch from or nothing to attack.
    pub fn decide<R>(
        &self,
        state: &mut PlannerState,
        snapshot: &GameState,
        rng: &mut R,
    ) -> Result<Action, SimulationError>
    where
        R: Rng + ?Sized,
    {
        let Some(candidates) = Candidates::for_player(snapshot, self.player) else {
            log::debug!("{}: no launchable source or target, skipping search", self.player);
            return Ok(Action::DoNothing);
        };

        let outcome = self.search(state, snapshot, &candidates, rng)?;
        let Some((source, target)) = outcome.genome.decode(&candidates) else {
            return Ok(Action::DoNothing);
        };
        let ships = (source.ships * self.config.send_fraction).max(1.0);
        log::debug!(
            "{}: planned #{} -> #{} with {ships:.1} ships (fitness {:.3})",
            self.player,
            source.id,
            target.id,
            outcome.fitness,
        );
        Ok(Action::launch(self.player, source.id, target.id, ships))
    }

    /// Runs the evolutionary search and stores the final incumbent in `state`.
    pub fn search<R>(
        &self,
        state: &mut PlannerState,
        snapshot: &GameState,
        candidates: &Candidates<'_>,
        rng: &mut R,
    ) -> Result<SearchOutcome, SimulationError>
    where
        R: Rng + ?Sized,
    {
        let config = self.config;
        let evaluator = FitnessEvaluator::new(self.model, self.player, config.activity_bonus);

        let mut incumbent = match &state.best {
            Some(previous) if config.shift_buffer && previous.len() == config.genome_len() => {
                operators::shift_and_mutate(previous, state.mutation_rate, rng)
            }
            _ => operators::smart_seed(rng, candidates, config.horizon),
        };
        let mut fitness = f64::NEG_INFINITY;
        let mut generations = Vec::with_capacity(config.generations);

        for generation in 0..config.generations {
            let mutation_rate = state.mutation_rate;
            let genomes = self.breed(&incumbent, candidates, mutation_rate, rng);
            let population =
                Population::evaluate(genomes, &evaluator, snapshot, config.parallel_eval)?;

            let elites = population.elites(config.elite_count);
            if let Some(top) = elites.first() {
                incumbent = top.genome.clone();
                fitness = top.fitness;
            }
            let summary = GenerationSummary {
                generation,
                best: fitness,
                mean: population.mean_fitness(),
                mutation_rate,
            };
            log::debug!(
                "{}: generation #{generation}: best {:.3}, mean {:.3}, mutation rate {:.4}",
                self.player,
                summary.best,
                summary.mean,
                summary.mutation_rate,
            );
            generations.push(summary);

            state.anneal(config);
        }

        state.best = Some(incumbent.clone());
        Ok(SearchOutcome {
            genome: incumbent,
            fitness,
            generations,
        })
    }

    fn breed<R>(
        &self,
        incumbent: &Genome,
        candidates: &Candidates<'_>,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Vec<Genome>
    where
        R: Rng + ?Sized,
    {
        let mut genomes: Vec<_> = (0..self.config.population_size)
            .map(|_| operators::mutated(incumbent, mutation_rate, rng))
            .collect();
        genomes[0] = incumbent.clone();
        genomes[1] = operators::smart_seed(rng, candidates, self.config.horizon);
        genomes
    }
}
