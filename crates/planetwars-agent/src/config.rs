//! Agent configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! options it changes:
//!
//! ```
//! use planetwars_agent::config::{AgentConfig, Strategy};
//!
//! let config: AgentConfig =
//!     serde_json::from_str(r#"{ "strategy": "strict", "planner": { "horizon": 10 } }"#).unwrap();
//! assert_eq!(config.strategy, Strategy::Strict);
//! assert_eq!(config.planner.horizon, 10);
//! assert_eq!(config.planner.population_size, 80);
//! config.validate().unwrap();
//! ```

use serde::{Deserialize, Serialize};

/// How an agent combines the heuristic policy with the evolutionary planner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Heuristic when ahead and it resolves a positive launch, planner otherwise
    #[default]
    #[display("validated gate")]
    Validated,
    /// Legacy gate: planner when losing, heuristic action unchecked otherwise
    #[display("strict gate")]
    Strict,
    /// Evolutionary planner on every turn
    #[display("planner only")]
    Planner,
    /// Heuristic policy on every turn, never the planner
    #[display("heuristic only")]
    Heuristic,
}

/// Whether heuristic target costs account for travel distance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    #[default]
    Naive,
    Aware,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub distance: DistanceMode,
}

/// Parameters of the rolling-horizon evolutionary planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Number of planned moves; a genome holds two genes per move
    pub horizon: usize,
    pub population_size: usize,
    pub generations: usize,
    pub initial_mutation_rate: f64,
    pub mutation_floor: f64,
    /// Multiplier applied to the mutation rate after each generation
    pub mutation_decay: f64,
    pub elite_count: usize,
    /// Warm-start from the previous decision's best plan
    pub shift_buffer: bool,
    pub parallel_eval: bool,
    /// Fraction of the source's ships sent by the decoded move
    pub send_fraction: f64,
    /// Fitness bonus per gene above the midpoint
    pub activity_bonus: f64,
    /// Seed for the agent's random source; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon: 20,
            population_size: 80,
            generations: 50,
            initial_mutation_rate: 0.25,
            mutation_floor: 0.05,
            mutation_decay: 0.98,
            elite_count: 8,
            shift_buffer: true,
            parallel_eval: true,
            send_fraction: 0.5,
            activity_bonus: 0.01,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Length of every genome produced under this configuration.
    #[must_use]
    pub fn genome_len(&self) -> usize {
        self.horizon * 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        // slots 0 and 1 are reserved for the incumbent and a fresh greedy seed
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if self.elite_count == 0 || self.elite_count > self.population_size {
            return Err(ConfigError::EliteCount {
                elites: self.elite_count,
                population: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        for rate in [self.initial_mutation_rate, self.mutation_floor] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::MutationRate { rate });
            }
        }
        if self.mutation_floor > self.initial_mutation_rate {
            return Err(ConfigError::FloorAboveInitial {
                floor: self.mutation_floor,
                initial: self.initial_mutation_rate,
            });
        }
        if !(self.mutation_decay > 0.0 && self.mutation_decay <= 1.0) {
            return Err(ConfigError::MutationDecay {
                decay: self.mutation_decay,
            });
        }
        if !(self.send_fraction > 0.0 && self.send_fraction <= 1.0) {
            return Err(ConfigError::SendFraction {
                fraction: self.send_fraction,
            });
        }
        if self.activity_bonus < 0.0 || self.activity_bonus.is_nan() {
            return Err(ConfigError::ActivityBonus {
                bonus: self.activity_bonus,
            });
        }
        Ok(())
    }
}

/// Complete configuration of one agent.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: Strategy,
    pub heuristic: HeuristicConfig,
    pub planner: PlannerConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planner.validate()
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("horizon must be at least 1")]
    ZeroHorizon,
    #[display("population size must be at least 2, got {size}")]
    PopulationTooSmall { size: usize },
    #[display("elite count must be in 1..={population}, got {elites}")]
    EliteCount { elites: usize, population: usize },
    #[display("generation count must be at least 1")]
    ZeroGenerations,
    #[display("mutation rate must be within [0, 1], got {rate}")]
    MutationRate { rate: f64 },
    #[display("mutation floor {floor} exceeds initial rate {initial}")]
    FloorAboveInitial { floor: f64, initial: f64 },
    #[display("mutation decay must be within (0, 1], got {decay}")]
    MutationDecay { decay: f64 },
    #[display("send fraction must be within (0, 1], got {fraction}")]
    SendFraction { fraction: f64 },
    #[display("activity bonus must be non-negative, got {bonus}")]
    ActivityBonus { bonus: f64 },
}
