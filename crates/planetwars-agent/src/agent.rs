//! Bindable agents exposed to a hosting layer.
//!
//! A hosting layer (game loop, server wrapper) drives an agent through two
//! calls: [`Agent::bind`] once per match to attach it to a player, then
//! [`Agent::decide`] once per turn. Binding again resets all planner memory.

use planetwars_engine::{Action, ForwardModel, GameState, Observation, Player, SimulationError};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{
    config::{AgentConfig, ConfigError, Strategy},
    gate::{DecisionGate, Route},
    heuristic::HeuristicPolicy,
    search::{PlannerState, RollingHorizonPlanner},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DecideError {
    #[display("agent is not bound to a player")]
    NotBound,
    #[display("invalid planner configuration: {_0}")]
    Config(#[error(source)] ConfigError),
    #[display("forward model failed: {_0}")]
    Simulation(#[error(source)] SimulationError),
}

impl From<ConfigError> for DecideError {
    fn from(err: ConfigError) -> Self {
        DecideError::Config(err)
    }
}

impl From<SimulationError> for DecideError {
    fn from(err: SimulationError) -> Self {
        DecideError::Simulation(err)
    }
}

/// Decision interface driven by a hosting layer.
pub trait Agent {
    /// The view of the game this agent decides on.
    type Snapshot;

    /// Binds the agent to `player` and returns its label.
    ///
    /// `opponent` optionally names the other side, for logging only.
    fn bind(
        &mut self,
        player: Player,
        config: AgentConfig,
        opponent: Option<&str>,
    ) -> Result<&'static str, ConfigError>;

    /// Computes one action for the current turn.
    fn decide(&mut self, snapshot: &Self::Snapshot) -> Result<Action, DecideError>;
}

/// Display label of a hybrid agent running `strategy`.
#[must_use]
pub const fn hybrid_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Validated => "Hybrid RHEA (validated gate)",
        Strategy::Strict => "Hybrid RHEA (strict gate)",
        Strategy::Planner => "RHEA planner",
        Strategy::Heuristic => "Phase heuristic",
    }
}

#[derive(Debug)]
struct Binding {
    player: Player,
    config: AgentConfig,
    planner: PlannerState,
    rng: Pcg32,
}

/// Full-information agent combining the heuristic policy with the planner.
#[derive(Debug)]
pub struct HybridAgent<M> {
    model: M,
    binding: Option<Binding>,
}

impl<M> HybridAgent<M>
where
    M: ForwardModel,
{
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model, binding: None }
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn player(&self) -> Option<Player> {
        self.binding.as_ref().map(|b| b.player)
    }

    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        self.binding.as_ref().map(|b| hybrid_label(b.config.strategy))
    }

    /// Planner memory of the current binding.
    #[must_use]
    pub fn planner_state(&self) -> Option<&PlannerState> {
        self.binding.as_ref().map(|b| &b.planner)
    }
}

impl<M> Agent for HybridAgent<M>
where
    M: ForwardModel,
{
    type Snapshot = GameState;

    fn bind(
        &mut self,
        player: Player,
        config: AgentConfig,
        opponent: Option<&str>,
    ) -> Result<&'static str, ConfigError> {
        config.validate()?;
        let seed = config.planner.seed.unwrap_or_else(|| rand::rng().random());
        let label = hybrid_label(config.strategy);
        log::info!(
            "{label} bound to {player} against {} (seed {seed})",
            opponent.unwrap_or("unknown opponent"),
        );
        self.binding = Some(Binding {
            player,
            planner: PlannerState::new(&config.planner),
            config,
            rng: Pcg32::seed_from_u64(seed),
        });
        Ok(label)
    }

    fn decide(&mut self, snapshot: &GameState) -> Result<Action, DecideError> {
        let binding = self.binding.as_mut().ok_or(DecideError::NotBound)?;
        let gate = DecisionGate::new(
            binding.config.strategy,
            HeuristicPolicy::new(binding.config.heuristic.distance),
        );
        match gate.route(snapshot, binding.player) {
            Route::Act(action) => Ok(action),
            Route::Plan => {
                let planner = RollingHorizonPlanner::new(
                    &binding.config.planner,
                    &self.model,
                    binding.player,
                )?;
                Ok(planner.decide(&mut binding.planner, snapshot, &mut binding.rng)?)
            }
        }
    }
}

/// Heuristic-only agent for partially observed games.
///
/// Never runs the planner: opponent ship counts may be hidden, so there is no
/// snapshot to simulate.
#[derive(Debug, Default)]
pub struct PartialAgent {
    binding: Option<(Player, HeuristicPolicy)>,
}

impl PartialAgent {
    pub const LABEL: &'static str = "Phase heuristic (partial information)";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player(&self) -> Option<Player> {
        self.binding.map(|(player, _)| player)
    }
}

impl Agent for PartialAgent {
    type Snapshot = Observation;

    fn bind(
        &mut self,
        player: Player,
        config: AgentConfig,
        opponent: Option<&str>,
    ) -> Result<&'static str, ConfigError> {
        log::info!(
            "{} bound to {player} against {}",
            Self::LABEL,
            opponent.unwrap_or("unknown opponent"),
        );
        self.binding = Some((player, HeuristicPolicy::new(config.heuristic.distance)));
        Ok(Self::LABEL)
    }

    fn decide(&mut self, observation: &Observation) -> Result<Action, DecideError> {
        let (player, policy) = self.binding.ok_or(DecideError::NotBound)?;
        Ok(policy
            .propose(observation, player)
            .map_or(Action::DoNothing, |mv| mv.into_action(player)))
    }
}

#[cfg(test)]
mod tests {
    use planetwars_engine::{GameParams, Planet, RolloutModel, ShipCount, Vec2};

    use super::*;
    use crate::config::PlannerConfig;

    fn planet(id: usize, owner: Player, ships: f64, growth: f64, x: f64) -> Planet {
        Planet::new(id, owner, ships, growth, Vec2::new(x, 0.0))
    }

    fn small_config(strategy: Strategy) -> AgentConfig {
        AgentConfig {
            strategy,
            planner: PlannerConfig {
                horizon: 4,
                population_size: 6,
                generations: 3,
                elite_count: 2,
                parallel_eval: false,
                seed: Some(11),
                ..PlannerConfig::default()
            },
            ..AgentConfig::default()
        }
    }

    fn agent() -> HybridAgent<RolloutModel> {
        HybridAgent::new(RolloutModel::new(GameParams::default()))
    }

    fn losing() -> GameState {
        GameState::new(vec![
            planet(0, Player::Player1, 50.0, 1.0, 0.0),
            planet(1, Player::Neutral, 5.0, 1.0, 20.0),
            planet(2, Player::Player2, 100.0, 1.0, 60.0),
        ])
    }

    #[test]
    fn test_decide_requires_binding() {
        let mut agent = agent();
        assert_eq!(agent.decide(&losing()), Err(DecideError::NotBound));
        let mut partial = PartialAgent::new();
        let observation = Observation::full(&losing());
        assert_eq!(partial.decide(&observation), Err(DecideError::NotBound));
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let mut config = small_config(Strategy::Validated);
        config.planner.horizon = 0;
        let mut agent = agent();
        assert_eq!(
            agent.bind(Player::Player1, config, None),
            Err(ConfigError::ZeroHorizon)
        );
        assert!(agent.player().is_none());
    }

    #[test]
    fn test_bind_returns_strategy_label() {
        let mut agent = agent();
        let label = agent
            .bind(Player::Player2, small_config(Strategy::Strict), Some("bot"))
            .unwrap();
        assert_eq!(label, "Hybrid RHEA (strict gate)");
        assert_eq!(agent.label(), Some(label));
        assert_eq!(agent.player(), Some(Player::Player2));
    }

    #[test]
    fn test_losing_agent_plans_and_anneals() {
        let mut agent = agent();
        agent.bind(Player::Player1, small_config(Strategy::Validated), None).unwrap();
        let first = agent.decide(&losing()).unwrap();
        assert_eq!(first.player(), Some(Player::Player1));
        let rate_after_first = agent.planner_state().unwrap().mutation_rate();
        assert!(rate_after_first < 0.25);
        assert!(agent.planner_state().unwrap().best().is_some());

        agent.decide(&losing()).unwrap();
        let rate_after_second = agent.planner_state().unwrap().mutation_rate();
        assert!(rate_after_second < rate_after_first);
        assert!(rate_after_second >= 0.05);
    }

    #[test]
    fn test_rebinding_resets_planner_state() {
        let mut agent = agent();
        let config = small_config(Strategy::Planner);
        agent.bind(Player::Player1, config.clone(), None).unwrap();
        agent.decide(&losing()).unwrap();
        agent.bind(Player::Player1, config, None).unwrap();
        let state = agent.planner_state().unwrap();
        assert!(state.best().is_none());
        assert!((state.mutation_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_agents_agree() {
        let decide = || {
            let mut agent = agent();
            agent.bind(Player::Player1, small_config(Strategy::Planner), None).unwrap();
            agent.decide(&losing()).unwrap()
        };
        assert_eq!(decide(), decide());
    }

    #[test]
    fn test_no_ships_is_noop_for_every_strategy() {
        let state = GameState::new(vec![
            planet(0, Player::Player1, 0.0, 1.0, 0.0),
            planet(1, Player::Player2, 10.0, 1.0, 50.0),
        ]);
        for strategy in [
            Strategy::Validated,
            Strategy::Strict,
            Strategy::Planner,
            Strategy::Heuristic,
        ] {
            let mut agent = agent();
            agent.bind(Player::Player1, small_config(strategy), None).unwrap();
            assert_eq!(agent.decide(&state), Ok(Action::DoNothing));
        }
    }

    #[test]
    fn test_partial_agent_avoids_hidden_targets() {
        let state = GameState::new(vec![
            planet(0, Player::Player1, 40.0, 1.0, 0.0),
            planet(1, Player::Player2, 1.0, 1.0, 10.0),
            planet(2, Player::Player2, 30.0, 1.0, 20.0),
        ]);
        let mut observation = Observation::full(&state);
        observation.planets[1].ships = ShipCount::Unknown;

        let mut agent = PartialAgent::new();
        let label = agent.bind(Player::Player1, AgentConfig::default(), None).unwrap();
        assert_eq!(label, PartialAgent::LABEL);
        assert_eq!(
            agent.decide(&observation),
            Ok(Action::launch(Player::Player1, 0, 2, 16.0))
        );
    }

    #[test]
    fn test_partial_agent_ignores_planner_config() {
        let mut config = AgentConfig::default();
        config.planner.horizon = 0;
        config.planner.population_size = 1;
        let mut agent = PartialAgent::new();
        assert_eq!(agent.bind(Player::Player2, config, None), Ok(PartialAgent::LABEL));
        assert_eq!(agent.player(), Some(Player::Player2));
    }

    #[test]
    fn test_partial_agent_without_visible_ships_is_noop() {
        let state = GameState::new(vec![
            planet(0, Player::Player1, 40.0, 1.0, 0.0),
            planet(1, Player::Player2, 1.0, 1.0, 10.0),
        ]);
        let mut observation = Observation::full(&state);
        observation.planets[0].ships = ShipCount::Unknown;

        let mut agent = PartialAgent::new();
        agent.bind(Player::Player1, AgentConfig::default(), None).unwrap();
        assert_eq!(agent.decide(&observation), Ok(Action::DoNothing));
    }
}
