//! Decision gate between the heuristic policy and the planner.
//!
//! The gate never runs the planner itself; it returns a [`Route`] telling the
//! caller either which action to play or that the planner must decide.

use planetwars_engine::{Action, GameState, Observation, Player};

use crate::{
    config::Strategy,
    heuristic::{HeuristicPolicy, Standings},
};

/// Where a decision goes.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Route {
    /// Play this action without searching
    Act(Action),
    /// Delegate to the evolutionary planner
    Plan,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionGate {
    strategy: Strategy,
    policy: HeuristicPolicy,
}

impl DecisionGate {
    #[must_use]
    pub const fn new(strategy: Strategy, policy: HeuristicPolicy) -> Self {
        Self { strategy, policy }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Routes one decision for `player` on `snapshot`.
    ///
    /// Except under [`Strategy::Planner`], a player without a planet holding
    /// ships, or facing an opponent without planets, gets [`Action::DoNothing`].
    /// The validated gate only plays a heuristic move the engine would carry
    /// out, and hands every other turn to the planner.
    #[must_use]
    pub fn route(&self, snapshot: &GameState, player: Player) -> Route {
        if self.strategy == Strategy::Planner {
            return Route::Plan;
        }

        let observation = Observation::full(snapshot);
        let standings = Standings::from_observation(&observation, player);
        if standings.own_planets == 0 || standings.opponent_planets == 0 {
            log::debug!("{player}: nothing to launch or nothing to attack");
            return Route::Act(Action::DoNothing);
        }

        let losing = standings.is_losing();
        let proposal = self.policy.propose(&observation, player);
        let unchecked = || {
            Route::Act(proposal.map_or(Action::DoNothing, |mv| mv.into_action(player)))
        };
        let route = match self.strategy {
            Strategy::Planner => Route::Plan,
            Strategy::Heuristic => unchecked(),
            Strategy::Strict if losing => Route::Plan,
            Strategy::Strict => unchecked(),
            Strategy::Validated => match proposal {
                Some(mv) if !losing && mv.is_playable(snapshot, player) => {
                    Route::Act(mv.into_action(player))
                }
                _ => Route::Plan,
            },
        };

        log::info!(
            "{player}: {} phase, differential {:.1}, losing {losing}, {}",
            standings.phase(),
            standings.differential(),
            if route.is_plan() { "planner" } else { "heuristic" },
        );
        route
    }
}
