use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use planetwars_agent::{
    agent::{Agent as _, HybridAgent},
    config::AgentConfig,
};
use planetwars_engine::{GameParams, GameState, GameStateFactory, Player, RolloutModel};
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::util::{self, Output};

const PROGRESS_INTERVAL: u32 = 100;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Agent configuration for player 1
    #[arg(long)]
    config_a: Option<PathBuf>,
    /// Agent configuration for player 2
    #[arg(long)]
    config_b: Option<PathBuf>,
    /// Game parameters JSON file
    #[arg(long)]
    params: Option<PathBuf>,
    /// Map seed; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Override the tick limit from the game parameters
    #[arg(long)]
    max_ticks: Option<u32>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MatchRecord {
    pub played_at: DateTime<Utc>,
    pub seed: u64,
    pub player1: String,
    pub player2: String,
    pub ticks: u32,
    /// Side holding more ships at the end, or `None` on a tie
    pub winner: Option<Player>,
    pub final_ships: FinalShips,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FinalShips {
    pub player1: f64,
    pub player2: f64,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        config_a,
        config_b,
        params,
        seed,
        max_ticks,
        output,
    } = arg;

    let config_a = util::read_config_file(config_a.as_deref())?;
    let config_b = util::read_config_file(config_b.as_deref())?;
    let mut params = util::read_params_file(params.as_deref())?;
    if let Some(max_ticks) = max_ticks {
        params.max_ticks = *max_ticks;
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let record = play_match(&params, seed, config_a, config_b)?;
    log::info!(
        "finished after {} ticks: {} vs {} ships, winner {}",
        record.ticks,
        record.final_ships.player1,
        record.final_ships.player2,
        record.winner.map_or_else(|| "none".to_string(), |p| p.to_string()),
    );

    Output::save_json(&record, output.clone())?;
    Ok(())
}

fn hybrid_agent(params: &GameParams, config: &AgentConfig) -> HybridAgent<RolloutModel> {
    HybridAgent::new(
        RolloutModel::new(params.clone()).with_send_fraction(config.planner.send_fraction),
    )
}

fn play_match(
    params: &GameParams,
    seed: u64,
    config_a: AgentConfig,
    config_b: AgentConfig,
) -> anyhow::Result<MatchRecord> {
    let mut agent_a = hybrid_agent(params, &config_a);
    let mut agent_b = hybrid_agent(params, &config_b);
    let label_a = agent_a.bind(Player::Player1, config_a, Some("player2"))?;
    let label_b = agent_b.bind(Player::Player2, config_b, Some("player1"))?;

    let mut state: GameState = GameStateFactory::new(params.clone()).create_game(seed);
    while !state.is_terminal(params) {
        let actions = [
            agent_a
                .decide(&state)
                .with_context(|| format!("{label_a} failed at tick {}", state.tick))?,
            agent_b
                .decide(&state)
                .with_context(|| format!("{label_b} failed at tick {}", state.tick))?,
        ];
        state
            .step(params, &actions)
            .with_context(|| format!("Failed to resolve tick {}", state.tick))?;
        if state.tick % PROGRESS_INTERVAL == 0 {
            log::info!(
                "tick {}: {:.1} vs {:.1} ships",
                state.tick,
                state.total_ships(Player::Player1),
                state.total_ships(Player::Player2),
            );
        }
    }

    Ok(MatchRecord {
        played_at: Utc::now(),
        seed,
        player1: label_a.to_string(),
        player2: label_b.to_string(),
        ticks: state.tick,
        winner: state.leader(),
        final_ships: FinalShips {
            player1: state.total_ships(Player::Player1),
            player2: state.total_ships(Player::Player2),
        },
    })
}
