use std::path::PathBuf;

use anyhow::Context as _;
use planetwars_agent::agent::{Agent as _, HybridAgent};
use planetwars_engine::{Player, RolloutModel};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DecideArg {
    /// Game state JSON file
    #[arg(long)]
    state: PathBuf,
    /// Player to decide for
    #[arg(long, default_value = "player1")]
    player: Player,
    /// Agent configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Game parameters JSON file used by the forward model
    #[arg(long)]
    params: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DecideArg) -> anyhow::Result<()> {
    let DecideArg {
        state,
        player,
        config,
        params,
        output,
    } = arg;

    if player.is_neutral() {
        anyhow::bail!("cannot decide for the neutral player");
    }
    let snapshot = util::read_state_file(state)?;
    let config = util::read_config_file(config.as_deref())?;
    let params = util::read_params_file(params.as_deref())?;

    let send_fraction = config.planner.send_fraction;
    let mut agent = HybridAgent::new(RolloutModel::new(params).with_send_fraction(send_fraction));
    let label = agent.bind(*player, config, None)?;
    let action = agent
        .decide(&snapshot)
        .with_context(|| format!("{label} failed to decide for {player}"))?;
    log::info!("{label} chose {action:?}");

    Output::save_json(&action, output.clone())?;
    Ok(())
}
