use std::path::PathBuf;

use planetwars_engine::GameStateFactory;
use rand::Rng as _;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateMapArg {
    /// Map seed; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Game parameters JSON file
    #[arg(long)]
    params: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateMapArg) -> anyhow::Result<()> {
    let GenerateMapArg {
        seed,
        params,
        output,
    } = arg;

    let params = util::read_params_file(params.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let state = GameStateFactory::new(params).create_game(seed);
    log::info!("generated {} planets from seed {seed}", state.planets.len());

    Output::save_json(&state, output.clone())?;
    Ok(())
}
