use clap::{Parser, Subcommand};

use self::{decide::DecideArg, generate_map::GenerateMapArg, self_play::SelfPlayArg};

mod decide;
mod generate_map;
mod self_play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a symmetric map and write it as JSON
    GenerateMap(#[clap(flatten)] GenerateMapArg),
    /// Compute one action for a game state read from JSON
    Decide(#[clap(flatten)] DecideArg),
    /// Play two hybrid agents against each other on a generated map
    SelfPlay(#[clap(flatten)] SelfPlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::GenerateMap(arg) => generate_map::run(&arg)?,
        Mode::Decide(arg) => decide::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
    }
    Ok(())
}
