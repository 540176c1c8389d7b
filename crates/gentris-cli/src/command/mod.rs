use clap::{Parser, Subcommand};

use self::{play::PlayArg, train::TrainArg};

mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let a chromosome play games
    Play(#[clap(flatten)] PlayArg),
    /// Evolve chromosomes with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
    }
    Ok(())
}
