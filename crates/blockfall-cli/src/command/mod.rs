use blockfall_engine::MatchConfig;
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a match with random input and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Board dimensions shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Board width in cells
    #[clap(long, default_value_t = MatchConfig::DEFAULT_WIDTH)]
    width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = MatchConfig::DEFAULT_HEIGHT)]
    height: usize,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            width: MatchConfig::DEFAULT_WIDTH,
            height: MatchConfig::DEFAULT_HEIGHT,
        }
    }
}

impl BoardArg {
    pub(crate) fn config(&self) -> anyhow::Result<MatchConfig> {
        Ok(MatchConfig::new(self.width, self.height)?)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
