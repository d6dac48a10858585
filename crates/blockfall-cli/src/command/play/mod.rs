use anyhow::Context as _;
use blockfall_engine::{MatchController, PieceSeed};

use crate::{
    command::{BoardArg, play::app::PlayApp},
    tui::Runtime,
};

mod app;

const DEFAULT_FRAME_RATE: f64 = 60.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) board: BoardArg,
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Maximum redraws per second
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: f64,
    /// Hide where the piece would land on a hard drop
    #[clap(long)]
    no_preview: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,
            no_preview: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        board,
        seed,
        frame_rate,
        no_preview,
    } = arg;

    let config = board.config()?;
    let controller = match seed {
        Some(seed) => MatchController::with_seed(config, *seed),
        None => MatchController::new(config),
    };
    let mut app = PlayApp::new(controller, *frame_rate, !*no_preview);

    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    Ok(())
}
