use std::io::{self, Write as _};

use anyhow::Context as _;
use blockfall_engine::{
    Intent, IntentQueue, MatchConfig, MatchController, MatchSnapshot, PieceSeed,
};
use rand::{
    Rng, SeedableRng as _,
    seq::{IndexedRandom as _, WeightError},
};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::command::BoardArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) board: BoardArg,
    /// Seed for the piece sequence and the simulated input (32 hex digits);
    /// random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Number of intents to apply before stopping
    #[clap(long, default_value_t = 1000)]
    ticks: usize,
}

/// Intents the simulated player picks from, with relative weights.
///
/// Gravity dominates so pieces keep falling; pause and restart are left out.
const INTENT_WEIGHTS: [(Intent, u32); 6] = [
    (Intent::MoveLeft, 3),
    (Intent::MoveRight, 3),
    (Intent::Rotate, 2),
    (Intent::SoftDrop, 2),
    (Intent::HardDrop, 1),
    (Intent::GravityTick, 6),
];

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    steps: usize,
    #[serde(flatten)]
    snapshot: MatchSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg { board, seed, ticks } = arg;

    let config = board.config()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let report = simulate(config, seed, *ticks).context("failed to pick simulated input")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write report")?;
    writeln!(stdout).context("failed to write report")?;

    Ok(())
}

fn simulate(
    config: MatchConfig,
    seed: PieceSeed,
    ticks: usize,
) -> Result<SimulationReport, WeightError> {
    let mut controller = MatchController::with_seed(config, seed);
    let mut rng = input_rng(seed);
    let mut intents = IntentQueue::new();

    let mut steps = 0;
    while steps < ticks && !controller.phase().is_game_over() {
        intents.push(random_intent(&mut rng)?);
        intents.drain_into(&mut controller);
        steps += 1;
    }

    Ok(SimulationReport {
        seed,
        steps,
        snapshot: controller.snapshot(),
    })
}

/// Derives the input generator from the upper half of the seed, so it does
/// not replay the piece generator's stream.
fn input_rng(seed: PieceSeed) -> Pcg32 {
    let bytes = seed.to_bytes();
    let mut state = [0; 8];
    state.copy_from_slice(&bytes[8..]);
    Pcg32::seed_from_u64(u64::from_le_bytes(state))
}

fn random_intent<R>(rng: &mut R) -> Result<Intent, WeightError>
where
    R: Rng + ?Sized,
{
    let (intent, _) = INTENT_WEIGHTS.choose_weighted(rng, |(_, weight)| *weight)?;
    Ok(*intent)
}
