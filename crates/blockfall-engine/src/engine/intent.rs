use std::{collections::VecDeque, time::Duration};

use serde::{Deserialize, Serialize};

use super::match_controller::{MatchController, Phase};
use super::piece_source::PieceSource;

/// A discrete request delivered to a [`MatchController`].
///
/// User input and the host's gravity timer both arrive as intents, so the
/// controller sees a single ordered stream of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    GravityTick,
    TogglePause,
    Restart,
}

/// What applying an [`Intent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum IntentOutcome {
    /// The intent does not apply in the current phase; nothing changed.
    Ignored,
    /// The active piece moved (or, for a gravity tick, fell one row).
    Moved,
    /// The active piece was rotated.
    Rotated,
    /// The move or rotation collided and was undone.
    Blocked,
    /// The active piece settled into the board.
    Settled(SettleReport),
    /// The phase flipped between playing and paused.
    PauseToggled(Phase),
    /// The match was reset.
    Restarted,
}

/// Result of settling the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleReport {
    /// Rows removed by this settle.
    pub cleared_lines: usize,
    /// Points added to the score.
    pub points: usize,
    /// The new gravity interval, if this settle changed it.
    pub gravity_interval_changed: Option<Duration>,
    /// Whether the next piece could not spawn and the match ended.
    pub topped_out: bool,
}

/// FIFO of intents waiting to be applied.
///
/// Input handlers and timers push; the host drains the queue into the
/// controller between frames, one intent at a time.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Intent, IntentQueue, MatchConfig, MatchController, ScriptedPieceSource, PieceKind};
///
/// let source = ScriptedPieceSource::new([PieceKind::O]);
/// let mut controller = MatchController::with_source(MatchConfig::default(), source);
///
/// let mut queue = IntentQueue::new();
/// queue.push(Intent::MoveLeft);
/// queue.push(Intent::GravityTick);
///
/// let outcomes = queue.drain_into(&mut controller);
/// assert_eq!(outcomes.len(), 2);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct IntentQueue {
    intents: VecDeque<Intent>,
}

impl IntentQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    /// Applies every queued intent in order and returns their outcomes.
    pub fn drain_into<S>(&mut self, controller: &mut MatchController<S>) -> Vec<IntentOutcome>
    where
        S: PieceSource,
    {
        self.intents
            .drain(..)
            .map(|intent| controller.apply(intent))
            .collect()
    }
}

impl Extend<Intent> for IntentQueue {
    fn extend<T: IntoIterator<Item = Intent>>(&mut self, iter: T) {
        self.intents.extend(iter);
    }
}
