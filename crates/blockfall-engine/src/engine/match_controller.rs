use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    BoardSizeError, PieceCollisionError,
    core::{board::Board, piece::Piece},
};

use super::{
    intent::{Intent, IntentOutcome, SettleReport},
    match_stats::MatchStats,
    piece_source::{PieceSeed, PieceSource, RandomPieceSource},
    snapshot::MatchSnapshot,
};

/// Top-level mode of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Deserialize, Serialize,
)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// Validated board dimensions for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    width: usize,
    height: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

impl MatchConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        Board::check_size(width, height)?;
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Runs one match: owns the board, the active and next pieces, the
/// statistics and the phase, and is the only thing that mutates them.
///
/// Every operation is synchronous and takes effect completely before it
/// returns. Gravity is just another intent: the host calls
/// [`Self::gravity_tick`] (or applies [`Intent::GravityTick`]) every
/// [`Self::gravity_interval`] and re-reads the interval after each settle and
/// restart.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Intent, IntentOutcome, MatchConfig, MatchController, PieceKind, ScriptedPieceSource};
///
/// let source = ScriptedPieceSource::new([PieceKind::I, PieceKind::O]);
/// let mut game = MatchController::with_source(MatchConfig::default(), source);
///
/// assert_eq!(game.apply(Intent::MoveLeft), IntentOutcome::Moved);
/// assert!(game.apply(Intent::HardDrop).is_settled());
/// assert_eq!(game.active_piece().kind(), PieceKind::O);
/// assert_eq!(game.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MatchController<S = RandomPieceSource> {
    config: MatchConfig,
    board: Board,
    active_piece: Piece,
    next_piece: Piece,
    stats: MatchStats,
    phase: Phase,
    source: S,
}

impl MatchController {
    /// Starts a match with a randomly seeded piece source.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_source(config, RandomPieceSource::new())
    }

    /// Starts a match whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(config: MatchConfig, seed: PieceSeed) -> Self {
        Self::with_source(config, RandomPieceSource::with_seed(seed))
    }
}

impl<S> MatchController<S>
where
    S: PieceSource,
{
    #[must_use]
    pub fn with_source(config: MatchConfig, mut source: S) -> Self {
        let active_piece = Piece::spawn(source.next_kind(), config.width());
        let next_piece = Piece::spawn(source.next_kind(), config.width());
        let mut this = Self {
            config,
            board: Board::with_checked_size(config.width(), config.height()),
            active_piece,
            next_piece,
            stats: MatchStats::new(),
            phase: Phase::Playing,
            source,
        };
        this.check_spawn();
        this
    }

    #[must_use]
    pub fn config(&self) -> MatchConfig {
        self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines_cleared_total(&self) -> usize {
        self.stats.lines_cleared_total()
    }

    /// Returns how long the host should wait between gravity ticks.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.stats.gravity_interval()
    }

    /// Returns where the active piece would settle if hard dropped now.
    #[must_use]
    pub fn drop_preview(&self) -> Piece {
        let mut piece = self.active_piece;
        loop {
            piece.translate(0, 1);
            if self.board.collides(&piece) {
                piece.translate(0, -1);
                return piece;
            }
        }
    }

    /// Captures the current state for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self)
    }

    /// Applies one intent.
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::MoveLeft => self.move_piece(-1, 0),
            Intent::MoveRight => self.move_piece(1, 0),
            Intent::SoftDrop => self.move_piece(0, 1),
            Intent::Rotate => self.rotate(),
            Intent::HardDrop => self.hard_drop(),
            Intent::GravityTick => self.gravity_tick(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => self.restart(),
        }
    }

    /// Moves the active piece by `(dx, dy)` if it fits there.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> IntentOutcome {
        if !self.phase.is_playing() {
            return IntentOutcome::Ignored;
        }
        match self.try_move(dx, dy) {
            Ok(()) => IntentOutcome::Moved,
            Err(PieceCollisionError) => IntentOutcome::Blocked,
        }
    }

    /// Rotates the active piece clockwise, restoring its previous shape if
    /// the rotated piece does not fit.
    pub fn rotate(&mut self) -> IntentOutcome {
        if !self.phase.is_playing() {
            return IntentOutcome::Ignored;
        }
        match self.try_rotate() {
            Ok(()) => IntentOutcome::Rotated,
            Err(PieceCollisionError) => IntentOutcome::Blocked,
        }
    }

    /// Drops the active piece as far as it goes and settles it.
    pub fn hard_drop(&mut self) -> IntentOutcome {
        if !self.phase.is_playing() {
            return IntentOutcome::Ignored;
        }
        while self.try_move(0, 1).is_ok() {}
        IntentOutcome::Settled(self.settle())
    }

    /// Moves the active piece down one row, settling it if it cannot move.
    pub fn gravity_tick(&mut self) -> IntentOutcome {
        if !self.phase.is_playing() {
            return IntentOutcome::Ignored;
        }
        if self.try_move(0, 1).is_ok() {
            return IntentOutcome::Moved;
        }
        IntentOutcome::Settled(self.settle())
    }

    /// Flips between playing and paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) -> IntentOutcome {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            Phase::GameOver => return IntentOutcome::Ignored,
        };
        IntentOutcome::PauseToggled(self.phase)
    }

    /// Starts the match over from any phase: empty board, zeroed
    /// statistics, two new pieces.
    pub fn restart(&mut self) -> IntentOutcome {
        self.board.clear();
        self.stats = MatchStats::new();
        self.active_piece = self.spawn_piece();
        self.next_piece = self.spawn_piece();
        self.phase = Phase::Playing;
        self.check_spawn();
        IntentOutcome::Restarted
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let moved = self
            .active_piece
            .translated(dx, dy)
            .ok_or(PieceCollisionError)?;
        if self.board.collides(&moved) {
            return Err(PieceCollisionError);
        }
        self.active_piece = moved;
        Ok(())
    }

    fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let before = self.active_piece;
        self.active_piece.rotate_clockwise();
        if self.board.collides(&self.active_piece) {
            self.active_piece = before;
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    fn spawn_piece(&mut self) -> Piece {
        Piece::spawn(self.source.next_kind(), self.board.width())
    }

    fn check_spawn(&mut self) -> bool {
        let blocked = self.board.collides(&self.active_piece);
        if blocked {
            self.phase = Phase::GameOver;
        }
        blocked
    }

    // The settling piece is always merged; game over is only detected once
    // the next piece fails to spawn.
    fn settle(&mut self) -> SettleReport {
        let interval_before = self.gravity_interval();

        self.board.merge(&self.active_piece);
        let cleared_lines = self.board.clear_full_rows();
        let points = self.stats.record_settle(cleared_lines);

        self.active_piece = self.next_piece;
        self.next_piece = self.spawn_piece();
        let topped_out = self.check_spawn();

        let interval = self.gravity_interval();
        SettleReport {
            cleared_lines,
            points,
            gravity_interval_changed: (interval != interval_before).then_some(interval),
            topped_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use crate::{Block, PieceKind, PiecePosition, ScriptedPieceSource};

    use super::*;

    fn controller(kinds: &[PieceKind]) -> MatchController<ScriptedPieceSource> {
        MatchController::with_source(
            MatchConfig::default(),
            ScriptedPieceSource::new(kinds.iter().copied()),
        )
    }

    fn settled(outcome: IntentOutcome) -> SettleReport {
        match outcome {
            IntentOutcome::Settled(report) => report,
            other => panic!("expected a settle, got {other:?}"),
        }
    }

    fn filled_cells(board: &Board) -> usize {
        board.rows().flatten().filter(|b| !b.is_empty()).count()
    }

    #[test]
    fn test_config_validation() {
        assert!(MatchConfig::new(10, 20).is_ok());
        assert_eq!(
            MatchConfig::new(0, 20),
            Err(BoardSizeError::Width { width: 0 })
        );
        assert_eq!(
            MatchConfig::new(10, 2),
            Err(BoardSizeError::Height { height: 2 })
        );
        assert_eq!(MatchConfig::default(), MatchConfig::new(10, 20).unwrap());
    }

    #[test]
    fn test_new_match() {
        let game = controller(&[PieceKind::T, PieceKind::I]);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.lines_cleared_total(), 0);
        assert_eq!(game.gravity_interval(), Duration::from_millis(1000));
        assert_eq!(filled_cells(game.board()), 0);
        assert_eq!(game.active_piece().kind(), PieceKind::T);
        assert_eq!(game.active_piece().origin(), PiecePosition::new(3, 0));
        assert_eq!(game.next_piece().kind(), PieceKind::I);
    }

    #[test]
    fn test_seeded_matches_agree() {
        let seed: PieceSeed = "0f0e0d0c0b0a09080706050403020100".parse().unwrap();
        let mut a = MatchController::with_seed(MatchConfig::default(), seed);
        let mut b = MatchController::with_seed(MatchConfig::default(), seed);
        for _ in 0..20 {
            a.hard_drop();
            b.hard_drop();
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn test_move_and_block_at_wall() {
        let mut game = controller(&[PieceKind::O]);
        // O spawns at column 4 on a 10-wide board
        for _ in 0..4 {
            assert_eq!(game.apply(Intent::MoveLeft), IntentOutcome::Moved);
        }
        let at_wall = *game.active_piece();
        assert_eq!(at_wall.origin(), PiecePosition::new(0, 0));
        assert_eq!(game.apply(Intent::MoveLeft), IntentOutcome::Blocked);
        assert_eq!(*game.active_piece(), at_wall);

        for _ in 0..8 {
            assert_eq!(game.apply(Intent::MoveRight), IntentOutcome::Moved);
        }
        assert_eq!(game.apply(Intent::MoveRight), IntentOutcome::Blocked);
        assert_eq!(game.active_piece().origin(), PiecePosition::new(8, 0));
    }

    #[test]
    fn test_move_extreme_delta_is_blocked() {
        let mut game = controller(&[PieceKind::O]);
        let start = *game.active_piece();
        for (dx, dy) in [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (i32::MAX - 4, i32::MAX - 4),
        ] {
            assert_eq!(game.move_piece(dx, dy), IntentOutcome::Blocked);
            assert_eq!(*game.active_piece(), start);
        }
        assert_eq!(game.move_piece(-2, 3), IntentOutcome::Moved);
        assert_eq!(game.active_piece().origin(), PiecePosition::new(2, 3));
    }

    #[test]
    fn test_soft_drop_stops_at_floor() {
        let mut game = controller(&[PieceKind::O]);
        for _ in 0..18 {
            assert_eq!(game.apply(Intent::SoftDrop), IntentOutcome::Moved);
        }
        assert_eq!(game.apply(Intent::SoftDrop), IntentOutcome::Blocked);
        assert_eq!(game.active_piece().origin().row(), 18);
        // Soft drop never settles
        assert_eq!(filled_cells(game.board()), 0);
    }

    #[test]
    fn test_rotate_blocked_by_wall_restores_shape() {
        let mut game = controller(&[PieceKind::I]);
        assert_eq!(game.apply(Intent::Rotate), IntentOutcome::Rotated);
        while game.apply(Intent::MoveRight).is_moved() {}
        let vertical = *game.active_piece();
        assert_eq!(vertical.origin().col(), 9);

        // Horizontal I would poke through the right wall
        assert_eq!(game.apply(Intent::Rotate), IntentOutcome::Blocked);
        assert_eq!(game.active_piece().shape(), vertical.shape());
        assert_eq!(*game.active_piece(), vertical);
    }

    #[test]
    fn test_rotate_blocked_by_settled_blocks() {
        let mut game = controller(&[PieceKind::T]);
        game.board = Board::from_ascii(
            "
            ..........
            ...Z......
            ",
            20,
        );
        // Upright T covers rows 17..=18; rotated it reaches (3, 19)
        game.active_piece = Piece::with_origin(PieceKind::T, PiecePosition::new(2, 17));
        assert!(!game.board.collides(&game.active_piece));
        let before = game.active_piece;

        let mut rotated = before;
        rotated.rotate_clockwise();
        assert!(game.board.collides(&rotated));

        assert_eq!(game.rotate(), IntentOutcome::Blocked);
        assert_eq!(game.active_piece, before);
    }

    #[test]
    fn test_hard_drop_settles_and_spawns_next() {
        let mut game = controller(&[PieceKind::O, PieceKind::T, PieceKind::L]);
        let report = settled(game.apply(Intent::HardDrop));
        assert_eq!(report.cleared_lines, 0);
        assert_eq!(report.points, 0);
        assert_eq!(report.gravity_interval_changed, None);
        assert!(!report.topped_out);

        assert_eq!(game.board().block(4, 18), Some(Block::Piece(PieceKind::O)));
        assert_eq!(game.board().block(5, 19), Some(Block::Piece(PieceKind::O)));
        assert_eq!(filled_cells(game.board()), 4);
        assert_eq!(game.active_piece().kind(), PieceKind::T);
        assert_eq!(game.active_piece().origin(), PiecePosition::new(3, 0));
        assert_eq!(game.next_piece().kind(), PieceKind::L);
        assert_eq!(game.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_gravity_tick_moves_then_settles() {
        let mut game = controller(&[PieceKind::O]);
        for _ in 0..18 {
            assert_eq!(game.apply(Intent::GravityTick), IntentOutcome::Moved);
        }
        let report = settled(game.apply(Intent::GravityTick));
        assert_eq!(report.cleared_lines, 0);
        assert_eq!(filled_cells(game.board()), 4);
        assert_eq!(game.active_piece().origin(), PiecePosition::new(4, 0));
    }

    #[test]
    fn test_drop_preview() {
        let mut game = controller(&[PieceKind::O]);
        game.board = Board::from_ascii("ZZZZZZZZZ.", 20);
        let preview = game.drop_preview();
        assert_eq!(preview.origin(), PiecePosition::new(4, 17));
        assert_eq!(game.active_piece().origin(), PiecePosition::new(4, 0));

        game.hard_drop();
        assert_eq!(game.board().block(4, 17), Some(Block::Piece(PieceKind::O)));
    }

    #[test]
    fn test_single_clear_scores_100() {
        let mut game = controller(&[PieceKind::O]);
        game.board = Board::from_ascii("ZZZZ..ZZZZ", 20);
        let report = settled(game.hard_drop());
        assert_eq!(report.cleared_lines, 1);
        assert_eq!(report.points, 100);
        assert_eq!(game.score(), 100);
        assert_eq!(game.lines_cleared_total(), 1);
        // The top half of the O shifted down into the bottom row
        assert_eq!(
            game.board().to_string().lines().last(),
            Some("....OO....")
        );
    }

    #[test]
    fn test_double_clear_scores_300() {
        let mut game = controller(&[PieceKind::O]);
        game.board = Board::from_ascii(
            "
            ZZZZ..ZZZZ
            SSSS..SSSS
            ",
            20,
        );
        let report = settled(game.hard_drop());
        assert_eq!(report.cleared_lines, 2);
        assert_eq!(report.points, 300);
        assert_eq!(filled_cells(game.board()), 0);
    }

    #[test]
    fn test_triple_clear_scores_500() {
        let mut game = controller(&[PieceKind::I]);
        game.rotate();
        while game.move_piece(-1, 0).is_moved() {}
        game.board = Board::from_ascii(
            "
            .TTTTTTTTT
            .TTTTTTTTT
            .TTTTTTTTT
            ",
            20,
        );
        let report = settled(game.hard_drop());
        assert_eq!(report.cleared_lines, 3);
        assert_eq!(report.points, 500);
        // One cell of the vertical I remains on the bottom row
        assert_eq!(game.board().block(0, 19), Some(Block::Piece(PieceKind::I)));
        assert_eq!(filled_cells(game.board()), 1);
    }

    #[test]
    fn test_tetris_scores_800() {
        let mut game = controller(&[PieceKind::I]);
        game.rotate();
        while game.move_piece(-1, 0).is_moved() {}
        game.board = Board::from_ascii(
            "
            .JJJJJJJJJ
            .JJJJJJJJJ
            .JJJJJJJJJ
            .JJJJJJJJJ
            ",
            20,
        );
        let report = settled(game.hard_drop());
        assert_eq!(report.cleared_lines, 4);
        assert_eq!(report.points, 800);
        assert_eq!(filled_cells(game.board()), 0);
    }

    #[test]
    fn test_single_at_level_three_scores_300() {
        let mut game = controller(&[PieceKind::O]);
        for _ in 0..5 {
            game.stats.record_settle(4);
        }
        assert_eq!(game.level(), 3);
        let score_before = game.score();

        game.board = Board::from_ascii("ZZZZ..ZZZZ", 20);
        let report = settled(game.hard_drop());
        assert_eq!(report.points, 300);
        assert_eq!(game.score(), score_before + 300);
    }

    #[test]
    fn test_level_up_reports_new_gravity_interval() {
        let mut game = controller(&[PieceKind::O]);
        for _ in 0..9 {
            game.stats.record_settle(1);
        }
        assert_eq!(game.gravity_interval(), Duration::from_millis(1000));

        game.board = Board::from_ascii("ZZZZ..ZZZZ", 20);
        let report = settled(game.hard_drop());
        assert_eq!(game.level(), 2);
        assert_eq!(
            report.gravity_interval_changed,
            Some(Duration::from_millis(900))
        );
        assert_eq!(game.gravity_interval(), Duration::from_millis(900));
    }

    #[test]
    fn test_game_over_when_next_piece_cannot_spawn() {
        let mut game = controller(&[PieceKind::O]);
        game.board = Board::from_ascii(&".ZZZZZZZZZ\n".repeat(18), 20);
        let board_before = game.board.clone();

        let report = settled(game.apply(Intent::GravityTick));
        assert!(report.topped_out);
        assert_eq!(report.cleared_lines, 0);
        assert_eq!(game.phase(), Phase::GameOver);

        // The settling piece was merged, the blocked one was not
        assert_eq!(
            filled_cells(game.board()),
            filled_cells(&board_before) + 4
        );
        assert_eq!(game.board().block(4, 0), Some(Block::Piece(PieceKind::O)));
        assert_eq!(game.board().block(5, 1), Some(Block::Piece(PieceKind::O)));

        // Nothing but restart does anything now
        let snapshot = game.snapshot();
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::Rotate,
            Intent::HardDrop,
            Intent::GravityTick,
            Intent::TogglePause,
        ] {
            assert_eq!(game.apply(intent), IntentOutcome::Ignored, "{intent:?}");
        }
        assert_eq!(game.snapshot(), snapshot);

        assert_eq!(game.apply(Intent::Restart), IntentOutcome::Restarted);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_pause_gating() {
        let mut game = controller(&[PieceKind::T, PieceKind::S]);
        game.move_piece(0, 3);
        assert_eq!(
            game.apply(Intent::TogglePause),
            IntentOutcome::PauseToggled(Phase::Paused)
        );

        let snapshot = game.snapshot();
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::Rotate,
            Intent::HardDrop,
            Intent::GravityTick,
        ] {
            assert_eq!(game.apply(intent), IntentOutcome::Ignored, "{intent:?}");
        }
        assert_eq!(game.snapshot(), snapshot);

        assert_eq!(
            game.apply(Intent::TogglePause),
            IntentOutcome::PauseToggled(Phase::Playing)
        );
        assert_eq!(game.apply(Intent::GravityTick), IntentOutcome::Moved);
        assert_eq!(game.active_piece().origin().row(), 4);
    }

    #[test]
    fn test_restart_from_every_phase() {
        let mut game = controller(&[PieceKind::I, PieceKind::O, PieceKind::T]);
        let assert_fresh = |game: &MatchController<ScriptedPieceSource>| {
            assert_eq!(game.phase(), Phase::Playing);
            assert_eq!(game.score(), 0);
            assert_eq!(game.level(), 1);
            assert_eq!(game.lines_cleared_total(), 0);
            assert_eq!(game.stats().completed_pieces(), 0);
            assert_eq!(filled_cells(game.board()), 0);
            assert_eq!(game.active_piece().origin().row(), 0);
        };

        // Playing, with some history
        game.board = Board::from_ascii("ZZZZZZ.ZZZ", 20);
        game.hard_drop();
        game.stats.record_settle(4);
        assert_eq!(game.restart(), IntentOutcome::Restarted);
        assert_fresh(&game);

        // Paused
        game.hard_drop();
        game.toggle_pause();
        assert_eq!(game.apply(Intent::Restart), IntentOutcome::Restarted);
        assert_fresh(&game);

        // Game over
        game.board = Board::from_ascii(&"Z.ZZZZZZZZ\n".repeat(18), 20);
        while !game.phase().is_game_over() {
            game.hard_drop();
        }
        assert_eq!(game.apply(Intent::Restart), IntentOutcome::Restarted);
        assert_fresh(&game);

        // Restart twice in a row gives a fresh match both times
        game.restart();
        assert_fresh(&game);
    }

    #[test]
    fn test_restart_spawns_two_fresh_pieces() {
        let mut game = controller(&[
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
        ]);
        game.move_piece(1, 5);
        game.restart();
        assert_eq!(game.active_piece().kind(), PieceKind::T);
        assert_eq!(game.next_piece().kind(), PieceKind::S);
        assert_eq!(*game.active_piece(), Piece::spawn(PieceKind::T, 10));
    }

    #[test]
    fn test_counters_never_decrease() {
        let mut rng = Pcg32::seed_from_u64(42);
        let seed: PieceSeed = rng.random();
        let mut game = MatchController::with_seed(MatchConfig::default(), seed);
        let intents = [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::Rotate,
            Intent::HardDrop,
            Intent::GravityTick,
            Intent::TogglePause,
        ];

        let mut last = (0, 0, 1);
        for _ in 0..5000 {
            let intent = intents[rng.random_range(0..intents.len())];
            game.apply(intent);

            let now = (game.score(), game.lines_cleared_total(), game.level());
            assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            assert!(game.board().rows().all(|row| row.len() == 10));
            assert_eq!(game.board().height(), 20);
            if game.phase().is_playing() {
                assert!(!game.board().collides(game.active_piece()));
            }
            last = now;
        }
    }
}
