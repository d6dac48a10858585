use serde::{Deserialize, Serialize};

use crate::{Piece, PieceColor, PieceKind};

use super::{
    match_controller::{MatchController, Phase},
    piece_source::PieceSource,
};

/// Owned, read-only picture of a match at one instant.
///
/// Renderers and headless hosts work from snapshots so they never hold a
/// borrow of the controller across frames.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Intent, MatchConfig, MatchController, PieceKind, ScriptedPieceSource};
///
/// let source = ScriptedPieceSource::new([PieceKind::O]);
/// let mut game = MatchController::with_source(MatchConfig::default(), source);
/// game.apply(Intent::HardDrop);
///
/// let snapshot = game.snapshot();
/// assert_eq!(snapshot.cells[19][4], Some(PieceKind::O));
/// assert_eq!(snapshot.active.cells, [(4, 0), (5, 0), (4, 1), (5, 1)]);
/// assert_eq!(snapshot.gravity_interval_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchSnapshot {
    pub width: usize,
    pub height: usize,
    /// Settled blocks, top row first. `None` is an empty cell.
    pub cells: Vec<Vec<Option<PieceKind>>>,
    pub active: ActivePieceSnapshot,
    /// Cells the active piece would cover after a hard drop.
    pub drop_preview: Vec<(i32, i32)>,
    pub next: NextPieceSnapshot,
    pub score: usize,
    pub level: usize,
    pub lines_cleared_total: usize,
    pub completed_pieces: usize,
    /// Settles grouped by lines cleared, 0 through 4.
    pub line_cleared_counter: [usize; 5],
    pub phase: Phase,
    pub gravity_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivePieceSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    /// Absolute `(col, row)` cells; rows may be negative above the board.
    pub cells: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NextPieceSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    /// Occupancy matrix of the spawn shape, top row first.
    pub shape: Vec<Vec<bool>>,
}

impl MatchSnapshot {
    pub(crate) fn capture<S>(controller: &MatchController<S>) -> Self
    where
        S: PieceSource,
    {
        let board = controller.board();
        let stats = controller.stats();
        Self {
            width: board.width(),
            height: board.height(),
            cells: board
                .rows()
                .map(|row| row.iter().map(|block| block.kind()).collect())
                .collect(),
            active: ActivePieceSnapshot::new(controller.active_piece()),
            drop_preview: controller.drop_preview().occupied_cells().to_vec(),
            next: NextPieceSnapshot::new(controller.next_piece()),
            score: stats.score(),
            level: stats.level(),
            lines_cleared_total: stats.lines_cleared_total(),
            completed_pieces: stats.completed_pieces(),
            line_cleared_counter: *stats.line_cleared_counter(),
            phase: controller.phase(),
            gravity_interval_ms: u64::try_from(controller.gravity_interval().as_millis())
                .unwrap_or(u64::MAX),
        }
    }

    /// Returns the settled kind at `(col, row)`, or `None` for empty or
    /// out-of-board cells.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<PieceKind> {
        self.cells.get(row)?.get(col).copied().flatten()
    }
}

impl ActivePieceSnapshot {
    fn new(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            color: piece.color(),
            cells: piece.occupied_cells().to_vec(),
        }
    }
}

impl NextPieceSnapshot {
    fn new(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            color: piece.color(),
            shape: piece.shape().rows().map(<[bool]>::to_vec).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Intent, MatchConfig, PiecePosition, ScriptedPieceSource};

    use super::*;

    fn controller() -> MatchController<ScriptedPieceSource> {
        MatchController::with_source(
            MatchConfig::new(6, 8).unwrap(),
            ScriptedPieceSource::new([PieceKind::T, PieceKind::L]),
        )
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = controller();
        game.apply(Intent::HardDrop);
        game.apply(Intent::MoveLeft);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.width, 6);
        assert_eq!(snapshot.height, 8);
        assert_eq!(snapshot.cells.len(), 8);
        assert!(snapshot.cells.iter().all(|row| row.len() == 6));

        // T settled at column 1, bottom two rows
        assert_eq!(snapshot.cell(1, 6), Some(PieceKind::T));
        assert_eq!(snapshot.cell(2, 7), Some(PieceKind::T));
        assert_eq!(snapshot.cell(1, 7), None);
        assert_eq!(snapshot.cell(6, 0), None);

        assert_eq!(snapshot.active.kind, PieceKind::L);
        assert_eq!(snapshot.active.color, PieceKind::L.color());
        let origin = game.active_piece().origin();
        assert_eq!(origin, PiecePosition::new(0, 0));
        assert_eq!(snapshot.active.cells, [(0, 0), (1, 0), (2, 0), (0, 1)]);
        assert_eq!(snapshot.drop_preview, [(0, 5), (1, 5), (2, 5), (0, 6)]);

        assert_eq!(snapshot.next.kind, PieceKind::T);
        assert_eq!(
            snapshot.next.shape,
            [vec![true, true, true], vec![false, true, false]]
        );

        assert_eq!(snapshot.completed_pieces, 1);
        assert_eq!(snapshot.line_cleared_counter, [1, 0, 0, 0, 0]);
        assert_eq!(snapshot.phase, Phase::Playing);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut game = controller();
        let before = game.snapshot();
        game.apply(Intent::SoftDrop);
        assert_ne!(game.snapshot(), before);
        assert_eq!(before.active.cells, [(1, 0), (2, 0), (3, 0), (2, 1)]);
    }

    #[test]
    fn test_snapshot_json_format() {
        let mut game = controller();
        game.apply(Intent::HardDrop);
        let snapshot = game.snapshot();

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["width"], 6);
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["gravity_interval_ms"], 1000);
        assert_eq!(json["cells"][7][2], "T");
        assert!(json["cells"][7][0].is_null());
        assert_eq!(json["active"]["kind"], "L");
        assert_eq!(json["active"]["color"]["red"], 255);
        assert_eq!(json["active"]["cells"][0], serde_json::json!([1, 0]));

        let back: MatchSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
