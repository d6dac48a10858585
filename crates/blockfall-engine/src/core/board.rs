use std::fmt;

use crate::BoardSizeError;

use super::piece::{Piece, PieceKind};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Settled block left by a piece of the given kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }
}

/// The grid of settled blocks.
///
/// Each cell stores either nothing or the kind of the piece that settled
/// there, so "occupied" and "colored" can never disagree. Rows are always
/// exactly `width` cells long and are indexed top to bottom.
///
/// Pieces may hang above the board (negative rows) while spawning or
/// rotating near the ceiling; those cells are never stored.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, PiecePosition};
///
/// let mut board = Board::new(4, 4).unwrap();
/// let piece = Piece::with_origin(PieceKind::I, PiecePosition::new(0, 3));
/// assert!(!board.collides(&piece));
///
/// board.merge(&piece);
/// assert!(board.is_row_full(3));
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(board.rows().flatten().all(|block| block.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    rows: Vec<Box<[Block]>>,
}

impl Board {
    /// Smallest accepted width and height; every tetromino fits in every
    /// orientation.
    pub const MIN_SIZE: usize = 4;
    /// Largest accepted width and height.
    pub const MAX_SIZE: usize = 255;

    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        Self::check_size(width, height)?;
        Ok(Self::with_checked_size(width, height))
    }

    pub(crate) fn check_size(width: usize, height: usize) -> Result<(), BoardSizeError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&width) {
            return Err(BoardSizeError::Width { width });
        }
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&height) {
            return Err(BoardSizeError::Height { height });
        }
        Ok(())
    }

    pub(crate) fn with_checked_size(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: (0..height).map(|_| Self::empty_row(width)).collect(),
        }
    }

    fn empty_row(width: usize) -> Box<[Block]> {
        vec![Block::Empty; width].into_boxed_slice()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Iterates the rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.rows.iter().map(|row| &row[..])
    }

    /// Returns the block at `(col, row)`, or `None` outside the board.
    #[must_use]
    pub fn block(&self, col: i32, row: i32) -> Option<Block> {
        let (col, row) = self.index(col, row)?;
        Some(self.rows[row][col])
    }

    #[must_use]
    pub fn is_in_bounds(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    fn index(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col).ok().filter(|&c| c < self.width())?;
        let row = usize::try_from(row).ok().filter(|&r| r < self.height())?;
        Some((col, row))
    }

    /// Checks if every cell of row `row` is occupied. Rows outside the board
    /// are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|row| row.iter().all(|block| !block.is_empty()))
    }

    /// Checks whether `piece` overlaps a wall, the floor or a settled block.
    ///
    /// Cells above the board (negative rows) only have to respect the side
    /// walls.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        let width = i32::try_from(self.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height()).unwrap_or(i32::MAX);
        piece.occupied_cells().into_iter().any(|(col, row)| {
            if col < 0 || col >= width || row >= height {
                return true;
            }
            row >= 0 && self.block(col, row).is_some_and(|block| !block.is_empty())
        })
    }

    /// Writes the piece's cells into the board.
    ///
    /// Cells above the board are dropped. The caller is expected to have
    /// checked [`Self::collides`] first.
    pub fn merge(&mut self, piece: &Piece) {
        for (col, row) in piece.occupied_cells() {
            if let Some((col, row)) = self.index(col, row) {
                self.rows[row][col] = Block::Piece(piece.kind());
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are examined bottom to top. When a row is removed, everything
    /// above it moves down one row, an empty row appears on top, and the same
    /// index is examined again.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        let mut row = self.height();
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.rows.remove(row - 1);
                self.rows.insert(0, Self::empty_row(self.width));
                count += 1;
            } else {
                row -= 1;
            }
        }
        count
    }

    /// Empties every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Block::Empty);
        }
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// `.` is an empty cell, a piece letter (`I`, `O`, `T`, `L`, `J`, `S`,
    /// `Z`) is a settled block of that kind. Blank lines are skipped and
    /// surrounding whitespace is ignored. Rows are given top to bottom and
    /// aligned to the bottom of a board `height` rows tall.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters, ragged rows, or art that does not fit.
    #[must_use]
    pub fn from_ascii(art: &str, height: usize) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().map_or(Self::MIN_SIZE, |line| line.chars().count());
        let mut board = Self::new(width, height).expect("invalid board size");
        assert!(lines.len() <= height, "art taller than the board");

        let top = height - lines.len();
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(line.chars().count(), width, "ragged row {y}: {line:?}");
            for (x, ch) in line.chars().enumerate() {
                board.rows[top + y][x] = match ch {
                    '.' => Block::Empty,
                    _ => Block::Piece(
                        PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("unknown cell {ch:?} in row {y}")),
                    ),
                };
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for block in row {
                let ch = block.kind().map_or('.', PieceKind::as_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
