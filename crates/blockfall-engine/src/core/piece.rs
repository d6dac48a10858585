use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// A falling tetromino: its kind, its current shape matrix and where that
/// matrix sits on the board.
///
/// Pieces are plain values. Movement and rotation mutate the piece in place
/// without looking at the board; callers test the result with
/// [`Board::collides`](super::board::Board::collides) and restore the previous
/// value when it does not fit.
///
/// # Coordinate System
///
/// - `origin` is the board cell covered by the top-left corner of the shape matrix
/// - Columns grow rightward, rows grow downward
/// - Row 0 is the top visible row; negative rows lie above the board
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let mut piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!(piece.origin().col(), 3);
///
/// piece.translate(1, 2);
/// piece.rotate_clockwise();
/// assert_eq!(piece.occupied_cells().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: PieceShape,
    origin: PiecePosition,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position of a board
    /// `board_width` cells wide: horizontally centered, top row on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.spawn_shape();
        let board_width = i32::try_from(board_width).unwrap_or(i32::MAX);
        let col = (board_width - i32::from(shape.width)) / 2;
        Self::with_origin(kind, PiecePosition::new(col, 0))
    }

    /// Like [`Self::spawn`], but picks the kind uniformly at random.
    #[must_use]
    pub fn spawn_random<R>(rng: &mut R, board_width: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::spawn(rng.random(), board_width)
    }

    /// Creates a piece in its spawn orientation with an explicit origin.
    #[must_use]
    pub fn with_origin(kind: PieceKind, origin: PiecePosition) -> Self {
        Self {
            kind,
            shape: kind.spawn_shape(),
            origin,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub fn origin(&self) -> PiecePosition {
        self.origin
    }

    /// Shifts the origin. No collision check is performed.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin.offset(dx, dy);
    }

    /// Returns a copy shifted by `(dx, dy)`, or `None` if any covered cell
    /// would fall outside the `i32` coordinate range.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Option<Self> {
        let origin = self.origin.checked_offset(dx, dy)?;
        // Far corner of the 4×4 matrix must be addressable too
        origin.checked_offset(4, 4)?;
        Some(Self { origin, ..*self })
    }

    /// Turns the shape matrix 90° clockwise around its top-left anchor.
    ///
    /// The origin is left untouched and no wall kick is attempted.
    pub fn rotate_clockwise(&mut self) {
        self.shape = self.shape.rotated_clockwise();
    }

    /// Returns the absolute `(col, row)` board cells covered by this piece.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), { PieceShape::CELL_COUNT }> {
        let PiecePosition { col, row } = self.origin;
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| (col + dx, row + dy))
            .collect()
    }
}

/// Board coordinates of a piece's top-left shape corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    col: i32,
    row: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }

    #[must_use]
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.col.checked_add(dx), self.row.checked_add(dy)) {
            (Some(col), Some(row)) => Some(Self::new(col, row)),
            _ => None,
        }
    }
}

/// Rectangular occupancy matrix of a piece, at most 4×4.
///
/// Cells outside `width × height` are always empty, so two shapes compare
/// equal exactly when they cover the same sub-cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    width: u8,
    height: u8,
    cells: [[bool; 4]; 4],
}

impl PieceShape {
    /// Number of occupied sub-cells in every tetromino shape.
    pub const CELL_COUNT: usize = 4;

    const fn new(width: u8, height: u8, cells: [[bool; 4]; 4]) -> Self {
        assert!(width as usize <= 4 && height as usize <= 4);
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Checks whether the sub-cell at `(x, y)` is occupied. Out-of-range
    /// coordinates are empty.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Relative `(dx, dy)` offsets of occupied sub-cells.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows().zip(0..).flat_map(|(row, dy)| {
            row.iter()
                .zip(0..)
                .filter(|(cell, _)| **cell)
                .map(move |(_, dx)| (dx, dy))
        })
    }

    /// Reverses the row order and transposes, i.e. a 90° clockwise turn.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (width, height) = (self.width(), self.height());
        let mut cells = [[false; 4]; 4];
        for (y, row) in cells.iter_mut().enumerate().take(width) {
            for (x, cell) in row.iter_mut().enumerate().take(height) {
                *cell = self.cells[height - 1 - x][y];
            }
        }
        Self::new(self.height, self.width, cells)
    }
}

/// RGB color a piece kind is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the shape a freshly spawned piece of this kind has.
    #[must_use]
    pub const fn spawn_shape(self) -> PieceShape {
        SPAWN_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

const SPAWN_SHAPES: [PieceShape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        PieceShape::new(4, 1, [[C, C, C, C], EEEE, EEEE, EEEE]),
        // O-piece
        PieceShape::new(2, 2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        PieceShape::new(3, 2, [[C, C, C, E], [E, C, E, E], EEEE, EEEE]),
        // L-piece
        PieceShape::new(3, 2, [[C, C, C, E], [C, E, E, E], EEEE, EEEE]),
        // J-piece
        PieceShape::new(3, 2, [[C, C, C, E], [E, E, C, E], EEEE, EEEE]),
        // S-piece
        PieceShape::new(3, 2, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        PieceShape::new(3, 2, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    ]
};

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor::rgb(0, 255, 255),
    PieceColor::rgb(255, 255, 0),
    PieceColor::rgb(255, 0, 255),
    PieceColor::rgb(255, 165, 0),
    PieceColor::rgb(0, 120, 255),
    PieceColor::rgb(0, 255, 0),
    PieceColor::rgb(255, 0, 0),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn shape_ascii(shape: &PieceShape) -> Vec<String> {
        shape
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let mut shape = kind.spawn_shape();
            for _ in 0..4 {
                assert_eq!(shape.occupied_offsets().count(), 4, "{kind:?}");
                shape = shape.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_rotate_clockwise_t_piece() {
        let shape = PieceKind::T.spawn_shape();
        assert_eq!(shape_ascii(&shape), ["###", ".#."]);

        let shape = shape.rotated_clockwise();
        assert_eq!(shape.width(), 2);
        assert_eq!(shape.height(), 3);
        assert_eq!(shape_ascii(&shape), [".#", "##", ".#"]);

        let shape = shape.rotated_clockwise();
        assert_eq!(shape_ascii(&shape), [".#.", "###"]);
    }

    #[test]
    fn test_rotate_i_piece_goes_vertical() {
        let shape = PieceKind::I.spawn_shape().rotated_clockwise();
        assert_eq!(shape_ascii(&shape), ["#", "#", "#", "#"]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let spawn = kind.spawn_shape();
            let mut shape = spawn;
            for _ in 0..4 {
                shape = shape.rotated_clockwise();
            }
            assert_eq!(shape, spawn, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_keeps_kind_and_color() {
        let mut piece = Piece::spawn(PieceKind::L, 10);
        let color = piece.color();
        piece.rotate_clockwise();
        assert_eq!(piece.kind(), PieceKind::L);
        assert_eq!(piece.color(), color);
    }

    #[test]
    fn test_spawn_is_centered_on_top_row() {
        assert_eq!(Piece::spawn(PieceKind::I, 10).origin(), PiecePosition::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::O, 10).origin(), PiecePosition::new(4, 0));
        assert_eq!(Piece::spawn(PieceKind::T, 10).origin(), PiecePosition::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::O, 7).origin(), PiecePosition::new(2, 0));
    }

    #[test]
    fn test_occupied_cells_follow_origin() {
        let mut piece = Piece::with_origin(PieceKind::S, PiecePosition::new(2, 5));
        let cells = piece.occupied_cells();
        assert_eq!(cells.as_slice(), &[(3, 5), (4, 5), (2, 6), (3, 6)]);

        piece.translate(-1, 1);
        let cells = piece.occupied_cells();
        assert_eq!(cells.as_slice(), &[(2, 6), (3, 6), (1, 7), (2, 7)]);
    }

    #[test]
    fn test_translated_rejects_overflow() {
        let piece = Piece::with_origin(PieceKind::O, PiecePosition::new(4, 0));
        assert_eq!(
            piece.translated(1, 2).map(|p| p.origin()),
            Some(PiecePosition::new(5, 2))
        );
        assert_eq!(piece.translated(i32::MAX, 0), None);
        assert_eq!(piece.translated(0, i32::MAX), None);

        let above = Piece::with_origin(PieceKind::O, PiecePosition::new(-1, -1));
        assert_eq!(above.translated(i32::MIN, 0), None);
        assert_eq!(above.translated(0, i32::MIN), None);
        // Origin fits, but the shape's far corner would not
        assert_eq!(piece.translated(i32::MAX - 6, 0), None);
    }

    #[test]
    fn test_random_spawn_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..200 {
            let piece = Piece::spawn_random(&mut rng, 10);
            seen[piece.kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }
}
