pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board")]
pub struct PieceCollisionError;

/// Rejected board dimensions passed to [`Board::new`] or [`MatchConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSizeError {
    #[display(
        "board width must be between {} and {}, got {width}",
        Board::MIN_SIZE,
        Board::MAX_SIZE
    )]
    Width { width: usize },
    #[display(
        "board height must be between {} and {}, got {height}",
        Board::MIN_SIZE,
        Board::MAX_SIZE
    )]
    Height { height: usize },
}
