//! Error types for board construction and solver setup

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("board has {len} cells, which is not a perfect square")]
    NotPerfectSquare { len: usize },

    #[error("board has no blank tile (0)")]
    MissingBlank,

    #[error("tile {tile} is out of range for a board of {size} cells")]
    TileOutOfRange { tile: u32, size: usize },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u32 },

    #[error("expected {expected} tiles, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("{size} cells is too many to label with 32-bit tiles")]
    TooManyCells { size: usize },

    #[error("start board is {start}x{start} but goal board is {goal}x{goal}")]
    SideMismatch { start: usize, goal: usize },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
