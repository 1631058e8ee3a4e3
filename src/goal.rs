//! The solved layout a search aims for

use crate::board::Board;
use crate::error::{Error, Result};

/// Canonical solved layout for `size` cells with the blank at 1-based
/// `blank_rank`. `None` or a rank outside `1..=size` puts the blank last.
///
/// Fails when tile labels up to `size - 1` do not fit in a `u32`.
pub fn layout(size: usize, blank_rank: Option<usize>) -> Result<Vec<u32>> {
    let cells = u32::try_from(size).map_err(|_| Error::TooManyCells { size })?;
    let blank_index = match blank_rank {
        Some(rank) if (1..=size).contains(&rank) => rank - 1,
        _ => size.saturating_sub(1),
    };

    let mut tiles: Vec<u32> = (1..cells).collect();
    if size > 0 {
        tiles.insert(blank_index, 0);
    }
    Ok(tiles)
}

/// A goal board together with the cell each tile belongs in.
#[derive(Debug, Clone)]
pub struct Goal {
    board: Board,
    positions: Vec<usize>,
}

impl Goal {
    pub fn new(board: Board) -> Self {
        let mut positions = vec![0; board.tiles().len()];
        for (index, &tile) in board.tiles().iter().enumerate() {
            positions[tile as usize] = index;
        }
        Self { board, positions }
    }

    pub fn with_blank_rank(size: usize, blank_rank: Option<usize>) -> Result<Self> {
        Board::new(layout(size, blank_rank)?).map(Self::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> usize {
        self.board.side()
    }

    /// Goal cell of `tile`, which must be a tile of this goal.
    pub(crate) fn position(&self, tile: u32) -> usize {
        self.positions[tile as usize]
    }
}
