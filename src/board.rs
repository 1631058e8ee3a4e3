use rand::{
    seq::{IteratorRandom, SliceRandom},
    Rng,
};
use std::fmt;

use crate::error::{Error, Result};
use crate::goal::Goal;

/// A single slide, named after the direction the tile next to the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Down,
    Left,
    Up,
    Right,
}

impl Move {
    /// Expansion order used by the search. Ties between equally short
    /// solutions are broken by this order.
    pub const ALL: [Move; 4] = [Move::Down, Move::Left, Move::Up, Move::Right];

    /// Offset (row, column) the blank travels when this move is made.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Down => "down",
            Move::Left => "left",
            Move::Up => "up",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// A square sliding-tile layout stored row-major, `0` marking the blank.
///
/// Boards are never mutated once built: every move produces a new board.
/// Equality and hashing cover the whole layout, so two boards reached along
/// different paths compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    side: usize,
    tiles: Vec<u32>,
    blank: usize,
}

/// Index of the blank tile, or [`Error::MissingBlank`] if there is none.
pub fn find_blank(tiles: &[u32]) -> Result<usize> {
    tiles
        .iter()
        .position(|&tile| tile == 0)
        .ok_or(Error::MissingBlank)
}

fn side_length(len: usize) -> Option<usize> {
    let mut side = 0;
    while (side + 1) * (side + 1) <= len {
        side += 1;
    }
    (side * side == len).then_some(side)
}

impl Board {
    /// Builds a board from a flat row-major layout.
    ///
    /// The layout must be a permutation of `0..len` and `len` a perfect square.
    pub fn new(tiles: Vec<u32>) -> Result<Self> {
        let len = tiles.len();
        let side = side_length(len).ok_or(Error::NotPerfectSquare { len })?;

        let mut seen = vec![false; len];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(Error::TileOutOfRange { tile, size: len })?;
            if *slot {
                return Err(Error::DuplicateTile { tile });
            }
            *slot = true;
        }

        let blank = find_blank(&tiles)?;
        Ok(Self { side, tiles, blank })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn blank_row(&self) -> usize {
        self.blank / self.side
    }

    pub fn blank_col(&self) -> usize {
        self.blank % self.side
    }

    /// The board after sliding `movement`, or `None` if no tile sits on that
    /// side of the blank.
    pub fn apply(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();

        let row = self.blank_row() as isize + dr;
        let col = self.blank_col() as isize + dc;
        let side = self.side as isize;

        if row < 0 || row >= side || col < 0 || col >= side {
            return None;
        }

        let target = row as usize * self.side + col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(Self {
            side: self.side,
            tiles,
            blank: target,
        })
    }

    /// Applies `moves` in order, failing on the first one that leaves the grid.
    pub fn apply_all(&self, moves: &[Move]) -> Option<Self> {
        moves
            .iter()
            .try_fold(self.clone(), |board, &movement| board.apply(movement))
    }

    /// Every board one slide away, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Board, Move)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |movement| self.apply(movement).map(|board| (board, movement)))
    }

    /// Sum over the non-blank tiles of their row and column offsets from the
    /// goal. Never overestimates the remaining number of moves and changes by
    /// exactly one per move.
    pub fn manhattan_distance(&self, goal: &Goal) -> Result<usize> {
        self.check_side(goal)?;
        Ok(self.distance_to(goal))
    }

    /// Decides reachability of `goal` from the permutation parity alone.
    ///
    /// Tiles are ranked by their cell in the goal. On odd sides a vertical
    /// slide jumps a tile over an even number of others, so the inversion
    /// parity is fixed. On even sides it flips together with the blank's row.
    pub fn is_solvable(&self, goal: &Goal) -> Result<bool> {
        self.check_side(goal)?;
        Ok(self.parity_matches(goal))
    }

    pub(crate) fn check_side(&self, goal: &Goal) -> Result<()> {
        if self.side != goal.side() {
            return Err(Error::SideMismatch {
                start: self.side,
                goal: goal.side(),
            });
        }
        Ok(())
    }

    /// [`Board::manhattan_distance`] for a goal already known to share the side.
    pub(crate) fn distance_to(&self, goal: &Goal) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(index, &tile)| {
                let target = goal.position(tile);
                (index / self.side).abs_diff(target / self.side)
                    + (index % self.side).abs_diff(target % self.side)
            })
            .sum()
    }

    pub(crate) fn parity_matches(&self, goal: &Goal) -> bool {
        let ranks: Vec<usize> = self
            .tiles
            .iter()
            .filter(|&&tile| tile != 0)
            .map(|&tile| goal.position(tile))
            .collect();
        let inversions = count_inversions(&ranks);

        if self.side % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row_shift = self.blank_row().abs_diff(goal.board().blank_row());
            (inversions + row_shift) % 2 == 0
        }
    }

    /// Shuffles the goal layout until the result is solvable.
    pub fn shuffled<R: Rng + ?Sized>(goal: &Goal, rng: &mut R) -> Self {
        let mut tiles = goal.board().tiles.clone();

        loop {
            tiles.shuffle(rng);

            if let Ok(board) = Board::new(tiles.clone()) {
                if board.parity_matches(goal) {
                    return board;
                }
            }
        }
    }

    /// Random walk of `steps` slides away from the goal that never undoes the
    /// previous slide. The optimal solution is at most `steps` long.
    pub fn scrambled<R: Rng + ?Sized>(goal: &Goal, steps: usize, rng: &mut R) -> Self {
        let mut board = goal.board().clone();
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let next = board
                .successors()
                .filter(|(_, movement)| Some(movement.opposite()) != last)
                .choose(rng);

            match next {
                Some((next, movement)) => {
                    board = next;
                    last = Some(movement);
                }
                None => break,
            }
        }

        board
    }
}

fn count_inversions(ranks: &[usize]) -> usize {
    ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| ranks[i + 1..].iter().filter(|&&next| next < rank).count())
        .sum()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.tiles.len().saturating_sub(1).to_string().len();
        for row in self.tiles.chunks(self.side) {
            for &val in row {
                write!(f, "{:>width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
