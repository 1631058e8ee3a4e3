use std::cell::OnceCell;
use std::rc::Rc;

use crate::board::{Board, Move};
use crate::goal::Goal;

/// A board on the active search path, linked to the node it was expanded from.
///
/// Nodes only point at their parent, so dropping a child on backtrack frees
/// it as soon as nothing deeper refers to it.
#[derive(Debug)]
pub struct Node {
    board: Board,
    cost: usize,
    movement: Option<Move>,
    parent: Option<Rc<Node>>,
    distance: OnceCell<usize>,
}

impl Node {
    pub fn root(board: Board) -> Self {
        Self {
            board,
            cost: 0,
            movement: None,
            parent: None,
            distance: OnceCell::new(),
        }
    }

    pub fn child(parent: &Rc<Node>, board: Board, movement: Move) -> Self {
        Self {
            board,
            cost: parent.cost + 1,
            movement: Some(movement),
            parent: Some(Rc::clone(parent)),
            distance: OnceCell::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves from the root.
    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn movement(&self) -> Option<Move> {
        self.movement
    }

    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.parent.as_ref()
    }

    /// Manhattan distance to `goal`, computed on first use. Later calls return
    /// the cached value whatever goal they pass, so a node must only ever be
    /// measured against one goal of its own side length.
    pub(crate) fn distance(&self, goal: &Goal) -> usize {
        *self
            .distance
            .get_or_init(|| self.board.distance_to(goal))
    }

    /// `cost + distance`, with the same single-goal caching as `distance`.
    pub(crate) fn f(&self, goal: &Goal) -> usize {
        self.cost + self.distance(goal)
    }

    /// Moves from the root to this node, in playing order.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.cost);
        let mut cursor = Some(self);

        while let Some(node) = cursor {
            if let Some(movement) = node.movement {
                moves.push(movement);
            }
            cursor = node.parent.as_deref();
        }

        moves.reverse();
        moves
    }
}
