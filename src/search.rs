//! Iterative-deepening A* over sliding-tile boards
//!
//! The driver runs a depth-first search bounded by `f = cost + manhattan`,
//! raising the bound to the smallest pruned `f` after every pass. Only the
//! current path is kept in memory; cycles are detected against that path.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::board::{Board, Move};
use crate::error::Result;
use crate::goal::Goal;
use crate::node::Node;

/// Limits applied by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest threshold the driver will search with.
    pub max_threshold: usize,
    /// Wall-clock budget, checked between threshold iterations.
    pub time_limit: Option<Duration>,
    /// Run the parity check before searching.
    pub check_solvability: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_threshold: 256,
            time_limit: None,
            check_solvability: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    /// Threshold iterations run, including the successful one.
    pub iterations: usize,
    /// Threshold of the successful iteration.
    pub threshold: usize,
    /// Nodes expanded over all iterations.
    pub expanded: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// The parity check ruled the goal out; no search was run.
    Unsolvable,
    /// Every path ran into a cycle before exceeding the threshold.
    Exhausted,
    /// The next threshold would pass [`SolverConfig::max_threshold`].
    BoundExceeded { threshold: usize },
    /// The time limit ran out before `threshold` was searched.
    TimedOut { threshold: usize },
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Result of one bounded pass below a node.
enum Probe {
    Found(Rc<Node>),
    /// Smallest `f` that went over the threshold.
    Pruned(usize),
    Exhausted,
}

pub struct Solver {
    start: Board,
    goal: Goal,
    config: SolverConfig,
}

impl Solver {
    pub fn new(start: Board, goal: Goal) -> Result<Self> {
        start.check_side(&goal)?;

        Ok(Self {
            start,
            goal,
            config: SolverConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn solve(&self) -> Outcome {
        if self.config.check_solvability && !self.start.parity_matches(&self.goal) {
            info!("parity check failed, skipping search");
            return Outcome::Unsolvable;
        }

        let started = Instant::now();
        let root = Rc::new(Node::root(self.start.clone()));
        let mut threshold = root.f(&self.goal);
        let mut iterations = 0;
        let mut expanded = 0;

        loop {
            if threshold > self.config.max_threshold {
                info!(threshold, max = self.config.max_threshold, "threshold limit reached");
                return Outcome::BoundExceeded { threshold };
            }

            iterations += 1;
            let mut pass = BoundedSearch::new(&self.goal, threshold, root.board());
            let probe = pass.probe(&root);
            expanded += pass.expanded;
            debug!(iteration = iterations, threshold, expanded = pass.expanded, "pass finished");

            match probe {
                Probe::Found(node) => {
                    let solution = Solution {
                        moves: node.moves(),
                        iterations,
                        threshold,
                        expanded,
                    };
                    info!(moves = solution.len(), iterations, expanded, "solved");
                    return Outcome::Solved(solution);
                }
                Probe::Exhausted => {
                    info!(iterations, expanded, "search space exhausted");
                    return Outcome::Exhausted;
                }
                Probe::Pruned(next) => {
                    debug_assert!(next > threshold);
                    threshold = next;
                }
            }

            if let Some(limit) = self.config.time_limit {
                if started.elapsed() >= limit {
                    info!(threshold, elapsed = ?started.elapsed(), "time limit reached");
                    return Outcome::TimedOut { threshold };
                }
            }
        }
    }
}

/// State owned by a single threshold pass: the boards on the active path.
struct BoundedSearch<'a> {
    goal: &'a Goal,
    threshold: usize,
    on_path: HashSet<Board>,
    expanded: usize,
}

impl<'a> BoundedSearch<'a> {
    fn new(goal: &'a Goal, threshold: usize, root: &Board) -> Self {
        let mut on_path = HashSet::new();
        on_path.insert(root.clone());
        Self {
            goal,
            threshold,
            on_path,
            expanded: 0,
        }
    }

    fn probe(&mut self, node: &Rc<Node>) -> Probe {
        let f = node.f(self.goal);
        if f > self.threshold {
            return Probe::Pruned(f);
        }
        if node.board() == self.goal.board() {
            trace!(cost = node.cost(), "goal reached");
            return Probe::Found(Rc::clone(node));
        }

        self.expanded += 1;
        let mut min: Option<usize> = None;

        for (board, movement) in node.board().successors() {
            if self.on_path.contains(&board) {
                continue;
            }

            self.on_path.insert(board.clone());
            let child = Rc::new(Node::child(node, board, movement));

            match self.probe(&child) {
                Probe::Found(goal) => return Probe::Found(goal),
                Probe::Pruned(f) => min = Some(min.map_or(f, |m| m.min(f))),
                Probe::Exhausted => {}
            }

            self.on_path.remove(child.board());
        }

        min.map_or(Probe::Exhausted, Probe::Pruned)
    }
}
