//! Optimal sliding-tile puzzle solver built on iterative-deepening A*.
//!
//! ```
//! use slider_ida::{Board, Goal, Move, Solver};
//!
//! let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
//! let goal = Goal::with_blank_rank(9, None).unwrap();
//! let outcome = Solver::new(start, goal).unwrap().solve();
//! assert_eq!(outcome.solution().unwrap().moves, vec![Move::Left]);
//! ```

pub mod board;
pub mod error;
pub mod goal;
pub mod node;
pub mod search;

pub use board::{Board, Move};
pub use error::{Error, Result};
pub use goal::Goal;
pub use node::Node;
pub use search::{Outcome, Solution, Solver, SolverConfig};
