//! Checks parity and optimality against breadth-first search over the full
//! 2x2 and 3x3 state spaces.

use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use slider_ida::{Board, Goal, Outcome, Solver, SolverConfig};

/// Shortest move count to `goal` for every board that can reach it.
fn distances(goal: &Goal) -> HashMap<Board, usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(goal.board().clone(), 0);
    queue.push_back(goal.board().clone());

    while let Some(board) = queue.pop_front() {
        let d = dist[&board];
        for (next, _) in board.successors() {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }

    dist
}

fn eight_puzzle() -> &'static (Goal, HashMap<Board, usize>) {
    static TABLE: OnceLock<(Goal, HashMap<Board, usize>)> = OnceLock::new();
    TABLE.get_or_init(|| {
        let goal = Goal::with_blank_rank(9, None).unwrap();
        let dist = distances(&goal);
        (goal, dist)
    })
}

fn permutations(items: &[u32]) -> Vec<Vec<u32>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

mod parity {
    use super::*;

    #[test]
    fn matches_reachability_for_every_two_by_two_layout_and_goal() {
        for rank in 1..=4 {
            let goal = Goal::with_blank_rank(4, Some(rank)).unwrap();
            let dist = distances(&goal);
            assert_eq!(dist.len(), 12);

            for tiles in permutations(&[0, 1, 2, 3]) {
                let board = Board::new(tiles).unwrap();
                assert_eq!(
                    board.is_solvable(&goal).unwrap(),
                    dist.contains_key(&board),
                    "rank {rank}, board {board:?}"
                );
            }
        }
    }

    #[test]
    fn matches_reachability_for_sampled_eight_puzzles() {
        let (goal, dist) = eight_puzzle();
        assert_eq!(dist.len(), 181_440);

        let mut rng = StdRng::seed_from_u64(2024);
        let mut tiles: Vec<u32> = (0..9).collect();
        for _ in 0..2_000 {
            tiles.shuffle(&mut rng);
            let board = Board::new(tiles.clone()).unwrap();
            assert_eq!(board.is_solvable(goal).unwrap(), dist.contains_key(&board), "{board:?}");
        }
    }
}

mod heuristic {
    use super::*;

    #[test]
    fn never_exceeds_the_true_distance_of_any_eight_puzzle() {
        let (goal, dist) = eight_puzzle();
        for (board, &shortest) in dist {
            let h = board.manhattan_distance(goal).unwrap();
            assert!(h <= shortest, "h = {h}, shortest = {shortest}, {board:?}");
        }
    }
}

mod optimality {
    use super::*;

    #[test]
    fn every_two_by_two_layout_is_solved_in_the_fewest_moves() {
        let goal = Goal::with_blank_rank(4, None).unwrap();
        for (board, &shortest) in &distances(&goal) {
            let solver = Solver::new(board.clone(), goal.clone()).unwrap();
            let solution = solver.solve().into_solution().unwrap();
            assert_eq!(solution.len(), shortest, "{board:?}");
            assert_eq!(board.apply_all(&solution.moves).as_ref(), Some(goal.board()));
        }
    }

    #[test]
    fn sampled_eight_puzzles_are_solved_in_the_fewest_moves() {
        let (goal, dist) = eight_puzzle();

        let mut candidates: Vec<(&Board, usize)> = dist
            .iter()
            .filter(|(_, &d)| (8..=20).contains(&d))
            .map(|(board, &d)| (board, d))
            .collect();
        candidates.sort_by(|a, b| a.0.tiles().cmp(b.0.tiles()));

        let mut rng = StdRng::seed_from_u64(99);
        for &(board, shortest) in candidates.choose_multiple(&mut rng, 30) {
            let solver = Solver::new(board.clone(), goal.clone()).unwrap();
            let solution = solver.solve().into_solution().unwrap();
            assert_eq!(solution.len(), shortest, "{board:?}");
            assert_eq!(board.apply_all(&solution.moves).as_ref(), Some(goal.board()));
        }
    }
}

mod termination {
    use super::*;

    #[test]
    fn unsolvable_two_by_two_layouts_never_hang() {
        let goal = Goal::with_blank_rank(4, None).unwrap();
        let dist = distances(&goal);
        let unchecked = SolverConfig {
            check_solvability: false,
            ..SolverConfig::default()
        };

        for tiles in permutations(&[0, 1, 2, 3]) {
            let board = Board::new(tiles).unwrap();
            if dist.contains_key(&board) {
                continue;
            }

            let solver = Solver::new(board.clone(), goal.clone()).unwrap();
            assert_eq!(solver.solve(), Outcome::Unsolvable);

            let solver = solver.with_config(unchecked.clone());
            assert_eq!(solver.solve(), Outcome::Exhausted, "{board:?}");
        }
    }
}
