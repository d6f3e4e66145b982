//! Sliding-tile N-puzzle solver.
//!
//! A [`Solver`] is bound to one board dimension. Check a state with
//! [`Solver::is_solvable`] and then call [`Solver::solve`] with one of the
//! [`Algorithm`]s and [`Heuristic`]s; the returned [`Solution`] holds the blank's
//! moves plus search statistics. The library logs through `tracing` and stays
//! silent unless the caller installs a subscriber.

pub mod error;
pub mod heuristic;
pub mod moves;
pub mod search;
pub mod solvability;
pub mod state;

pub use error::{Result, SolverError};
pub use heuristic::Heuristic;
pub use moves::{expand, Move};
pub use search::{Algorithm, Solution, Solver};
pub use solvability::is_solvable;
pub use state::{parse_state, Fingerprint, Position, PuzzleState};

#[cfg(test)]
mod test {
    use std::collections::{HashMap, HashSet};

    use itertools::Itertools;
    use pathfinding::directed::{bfs::bfs, bfs::bfs_reach, dijkstra::dijkstra_all};

    use super::*;

    fn neighbours(state: &PuzzleState) -> Vec<PuzzleState> {
        expand(state)
            .unwrap()
            .into_iter()
            .map(|(next, _)| next)
            .collect()
    }

    // shortest move count to the goal for every reachable state
    fn distances(goal: &PuzzleState) -> HashMap<PuzzleState, usize> {
        let mut result: HashMap<PuzzleState, usize> =
            dijkstra_all(goal, |s| neighbours(s).into_iter().map(|n| (n, 1usize)))
                .into_iter()
                .map(|(state, (_, cost))| (state, cost))
                .collect();
        result.insert(goal.clone(), 0);
        result
    }

    #[test]
    fn solvability_matches_reachability() {
        for n in [2, 3] {
            let goal = PuzzleState::goal(n).unwrap();
            let reachable: HashSet<PuzzleState> = bfs_reach(goal, neighbours).collect();
            assert_eq!(reachable.len(), (1..=n * n).product::<usize>() / 2);

            for tiles in (0..(n * n) as u8).permutations(n * n) {
                let state = PuzzleState::from_tiles(n, tiles).unwrap();
                assert_eq!(is_solvable(&state), reachable.contains(&state), "\n{}", state);
            }
        }
    }

    #[test]
    fn searches_agree_with_reference_distances() {
        let solver = Solver::new(3).unwrap();
        let distances = distances(solver.goal());
        let hardest = *distances.values().max().unwrap();
        assert_eq!(hardest, 31);

        let mut samples: Vec<&PuzzleState> = distances
            .iter()
            .filter(|&(_, &d)| d == hardest)
            .map(|(s, _)| s)
            .collect();
        samples.extend(distances.keys().sorted().step_by(30_000));

        let budget = 1 + 4 * distances.len();
        for start in samples {
            let expected = distances[start];

            let bfs = solver.solve(start, Algorithm::Bfs, Heuristic::Manhattan).unwrap();
            assert_eq!(bfs.path.len(), expected, "bfs from\n{}", start);
            assert_eq!(&start.apply_moves(&bfs.path).unwrap(), solver.goal());

            let astar = solver
                .solve(start, Algorithm::AStar, Heuristic::Manhattan)
                .unwrap();
            assert_eq!(astar.path.len(), bfs.path.len(), "astar from\n{}", start);
            assert_eq!(&start.apply_moves(&astar.path).unwrap(), solver.goal());

            for heuristic in [Heuristic::Hamming, Heuristic::Euclidean, Heuristic::LinearConflicts] {
                let solution = solver.solve(start, Algorithm::AStar, heuristic).unwrap();
                assert!(solution.path.len() >= expected);
                assert_eq!(&start.apply_moves(&solution.path).unwrap(), solver.goal());
            }

            let dfs = solver.solve(start, Algorithm::Dfs, Heuristic::Manhattan).unwrap();
            assert!(dfs.nodes_explored <= budget, "dfs explored {}", dfs.nodes_explored);
            assert!(dfs.path.len() >= expected);
            assert_eq!(&start.apply_moves(&dfs.path).unwrap(), solver.goal());
        }
    }

    #[test]
    fn scenario_matches_independent_checks() {
        let solver = Solver::new(3).unwrap();
        let start = parse_state("1 2 3\n4 0 6\n7 5 8").unwrap();

        let tiles: Vec<u8> = start.tiles().iter().copied().filter(|&t| t != 0).collect();
        let mut inversions = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }
        assert_eq!(solver.is_solvable(&start), inversions % 2 == 0);

        let reference = bfs(&start, |s| neighbours(s), |s| solver.is_goal(s)).unwrap();
        let solution = solver
            .solve(&start, Algorithm::Bfs, Heuristic::Manhattan)
            .unwrap();
        assert_eq!(solution.path.len(), reference.len() - 1);
        assert_eq!(&start.apply_moves(&solution.path).unwrap(), solver.goal());
    }

    #[test]
    fn heuristics_vanish_at_goal() {
        for n in 3..=8 {
            let solver = Solver::new(n).unwrap();
            for heuristic in Heuristic::ALL {
                assert_eq!(heuristic.evaluate(solver.goal()), 0.0);
            }
        }
    }
}
