//! Error types for the puzzle solver.

use thiserror::Error;

use crate::moves::Move;

/// Every failure the solver can surface. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The supplied grid is not a square permutation of `0..N²`.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A state broke the one-blank invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Unrecognized heuristic tag.
    #[error("unknown heuristic '{0}' (expected hamming, manhattan, euclidean or linearConflicts)")]
    UnknownHeuristic(String),

    /// Unrecognized algorithm tag.
    #[error("unknown algorithm '{0}' (expected bfs, dfs or astar)")]
    UnknownAlgorithm(String),

    /// Unrecognized move label.
    #[error("unknown move '{0}' (expected Up, Down, Left or Right)")]
    UnknownMove(String),

    /// The state was built for a different board dimension than the solver.
    #[error("solver is bound to {expected}x{expected} boards, got {found}x{found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The state fails the parity test and can never reach the goal.
    #[error("puzzle is not solvable")]
    Unsolvable,

    /// Replaying a move would push the blank off the board.
    #[error("move {0} leaves the board")]
    IllegalMove(Move),

    /// The frontier emptied without reaching the goal.
    #[error("search frontier exhausted without reaching the goal")]
    NoSolutionFound,
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;
