//! Cost-to-goal estimators. The blank never contributes to any of them.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{Result, SolverError};
use crate::state::{PuzzleState, BLANK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Tiles off their goal cell.
    Hamming,
    /// Grid distance of every tile to its goal cell. Admissible and consistent.
    Manhattan,
    /// Straight-line distance of every tile to its goal cell.
    Euclidean,
    /// Manhattan plus two per reversed pair sharing a goal row or column.
    LinearConflicts,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Hamming,
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::LinearConflicts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Hamming => "hamming",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::LinearConflicts => "linearConflicts",
        }
    }

    pub fn evaluate(self, state: &PuzzleState) -> f64 {
        let value = match self {
            Heuristic::Hamming => hamming(state) as f64,
            Heuristic::Manhattan => manhattan(state) as f64,
            Heuristic::Euclidean => euclidean(state),
            Heuristic::LinearConflicts => linear_conflicts(state) as f64,
        };
        trace!(heuristic = self.name(), value, "evaluated state");
        value
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Heuristic> {
        match s.to_ascii_lowercase().as_str() {
            "hamming" => Ok(Heuristic::Hamming),
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "linearconflicts" | "linear-conflicts" | "linear_conflicts" => {
                Ok(Heuristic::LinearConflicts)
            }
            _ => Err(SolverError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Row and column offsets of each non-blank tile from its goal cell.
fn displacements(state: &PuzzleState) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = state.size();
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != BLANK)
        .map(move |(ix, &t)| {
            let (row, col) = state.goal_position(t);
            ((ix / n).abs_diff(row), (ix % n).abs_diff(col))
        })
}

pub fn hamming(state: &PuzzleState) -> usize {
    displacements(state)
        .filter(|&(dr, dc)| dr + dc > 0)
        .count()
}

pub fn manhattan(state: &PuzzleState) -> usize {
    displacements(state).map(|(dr, dc)| dr + dc).sum()
}

pub fn euclidean(state: &PuzzleState) -> f64 {
    displacements(state)
        .map(|(dr, dc)| ((dr * dr + dc * dc) as f64).sqrt())
        .sum()
}

pub fn linear_conflicts(state: &PuzzleState) -> usize {
    let conflicts: usize = (0..state.size())
        .map(|k| line_conflicts(state, Axis::Row, k) + line_conflicts(state, Axis::Column, k))
        .sum();
    manhattan(state) + 2 * conflicts
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Row,
    Column,
}

#[auto_enums::auto_enum(Iterator)]
fn line<'a>(state: &'a PuzzleState, axis: Axis, k: usize) -> impl Iterator<Item = u8> + 'a {
    let n = state.size();
    match axis {
        Axis::Row => (0..n).map(move |col| state[(k, col)]),
        Axis::Column => (0..n).map(move |row| state[(row, k)]),
    }
}

// pairs of tiles already in their goal line but in reversed order
fn line_conflicts(state: &PuzzleState, axis: Axis, k: usize) -> usize {
    let targets: SmallVec<[usize; 16]> = line(state, axis, k)
        .filter(|&t| t != BLANK)
        .map(|t| state.goal_position(t))
        .filter_map(|(row, col)| match axis {
            Axis::Row => (row == k).then_some(col),
            Axis::Column => (col == k).then_some(row),
        })
        .collect();

    targets
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}
