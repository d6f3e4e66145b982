use std::{fmt, str::FromStr};

use smallvec::SmallVec;

use crate::error::{Result, SolverError};
use crate::state::{Position, PuzzleState};

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order. DFS explores the last entry first.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Move {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Move> {
        Move::ALL
            .into_iter()
            .find(|mv| mv.label() == s)
            .ok_or_else(|| SolverError::UnknownMove(s.to_string()))
    }
}

/// The cell one step from `from` in direction `mv`, if it is on the board.
pub(crate) fn step(from: Position, mv: Move, size: usize) -> Option<Position> {
    let (dr, dc) = mv.as_offset();
    let row = from.0.checked_add_signed(dr)?;
    let col = from.1.checked_add_signed(dc)?;
    (row < size && col < size).then_some((row, col))
}

/// Successor states of a single expansion; never more than four.
pub type Successors = SmallVec<[(PuzzleState, Move); 4]>;

/// Every legal move from `state`, in [`Move::ALL`] order.
pub fn expand(state: &PuzzleState) -> Result<Successors> {
    let blank = state.locate_blank()?;

    Ok(Move::ALL
        .iter()
        .filter_map(|&mv| step(blank, mv, state.size()).map(|to| (state.swapped(blank, to), mv)))
        .collect())
}
