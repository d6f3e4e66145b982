use std::{
    fmt::{Display, Write},
    iter,
    ops::Index,
};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::error::{Result, SolverError};
use crate::moves::{step, Move};

/// The tile value of the empty cell.
pub const BLANK: u8 = 0;

/// Smallest supported board dimension.
pub const MIN_SIZE: usize = 2;
/// Largest supported board dimension (tile values must fit a `u8`).
pub const MAX_SIZE: usize = 15;

/// A `(row, column)` cell coordinate.
pub type Position = (usize, usize);

/// An immutable N×N sliding-tile configuration.
///
/// Construction checks that the tiles are a permutation of `0..N²`, so every
/// value of this type holds exactly one blank. Transitions always produce a new
/// state; nothing mutates a state once built.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct PuzzleState {
    size: usize,
    tiles: Vec<u8>,
}

/// Canonical, collision-free key for a grid of a given dimension.
///
/// Tiles are packed row-major at a fixed bit width, never straddling a word.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fingerprint(SmallVec<[u64; 4]>);

impl PuzzleState {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<PuzzleState> {
        let size = rows.len();
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(SolverError::InvalidGrid(format!(
                "row {} has {} tiles, expected {}",
                r,
                row.len(),
                size
            )));
        }

        PuzzleState::from_tiles(size, rows.into_iter().flatten().collect())
    }

    /// Builds a state from row-major tiles.
    pub fn from_tiles(size: usize, tiles: Vec<u8>) -> Result<PuzzleState> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SolverError::InvalidGrid(format!(
                "dimension {} outside {}..={}",
                size, MIN_SIZE, MAX_SIZE
            )));
        }

        if tiles.len() != size * size {
            return Err(SolverError::InvalidGrid(format!(
                "expected {} tiles for a {}x{} board, found {}",
                size * size,
                size,
                size,
                tiles.len()
            )));
        }

        let mut seen = vec![false; tiles.len()];
        for &tile in &tiles {
            let slot = seen.get_mut(tile as usize).ok_or_else(|| {
                SolverError::InvalidGrid(format!("tile {} out of range 0..{}", tile, tiles.len()))
            })?;
            if *slot {
                return Err(SolverError::InvalidGrid(format!("tile {} appears twice", tile)));
            }
            *slot = true;
        }

        Ok(PuzzleState { size, tiles })
    }

    /// The solved grid: cell `(i, j)` holds `i·N + j + 1`, the last cell is blank.
    pub fn goal(size: usize) -> Result<PuzzleState> {
        let tiles = (1..size * size)
            .map(|v| v as u8)
            .chain(iter::once(BLANK))
            .collect();
        PuzzleState::from_tiles(size, tiles)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Where `tile` sits in the solved grid. The blank belongs in the last cell.
    pub fn goal_position(&self, tile: u8) -> Position {
        if tile == BLANK {
            return (self.size - 1, self.size - 1);
        }
        let ix = tile as usize - 1;
        (ix / self.size, ix % self.size)
    }

    pub fn locate_blank(&self) -> Result<Position> {
        self.tiles
            .iter()
            .position(|&t| t == BLANK)
            .map(|ix| (ix / self.size, ix % self.size))
            .ok_or_else(|| SolverError::InvariantViolation("no blank tile in state".into()))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let bits = usize::BITS - (self.tiles.len() - 1).leading_zeros();
        let per_word = (u64::BITS / bits) as usize;

        Fingerprint(
            self.tiles
                .chunks(per_word)
                .map(|chunk| {
                    chunk
                        .iter()
                        .fold(0u64, |acc, &t| (acc << bits) | u64::from(t))
                })
                .collect(),
        )
    }

    /// A copy of this state with the tiles at `a` and `b` exchanged.
    pub(crate) fn swapped(&self, a: Position, b: Position) -> PuzzleState {
        let mut result = self.clone();
        result
            .tiles
            .swap(a.0 * self.size + a.1, b.0 * self.size + b.1);
        result
    }

    /// Slides the blank one cell in direction `mv`.
    pub fn apply(&self, mv: Move) -> Result<PuzzleState> {
        let blank = self.locate_blank()?;
        let target = step(blank, mv, self.size).ok_or(SolverError::IllegalMove(mv))?;
        Ok(self.swapped(blank, target))
    }

    /// Replays a move sequence, e.g. the path of a solution.
    pub fn apply_moves(&self, moves: &[Move]) -> Result<PuzzleState> {
        moves
            .iter()
            .try_fold(self.clone(), |state, &mv| state.apply(mv))
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        let mut first = true;
        for line in self.tiles.chunks(self.size) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            let row = line
                .iter()
                .map(|&t| {
                    if t == BLANK {
                        format!("{:>width$}", ".", width = width)
                    } else {
                        format!("{:>width$}", t, width = width)
                    }
                })
                .join(" ");
            f.write_str(&row)?;
        }

        Ok(())
    }
}

impl Index<Position> for PuzzleState {
    type Output = u8;
    fn index(&self, index: Position) -> &Self::Output {
        &self.tiles[index.0 * self.size + index.1]
    }
}

/// Parses a grid written one row per line (or rows separated by `/`), tiles
/// separated by whitespace or commas. `0` or `.` marks the blank.
pub fn parse_state(s: &str) -> Result<PuzzleState> {
    let rows = s
        .trim()
        .split(|c: char| c == '\n' || c == '/')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(|t| match t {
                    "." | "_" => Ok(BLANK),
                    _ => t
                        .parse::<u8>()
                        .map_err(|_| SolverError::InvalidGrid(format!("bad tile '{}'", t))),
                })
                .collect::<Result<Vec<u8>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    PuzzleState::new(rows)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn goal_layout() {
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal[(1, 2)], 6);
        assert_eq!(goal.locate_blank().unwrap(), (2, 2));
        assert_eq!(goal.goal_position(6), (1, 2));
    }

    #[test]
    fn rejects_malformed_grids() {
        assert!(matches!(
            PuzzleState::new(vec![vec![1, 2], vec![3]]),
            Err(SolverError::InvalidGrid(_))
        ));
        assert!(matches!(
            PuzzleState::from_tiles(2, vec![1, 1, 2, 0]),
            Err(SolverError::InvalidGrid(_))
        ));
        assert!(matches!(
            PuzzleState::from_tiles(2, vec![1, 2, 3, 4]),
            Err(SolverError::InvalidGrid(_))
        ));
        assert!(matches!(
            PuzzleState::from_tiles(1, vec![0]),
            Err(SolverError::InvalidGrid(_))
        ));
        assert!(PuzzleState::goal(MAX_SIZE + 1).is_err());
    }

    #[test]
    fn parse_accepts_several_layouts() {
        let expected = PuzzleState::new(vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
        assert_eq!(parse_state("1 2 3\n4 0 6\n7 5 8").unwrap(), expected);
        assert_eq!(parse_state("1,2,3/4,.,6/7,5,8").unwrap(), expected);
        assert!(parse_state("1 2 x\n4 0 6\n7 5 8").is_err());
    }

    #[test]
    fn fingerprints_separate_distinct_grids() {
        let goal = PuzzleState::goal(4).unwrap();
        let moved = goal.apply(Move::Left).unwrap();
        assert_eq!(goal.fingerprint(), goal.clone().fingerprint());
        assert_ne!(goal.fingerprint(), moved.fingerprint());

        // 5 bits per tile: 12 tiles per word, three words
        let big = PuzzleState::goal(5).unwrap();
        assert_eq!(big.fingerprint().0.len(), 3);
        assert_ne!(big.fingerprint(), big.apply(Move::Up).unwrap().fingerprint());
    }

    #[test]
    fn moves_produce_new_states() {
        let start = parse_state("1 2 3\n4 0 6\n7 5 8").unwrap();
        let down = start.apply(Move::Down).unwrap();
        assert_eq!(down.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(start.tiles(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);

        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(start.apply_moves(&[Move::Down, Move::Right]).unwrap(), goal);
        assert_eq!(goal.apply(Move::Down), Err(SolverError::IllegalMove(Move::Down)));
    }

    #[test]
    fn display_marks_blank() {
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(goal.to_string(), "1 2 3\n4 5 6\n7 8 .");
    }
}
