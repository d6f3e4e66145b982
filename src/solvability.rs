//! Parity test deciding whether a configuration can reach the goal at all.

use itertools::Itertools;
use tracing::debug;

use crate::state::{PuzzleState, BLANK};

/// Out-of-order pairs in the row-major tiles, ignoring the blank.
pub fn count_inversions(state: &PuzzleState) -> usize {
    state
        .tiles()
        .iter()
        .filter(|&&t| t != BLANK)
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}

/// Odd boards need an even inversion count. On even boards the inversion
/// parity must differ from the parity of the blank's row counted from the
/// bottom (bottom row is 1).
pub fn is_solvable(state: &PuzzleState) -> bool {
    let inversions = count_inversions(state);
    let n = state.size();
    if n % 2 == 1 {
        return inversions % 2 == 0;
    }

    match state.locate_blank() {
        Ok((row, _)) => {
            let row_from_bottom = n - row;
            (inversions + row_from_bottom) % 2 == 1
        }
        Err(err) => {
            debug!(error = %err, "treating malformed state as unsolvable");
            false
        }
    }
}
