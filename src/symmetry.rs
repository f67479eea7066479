//! Symmetry expansion.
//!
//! Only the upper half of column 0 is searched. Reflecting every stored
//! solution across the horizontal axis recovers the other half, except for
//! odd boards whose solutions start on the middle row: the search already
//! found both members of those pairs.

use crate::error::{QueensError, Result};
use crate::solution::Solution;
use crate::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Returns `solutions` followed by their mirrors, newest first.
pub fn expand(solutions: &[Solution], board_size: usize) -> Result<Vec<Solution>> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
        return Err(QueensError::UnsupportedMirrorSize(board_size));
    }
    let middle = (board_size % 2 == 1).then_some((board_size / 2) as u8);

    let mut expanded = Vec::with_capacity(solutions.len() * 2);
    expanded.extend_from_slice(solutions);
    expanded.extend(
        solutions
            .iter()
            .rev()
            .filter(|s| Some(s.first_row()) != middle)
            .map(Solution::mirror),
    );
    Ok(expanded)
}
