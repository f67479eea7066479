//! Validated board sizes and reference solution counts.

use std::fmt;

use crate::error::{QueensError, Result};
use crate::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Total number of solutions for each board size, indexed by N.
pub const KNOWN_SOLUTION_COUNTS: [u64; MAX_BOARD_SIZE + 1] = [
    1, 1, 0, 0, 2, 10, 4, 40, 92, 352, 724, 2_680, 14_200, 73_712, 365_596, 2_279_184, 14_772_512,
];

/// A board size accepted by an encoding holding at most `max` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    pub fn new(size: usize, max: usize) -> Result<Self> {
        let max = max.min(MAX_BOARD_SIZE);
        if (MIN_BOARD_SIZE..=max).contains(&size) {
            Ok(BoardSize(size))
        } else {
            Err(QueensError::BoardSizeOutOfRange {
                size,
                min: MIN_BOARD_SIZE,
                max,
            })
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Starting rows searched in column 0: the upper half, middle row included.
    #[inline]
    pub fn starting_rows(self) -> usize {
        self.0.div_ceil(2)
    }

    /// The row whose solutions mirror onto themselves, for odd boards.
    #[inline]
    pub fn middle_row(self) -> Option<usize> {
        (self.0 % 2 == 1).then_some(self.0 / 2)
    }

    pub fn known_solutions(self) -> u64 {
        KNOWN_SOLUTION_COUNTS[self.0]
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
