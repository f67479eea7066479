//! Captured solutions and the fixed-capacity buffer that stores them.

use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::MAX_BOARD_SIZE;

/// A complete placement: index = column, value = row of that column's queen.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct Solution {
    rows: ArrayVec<u8, MAX_BOARD_SIZE>,
}

impl Solution {
    /// Builds a solution from explicit rows.
    ///
    /// # Panics
    /// Panics if more than 16 rows are given.
    pub fn from_rows(rows: &[u8]) -> Self {
        Solution {
            rows: rows.iter().copied().collect(),
        }
    }

    /// Snapshot of the first `board_size` slots of a search placement vector.
    #[inline]
    pub fn from_placement(placement: &[i8; MAX_BOARD_SIZE], board_size: usize) -> Self {
        Solution {
            rows: placement[..board_size].iter().map(|&r| r as u8).collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.rows.len()
    }

    /// Row of the queen in column 0.
    #[inline]
    pub fn first_row(&self) -> u8 {
        self.rows[0]
    }

    /// Reflection across the horizontal axis: row `v` becomes `(N - 1) - v`.
    pub fn mirror(&self) -> Solution {
        let top = (self.rows.len() - 1) as u8;
        Solution {
            rows: self.rows.iter().map(|&r| top - r).collect(),
        }
    }

    /// True when no two queens share a row or a diagonal.
    pub fn is_valid(&self) -> bool {
        let n = self.rows.len();
        for a in 0..n {
            for b in (a + 1)..n {
                let (ra, rb) = (self.rows[a] as i32, self.rows[b] as i32);
                if ra == rb || (ra - rb).abs() == (b - a) as i32 {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}

const PREALLOCATED_SOLUTIONS: usize = 64;

/// Stores the first `capacity` solutions; later ones are only counted by the caller.
#[derive(Clone, Debug, Default)]
pub struct SolutionBuffer {
    capacity: usize,
    solutions: Vec<Solution>,
}

impl SolutionBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        SolutionBuffer {
            capacity,
            solutions: Vec::with_capacity(capacity.min(PREALLOCATED_SOLUTIONS)),
        }
    }

    /// Stores the solution if there is room. Returns whether it was kept.
    #[inline]
    pub fn offer(&mut self, placement: &[i8; MAX_BOARD_SIZE], board_size: usize) -> bool {
        if self.solutions.len() < self.capacity {
            self.solutions.push(Solution::from_placement(placement, board_size));
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.solutions.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}
