//! Precomputed mask tables for fast threat detection.
//!
//! For an encoding with `L` lanes the tables hold:
//!
//! - **rows**: `L` masks, every bit of one row
//! - **columns**: `L` masks, one bit in every row
//! - **diag1**: `2L - 1` masks where `row - col` is constant, indexed by `row - col + L - 1`
//! - **diag2**: `2L - 1` masks where `row + col` is constant, indexed by `row + col`
//! - **threats**: `L * L` composites, `rows[r] | diag1[r - c + L - 1] | diag2[r + c]`
//!
//! Tables are built once per encoding on first use and shared read-only by all
//! search contexts and worker threads.

use once_cell::sync::Lazy;

use crate::bitboard::{Bitboard, Compact64, Wide256};

pub struct MaskTables<B: Bitboard> {
    rows: Box<[B]>,
    columns: Box<[B]>,
    diag1: Box<[B]>,
    diag2: Box<[B]>,
    threats: Box<[B]>,
}

#[inline]
pub const fn diagonal_count(lanes: usize) -> usize {
    lanes * 2 - 1
}

impl<B: Bitboard> MaskTables<B> {
    pub fn build() -> Self {
        let lanes = B::LANES;
        let mut rows = vec![B::EMPTY; lanes];
        let mut columns = vec![B::EMPTY; lanes];
        let mut diag1 = vec![B::EMPTY; diagonal_count(lanes)];
        let mut diag2 = vec![B::EMPTY; diagonal_count(lanes)];

        for row in 0..lanes {
            for col in 0..lanes {
                rows[row] = rows[row].with_square(row, col);
                columns[col] = columns[col].with_square(row, col);
                diag1[row + lanes - 1 - col] = diag1[row + lanes - 1 - col].with_square(row, col);
                diag2[row + col] = diag2[row + col].with_square(row, col);
            }
        }

        let mut threats = Vec::with_capacity(lanes * lanes);
        for row in 0..lanes {
            for col in 0..lanes {
                threats.push(rows[row] | diag1[row + lanes - 1 - col] | diag2[row + col]);
            }
        }

        MaskTables {
            rows: rows.into_boxed_slice(),
            columns: columns.into_boxed_slice(),
            diag1: diag1.into_boxed_slice(),
            diag2: diag2.into_boxed_slice(),
            threats: threats.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &B {
        &self.rows[row]
    }

    #[inline(always)]
    pub fn column(&self, col: usize) -> &B {
        &self.columns[col]
    }

    /// Mask of the diagonal family where `row - col + LANES - 1 == index`.
    #[inline]
    pub fn diag1(&self, index: usize) -> &B {
        &self.diag1[index]
    }

    /// Mask of the diagonal family where `row + col == index`.
    #[inline]
    pub fn diag2(&self, index: usize) -> &B {
        &self.diag2[index]
    }

    /// Every square attacked by a queen on (`row`, `col`), its own square included.
    #[inline(always)]
    pub fn threat(&self, row: usize, col: usize) -> &B {
        &self.threats[row * B::LANES + col]
    }

    /// Empty board with every row at or beyond `board_size` marked as threatened.
    pub fn starting_map(&self, board_size: usize) -> B {
        self.rows[board_size..]
            .iter()
            .fold(B::EMPTY, |map, &row| map | row)
    }

    /// First square whose composite mask differs from a direct enumeration of
    /// its row and diagonals, if any.
    pub fn first_mismatch(&self) -> Option<(usize, usize)> {
        let lanes = B::LANES as isize;
        for row in 0..lanes {
            for col in 0..lanes {
                let mut expected = B::EMPTY;
                for r in 0..lanes {
                    for c in 0..lanes {
                        if r == row || r - c == row - col || r + c == row + col {
                            expected = expected.with_square(r as usize, c as usize);
                        }
                    }
                }
                if *self.threat(row as usize, col as usize) != expected {
                    return Some((row as usize, col as usize));
                }
            }
        }
        None
    }
}

pub static COMPACT_TABLES: Lazy<MaskTables<Compact64>> = Lazy::new(MaskTables::build);
pub static WIDE_TABLES: Lazy<MaskTables<Wide256>> = Lazy::new(MaskTables::build);

/// Encodings with a shared, lazily built table set.
pub trait TableSource: Bitboard {
    fn tables() -> &'static MaskTables<Self>;
}

impl TableSource for Compact64 {
    #[inline(always)]
    fn tables() -> &'static MaskTables<Self> {
        &COMPACT_TABLES
    }
}

impl TableSource for Wide256 {
    #[inline(always)]
    fn tables() -> &'static MaskTables<Self> {
        &WIDE_TABLES
    }
}

// ============================================================================
// Tests
// ============================================================================
