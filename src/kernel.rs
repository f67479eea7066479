//! Threat kernels: the operations the search runs at every node.
//!
//! A kernel combines a queen's composite mask into the accumulated map, tests
//! whether a column is totally under threat, and reports which rows of a masked
//! column are still free. The portable [`Scalar`] kernel works on any
//! [`Bitboard`]; the AVX2 kernel in [`crate::simd`] replaces it for the wide
//! encoding when the CPU supports it.

use std::marker::PhantomData;

use crate::bitboard::Bitboard;
use crate::masks::{MaskTables, TableSource};

pub trait ThreatKernel: Copy + Send + Sync + 'static {
    type Board: TableSource;

    /// Short label used in logs and reports.
    const NAME: &'static str;

    fn combine(&self, map: Self::Board, mask: Self::Board) -> Self::Board;

    fn intersect(&self, map: Self::Board, mask: Self::Board) -> Self::Board;

    /// True when `mask` is entirely covered by `map`.
    fn covers(&self, map: &Self::Board, mask: &Self::Board) -> bool;

    /// Bit `r` set for each row `r < board_size` whose lane in `masked` is zero.
    fn zero_lanes(&self, masked: &Self::Board, board_size: usize) -> u16;

    #[inline(always)]
    fn tables(&self) -> &'static MaskTables<Self::Board> {
        Self::Board::tables()
    }

    #[inline(always)]
    fn threaten(&self, map: Self::Board, row: usize, col: usize) -> Self::Board {
        self.combine(map, *self.tables().threat(row, col))
    }

    #[inline(always)]
    fn is_totally_under_threat(&self, map: &Self::Board, column: usize) -> bool {
        self.covers(map, self.tables().column(column))
    }
}

/// Portable kernel built on plain integer operations.
pub struct Scalar<B>(PhantomData<fn() -> B>);

impl<B> Scalar<B> {
    pub const fn new() -> Self {
        Scalar(PhantomData)
    }
}

impl<B> Default for Scalar<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for Scalar<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Scalar<B> {}

impl<B: TableSource> ThreatKernel for Scalar<B> {
    type Board = B;

    const NAME: &'static str = "scalar";

    #[inline(always)]
    fn combine(&self, map: B, mask: B) -> B {
        map | mask
    }

    #[inline(always)]
    fn intersect(&self, map: B, mask: B) -> B {
        map & mask
    }

    #[inline(always)]
    fn covers(&self, map: &B, mask: &B) -> bool {
        map.covers(mask)
    }

    #[inline(always)]
    fn zero_lanes(&self, masked: &B, board_size: usize) -> u16 {
        masked.zero_lanes(board_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{Compact64, Wide256};

    #[test]
    fn test_threaten_is_or_with_composite() {
        let k = Scalar::<Wide256>::new();
        let map = k.tables().starting_map(10);
        let threatened = k.threaten(map, 3, 4);
        assert_eq!(threatened, map | *k.tables().threat(3, 4));
        // idempotent
        assert_eq!(k.threaten(threatened, 3, 4), threatened);
    }

    #[test]
    fn test_totally_under_threat() {
        let k = Scalar::<Compact64>::new();
        let t = k.tables();
        // a 4×4 board: rows 4..8 are virtual and already blocked
        let mut map = t.starting_map(4);
        assert!(!k.is_totally_under_threat(&map, 1));
        for row in 0..4 {
            map = map | Compact64::EMPTY.with_square(row, 1);
        }
        assert!(k.is_totally_under_threat(&map, 1));
        assert!(!k.is_totally_under_threat(&map, 2));
    }

    #[test]
    fn test_queen_in_corner_blocks_expected_rows() {
        let k = Scalar::<Wide256>::new();
        let map = k.threaten(k.tables().starting_map(8), 0, 0);
        let masked = k.intersect(map, *k.tables().column(1));
        // row 0 (same row) and row 1 (diagonal) are taken
        assert_eq!(k.zero_lanes(&masked, 8), 0b1111_1100);
    }
}
