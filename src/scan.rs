//! Row availability scanner.
//!
//! Writes the free rows of a column, ascending, into a caller-owned scratch row
//! and terminates the list with [`SENTINEL`]. Each search context keeps one
//! scratch row per column, so scanning never allocates and concurrent workers
//! never share output storage.

use crate::MAX_BOARD_SIZE;
use crate::kernel::ThreatKernel;

/// Marks the end of a row list and unset placement slots.
pub const SENTINEL: i8 = -1;

/// Scratch space for one column: up to 16 rows plus the sentinel.
pub type RowSlots = [i8; MAX_BOARD_SIZE + 1];

pub const EMPTY_SLOTS: RowSlots = [SENTINEL; MAX_BOARD_SIZE + 1];

/// Expands a free-row bitmask into ascending row indices followed by the sentinel.
/// Returns the number of rows written.
#[inline]
pub fn fill_free_rows(mut free: u16, out: &mut RowSlots) -> usize {
    let mut count = 0;
    while free != 0 {
        out[count] = free.trailing_zeros() as i8;
        count += 1;
        free &= free - 1;
    }
    out[count] = SENTINEL;
    count
}

/// Lists the rows of a column that are not under threat.
///
/// `masked` must already be intersected with the column's mask. The returned
/// slice holds the free rows; `out[slice.len()]` is the sentinel.
#[inline]
pub fn not_threatened_rows<'a, K: ThreatKernel>(
    kernel: &K,
    masked: &K::Board,
    board_size: usize,
    out: &'a mut RowSlots,
) -> &'a [i8] {
    let count = fill_free_rows(kernel.zero_lanes(masked, board_size), out);
    &out[..count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{Bitboard, Compact64, Wide256};
    use crate::kernel::Scalar;

    #[test]
    fn test_fill_free_rows_ascending() {
        let mut out = EMPTY_SLOTS;
        assert_eq!(fill_free_rows(0b1010_0101, &mut out), 4);
        assert_eq!(&out[..5], &[0, 2, 5, 7, SENTINEL]);
    }

    #[test]
    fn test_no_free_rows_starts_with_sentinel() {
        let mut out = [3i8; MAX_BOARD_SIZE + 1];
        assert_eq!(fill_free_rows(0, &mut out), 0);
        assert_eq!(out[0], SENTINEL);
    }

    #[test]
    fn test_all_sixteen_rows_free() {
        let mut out = EMPTY_SLOTS;
        assert_eq!(fill_free_rows(0xFFFF, &mut out), 16);
        assert_eq!(out[15], 15);
        assert_eq!(out[16], SENTINEL);
    }

    #[test]
    fn test_scan_returns_complement_of_threatened_rows() {
        let k = Scalar::<Wide256>::new();
        let column = 6;
        let threatened = [1usize, 4, 5, 11];
        let mut map = k.tables().starting_map(13);
        for &row in &threatened {
            map = map | Wide256::EMPTY.with_square(row, column);
        }
        let masked = k.intersect(map, *k.tables().column(column));
        let mut out = EMPTY_SLOTS;
        let rows = not_threatened_rows(&k, &masked, 13, &mut out).to_vec();
        let expected: Vec<i8> = (0..13)
            .filter(|r| !threatened.contains(r))
            .map(|r| r as i8)
            .collect();
        assert_eq!(rows, expected);
        assert_eq!(out[rows.len()], SENTINEL);
    }

    #[test]
    fn test_scan_ignores_other_columns() {
        let k = Scalar::<Compact64>::new();
        let map = Compact64::EMPTY.with_square(2, 0).with_square(3, 2);
        let masked = k.intersect(map, *k.tables().column(2));
        let mut out = EMPTY_SLOTS;
        assert_eq!(not_threatened_rows(&k, &masked, 5, &mut out), &[0, 1, 2, 4]);
    }
}
