//! Fixed-width threat maps.
//!
//! Boards are stored one lane per row. Inside a lane, column `c` lives at bit
//! `LANE_BITS - 1 - c`, so column 0 is the most significant bit of its lane.
//!
//! - **Compact64**: eight `u8` lanes packed in a `u64` (boards up to 8×8)
//! - **Wide256**: sixteen `u16` lanes packed in `[u64; 4]` (boards up to 16×16)
//!
//! The wide layout matches the little-endian `u16` view of a 256-bit vector
//! register, which is what the AVX2 kernel loads.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// A fixed-width board with one lane per row.
pub trait Bitboard:
    Copy
    + Eq
    + fmt::Debug
    + Send
    + Sync
    + BitOr<Output = Self>
    + BitAnd<Output = Self>
    + 'static
{
    /// Number of rows (and columns) the encoding can hold
    const LANES: usize;
    /// Width of a single row lane in bits
    const LANE_BITS: usize;
    const EMPTY: Self;

    /// Raw bits of the lane holding `row`.
    fn lane(&self, row: usize) -> u16;

    /// Returns a copy with the square (`row`, `col`) set.
    fn with_square(self, row: usize, col: usize) -> Self;

    fn count_ones(&self) -> u32;

    #[inline]
    fn is_set(&self, row: usize, col: usize) -> bool {
        (self.lane(row) >> (Self::LANE_BITS - 1 - col)) & 1 != 0
    }

    /// True when every bit of `mask` is already set in `self`.
    #[inline]
    fn covers(&self, mask: &Self) -> bool {
        (*self & *mask) == *mask
    }

    /// Bit `r` of the result is set for every row `r < board_size` whose lane is zero.
    #[inline]
    fn zero_lanes(&self, board_size: usize) -> u16 {
        let mut free = 0u16;
        for row in 0..board_size {
            if self.lane(row) == 0 {
                free |= 1 << row;
            }
        }
        free
    }
}

// ============================================================================
// 64-bit encoding
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Compact64(pub u64);

impl Bitboard for Compact64 {
    const LANES: usize = 8;
    const LANE_BITS: usize = 8;
    const EMPTY: Self = Compact64(0);

    #[inline(always)]
    fn lane(&self, row: usize) -> u16 {
        ((self.0 >> (row * 8)) & 0xFF) as u16
    }

    #[inline]
    fn with_square(self, row: usize, col: usize) -> Self {
        Compact64(self.0 | 1u64 << (row * 8 + 7 - col))
    }

    #[inline]
    fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Compact64 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Compact64(self.0 | rhs.0)
    }
}

impl BitAnd for Compact64 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Compact64(self.0 & rhs.0)
    }
}

impl fmt::Debug for Compact64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compact64({:#018x})", self.0)
    }
}

// ============================================================================
// 256-bit encoding
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(32))]
pub struct Wide256(pub [u64; 4]);

impl Wide256 {
    const LANES_PER_WORD: usize = 4;

    /// Builds a map from sixteen row lanes.
    pub fn from_lanes(lanes: [u16; 16]) -> Self {
        let mut words = [0u64; 4];
        for (row, &bits) in lanes.iter().enumerate() {
            words[row / Self::LANES_PER_WORD] |= (bits as u64) << ((row % Self::LANES_PER_WORD) * 16);
        }
        Wide256(words)
    }

    pub fn lanes(&self) -> [u16; 16] {
        std::array::from_fn(|row| self.lane(row))
    }
}

impl Bitboard for Wide256 {
    const LANES: usize = 16;
    const LANE_BITS: usize = 16;
    const EMPTY: Self = Wide256([0; 4]);

    #[inline(always)]
    fn lane(&self, row: usize) -> u16 {
        (self.0[row / Self::LANES_PER_WORD] >> ((row % Self::LANES_PER_WORD) * 16)) as u16
    }

    #[inline]
    fn with_square(mut self, row: usize, col: usize) -> Self {
        self.0[row / Self::LANES_PER_WORD] |= 1u64 << ((row % Self::LANES_PER_WORD) * 16 + 15 - col);
        self
    }

    #[inline]
    fn count_ones(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }
}

impl BitOr for Wide256 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Wide256([
            self.0[0] | rhs.0[0],
            self.0[1] | rhs.0[1],
            self.0[2] | rhs.0[2],
            self.0[3] | rhs.0[3],
        ])
    }
}

impl BitAnd for Wide256 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Wide256([
            self.0[0] & rhs.0[0],
            self.0[1] & rhs.0[1],
            self.0[2] & rhs.0[2],
            self.0[3] & rhs.0[3],
        ])
    }
}

impl fmt::Debug for Wide256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.lanes().iter().map(|l| format!("{:#06x}", l)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_square_layout() {
        let b = Compact64::EMPTY.with_square(0, 0);
        assert_eq!(b.0, 0x80);
        let b = Compact64::EMPTY.with_square(7, 7);
        assert_eq!(b.0, 1u64 << 56);
        assert!(b.is_set(7, 7));
        assert!(!b.is_set(7, 6));
    }

    #[test]
    fn test_wide_square_layout() {
        let b = Wide256::EMPTY.with_square(0, 0);
        assert_eq!(b.lane(0), 0x8000);
        let b = Wide256::EMPTY.with_square(5, 15);
        assert_eq!(b.lane(5), 0x0001);
        assert_eq!(b.0[1], 1u64 << 16);
        assert_eq!(b.count_ones(), 1);
    }

    #[test]
    fn test_wide_lanes_roundtrip() {
        let mut lanes = [0u16; 16];
        lanes[3] = 0xF00F;
        lanes[12] = 0x0101;
        let b = Wide256::from_lanes(lanes);
        assert_eq!(b.lanes(), lanes);
    }

    #[test]
    fn test_zero_lanes_respects_board_size() {
        let b = Compact64::EMPTY.with_square(1, 3).with_square(2, 0);
        // rows 0 and 3 are empty; rows 4.. lie outside a 4×4 board
        assert_eq!(b.zero_lanes(4), 0b1001);

        let w = Wide256::EMPTY.with_square(0, 0).with_square(15, 2);
        assert_eq!(w.zero_lanes(16), 0x7FFE);
        assert_eq!(w.zero_lanes(5), 0b11110);
    }

    #[test]
    fn test_covers() {
        let mask = Compact64::EMPTY.with_square(0, 1).with_square(3, 1);
        let map = mask | Compact64::EMPTY.with_square(5, 5);
        assert!(map.covers(&mask));
        assert!(!Compact64::EMPTY.with_square(0, 1).covers(&mask));
    }
}
