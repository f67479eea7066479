//! AVX2 threat kernel for the 256-bit encoding.
//!
//! A whole 16×16 map fits one `__m256i`, so combining, the coverage test and
//! the free-row search are each a handful of instructions:
//!
//! - **combine**: `vpor`
//! - **covers**: `vptest` carry flag, set when `!map & mask == 0`
//! - **zero lanes**: `vpcmpeqw` against zero, then `vpmovmskb` and a bit
//!   compaction from byte granularity down to one bit per 16-bit lane
//!
//! Feature-gated: enable with `--features simd` (on by default). The kernel can
//! only be obtained through [`Avx2::detect`], so holding one proves the CPU
//! supports AVX2.

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::bitboard::Wide256;
use crate::kernel::ThreatKernel;

#[derive(Clone, Copy, Debug)]
pub struct Avx2 {
    _detected: (),
}

impl Avx2 {
    /// Returns the kernel when the running CPU supports AVX2.
    pub fn detect() -> Option<Self> {
        if cfg!(target_feature = "avx2") || std::is_x86_feature_detected!("avx2") {
            Some(Avx2 { _detected: () })
        } else {
            None
        }
    }
}

impl ThreatKernel for Avx2 {
    type Board = Wide256;

    const NAME: &'static str = "avx2";

    #[inline(always)]
    fn combine(&self, map: Wide256, mask: Wide256) -> Wide256 {
        // SAFETY: an `Avx2` value only exists after AVX2 support was detected.
        unsafe { or_avx2(&map, &mask) }
    }

    #[inline(always)]
    fn intersect(&self, map: Wide256, mask: Wide256) -> Wide256 {
        // SAFETY: see `combine`.
        unsafe { and_avx2(&map, &mask) }
    }

    #[inline(always)]
    fn covers(&self, map: &Wide256, mask: &Wide256) -> bool {
        // SAFETY: see `combine`.
        unsafe { covers_avx2(map, mask) }
    }

    #[inline(always)]
    fn zero_lanes(&self, masked: &Wide256, board_size: usize) -> u16 {
        // SAFETY: see `combine`.
        let lanes = unsafe { zero_lanes_avx2(masked) };
        lanes & row_window(board_size)
    }
}

/// Bits `0..board_size` set.
#[inline(always)]
fn row_window(board_size: usize) -> u16 {
    ((1u32 << board_size) - 1) as u16
}

/// Keeps every even bit of a 32-bit byte mask and packs them into 16 bits.
#[inline(always)]
fn compact_even_bits(mut x: u32) -> u16 {
    x &= 0x5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF;
    x as u16
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load(b: &Wide256) -> __m256i {
    unsafe { _mm256_loadu_si256(b.0.as_ptr() as *const __m256i) }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store(v: __m256i) -> Wide256 {
    let mut out = Wide256([0; 4]);
    unsafe { _mm256_storeu_si256(out.0.as_mut_ptr() as *mut __m256i, v) };
    out
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn or_avx2(a: &Wide256, b: &Wide256) -> Wide256 {
    unsafe { store(_mm256_or_si256(load(a), load(b))) }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn and_avx2(a: &Wide256, b: &Wide256) -> Wide256 {
    unsafe { store(_mm256_and_si256(load(a), load(b))) }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn covers_avx2(map: &Wide256, mask: &Wide256) -> bool {
    unsafe { _mm256_testc_si256(load(map), load(mask)) != 0 }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn zero_lanes_avx2(masked: &Wide256) -> u16 {
    let bytes = unsafe {
        let eq = _mm256_cmpeq_epi16(load(masked), _mm256_setzero_si256());
        _mm256_movemask_epi8(eq) as u32
    };
    compact_even_bits(bytes)
}
