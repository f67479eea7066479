//! Column-major backtracking search.
//!
//! Queens are placed one column at a time. Column `c + 1` is only visited
//! after the queen of column `c` has been OR-ed into the threat map, so a
//! column whose rows are all under threat is pruned in O(1) before any row
//! scan happens. Rows are always tried in ascending order, which fixes the
//! order in which solutions are discovered.
//!
//! All mutable state (counters, placement vector, scratch rows, solution
//! buffer) lives in a [`SearchContext`]. The mask tables are the only shared
//! data and are read-only.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Range};

use serde::Serialize;

use crate::MAX_BOARD_SIZE;
use crate::bitboard::Bitboard;
use crate::board::BoardSize;
use crate::error::Result;
use crate::kernel::ThreatKernel;
use crate::render::render_threat_map;
use crate::scan::{EMPTY_SLOTS, RowSlots, SENTINEL, not_threatened_rows};
use crate::solution::{Solution, SolutionBuffer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchCounters {
    /// Complete placements found in the searched half
    pub successes: u64,
    /// Columns found totally under threat before the last column was reached
    pub failures: u64,
    /// Successes starting on the middle row of an odd board; their mirrors
    /// were found by the search itself.
    pub self_mirrored: u64,
}

impl SearchCounters {
    /// Solutions on the full board once the mirrored half is added back.
    #[inline]
    pub fn total_solutions(&self) -> u64 {
        2 * self.successes - self.self_mirrored
    }
}

impl Add for SearchCounters {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            successes: self.successes + other.successes,
            failures: self.failures + other.failures,
            self_mirrored: self.self_mirrored + other.self_mirrored,
        }
    }
}

impl AddAssign for SearchCounters {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for SearchCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Diagnostic switches. They never change what the search finds.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceOptions {
    /// Emit a debug event for every pruned column
    pub verbose: bool,
    /// Only trace the first `n` failures
    pub failure_limit: Option<u64>,
}

pub struct SearchContext<K: ThreatKernel> {
    kernel: K,
    board_size: usize,
    /// Middle row of an odd board, or the sentinel
    middle_row: i8,
    start_map: K::Board,
    placement: [i8; MAX_BOARD_SIZE],
    scratch: [RowSlots; MAX_BOARD_SIZE],
    counters: SearchCounters,
    solutions: SolutionBuffer,
    trace: TraceOptions,
}

impl<K: ThreatKernel> SearchContext<K> {
    /// Creates a context for `board_size`, storing at most `capacity` solutions.
    ///
    /// Fails when the board does not fit the kernel's encoding.
    pub fn new(kernel: K, board_size: BoardSize, capacity: usize) -> Result<Self> {
        let board = BoardSize::new(board_size.get(), <K::Board as Bitboard>::LANES)?;
        Ok(SearchContext {
            kernel,
            board_size: board.get(),
            middle_row: board.middle_row().map_or(SENTINEL, |r| r as i8),
            start_map: kernel.tables().starting_map(board.get()),
            placement: [SENTINEL; MAX_BOARD_SIZE],
            scratch: [EMPTY_SLOTS; MAX_BOARD_SIZE],
            counters: SearchCounters::default(),
            solutions: SolutionBuffer::with_capacity(capacity),
            trace: TraceOptions::default(),
        })
    }

    pub fn with_trace(mut self, trace: TraceOptions) -> Self {
        self.trace = trace;
        self
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Clears counters and stored solutions for a fresh trial.
    pub fn reset(&mut self) {
        self.counters = SearchCounters::default();
        self.solutions.clear();
        self.placement = [SENTINEL; MAX_BOARD_SIZE];
    }

    /// Searches the whole upper half: every starting row up to and including the middle.
    pub fn search_half(&mut self) {
        self.search_rows(0..self.board_size.div_ceil(2));
    }

    /// Runs the search once per starting row of column 0 in `rows`.
    pub fn search_rows(&mut self, rows: Range<usize>) {
        for row in rows {
            self.placement = [SENTINEL; MAX_BOARD_SIZE];
            self.placement[0] = row as i8;
            self.place(self.start_map, 0);
        }
    }

    /// Places the queens of the columns after `column`, whose row is already set.
    fn place(&mut self, map: K::Board, column: usize) {
        let next = column + 1;
        if next == self.board_size {
            self.record_success();
            return;
        }

        let map = self
            .kernel
            .threaten(map, self.placement[column] as usize, column);
        if self.kernel.is_totally_under_threat(&map, next) {
            self.counters.failures += 1;
            if self.trace.verbose {
                self.trace_failure(&map, next);
            }
            return;
        }

        let masked = self
            .kernel
            .intersect(map, *self.kernel.tables().column(next));
        not_threatened_rows(
            &self.kernel,
            &masked,
            self.board_size,
            &mut self.scratch[next],
        );

        // Indexed so the scratch row is not borrowed across the recursion.
        let mut i = 0;
        loop {
            let row = self.scratch[next][i];
            if row == SENTINEL {
                break;
            }
            self.placement[next] = row;
            self.place(map, next);
            i += 1;
        }
        self.placement[next] = SENTINEL;
    }

    #[inline]
    fn record_success(&mut self) {
        self.solutions.offer(&self.placement, self.board_size);
        self.counters.successes += 1;
        if self.placement[0] == self.middle_row {
            self.counters.self_mirrored += 1;
        }
    }

    #[cold]
    fn trace_failure(&self, map: &K::Board, column: usize) {
        if let Some(limit) = self.trace.failure_limit {
            if self.counters.failures > limit {
                return;
            }
        }
        let placed: Vec<i8> = self.placement[..column].to_vec();
        tracing::debug!(
            column,
            failures = self.counters.failures,
            placement = ?placed,
            "column totally under threat\n{}",
            render_threat_map(map, &self.placement, self.board_size)
        );
    }

    #[inline]
    pub fn counters(&self) -> SearchCounters {
        self.counters
    }

    pub fn solutions(&self) -> &[Solution] {
        self.solutions.solutions()
    }

    pub fn into_parts(self) -> (SearchCounters, Vec<Solution>) {
        (self.counters, self.solutions.into_solutions())
    }
}

// ============================================================================
// Tests
// ============================================================================
