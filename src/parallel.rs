//! Work partitioning and the multi-threaded driver.
//!
//! The starting rows of column 0 are split into contiguous ranges, one per
//! worker. Every worker owns a complete [`SearchContext`] (counters, scratch
//! rows, placement vector, solution buffer), so the only data shared between
//! threads is the read-only mask tables. Counters are summed after the join.

use std::ops::Range;
use std::thread;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::board::BoardSize;
use crate::error::{QueensError, Result};
use crate::kernel::ThreatKernel;
use crate::search::{SearchContext, SearchCounters, TraceOptions};
use crate::solution::Solution;

/// Minimum number of hardware threads the threaded variant accepts.
pub const MIN_WORKERS: usize = 2;

/// Number of hardware threads, or 1 when it cannot be determined.
pub fn hardware_concurrency() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fails when fewer than [`MIN_WORKERS`] threads are available.
pub fn require_workers(available: usize) -> Result<usize> {
    if available < MIN_WORKERS {
        return Err(QueensError::InsufficientConcurrency { available });
    }
    Ok(available)
}

pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("queens-worker-{i}"))
        .build()?;
    Ok(pool)
}

/// Splits `0..starting_rows` into `workers` contiguous ranges.
///
/// Each range holds `starting_rows / workers` rows and the first
/// `starting_rows % workers` ranges hold one more. Trailing ranges are empty
/// when there are more workers than rows.
pub fn partition(starting_rows: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let quot = starting_rows / workers;
    let rem = starting_rows % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let len = quot + usize::from(i < rem);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// What one worker found in its range of starting rows.
#[derive(Clone, Debug)]
pub struct WorkerOutcome {
    pub rows: Range<usize>,
    pub counters: SearchCounters,
    pub solutions: Vec<Solution>,
}

#[derive(Clone, Debug, Default)]
pub struct ParallelOutcome {
    /// Sum of every worker's counters
    pub counters: SearchCounters,
    /// Per-worker results, in partition order
    pub workers: Vec<WorkerOutcome>,
}

impl ParallelOutcome {
    /// Stored solutions of all workers, in partition order.
    pub fn solutions(&self) -> impl Iterator<Item = &Solution> {
        self.workers.iter().flat_map(|w| w.solutions.iter())
    }
}

/// Searches the upper half of the board with `workers` independent contexts on `pool`.
///
/// Each worker stores at most `capacity` solutions.
pub fn solve_partitioned<K: ThreatKernel>(
    pool: &ThreadPool,
    kernel: K,
    board_size: BoardSize,
    workers: usize,
    capacity: usize,
    trace: TraceOptions,
) -> Result<ParallelOutcome> {
    let ranges = partition(board_size.starting_rows(), workers);

    let workers: Vec<WorkerOutcome> = pool.install(|| {
        ranges
            .into_par_iter()
            .map(|rows| -> Result<WorkerOutcome> {
                let mut ctx = SearchContext::new(kernel, board_size, capacity)?.with_trace(trace);
                ctx.search_rows(rows.clone());
                let (counters, solutions) = ctx.into_parts();
                Ok(WorkerOutcome {
                    rows,
                    counters,
                    solutions,
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let counters = workers.iter().map(|w| w.counters).sum();
    Ok(ParallelOutcome { counters, workers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Wide256;
    use crate::kernel::Scalar;

    #[test]
    fn test_partition_even_split() {
        assert_eq!(partition(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_partition_remainder_goes_first() {
        assert_eq!(partition(5, 2), vec![0..3, 3..5]);
        assert_eq!(partition(7, 3), vec![0..3, 3..5, 5..7]);
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        assert_eq!(partition(2, 4), vec![0..1, 1..2, 2..2, 2..2]);
        assert!(partition(3, 0).is_empty());
    }

    #[test]
    fn test_require_workers() {
        assert!(matches!(
            require_workers(1),
            Err(QueensError::InsufficientConcurrency { available: 1 })
        ));
        assert_eq!(require_workers(2).unwrap(), 2);
    }

    #[test]
    fn test_partitioned_matches_single_threaded() {
        let pool = build_pool(3).unwrap();
        let board = BoardSize::new(10, 16).unwrap();
        let mut single = SearchContext::new(Scalar::<Wide256>::new(), board, 0).unwrap();
        single.search_half();

        for workers in [1, 2, 3, 5, 7] {
            let outcome = solve_partitioned(
                &pool,
                Scalar::<Wide256>::new(),
                board,
                workers,
                12,
                TraceOptions::default(),
            )
            .unwrap();
            assert_eq!(outcome.counters, single.counters(), "{workers} workers");
            assert_eq!(outcome.workers.len(), workers);
            assert!(outcome.workers.iter().all(|w| w.solutions.len() <= 12));
        }
    }

    #[test]
    fn test_worker_solutions_follow_partition_order() {
        let pool = build_pool(2).unwrap();
        let board = BoardSize::new(8, 16).unwrap();
        let outcome =
            solve_partitioned(&pool, Scalar::<Wide256>::new(), board, 2, 50, TraceOptions::default())
                .unwrap();
        assert_eq!(outcome.workers[0].rows, 0..2);
        assert_eq!(outcome.workers[1].rows, 2..4);
        let first = outcome.solutions().next().unwrap();
        assert_eq!(first.rows(), &[0, 4, 7, 5, 2, 6, 1, 3]);
        assert_eq!(outcome.solutions().count(), 46);
    }
}
