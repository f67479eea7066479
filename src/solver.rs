//! Benchmark driver.
//!
//! A [`Solver`] owns one variant, a board size and the trace switches. Each
//! call to [`Solver::solve`] runs the search repeatedly, times every trial
//! and keeps a [`SolveReport`] of the last solve.
//!
//! **Variants:**
//! - `scalar64`: 64-bit encoding, portable kernel, boards up to 8
//! - `scalar256`: 256-bit encoding, portable kernel
//! - `simd256`: 256-bit encoding, AVX2 kernel (fails when unavailable)
//! - `threaded256`: 256-bit encoding on every hardware thread, AVX2 when
//!   available and the portable kernel otherwise

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bitboard::{Compact64, Wide256};
use crate::board::BoardSize;
use crate::config::{BenchConfig, DEFAULT_COMPACT_TRIALS};
use crate::error::{QueensError, Result};
use crate::kernel::{Scalar, ThreatKernel};
use crate::parallel::{build_pool, hardware_concurrency, require_workers, solve_partitioned};
use crate::search::{SearchContext, SearchCounters, TraceOptions};
use crate::solution::Solution;
use crate::stats::TrialStats;
use crate::timer::Stopwatch;
use crate::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Scalar64,
    Scalar256,
    Simd256,
    Threaded256,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Scalar64,
        Variant::Scalar256,
        Variant::Simd256,
        Variant::Threaded256,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Scalar64 => "scalar64",
            Variant::Scalar256 => "scalar256",
            Variant::Simd256 => "simd256",
            Variant::Threaded256 => "threaded256",
        }
    }

    /// Column heading in the duration table.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Scalar64 => "64 bits",
            Variant::Scalar256 => "256 bits",
            Variant::Simd256 => "AVX2",
            Variant::Threaded256 => "AVX2 Multi Threaded",
        }
    }

    pub fn max_board_size(self) -> usize {
        match self {
            Variant::Scalar64 => 8,
            _ => MAX_BOARD_SIZE,
        }
    }

    /// Trials per solve before any configured cap: 1000 for the compact
    /// encoding, `(16 - N)^3 + 1` for the wide one.
    pub fn default_trials(self, board_size: usize) -> usize {
        match self {
            Variant::Scalar64 => DEFAULT_COMPACT_TRIALS,
            _ => MAX_BOARD_SIZE.saturating_sub(board_size).pow(3) + 1,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown variant '{s}', expected one of scalar64, scalar256, simd256, threaded256")
            })
    }
}

/// Everything one solve produced.
#[derive(Clone, Debug, Serialize)]
pub struct SolveReport {
    pub variant: Variant,
    /// Threat kernel that actually ran
    pub kernel: &'static str,
    pub board_size: usize,
    pub trials: usize,
    pub counters: SearchCounters,
    /// Per-worker counters of the threaded variant, in partition order
    pub worker_counters: Vec<SearchCounters>,
    /// Stored raw solutions, in discovery order
    pub solutions: Vec<Solution>,
    pub stats: Option<TrialStats>,
}

impl SolveReport {
    pub fn median_microseconds(&self) -> f64 {
        self.stats.as_ref().map_or(0.0, |s| s.median)
    }
}

/// Output of a timed trial loop, before it is labelled with the variant.
struct TrialRun {
    kernel: &'static str,
    counters: SearchCounters,
    worker_counters: Vec<SearchCounters>,
    solutions: Vec<Solution>,
    samples: Vec<u64>,
}

pub struct Solver {
    variant: Variant,
    config: BenchConfig,
    board_size: usize,
    trace: TraceOptions,
    report: Option<SolveReport>,
}

impl Solver {
    pub fn new(variant: Variant, config: BenchConfig) -> Self {
        Solver {
            variant,
            config,
            board_size: 8.clamp(MIN_BOARD_SIZE, variant.max_board_size()),
            trace: TraceOptions::default(),
            report: None,
        }
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Accepts `4..=max_board_size()`. Anything else is reported and ignored.
    pub fn set_board_size(&mut self, size: usize) -> bool {
        match BoardSize::new(size, self.variant.max_board_size()) {
            Ok(board) => {
                self.board_size = board.get();
                true
            }
            Err(err) => {
                tracing::warn!(variant = %self.variant, kept = self.board_size, "{err}");
                false
            }
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.trace.verbose = verbose;
    }

    /// Limits failure tracing to the first `trials` failures.
    pub fn set_short(&mut self, trials: u64) {
        self.trace.failure_limit = Some(trials);
    }

    /// Trials the next solve will run.
    pub fn trials(&self) -> usize {
        self.config
            .cap_trials(self.variant.default_trials(self.board_size))
    }

    pub fn last_report(&self) -> Option<&SolveReport> {
        self.report.as_ref()
    }

    /// Runs the timed trials and returns the median duration in microseconds.
    pub fn solve(&mut self) -> Result<f64> {
        let board = BoardSize::new(self.board_size, self.variant.max_board_size())?;
        let trials = self.trials();
        tracing::info!(variant = %self.variant, board_size = board.get(), trials, "solving");

        let run = match self.variant {
            Variant::Scalar64 => run_single(
                Scalar::<Compact64>::new(),
                board,
                trials,
                self.config.compact_solution_capacity,
                self.trace,
            )?,
            Variant::Scalar256 => run_single(
                Scalar::<Wide256>::new(),
                board,
                trials,
                self.config.solution_capacity,
                self.trace,
            )?,
            Variant::Simd256 => run_simd(board, trials, self.config.solution_capacity, self.trace)?,
            Variant::Threaded256 => self.run_threaded(board, trials)?,
        };

        let stats = TrialStats::from_samples(run.samples);
        let report = SolveReport {
            variant: self.variant,
            kernel: run.kernel,
            board_size: board.get(),
            trials,
            counters: run.counters,
            worker_counters: run.worker_counters,
            solutions: run.solutions,
            stats,
        };
        let median = report.median_microseconds();
        tracing::info!(
            variant = %self.variant,
            kernel = report.kernel,
            board_size = board.get(),
            total = report.counters.total_solutions(),
            median_us = median,
            "solved"
        );
        self.report = Some(report);
        Ok(median)
    }

    fn run_threaded(&self, board: BoardSize, trials: usize) -> Result<TrialRun> {
        let workers = require_workers(self.config.threads.unwrap_or_else(hardware_concurrency))?;
        let capacity = self.config.worker_solution_capacity;

        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        if let Some(kernel) = crate::simd::Avx2::detect() {
            return run_partitioned(kernel, board, trials, workers, capacity, self.trace);
        }
        tracing::debug!("AVX2 unavailable, threaded search uses the scalar kernel");
        run_partitioned(Scalar::<Wide256>::new(), board, trials, workers, capacity, self.trace)
    }
}

fn run_single<K: ThreatKernel>(
    kernel: K,
    board: BoardSize,
    trials: usize,
    capacity: usize,
    trace: TraceOptions,
) -> Result<TrialRun> {
    let mut ctx = SearchContext::new(kernel, board, capacity)?.with_trace(trace);
    let mut samples = Vec::with_capacity(trials);

    for trial in 0..trials {
        if trial == 1 {
            // Only the first trial is traced.
            ctx = ctx.with_trace(TraceOptions::default());
        }
        ctx.reset();
        let mut watch = Stopwatch::start();
        ctx.search_half();
        watch.stop();
        samples.push(watch.elapsed_microseconds());
    }

    let (counters, solutions) = ctx.into_parts();
    Ok(TrialRun {
        kernel: K::NAME,
        counters,
        worker_counters: Vec::new(),
        solutions,
        samples,
    })
}

fn run_partitioned<K: ThreatKernel>(
    kernel: K,
    board: BoardSize,
    trials: usize,
    workers: usize,
    capacity: usize,
    trace: TraceOptions,
) -> Result<TrialRun> {
    // Built once, outside the timed region.
    let pool = build_pool(workers)?;
    let mut samples = Vec::with_capacity(trials);
    let mut last = None;

    for trial in 0..trials {
        let trace = if trial == 0 { trace } else { TraceOptions::default() };
        let mut watch = Stopwatch::start();
        let outcome = solve_partitioned(&pool, kernel, board, workers, capacity, trace)?;
        watch.stop();
        samples.push(watch.elapsed_microseconds());
        last = Some(outcome);
    }

    let outcome = last.unwrap_or_default();
    Ok(TrialRun {
        kernel: K::NAME,
        counters: outcome.counters,
        worker_counters: outcome.workers.iter().map(|w| w.counters).collect(),
        solutions: outcome.solutions().cloned().collect(),
        samples,
    })
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn run_simd(board: BoardSize, trials: usize, capacity: usize, trace: TraceOptions) -> Result<TrialRun> {
    let kernel = crate::simd::Avx2::detect().ok_or(QueensError::SimdUnavailable)?;
    run_single(kernel, board, trials, capacity, trace)
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
fn run_simd(_board: BoardSize, _trials: usize, _capacity: usize, _trace: TraceOptions) -> Result<TrialRun> {
    Err(QueensError::SimdUnavailable)
}

/// Whether [`Variant::Simd256`] can run on this machine and build.
pub fn simd_available() -> bool {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        crate::simd::Avx2::detect().is_some()
    }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_trial() -> BenchConfig {
        BenchConfig {
            max_trials: Some(1),
            ..BenchConfig::default()
        }
    }

    #[test]
    fn test_variant_parse_and_display() {
        for v in Variant::ALL {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        assert_eq!("SIMD256".parse::<Variant>().unwrap(), Variant::Simd256);
        assert!("avx512".parse::<Variant>().is_err());
    }

    #[test]
    fn test_default_trials() {
        assert_eq!(Variant::Scalar64.default_trials(8), 1000);
        assert_eq!(Variant::Scalar256.default_trials(8), 513);
        assert_eq!(Variant::Simd256.default_trials(16), 1);
        assert_eq!(Variant::Threaded256.default_trials(4), 1729);
    }

    #[test]
    fn test_set_board_size_keeps_previous_on_error() {
        let mut solver = Solver::new(Variant::Scalar64, one_trial());
        assert_eq!(solver.board_size(), 8);
        assert!(solver.set_board_size(5));
        assert!(!solver.set_board_size(9));
        assert!(!solver.set_board_size(3));
        assert_eq!(solver.board_size(), 5);
    }

    #[test]
    fn test_solve_records_report() {
        let mut solver = Solver::new(Variant::Scalar256, one_trial());
        assert!(solver.last_report().is_none());
        assert!(solver.set_board_size(6));
        let median = solver.solve().unwrap();
        let report = solver.last_report().unwrap();
        assert_eq!(report.counters.total_solutions(), 4);
        assert_eq!(report.trials, 1);
        assert_eq!(report.kernel, "scalar");
        assert_eq!(report.median_microseconds(), median);
        assert_eq!(report.stats.as_ref().unwrap().runs, 1);
    }

    #[test]
    fn test_compact_capacity_applies() {
        let mut solver = Solver::new(
            Variant::Scalar64,
            BenchConfig {
                max_trials: Some(2),
                compact_solution_capacity: 10,
                ..BenchConfig::default()
            },
        );
        solver.solve().unwrap();
        let report = solver.last_report().unwrap();
        assert_eq!(report.solutions.len(), 10);
        assert_eq!(report.counters.successes, 46);
        assert_eq!(report.stats.as_ref().unwrap().runs, 2);
    }

    #[test]
    fn test_simd_variant_matches_availability() {
        let mut solver = Solver::new(Variant::Simd256, one_trial());
        let result = solver.solve();
        if simd_available() {
            assert_eq!(solver.last_report().unwrap().counters.total_solutions(), 92);
        } else {
            assert!(matches!(result, Err(QueensError::SimdUnavailable)));
        }
    }

    #[test]
    fn test_threaded_rejects_single_thread_override() {
        let mut solver = Solver::new(
            Variant::Threaded256,
            BenchConfig {
                threads: Some(1),
                ..one_trial()
            },
        );
        assert!(matches!(
            solver.solve(),
            Err(QueensError::InsufficientConcurrency { available: 1 })
        ));
        assert!(solver.last_report().is_none());
    }
}
