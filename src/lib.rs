//! Bitboard N-Queens solver for boards from 4×4 to 16×16.
//!
//! Queens are placed column by column. Every placed queen ORs a precomputed
//! threat mask into the board, so a column with no free row is detected in a
//! single comparison and the branch is pruned. Only the upper half of the
//! first column is searched; the other half comes from mirroring.
//!
//! - **Encodings**: [`Compact64`] (8×8 in a `u64`) and [`Wide256`] (16×16 in 256 bits)
//! - **Kernels**: the portable [`Scalar`] kernel and, with the `simd` feature,
//!   an AVX2 kernel selected at runtime
//! - **Drivers**: single-threaded trials and a partitioned rayon search

pub mod bitboard;
pub mod board;
pub mod config;
pub mod error;
pub mod kernel;
pub mod logging;
pub mod masks;
pub mod parallel;
pub mod render;
pub mod report;
pub mod scan;
pub mod search;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub mod simd;
pub mod solution;
pub mod solver;
pub mod stats;
pub mod symmetry;
pub mod timer;

/// Smallest board with a solution besides the trivial 1×1.
pub const MIN_BOARD_SIZE: usize = 4;
/// Largest board the wide encoding holds.
pub const MAX_BOARD_SIZE: usize = 16;

pub use bitboard::{Bitboard, Compact64, Wide256};
pub use board::{BoardSize, KNOWN_SOLUTION_COUNTS};
pub use config::BenchConfig;
pub use error::{QueensError, Result};
pub use kernel::{Scalar, ThreatKernel};
pub use search::{SearchContext, SearchCounters, TraceOptions};
pub use solution::Solution;
pub use solver::{SolveReport, Solver, Variant};
