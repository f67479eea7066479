//! Error types for the solver and its benchmark driver

use std::path::PathBuf;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, QueensError>;

/// Errors raised by board configuration, symmetry expansion and the drivers
#[derive(Debug, thiserror::Error)]
pub enum QueensError {
    /// Requested board size is not supported by the active encoding
    #[error("board size must be between {min} and {max}, it is {size}")]
    BoardSizeOutOfRange { size: usize, min: usize, max: usize },

    /// The multi-threaded variant needs at least two hardware threads
    #[error("multi-threaded search needs at least 2 hardware threads, found {available}")]
    InsufficientConcurrency { available: usize },

    /// Mirror step asked for a board it cannot reflect
    #[error("invalid board size for symmetry expansion: {0} (supported: 4..=16)")]
    UnsupportedMirrorSize(usize),

    /// AVX2 kernel requested on a CPU or build without it
    #[error("AVX2 kernel is not available on this machine or build")]
    SimdUnavailable,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
