//! Benchmark configuration.
//!
//! Every field has a compiled-in default. A JSON file may override any subset
//! of them; missing keys keep their defaults.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QueensError, Result};
use crate::solver::Variant;

// ============================================================================
// DEFAULT VALUES
// ============================================================================

// Stored solutions per solve
pub const DEFAULT_SOLUTION_CAPACITY: usize = 50;
pub const DEFAULT_COMPACT_SOLUTION_CAPACITY: usize = 46;
pub const DEFAULT_WORKER_SOLUTION_CAPACITY: usize = 12;

// Trials
pub const DEFAULT_COMPACT_TRIALS: usize = 1000;

// Benchmark sweep, inclusive board sizes per variant
pub const DEFAULT_SCALAR64_SIZES: (usize, usize) = (4, 8);
pub const DEFAULT_SCALAR256_SIZES: (usize, usize) = (4, 16);
pub const DEFAULT_SIMD256_SIZES: (usize, usize) = (4, 16);
pub const DEFAULT_THREADED256_SIZES: (usize, usize) = (8, 16);

// ============================================================================
// RUNTIME CONFIGURATION
// ============================================================================

/// Inclusive range of board sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: usize,
}

impl SizeRange {
    pub const fn new(min: usize, max: usize) -> Self {
        SizeRange { min, max }
    }

    const fn from_pair(pair: (usize, usize)) -> Self {
        SizeRange::new(pair.0, pair.1)
    }

    pub fn sizes(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    pub fn contains(&self, size: usize) -> bool {
        self.sizes().contains(&size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSizes {
    pub scalar64: SizeRange,
    pub scalar256: SizeRange,
    pub simd256: SizeRange,
    pub threaded256: SizeRange,
}

impl Default for SweepSizes {
    fn default() -> Self {
        SweepSizes {
            scalar64: SizeRange::from_pair(DEFAULT_SCALAR64_SIZES),
            scalar256: SizeRange::from_pair(DEFAULT_SCALAR256_SIZES),
            simd256: SizeRange::from_pair(DEFAULT_SIMD256_SIZES),
            threaded256: SizeRange::from_pair(DEFAULT_THREADED256_SIZES),
        }
    }
}

impl SweepSizes {
    pub fn for_variant(&self, variant: Variant) -> SizeRange {
        match variant {
            Variant::Scalar64 => self.scalar64,
            Variant::Scalar256 => self.scalar256,
            Variant::Simd256 => self.simd256,
            Variant::Threaded256 => self.threaded256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Upper bound on trials per solve
    pub max_trials: Option<usize>,
    pub solution_capacity: usize,
    pub compact_solution_capacity: usize,
    /// Stored solutions per worker of the threaded variant
    pub worker_solution_capacity: usize,
    /// Overrides detected hardware concurrency; still must be at least 2
    pub threads: Option<usize>,
    pub sizes: SweepSizes,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            max_trials: None,
            solution_capacity: DEFAULT_SOLUTION_CAPACITY,
            compact_solution_capacity: DEFAULT_COMPACT_SOLUTION_CAPACITY,
            worker_solution_capacity: DEFAULT_WORKER_SOLUTION_CAPACITY,
            threads: None,
            sizes: SweepSizes::default(),
        }
    }
}

impl BenchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| QueensError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Applies the trial cap, never going below one trial.
    pub fn cap_trials(&self, trials: usize) -> usize {
        self.max_trials.map_or(trials, |cap| trials.min(cap)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = BenchConfig::default();
        assert_eq!(c.solution_capacity, 50);
        assert_eq!(c.compact_solution_capacity, 46);
        assert_eq!(c.worker_solution_capacity, 12);
        assert_eq!(c.sizes.for_variant(Variant::Scalar64), SizeRange::new(4, 8));
        assert_eq!(c.sizes.for_variant(Variant::Threaded256), SizeRange::new(8, 16));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = BenchConfig::from_json_str(
            r#"{ "max_trials": 3, "sizes": { "simd256": { "min": 10, "max": 12 } } }"#,
        )
        .unwrap();
        assert_eq!(c.max_trials, Some(3));
        assert_eq!(c.solution_capacity, DEFAULT_SOLUTION_CAPACITY);
        assert_eq!(c.sizes.simd256, SizeRange::new(10, 12));
        assert_eq!(c.sizes.scalar256, SizeRange::new(4, 16));
    }

    #[test]
    fn test_json_round_trip() {
        let c = BenchConfig {
            threads: Some(4),
            ..BenchConfig::default()
        };
        assert_eq!(BenchConfig::from_json_str(&c.to_json()).unwrap(), c);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            BenchConfig::from_json_str("{ \"threads\": \"many\" }"),
            Err(QueensError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            BenchConfig::from_json_file("/nonexistent/bitqueens.json"),
            Err(QueensError::Io { .. })
        ));
    }

    #[test]
    fn test_cap_trials() {
        let c = BenchConfig {
            max_trials: Some(5),
            ..BenchConfig::default()
        };
        assert_eq!(c.cap_trials(1000), 5);
        assert_eq!(c.cap_trials(2), 2);
        assert_eq!(BenchConfig::default().cap_trials(1000), 1000);
        let zero = BenchConfig {
            max_trials: Some(0),
            ..BenchConfig::default()
        };
        assert_eq!(zero.cap_trials(10), 1);
    }
}
