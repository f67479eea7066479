//! Per-solve timing statistics.

use std::fmt;

use serde::Serialize;

/// Summary of the trial durations of one solve, in microseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialStats {
    pub runs: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

impl TrialStats {
    /// Returns `None` for an empty sample set.
    pub fn from_samples(mut samples: Vec<u64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_unstable();

        let runs = samples.len();
        let middle = runs / 2;
        let median = if runs % 2 == 1 {
            samples[middle] as f64
        } else {
            (samples[middle - 1] + samples[middle]) as f64 / 2.0
        };
        let total: u64 = samples.iter().sum();

        Some(TrialStats {
            runs,
            min: samples[0],
            max: samples[runs - 1],
            mean: total as f64 / runs as f64,
            median,
        })
    }

    /// The fastest/slowest/median sentence, scaled to µs, ms or s.
    pub fn summary(&self) -> String {
        let (unit, scale) = TimeUnit::for_median(self.median);
        format!(
            "The fastest run took {} {unit}, the slowest took {} {unit}, and a median of {} runs was {}.",
            self.min as f64 / scale,
            self.max as f64 / scale,
            self.runs,
            self.median / scale,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimeUnit {
    Micros,
    Millis,
    Seconds,
}

impl TimeUnit {
    fn for_median(median: f64) -> (Self, f64) {
        if median < 1e3 {
            (TimeUnit::Micros, 1.0)
        } else if median < 1e6 {
            (TimeUnit::Millis, 1e3)
        } else {
            (TimeUnit::Seconds, 1e6)
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Micros => "microseconds",
            TimeUnit::Millis => "milliseconds",
            TimeUnit::Seconds => "seconds",
        })
    }
}
