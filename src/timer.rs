//! Microsecond stopwatch for timing individual trials.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    start: Instant,
    stopped: Option<Duration>,
}

impl Stopwatch {
    /// Starts timing immediately.
    #[inline]
    pub fn start() -> Self {
        Stopwatch {
            start: Instant::now(),
            stopped: None,
        }
    }

    /// Freezes the elapsed time. Later calls keep the first reading.
    #[inline]
    pub fn stop(&mut self) -> Duration {
        *self.stopped.get_or_insert_with(|| self.start.elapsed())
    }

    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.start.elapsed())
    }

    pub fn elapsed_microseconds(&self) -> u64 {
        self.elapsed().as_micros() as u64
    }
}
