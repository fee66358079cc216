//! Timing instrumentation helpers

use std::time::{Duration, Instant};

/// Tracks elapsed time of one operation
///
/// # Example
///
/// ```
/// use mes_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let _ = (0..10).sum::<u32>();
/// assert!(timer.elapsed_ms() < 60_000.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in milliseconds, rounded to two decimals
    pub fn elapsed_ms(&self) -> f64 {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        (ms * 100.0).round() / 100.0
    }

    /// Elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
