//! Progress reporting for long passes.
//!
//! Reporting is purely observational: passes call [`ProgressTracker::tick`]
//! once per line and the tracker decides when to forward a percentage and
//! estimated time remaining to a [`ProgressReporter`].

use std::time::{Duration, Instant};

use tracing::info;

/// Receives progress updates
pub trait ProgressReporter {
    /// `percent` is the share of expected lines processed so far, `eta` the
    /// estimated time remaining.
    fn report(&mut self, percent: f64, eta: Duration);
}

/// Discards all progress updates
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _percent: f64, _eta: Duration) {}
}

/// Logs progress updates at info level
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressReporter for LogProgress {
    fn report(&mut self, percent: f64, eta: Duration) {
        info!(
            "{} ({percent:.2}%), estimated time left: {}s",
            self.label,
            eta.as_secs()
        );
    }
}

/// Counts lines against an expected total and reports once per whole percent
#[derive(Debug)]
pub struct ProgressTracker {
    expected: u64,
    done: u64,
    last_percent: u64,
    start: Instant,
}

impl ProgressTracker {
    /// A tracker that never reports when `expected` is `None` or zero
    pub fn new(expected: Option<u64>) -> Self {
        Self {
            expected: expected.unwrap_or(0),
            done: 0,
            last_percent: 0,
            start: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected > 0
    }

    /// Record one processed line
    pub fn tick(&mut self, reporter: &mut dyn ProgressReporter) {
        if !self.is_enabled() {
            return;
        }
        self.done += 1;

        let percent = self.done.saturating_mul(100) / self.expected;
        if percent > self.last_percent {
            self.last_percent = percent;
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.done as f64 / self.expected as f64;
            reporter.report(ratio * 100.0, estimate_remaining(self.start.elapsed(), ratio));
        }
    }
}

/// Extrapolate time remaining from time spent and the completed ratio
#[must_use]
pub fn estimate_remaining(elapsed: Duration, ratio: f64) -> Duration {
    if ratio <= 0.0 || ratio >= 1.0 {
        return Duration::ZERO;
    }
    elapsed.mul_f64((1.0 - ratio) / ratio)
}
