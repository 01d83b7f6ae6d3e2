//! Timing wrapper for repeated pipeline invocations.
//!
//! The wrapper only brackets calls with a monotonic clock. It never sees inside the
//! pipeline, so wrapped and unwrapped runs produce the same numbers.

use std::hint::black_box;
use std::time::{Duration, Instant};

use slog::{info, Logger};

use crate::analysis::Metrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub iterations: u32,
    pub elapsed: Duration,
}

impl Timing {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }

    pub fn per_iteration(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }
        self.elapsed / self.iterations
    }

    pub fn log(&self, logger: &Logger, label: &str) {
        info!(logger, "benchmark done";
            "label" => label,
            "iterations" => self.iterations,
            "elapsed_ms" => self.elapsed_ms(),
            "per_iteration_us" => self.per_iteration().as_secs_f64() * 1e6);
    }
}

/// Running sums of the metrics of repeated runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricTotals {
    pub runs: u32,
    pub sum: Metrics,
}

impl MetricTotals {
    pub fn add(&mut self, metrics: &Metrics) {
        self.runs += 1;
        self.sum.heart_rate += metrics.heart_rate;
        self.sum.pulse_transit_time += metrics.pulse_transit_time;
        self.sum.blood_pressure += metrics.blood_pressure;
    }

    /// Mean over all added runs, all zeros before the first one.
    pub fn mean(&self) -> Metrics {
        if self.runs == 0 {
            return Metrics::default();
        }
        let n = f64::from(self.runs);
        Metrics {
            heart_rate: self.sum.heart_rate / n,
            pulse_transit_time: self.sum.pulse_transit_time / n,
            blood_pressure: self.sum.blood_pressure / n,
        }
    }
}

/// Runs `f` `iterations` times (at least once) and returns the last result with the
/// elapsed wall time. Results pass through `black_box` so repeated calls are not
/// optimized away.
pub fn measure<T, F>(iterations: u32, mut f: F) -> (T, Timing)
where
    F: FnMut() -> T,
{
    let iterations = iterations.max(1);
    let start = Instant::now();

    let mut last = black_box(f());
    for _ in 1..iterations {
        last = black_box(f());
    }

    let timing = Timing {
        iterations,
        elapsed: start.elapsed(),
    };
    (last, timing)
}
