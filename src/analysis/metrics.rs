//! Heart rate, pulse transit time and the blood pressure estimate derived from peak positions.
//!
//! Every function here is total. Missing or unusable input (too few peaks, a non-positive
//! sampling frequency or duration) produces 0.0 instead of an error, because "no detectable
//! pulse" is an ordinary outcome for a noisy optical signal.

/// Derived scalars of one pipeline pass.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Metrics {
    /// Beats per minute, 0.0 when undetermined.
    pub heart_rate: f64,
    /// Seconds, 0.0 when undetermined.
    pub pulse_transit_time: f64,
    pub blood_pressure: f64,
}

/// How the pipeline turns peaks into a heart rate.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum HeartRateEstimator {
    /// Mean inter-peak interval, see [`heart_rate`].
    #[default]
    PeakInterval,
    /// Peak count over the signal duration, see [`heart_rate_from_count`].
    PeakCount,
}

/// How the pipeline pairs pulses of two channels.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum PttEstimator {
    /// First peak of each channel only, see [`pulse_transit_time`].
    #[default]
    FirstPeak,
    /// Mean over index-matched peak pairs, see [`pulse_transit_time_matched`].
    MatchedMean,
}

/// Device-specific linear relation between pulse transit time and blood pressure.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Calibration {
    pub slope: f64,
    pub intercept: f64,
}

impl Calibration {
    pub fn apply(&self, ptt: f64) -> f64 {
        blood_pressure(ptt, self.slope, self.intercept)
    }
}

/// Heart rate from the mean distance between consecutive peaks:
/// `60 * fs / mean_interval`.
pub fn heart_rate(peaks: &[usize], fs: f64) -> f64 {
    if peaks.len() < 2 || !(fs > 0.0) {
        return 0.0;
    }

    let total: f64 = peaks.windows(2).map(|w| w[1] as f64 - w[0] as f64).sum();
    let mean_interval = total / (peaks.len() - 1) as f64;

    if !(mean_interval > 0.0) {
        return 0.0;
    }

    60.0 * fs / mean_interval
}

/// Heart rate from a peak count over a known time span.
pub fn heart_rate_from_duration(peak_count: usize, duration_seconds: f64) -> f64 {
    if !(duration_seconds > 0.0) {
        return 0.0;
    }
    (peak_count as f64 / duration_seconds) * 60.0
}

/// Heart rate from the number of peaks in a signal of `sample_count` samples.
/// The count should come from an unbounded scan, see [`count_peaks`](crate::analysis::peaks::count_peaks).
pub fn heart_rate_from_count(peak_count: usize, sample_count: usize, fs: f64) -> f64 {
    if sample_count < 3 || !(fs > 0.0) {
        return 0.0;
    }
    heart_rate_from_duration(peak_count, sample_count as f64 / fs)
}

/// Delay of the first pulse in channel B relative to the first pulse in channel A, in seconds.
///
/// Only the first detected pulse of each channel is used. Later pulses are ignored even when
/// available; [`pulse_transit_time_matched`] is the averaging alternative.
pub fn pulse_transit_time(peaks_a: &[usize], peaks_b: &[usize], fs: f64) -> f64 {
    match (peaks_a.first(), peaks_b.first()) {
        (Some(&a), Some(&b)) if fs > 0.0 => (b as f64 - a as f64) / fs,
        _ => 0.0,
    }
}

/// Mean delay over peaks paired by position (`b[i] - a[i]`), in seconds.
/// Pairs beyond the shorter list are dropped.
pub fn pulse_transit_time_matched(peaks_a: &[usize], peaks_b: &[usize], fs: f64) -> f64 {
    let pairs = peaks_a.len().min(peaks_b.len());
    if pairs == 0 || !(fs > 0.0) {
        return 0.0;
    }

    let total: f64 = peaks_a
        .iter()
        .zip(peaks_b.iter())
        .map(|(&a, &b)| b as f64 - a as f64)
        .sum();

    total / pairs as f64 / fs
}

/// Linear blood pressure estimate `a * ptt + b`.
pub fn blood_pressure(ptt: f64, slope_a: f64, intercept_b: f64) -> f64 {
    slope_a * ptt + intercept_b
}
