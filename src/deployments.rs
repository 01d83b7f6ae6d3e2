//! Parameter sets of the three reference deployments.
//!
//! - `wrist_finger_ptt`: two channels at 100 Hz, 5-sample moving average, threshold 0.8,
//!   fixed 5-sample guard, interval heart rate and blood pressure from transit time.
//! - `moving_average_hr`: one channel at 50 Hz, 20-sample moving average, threshold 0.6,
//!   0.4 s guard, heart rate from the peak count.
//! - `fir_low_pass_hr`: one channel at 100 Hz, 5-tap low-pass FIR, threshold 0.2,
//!   0.4 s guard, heart rate from the peak count.

use crate::analysis::filter::FilterKind;
use crate::analysis::metrics::{Calibration, HeartRateEstimator, PttEstimator};
use crate::analysis::peaks::GuardPolicy;
use crate::analysis::ppg::Parameters;

pub const DEFAULT_PEAK_CAPACITY: usize = 64;

pub const LOW_PASS_TAPS: [f64; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];

/// Calibration used by the two-channel deployment, `-50 * ptt + 130`.
pub const DEFAULT_CALIBRATION: Calibration = Calibration {
    slope: -50.0,
    intercept: 130.0,
};

pub fn wrist_finger_ptt() -> Parameters {
    Parameters {
        sampling_frequency: 100.0,
        filter: FilterKind::moving_average(5),
        peak_threshold: 0.8,
        peak_capacity: DEFAULT_PEAK_CAPACITY,
        guard: GuardPolicy::FixedSamples(5),
        heart_rate_estimator: HeartRateEstimator::PeakInterval,
        ptt_estimator: PttEstimator::FirstPeak,
        calibration: DEFAULT_CALIBRATION,
    }
}

pub fn moving_average_hr() -> Parameters {
    Parameters {
        sampling_frequency: 50.0,
        filter: FilterKind::moving_average(20),
        peak_threshold: 0.6,
        peak_capacity: DEFAULT_PEAK_CAPACITY,
        guard: GuardPolicy::RateProportional(0.4),
        heart_rate_estimator: HeartRateEstimator::PeakCount,
        ptt_estimator: PttEstimator::FirstPeak,
        calibration: DEFAULT_CALIBRATION,
    }
}

pub fn fir_low_pass_hr() -> Parameters {
    Parameters {
        sampling_frequency: 100.0,
        filter: FilterKind::fir(&LOW_PASS_TAPS),
        peak_threshold: 0.2,
        peak_capacity: DEFAULT_PEAK_CAPACITY,
        guard: GuardPolicy::RateProportional(0.4),
        heart_rate_estimator: HeartRateEstimator::PeakCount,
        ptt_estimator: PttEstimator::FirstPeak,
        calibration: DEFAULT_CALIBRATION,
    }
}
