pub mod filter;
pub mod metrics;
pub mod peaks;
pub mod ppg;

pub use filter::{fir, smooth, FilterKind};
pub use metrics::{
    blood_pressure, heart_rate, heart_rate_from_count, heart_rate_from_duration,
    pulse_transit_time, pulse_transit_time_matched, Calibration, HeartRateEstimator, Metrics,
    PttEstimator,
};
pub use peaks::{count_peaks, find_peaks, GuardPolicy};
pub use ppg::{Analysis, Observer, Parameters, Results};
