//! Heart rate, pulse transit time and blood pressure estimates from PPG-like waveforms.
//!
//! Raw samples go through a causal filter (moving average or FIR), a threshold peak
//! detector with a guard distance, and a set of total metric functions. Everything is a
//! pure batch transform; [`analysis::Analysis`] bundles the stages behind one validated
//! parameter set.

pub mod analysis;
pub mod bench;
pub mod deployments;
pub mod error;
pub mod log;
pub mod mock;

pub use analysis::{
    blood_pressure, count_peaks, find_peaks, fir, heart_rate, heart_rate_from_count,
    heart_rate_from_duration, pulse_transit_time, pulse_transit_time_matched, smooth, Analysis, Calibration, FilterKind,
    GuardPolicy, HeartRateEstimator, Metrics, Parameters, PttEstimator, Results,
};
pub use error::ConfigError;
