use std::error::Error;

use ndarray::{Array1, ArrayView1};
use slog::{debug, warn, Logger};

use crate::analysis::filter::FilterKind;
use crate::analysis::metrics::{
    heart_rate, heart_rate_from_count, pulse_transit_time, pulse_transit_time_matched,
    Calibration, HeartRateEstimator, Metrics, PttEstimator,
};
use crate::analysis::peaks::{count_peaks, find_peaks, GuardPolicy};
use crate::error::{ConfigError, Result};
use crate::log::discard;

#[derive(Debug, PartialEq, Clone)]
pub struct Parameters {
    pub sampling_frequency: f64,
    pub filter: FilterKind,
    pub peak_threshold: f64,
    pub peak_capacity: usize,
    pub guard: GuardPolicy,
    pub heart_rate_estimator: HeartRateEstimator,
    pub ptt_estimator: PttEstimator,
    pub calibration: Calibration,
}

impl Parameters {
    /// Rejects configurations the numeric stages are not meant to handle.
    /// A non-positive sampling frequency is accepted; it degrades the metrics to 0.0.
    pub fn validate(&self) -> Result<()> {
        match &self.filter {
            FilterKind::MovingAverage { window } => {
                if *window == 0 {
                    return Err(ConfigError::ZeroWindow);
                }
            }
            FilterKind::Fir { coeffs } => {
                if coeffs.is_empty() {
                    return Err(ConfigError::EmptyKernel);
                }
                if let Some(index) = coeffs.iter().position(|c| !c.is_finite()) {
                    return Err(ConfigError::NonFiniteCoefficient { index });
                }
            }
        }

        if self.peak_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        if let GuardPolicy::RateProportional(fraction) = self.guard {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(ConfigError::InvalidGuard { fraction });
            }
        }

        if self.peak_threshold.is_nan() {
            return Err(ConfigError::InvalidThreshold);
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Results {
    pub peaks: Vec<usize>,
    /// Peaks of the second channel, empty for single channel analysis.
    pub distal_peaks: Vec<usize>,
    pub metrics: Metrics,
}

/// Receives every intermediate signal, e.g. for plotting.
/// Arguments are the signal, a title and the detected peaks if the stage has any.
pub type Observer = Box<
    dyn Fn(ArrayView1<f64>, &str, Option<&[usize]>) -> std::result::Result<(), Box<dyn Error>>
        + Send
        + Sync,
>;

pub struct Analysis {
    params: Parameters,
    logger: Logger,
    observer: Option<Observer>,
}

impl Analysis {
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            logger: discard(),
            observer: None,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(ArrayView1<f64>, &str, Option<&[usize]>) -> std::result::Result<(), Box<dyn Error>>
            + Send
            + Sync
            + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn guard_samples(&self) -> usize {
        self.params.guard.guard_samples(self.params.sampling_frequency)
    }

    /// Single channel pass: filter, detect peaks and estimate the heart rate.
    /// There is no transit time without a second channel, so the blood pressure
    /// estimate is the calibration at zero transit time.
    pub fn analyze(&self, signal: ArrayView1<f64>) -> Results {
        let (filtered, peaks) = self.detect(signal, "Signal");

        let heart_rate = self.heart_rate(filtered.view(), &peaks);
        let metrics = Metrics {
            heart_rate,
            pulse_transit_time: 0.0,
            blood_pressure: self.params.calibration.apply(0.0),
        };

        debug!(self.logger, "analysis done";
            "samples" => signal.len(),
            "peaks" => peaks.len(),
            "heart_rate" => metrics.heart_rate);

        Results {
            peaks,
            distal_peaks: Vec::new(),
            metrics,
        }
    }

    /// Two channel pass. Both channels are filtered and searched independently; the heart
    /// rate comes from the proximal channel and the transit time is distal minus proximal.
    pub fn analyze_pair(&self, proximal: ArrayView1<f64>, distal: ArrayView1<f64>) -> Results {
        let (filtered, peaks) = self.detect(proximal, "Proximal");
        let (_, distal_peaks) = self.detect(distal, "Distal");

        let heart_rate = self.heart_rate(filtered.view(), &peaks);
        let ptt = if self.is_measurable(proximal.len()) && self.is_measurable(distal.len()) {
            self.pulse_transit_time(&peaks, &distal_peaks)
        } else {
            0.0
        };
        let metrics = Metrics {
            heart_rate,
            pulse_transit_time: ptt,
            blood_pressure: self.params.calibration.apply(ptt),
        };

        debug!(self.logger, "pair analysis done";
            "samples" => proximal.len(),
            "proximal_peaks" => peaks.len(),
            "distal_peaks" => distal_peaks.len(),
            "heart_rate" => metrics.heart_rate,
            "ptt" => metrics.pulse_transit_time,
            "blood_pressure" => metrics.blood_pressure);

        Results {
            peaks,
            distal_peaks,
            metrics,
        }
    }

    pub fn filter(&self, signal: ArrayView1<f64>) -> Array1<f64> {
        self.params.filter.apply(signal)
    }

    pub fn find_peaks(&self, signal: ArrayView1<f64>) -> Vec<usize> {
        find_peaks(
            signal,
            self.params.peak_threshold,
            self.params.peak_capacity,
            self.guard_samples(),
        )
    }

    /// Filters one channel and returns the filtered signal with its capacity-bounded peaks.
    fn detect(&self, signal: ArrayView1<f64>, channel: &str) -> (Array1<f64>, Vec<usize>) {
        self.observe(signal, &format!("{} Raw", channel), None);

        let filtered = self.filter(signal);
        let peaks = self.find_peaks(filtered.view());

        self.observe(filtered.view(), &format!("{} Filtered", channel), Some(peaks.as_slice()));

        if peaks.len() == self.params.peak_capacity {
            debug!(self.logger, "peak capacity reached"; "channel" => channel, "capacity" => peaks.len());
        }

        (filtered, peaks)
    }

    fn is_measurable(&self, len: usize) -> bool {
        len >= 3 && self.params.sampling_frequency > 0.0
    }

    fn heart_rate(&self, filtered: ArrayView1<f64>, peaks: &[usize]) -> f64 {
        let len = filtered.len();
        if !self.is_measurable(len) {
            return 0.0;
        }

        let fs = self.params.sampling_frequency;
        match self.params.heart_rate_estimator {
            HeartRateEstimator::PeakInterval => heart_rate(peaks, fs),
            // capacity bounds the reported peaks, not the count
            HeartRateEstimator::PeakCount => {
                let count = count_peaks(filtered, self.params.peak_threshold, self.guard_samples());
                heart_rate_from_count(count, len, fs)
            }
        }
    }

    fn pulse_transit_time(&self, proximal: &[usize], distal: &[usize]) -> f64 {
        let fs = self.params.sampling_frequency;
        match self.params.ptt_estimator {
            PttEstimator::FirstPeak => pulse_transit_time(proximal, distal, fs),
            PttEstimator::MatchedMean => pulse_transit_time_matched(proximal, distal, fs),
        }
    }

    fn observe(&self, signal: ArrayView1<f64>, title: &str, points: Option<&[usize]>) {
        if let Some(f) = &self.observer {
            f(signal, title, points).unwrap_or_else(|e| {
                warn!(self.logger, "observer failed"; "title" => title, "error" => %e);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::sync::{Arc, Mutex};

    fn params() -> Parameters {
        Parameters {
            sampling_frequency: 100.0,
            filter: FilterKind::moving_average(1),
            peak_threshold: 0.5,
            peak_capacity: 64,
            guard: GuardPolicy::FixedSamples(0),
            heart_rate_estimator: HeartRateEstimator::PeakInterval,
            ptt_estimator: PttEstimator::FirstPeak,
            calibration: Calibration { slope: -50.0, intercept: 130.0 },
        }
    }

    #[test]
    fn validation_accepts_defaults() {
        assert_eq!(params().validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_zero_window() {
        let p = Parameters { filter: FilterKind::moving_average(0), ..params() };
        assert_eq!(p.validate(), Err(ConfigError::ZeroWindow));
        assert!(Analysis::new(p).is_err());
    }

    #[test]
    fn validation_rejects_bad_kernels() {
        let p = Parameters { filter: FilterKind::fir(&[]), ..params() };
        assert_eq!(p.validate(), Err(ConfigError::EmptyKernel));

        let p = Parameters { filter: FilterKind::fir(&[0.5, f64::INFINITY]), ..params() };
        assert_eq!(p.validate(), Err(ConfigError::NonFiniteCoefficient { index: 1 }));
    }

    #[test]
    fn validation_rejects_zero_capacity() {
        let p = Parameters { peak_capacity: 0, ..params() };
        assert_eq!(p.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn validation_rejects_bad_guard_fraction() {
        let p = Parameters { guard: GuardPolicy::RateProportional(-0.1), ..params() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidGuard { .. })));

        let p = Parameters { guard: GuardPolicy::RateProportional(f64::NAN), ..params() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidGuard { .. })));
    }

    #[test]
    fn validation_rejects_nan_threshold() {
        let p = Parameters { peak_threshold: f64::NAN, ..params() };
        assert_eq!(p.validate(), Err(ConfigError::InvalidThreshold));
    }

    #[test]
    fn validation_accepts_non_positive_sampling_frequency() {
        let p = Parameters { sampling_frequency: 0.0, ..params() };
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn single_channel_heart_rate() {
        let analysis = Analysis::new(params()).unwrap();
        let mut signal = Array1::<f64>::zeros(40);
        for &i in &[10, 20, 30] {
            signal[i] = 1.0;
        }

        let results = analysis.analyze(signal.view());
        assert_eq!(results.peaks, vec![10, 20, 30]);
        assert!(results.distal_peaks.is_empty());
        assert_relative_eq!(results.metrics.heart_rate, 600.0);
        assert_eq!(results.metrics.pulse_transit_time, 0.0);
        assert_relative_eq!(results.metrics.blood_pressure, 130.0);
    }

    #[test]
    fn count_estimator_uses_signal_duration() {
        let p = Parameters { heart_rate_estimator: HeartRateEstimator::PeakCount, ..params() };
        let analysis = Analysis::new(p).unwrap();
        let mut signal = Array1::<f64>::zeros(200);
        signal[50] = 1.0;
        signal[150] = 1.0;

        // two peaks in two seconds
        assert_relative_eq!(analysis.analyze(signal.view()).metrics.heart_rate, 60.0);
    }

    #[test]
    fn count_estimator_counts_past_capacity() {
        let p = Parameters {
            heart_rate_estimator: HeartRateEstimator::PeakCount,
            peak_capacity: 2,
            ..params()
        };
        let analysis = Analysis::new(p).unwrap();
        let mut signal = Array1::<f64>::zeros(100);
        for &i in &[10, 30, 50, 70, 90] {
            signal[i] = 1.0;
        }

        let results = analysis.analyze(signal.view());
        assert_eq!(results.peaks, vec![10, 30]);
        // five peaks in one second
        assert_relative_eq!(results.metrics.heart_rate, 300.0);
    }

    #[test]
    fn pair_transit_time_and_blood_pressure() {
        let analysis = Analysis::new(params()).unwrap();
        let mut proximal = Array1::<f64>::zeros(60);
        let mut distal = Array1::<f64>::zeros(60);
        proximal[5] = 1.0;
        proximal[50] = 1.0;
        distal[10] = 1.0;
        distal[55] = 1.0;

        let results = analysis.analyze_pair(proximal.view(), distal.view());
        assert_eq!(results.peaks, vec![5, 50]);
        assert_eq!(results.distal_peaks, vec![10, 55]);
        assert_relative_eq!(results.metrics.pulse_transit_time, 0.05);
        assert_relative_eq!(results.metrics.blood_pressure, 127.5);
    }

    #[test]
    fn matched_estimator_is_opt_in() {
        let mut proximal = Array1::<f64>::zeros(100);
        let mut distal = Array1::<f64>::zeros(100);
        proximal[5] = 1.0;
        proximal[50] = 1.0;
        distal[10] = 1.0;
        distal[90] = 1.0;

        let first = Analysis::new(params()).unwrap();
        assert_relative_eq!(
            first.analyze_pair(proximal.view(), distal.view()).metrics.pulse_transit_time,
            0.05
        );

        let p = Parameters { ptt_estimator: PttEstimator::MatchedMean, ..params() };
        let matched = Analysis::new(p).unwrap();
        assert_relative_eq!(
            matched.analyze_pair(proximal.view(), distal.view()).metrics.pulse_transit_time,
            0.225
        );
    }

    #[test]
    fn short_signals_degrade_to_zero() {
        let analysis = Analysis::new(params()).unwrap();
        let results = analysis.analyze_pair(array![0.0, 1.0].view(), array![0.0, 1.0].view());
        assert!(results.peaks.is_empty());
        assert_eq!(results.metrics.heart_rate, 0.0);
        assert_eq!(results.metrics.pulse_transit_time, 0.0);
        assert_relative_eq!(results.metrics.blood_pressure, 130.0);
    }

    #[test]
    fn non_positive_sampling_frequency_degrades_to_zero() {
        let p = Parameters { sampling_frequency: -1.0, ..params() };
        let analysis = Analysis::new(p).unwrap();
        let mut signal = Array1::<f64>::zeros(40);
        signal[10] = 1.0;
        signal[20] = 1.0;

        let results = analysis.analyze_pair(signal.view(), signal.view());
        assert_eq!(results.peaks, vec![10, 20]);
        assert_eq!(results.metrics.heart_rate, 0.0);
        assert_eq!(results.metrics.pulse_transit_time, 0.0);
    }

    #[test]
    fn observer_sees_every_stage() {
        let titles = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&titles);
        let analysis = Analysis::new(params()).unwrap().with_observer(move |signal, title, points| {
            seen.lock().unwrap().push((title.to_string(), signal.len(), points.map(|p| p.to_vec())));
            Ok(())
        });

        let mut signal = Array1::<f64>::zeros(10);
        signal[4] = 1.0;
        analysis.analyze_pair(signal.view(), signal.view());

        let titles = titles.lock().unwrap();
        assert_eq!(
            *titles,
            vec![
                ("Proximal Raw".to_string(), 10, None),
                ("Proximal Filtered".to_string(), 10, Some(vec![4])),
                ("Distal Raw".to_string(), 10, None),
                ("Distal Filtered".to_string(), 10, Some(vec![4])),
            ]
        );
    }

    #[test]
    fn failing_observer_does_not_change_results() {
        let mut signal = Array1::<f64>::zeros(40);
        signal[10] = 1.0;
        signal[20] = 1.0;

        let quiet = Analysis::new(params()).unwrap();
        let failing = Analysis::new(params())
            .unwrap()
            .with_observer(|_, _, _| Err("plot backend unavailable".into()));

        assert_eq!(quiet.analyze(signal.view()), failing.analyze(signal.view()));
    }
}
