use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic PPG-like waveform: an offset sinusoid at the pulse frequency plus a
/// smaller sinusoidal ripple standing in for high-frequency interference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticPulse {
    pub sampling_frequency: f64,
    pub pulse_frequency: f64,
    pub offset: f64,
    pub amplitude: f64,
    pub ripple_frequency: f64,
    pub ripple_amplitude: f64,
}

impl SyntheticPulse {
    /// Wrist-like signal at 72 bpm with a 10 Hz ripple.
    pub fn wrist(sampling_frequency: f64) -> Self {
        SyntheticPulse {
            sampling_frequency,
            pulse_frequency: 1.2,
            offset: 0.5,
            amplitude: 0.5,
            ripple_frequency: 10.0,
            ripple_amplitude: 0.05,
        }
    }

    pub fn generate(&self, samples: usize) -> Array1<f64> {
        Array1::from_shape_fn(samples, |i| {
            let t = i as f64 / self.sampling_frequency;
            self.offset
                + self.amplitude * (2.0 * PI * self.pulse_frequency * t).sin()
                + self.ripple_amplitude * (2.0 * PI * self.ripple_frequency * t).sin()
        })
    }
}

/// Shifts a signal later by `delay` samples, filling the gap at the start with zeros.
/// Used to fake a second measurement site downstream of the first.
pub fn delayed(signal: ArrayView1<f64>, delay: usize) -> Array1<f64> {
    Array1::from_shape_fn(signal.len(), |i| if i >= delay { signal[i - delay] } else { 0.0 })
}

/// Adds uniform noise in `[-amplitude, amplitude]` from a seeded generator,
/// so the same seed always gives the same signal.
pub fn with_noise(signal: ArrayView1<f64>, amplitude: f64, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = amplitude.abs();
    signal.mapv(|x| x + rng.gen_range(-amplitude..=amplitude))
}
