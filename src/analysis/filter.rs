use ndarray::{Array1, ArrayView1};

/// Filter stage applied ahead of peak detection.
/// Both variants are causal and length-preserving; a deployment picks one.
#[derive(Debug, PartialEq, Clone)]
pub enum FilterKind {
    /// Moving average over the `window` most recent samples.
    MovingAverage { window: usize },
    /// FIR convolution, `coeffs[0]` weighting the current sample.
    Fir { coeffs: Array1<f64> },
}

impl FilterKind {
    pub fn moving_average(window: usize) -> Self {
        FilterKind::MovingAverage { window }
    }

    pub fn fir(coeffs: &[f64]) -> Self {
        FilterKind::Fir {
            coeffs: Array1::from(coeffs.to_vec()),
        }
    }

    pub fn apply(&self, data: ArrayView1<f64>) -> Array1<f64> {
        match self {
            FilterKind::MovingAverage { window } => smooth(data, *window),
            FilterKind::Fir { coeffs } => fir(data, coeffs.view()),
        }
    }
}

/// Causal moving average.
/// Each output sample is the mean of the input sample at the same index and up to
/// `window - 1` samples before it. Near the start the window shrinks to the available
/// history instead of padding with zeros, so early samples are not pulled towards zero.
pub fn smooth(data: ArrayView1<f64>, window: usize) -> Array1<f64> {
    let mut smoothed = Array1::<f64>::zeros(data.len());

    for n in 0..data.len() {
        // window == 0 leaves the count at zero and the output at 0.0
        let count = window.min(n + 1);
        if count == 0 {
            continue;
        }

        let sum: f64 = (0..count).map(|k| data[n - k]).sum();
        smoothed[n] = sum / count as f64;
    }

    smoothed
}

/// Causal FIR filter with caller-supplied taps.
/// Taps reaching before index 0 are left out of the sum, which matches zero padding.
/// The kernel is used as given, so a unit-gain response is the caller's job.
pub fn fir(data: ArrayView1<f64>, coeffs: ArrayView1<f64>) -> Array1<f64> {
    let mut filtered = Array1::<f64>::zeros(data.len());

    for n in 0..data.len() {
        let taps = coeffs.len().min(n + 1);
        filtered[n] = (0..taps).map(|k| coeffs[k] * data[n - k]).sum::<f64>();
    }

    filtered
}
