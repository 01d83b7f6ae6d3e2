use ndarray::ArrayView1;

/// How far the detector jumps ahead after accepting a peak.
/// The skip suppresses a second detection on the shoulder of the same pulse.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GuardPolicy {
    /// Skip a fixed number of samples.
    FixedSamples(usize),
    /// Skip `fraction * sampling_frequency` samples, i.e. a refractory period in seconds.
    RateProportional(f64),
}

impl GuardPolicy {
    /// Resolves the policy to a sample count for the given sampling frequency.
    /// A negative or NaN product resolves to zero.
    pub fn guard_samples(&self, fs: f64) -> usize {
        match *self {
            GuardPolicy::FixedSamples(n) => n,
            // float to int casts saturate, NaN and negatives become 0
            GuardPolicy::RateProportional(fraction) => (fraction * fs).floor() as usize,
        }
    }
}

/// Finds local maxima above `threshold`.
///
/// Index `i` is a peak iff `x[i] > threshold`, `x[i] > x[i-1]` and `x[i] > x[i+1]`, so plateaus
/// and the two boundary samples never qualify. After each peak the scan skips `guard` samples
/// and resumes at `i + guard + 1`. Scanning stops once `capacity` peaks are recorded.
/// The returned indices are strictly increasing.
pub fn find_peaks(data: ArrayView1<f64>, threshold: f64, capacity: usize, guard: usize) -> Vec<usize> {
    let mut peaks = Vec::with_capacity(capacity.min(data.len()));
    if capacity == 0 {
        return peaks;
    }

    scan(data, threshold, guard, |i| {
        peaks.push(i);
        peaks.len() < capacity
    });

    peaks
}

/// Number of peaks [`find_peaks`] would report without a capacity bound.
pub fn count_peaks(data: ArrayView1<f64>, threshold: f64, guard: usize) -> usize {
    let mut count = 0;
    scan(data, threshold, guard, |_| {
        count += 1;
        true
    });
    count
}

/// Walks the peaks in order; `on_peak` returns false to stop.
fn scan<F>(data: ArrayView1<f64>, threshold: f64, guard: usize, mut on_peak: F)
where
    F: FnMut(usize) -> bool,
{
    let len = data.len();
    if len < 3 {
        return;
    }

    let mut i = 1;
    while i < len - 1 {
        let x = data[i];
        if x > threshold && x > data[i - 1] && x > data[i + 1] {
            if !on_peak(i) {
                return;
            }
            i = i.saturating_add(guard);
        }
        i = i.saturating_add(1);
    }
}
