// Noise-envelope deviation trigger
// Cheap, assumption-light counterpart to the STA/LTA picker; the two
// disagreeing is itself a review signal

use serde::{Deserialize, Serialize};

/// Configuration for the noise-boundary detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Number of initial samples defining the accepted noise range
    pub baseline_window: usize,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            baseline_window: 100_000,
        }
    }
}

/// Flag the first sample outside the amplitude range of the initial
/// baseline window.
///
/// The min and max over the first `baseline_window` samples form the
/// accepted noise envelope; the whole trace is then scanned from index 0
/// for the first sample strictly outside `[min, max]`. `None` when no
/// sample deviates, when the trace is shorter than the window, or when
/// the window is empty — each with a logged reason.
pub fn detect(samples: &[f64], config: &NoiseConfig) -> Option<usize> {
    let window = config.baseline_window;

    if window == 0 {
        log::warn!("baseline window is empty, no pick");
        return None;
    }
    if samples.len() < window {
        log::warn!(
            "trace shorter than baseline window ({} samples < {window}), no pick",
            samples.len()
        );
        return None;
    }

    let baseline = &samples[..window];
    let range_min = baseline.iter().cloned().fold(f64::INFINITY, f64::min);
    let range_max = baseline.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let deviation = samples
        .iter()
        .position(|&s| s < range_min || s > range_max);
    if deviation.is_none() {
        log::debug!("no sample outside [{range_min}, {range_max}], no pick");
    }
    deviation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(window: usize) -> NoiseConfig {
        NoiseConfig {
            baseline_window: window,
        }
    }

    #[test]
    fn test_first_deviation_above() {
        let mut samples = vec![0.5; 200];
        samples[150] = 2.0;
        samples[170] = 3.0;
        assert_eq!(detect(&samples, &config(100)), Some(150));
    }

    #[test]
    fn test_first_deviation_below() {
        let mut samples: Vec<f64> = (0..200).map(|i| (i % 7) as f64 * 0.1).collect();
        samples[120] = -5.0;
        assert_eq!(detect(&samples, &config(100)), Some(120));
    }

    #[test]
    fn test_baseline_covering_global_range_has_no_pick() {
        // Everything after the window stays inside the envelope seen in it
        let mut samples = vec![0.0; 200];
        samples[10] = -1.0;
        samples[20] = 1.0;
        for (i, s) in samples.iter_mut().enumerate().skip(100) {
            *s = if i % 2 == 0 { -1.0 } else { 1.0 };
        }
        assert_eq!(detect(&samples, &config(100)), None);
    }

    #[test]
    fn test_boundary_values_are_inside() {
        // Exactly min or max is not a deviation; the scan wants strictly
        // outside
        let mut samples = vec![0.0; 150];
        samples[5] = 1.0;
        samples[140] = 1.0;
        assert_eq!(detect(&samples, &config(100)), None);
    }

    #[test]
    fn test_short_trace_has_no_pick() {
        let samples = vec![0.0; 50];
        assert_eq!(detect(&samples, &config(100)), None);
    }

    #[test]
    fn test_empty_window_has_no_pick() {
        let samples = vec![0.0; 50];
        assert_eq!(detect(&samples, &config(0)), None);
    }
}
