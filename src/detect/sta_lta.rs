// STA/LTA onset trigger
// Classic short-term-average over long-term-average energy ratio with
// warm-up suppression

use serde::{Deserialize, Serialize};

/// Configuration for the STA/LTA trigger
///
/// Thresholds are externally supplied tuning inputs; the defaults are the
/// field values this picker has been run with, not derived quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaLtaConfig {
    /// Short averaging window in samples
    pub short_window: usize,

    /// Long averaging window in samples
    pub long_window: usize,

    /// Ratio level that opens a trigger
    pub threshold_on: f64,

    /// Ratio level that closes an open trigger
    pub threshold_off: f64,
}

impl Default for StaLtaConfig {
    fn default() -> Self {
        StaLtaConfig {
            short_window: 200,
            long_window: 7500,
            threshold_on: 12.0,
            threshold_off: 0.3,
        }
    }
}

/// Locate the first onset in a trace with the STA/LTA energy ratio.
///
/// For each position the ratio of the short-horizon moving average of
/// squared amplitude to the long-horizon one is computed causally; the
/// long average runs over all available history capped at `long_window`,
/// so it is only trustworthy once a full window of history exists. The
/// first position whose ratio exceeds `threshold_on` is the candidate
/// onset; the trigger closes where the ratio later drops below
/// `threshold_off`, or at the end of the trace if it never does. Only the
/// onset index is returned.
///
/// Candidates earlier than `0.8 × long_window` are discarded: those are
/// artifacts of the long average's warm-up, not signal arrivals.
///
/// Degenerate inputs (trace shorter than `2 × long_window`, NaN/Inf
/// samples, nonsensical windows) return `None` with a logged reason;
/// none of them abort an enclosing batch.
pub fn detect(samples: &[f64], config: &StaLtaConfig) -> Option<usize> {
    let ns = config.short_window;
    let nl = config.long_window;

    if ns == 0 || nl <= ns {
        log::warn!("sta/lta windows unusable (short={ns}, long={nl}), no pick");
        return None;
    }
    if samples.len() < 2 * nl {
        log::warn!(
            "trace too short for sta/lta ({} samples < {}), no pick",
            samples.len(),
            2 * nl
        );
        return None;
    }
    if samples.iter().any(|s| !s.is_finite()) {
        log::warn!("trace contains NaN or Inf samples, no pick");
        return None;
    }

    // Prefix sums of squared amplitude; both averages are causal reads of
    // this one array.
    let mut csum = vec![0.0; samples.len() + 1];
    for (i, &s) in samples.iter().enumerate() {
        csum[i + 1] = csum[i] + s * s;
    }

    let ratio_at = |i: usize| -> f64 {
        let sta = (csum[i + 1] - csum[i + 1 - ns]) / ns as f64;
        let lo = (i + 1).saturating_sub(nl);
        let lta = (csum[i + 1] - csum[lo]) / (i + 1 - lo) as f64;
        if lta > 0.0 {
            sta / lta
        } else {
            0.0
        }
    };

    let onset = (ns - 1..samples.len()).find(|&i| ratio_at(i) > config.threshold_on);
    let onset = match onset {
        Some(i) => i,
        None => {
            log::debug!("no ratio above threshold_on={}, no pick", config.threshold_on);
            return None;
        }
    };

    // Where the trigger closes; an open trigger runs to the end of the
    // trace. Diagnostic only, the pick is the onset index.
    let offset = (onset + 1..samples.len())
        .find(|&i| ratio_at(i) < config.threshold_off)
        .unwrap_or(samples.len() - 1);
    log::debug!("trigger open at {onset}, closed at {offset}");

    let warmup_limit = (0.8 * nl as f64) as usize;
    if onset < warmup_limit {
        log::warn!(
            "trigger at {onset} is inside the long-window warm-up (< {warmup_limit}), no pick"
        );
        return None;
    }

    Some(onset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ns: usize, nl: usize, on: f64, off: f64) -> StaLtaConfig {
        StaLtaConfig {
            short_window: ns,
            long_window: nl,
            threshold_on: on,
            threshold_off: off,
        }
    }

    /// Quiet background with a step increase in amplitude at `k`
    fn step_trace(len: usize, k: usize, quiet: f64, loud: f64) -> Vec<f64> {
        (0..len)
            .map(|i| if i < k { quiet } else { loud })
            .collect()
    }

    #[test]
    fn test_step_onset_found_exactly() {
        // Step at 600 >= 0.8 * 500, length 1200 >= 2 * 500
        let samples = step_trace(1200, 600, 0.1, 100.0);
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), Some(600));
    }

    #[test]
    fn test_quiet_trace_has_no_pick() {
        let samples = vec![0.1; 1200];
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), None);
    }

    #[test]
    fn test_short_trace_has_no_pick() {
        let samples = step_trace(999, 600, 0.1, 100.0);
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), None);
    }

    #[test]
    fn test_nan_and_inf_have_no_pick() {
        let mut samples = step_trace(1200, 600, 0.1, 100.0);
        samples[17] = f64::NAN;
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), None);

        let mut samples = step_trace(1200, 600, 0.1, 100.0);
        samples[17] = f64::INFINITY;
        assert_eq!(detect(&samples, &cfg), None);
    }

    #[test]
    fn test_warmup_trigger_suppressed() {
        // A step well before 0.8 * long_window fires the ratio while the
        // long average is still warming up; the pick must be suppressed,
        // not reported early.
        let samples = step_trace(1200, 300, 0.1, 100.0);
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), None);
    }

    #[test]
    fn test_bad_windows_have_no_pick() {
        let samples = step_trace(1200, 600, 0.1, 100.0);
        assert_eq!(detect(&samples, &config(0, 500, 5.0, 0.5)), None);
        assert_eq!(detect(&samples, &config(500, 500, 5.0, 0.5)), None);
        assert_eq!(detect(&samples, &config(600, 500, 5.0, 0.5)), None);
    }

    #[test]
    fn test_all_zero_trace_has_no_pick() {
        let samples = vec![0.0; 1200];
        let cfg = config(50, 500, 5.0, 0.5);
        assert_eq!(detect(&samples, &cfg), None);
    }
}
