// Trace container and trace-level errors
// Traces are produced by an external loader and are read-only to the core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("unknown trace: {0}")]
    NotFound(String),

    #[error("invalid trace name: {0}")]
    BadName(String),

    #[error("failed to read trace {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// One continuous recorded waveform: amplitude samples plus sampling rate.
///
/// Ownership stays with the loader side of the boundary; detectors and the
/// review surface only ever borrow the sample slice.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Amplitude samples, one per sample index
    pub samples: Vec<f64>,

    /// Sampling rate in Hz
    pub sample_rate: f64,
}

impl Trace {
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Trace {
            samples,
            sample_rate,
        }
    }

    /// Number of samples in the trace
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, 0.0 for a non-positive sampling rate
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate > 0.0 {
            self.samples.len() as f64 / self.sample_rate
        } else {
            0.0
        }
    }
}
