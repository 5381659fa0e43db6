// Batch detection
// Runs one detector over many traces and joins the picks into a PickSet.
// Traces are independent, so the fan-out is a plain parallel map.

use rayon::prelude::*;

use crate::detect::{noise, sta_lta, NoiseConfig, StaLtaConfig};
use crate::picks::{PickSet, PickSource};
use crate::trace::{TraceId, TraceSource};

/// A configured automatic picker
#[derive(Debug, Clone)]
pub enum Detector {
    StaLta(StaLtaConfig),
    Noise(NoiseConfig),
}

impl Detector {
    /// Source tag the resulting PickSet carries
    pub fn source(&self) -> PickSource {
        match self {
            Detector::StaLta(_) => PickSource::StaLta,
            Detector::Noise(_) => PickSource::Noise,
        }
    }

    /// Run the detector over one trace's samples
    pub fn detect(&self, samples: &[f64]) -> Option<usize> {
        match self {
            Detector::StaLta(config) => sta_lta::detect(samples, config),
            Detector::Noise(config) => noise::detect(samples, config),
        }
    }
}

/// Run a detector over every identifier and collect the picks into one
/// table, in the identifiers' order.
///
/// Per-trace faults never abort the batch: an unreadable trace, like a
/// degenerate one, is logged and yields a sentinel row. Detection fans
/// out across traces with a parallel map; results are joined back in
/// input order before anything is persisted.
pub fn run_batch<S>(ids: &[TraceId], source: &S, detector: &Detector) -> PickSet
where
    S: TraceSource + Sync,
{
    let picks: Vec<(TraceId, Option<usize>)> = ids
        .par_iter()
        .map(|id| {
            let sample = match source.fetch(id) {
                Ok(trace) => detector.detect(&trace.samples),
                Err(e) => {
                    log::warn!("skipping {id}: {e}");
                    None
                }
            };
            (id.clone(), sample)
        })
        .collect();

    let mut set = PickSet::create(detector.source(), picks.iter().map(|(id, _)| id.clone()));
    for (id, sample) in &picks {
        let _ = set.set(id, *sample);
    }

    log::info!(
        "{} pass over {} traces: {} picked, {} sentinel",
        detector.source(),
        set.len(),
        set.len() - set.sentinel_count(),
        set.sentinel_count()
    );
    set
}
