// Loader seam
// The core never parses waveform containers; it asks a TraceSource

use std::collections::HashMap;

use crate::trace::ident::TraceId;
use crate::trace::types::{Trace, TraceError};

/// External waveform loader.
///
/// Implementations own file parsing and caching; the core only requires
/// that the same identifier resolves to the same trace for the duration of
/// a run. Fetching is synchronous and must not block on user input.
pub trait TraceSource {
    fn fetch(&self, id: &TraceId) -> Result<Trace, TraceError>;
}

/// In-memory trace store.
///
/// Used by tests and by callers that have already loaded their waveforms
/// through some external reader.
#[derive(Debug, Default)]
pub struct MemoryTraceSource {
    traces: HashMap<TraceId, Trace>,
}

impl MemoryTraceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TraceId, trace: Trace) {
        self.traces.insert(id, trace);
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

impl TraceSource for MemoryTraceSource {
    fn fetch(&self, id: &TraceId) -> Result<Trace, TraceError> {
        self.traces
            .get(id)
            .cloned()
            .ok_or_else(|| TraceError::NotFound(id.to_string()))
    }
}
