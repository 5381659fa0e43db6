// Review cursor
// Pure state over the flagged-disagreement list; waveform fetch is
// delegated to the TraceSource, rendering stays outside the core

use thiserror::Error;

use crate::trace::{Trace, TraceError, TraceSource};
use crate::validate::residual::ResidualRecord;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("no flagged records to review")]
    Empty,

    #[error("record index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// A record resolved for display: the flagged picks plus the raw trace
/// they mark
#[derive(Debug)]
pub struct ReviewItem<'a> {
    pub record: &'a ResidualRecord,
    pub trace: Trace,
}

/// Cursor over the filtered residual list.
///
/// Stepping past either end is a no-op, jumps are bounds-checked; the
/// cursor itself never performs I/O except through [`ReviewCursor::resolve`].
#[derive(Debug)]
pub struct ReviewCursor {
    records: Vec<ResidualRecord>,
    index: usize,
}

impl ReviewCursor {
    pub fn new(records: Vec<ResidualRecord>) -> Self {
        ReviewCursor { records, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current position in the flagged list
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&ResidualRecord> {
        self.records.get(self.index)
    }

    /// Step forward; no-op on the last record
    pub fn next(&mut self) {
        if self.index + 1 < self.records.len() {
            self.index += 1;
        }
    }

    /// Step backward; no-op on the first record
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Jump to a record by position
    pub fn jump(&mut self, index: usize) -> Result<(), ReviewError> {
        if index < self.records.len() {
            self.index = index;
            Ok(())
        } else {
            Err(ReviewError::OutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    /// Fetch the current record's raw trace for overlay
    pub fn resolve<S: TraceSource>(&self, source: &S) -> Result<ReviewItem<'_>, ReviewError> {
        let record = self.current().ok_or(ReviewError::Empty)?;
        let trace = source.fetch(&record.id)?;
        Ok(ReviewItem { record, trace })
    }
}
