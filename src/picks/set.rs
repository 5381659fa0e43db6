// PickSet
// Ordered identifier-keyed table of picks from a single method

use std::collections::HashMap;
use thiserror::Error;

use crate::picks::types::{Pick, PickSource};
use crate::trace::TraceId;

#[derive(Debug, Error)]
pub enum PickSetError {
    #[error("identifier not in table: {0}")]
    UnknownId(String),
}

/// Ordered table mapping trace identifiers to picks, all from one source.
///
/// Row order is the discovery order of the identifiers and defines the
/// traversal and resume order. Detectors and annotators only update
/// existing rows; the identifier set is fixed at creation.
#[derive(Debug, Clone)]
pub struct PickSet {
    source: PickSource,
    rows: Vec<Pick>,
    lookup: HashMap<TraceId, usize>,
}

impl PickSet {
    /// Fresh all-sentinel table over the given identifiers, in their
    /// discovery order. Duplicate identifiers are dropped with a warning;
    /// rows are unique by construction.
    pub fn create(source: PickSource, ids: impl IntoIterator<Item = TraceId>) -> Self {
        let mut rows = Vec::new();
        let mut lookup = HashMap::new();

        for id in ids {
            if lookup.contains_key(&id) {
                log::warn!("duplicate identifier {id} dropped from {source} table");
                continue;
            }
            lookup.insert(id.clone(), rows.len());
            rows.push(Pick::new(id, None, source));
        }

        PickSet {
            source,
            rows,
            lookup,
        }
    }

    pub fn source(&self) -> PickSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &TraceId) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn get(&self, id: &TraceId) -> Option<&Pick> {
        self.lookup.get(id).map(|&i| &self.rows[i])
    }

    /// Row at a table position
    pub fn row(&self, index: usize) -> Option<&Pick> {
        self.rows.get(index)
    }

    /// Rows in table order
    pub fn iter(&self) -> impl Iterator<Item = &Pick> {
        self.rows.iter()
    }

    /// Identifiers in table order
    pub fn ids(&self) -> impl Iterator<Item = &TraceId> {
        self.rows.iter().map(|p| &p.id)
    }

    /// Position of the first sentinel row in table order, or 0 when every
    /// row is labeled. A reloaded labeling pass continues from here.
    pub fn resume_point(&self) -> usize {
        self.rows
            .iter()
            .position(|p| p.is_sentinel())
            .unwrap_or(0)
    }

    /// Number of rows still holding the sentinel
    pub fn sentinel_count(&self) -> usize {
        self.rows.iter().filter(|p| p.is_sentinel()).count()
    }

    /// Overwrite one entry. The identifier must already exist; tables are
    /// never grown by labeling.
    pub fn set(&mut self, id: &TraceId, sample: Option<usize>) -> Result<(), PickSetError> {
        match self.lookup.get(id) {
            Some(&i) => {
                self.rows[i].sample = sample;
                Ok(())
            }
            None => Err(PickSetError::UnknownId(id.to_string())),
        }
    }

    /// Overwrite the entry at a table position; out-of-range is a no-op
    /// returning false.
    pub fn set_at(&mut self, index: usize, sample: Option<usize>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.sample = sample;
                true
            }
            None => false,
        }
    }
}
