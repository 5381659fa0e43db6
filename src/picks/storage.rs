// Pick-table persistence
// CSV boundary format: columns `Name` and `marked_point`, one row per
// trace, row order = traversal order, -1 = sentinel

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::picks::set::PickSet;
use crate::picks::types::{PickSource, SENTINEL};
use crate::trace::TraceId;

#[derive(Debug, Error)]
pub enum PickStoreError {
    /// No table at the given path. Expected on a first pass; callers
    /// normally answer this with a fresh table.
    #[error("pick table not found: {}", .0.display())]
    Missing(PathBuf),

    /// A table exists but cannot be used as one
    #[error("malformed pick table {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the persisted table
#[derive(Debug, Serialize, Deserialize)]
struct PickRow {
    #[serde(rename = "Name")]
    name: String,
    marked_point: i64,
}

impl PickSet {
    /// Reconstruct a table from a persisted CSV file.
    ///
    /// The file does not record the producing method, so the caller names
    /// it; by convention it is carried in the file name
    /// (`p_picks_sta_lta.csv` and friends). Distinguishes a missing file
    /// ([`PickStoreError::Missing`], the expected first-pass case) from a
    /// present-but-unusable one ([`PickStoreError::Malformed`]).
    pub fn load(path: &Path, source: PickSource) -> Result<PickSet, PickStoreError> {
        let file = match fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PickStoreError::Missing(path.to_path_buf()));
            }
            Err(e) => return Err(PickStoreError::Io(e)),
        };

        let malformed = |reason: String| PickStoreError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut entries: Vec<(TraceId, Option<usize>)> = Vec::new();
        let mut seen = HashSet::new();

        for (row_no, result) in reader.deserialize::<PickRow>().enumerate() {
            let row = result.map_err(|e| malformed(format!("row {row_no}: {e}")))?;

            let id = TraceId::from_name(&row.name)
                .map_err(|e| malformed(format!("row {row_no}: {e}")))?;
            if !seen.insert(id.clone()) {
                return Err(malformed(format!("row {row_no}: duplicate name {id}")));
            }

            let sample = match row.marked_point {
                SENTINEL => None,
                s if s >= 0 => Some(s as usize),
                s => {
                    return Err(malformed(format!(
                        "row {row_no}: marked_point {s} is neither a sample index nor the sentinel"
                    )));
                }
            };
            entries.push((id, sample));
        }

        let mut set = PickSet::create(source, entries.iter().map(|(id, _)| id.clone()));
        for (id, sample) in &entries {
            // Ids come straight from the rows above, so this cannot fail.
            let _ = set.set(id, *sample);
        }

        log::debug!(
            "loaded {} pick rows from {} ({} sentinel)",
            set.len(),
            path.display(),
            set.sentinel_count()
        );
        Ok(set)
    }

    /// Load an existing table, or start a fresh all-sentinel one over the
    /// given identifiers when the file is absent or unusable. This is the
    /// normal entry point for a labeling or detection pass.
    pub fn load_or_create(
        path: &Path,
        source: PickSource,
        ids: impl IntoIterator<Item = TraceId>,
    ) -> PickSet {
        match PickSet::load(path, source) {
            Ok(set) => {
                log::info!(
                    "resuming {} table from {} at row {}",
                    source,
                    path.display(),
                    set.resume_point()
                );
                set
            }
            Err(PickStoreError::Missing(_)) => {
                log::info!("no pick table at {}, starting fresh", path.display());
                PickSet::create(source, ids)
            }
            Err(e) => {
                log::warn!("pick table at {} unusable ({e}), starting fresh", path.display());
                PickSet::create(source, ids)
            }
        }
    }

    /// Write the complete table.
    ///
    /// All-or-nothing from the caller's perspective: rows go to a
    /// temporary sibling which is renamed over the target only after a
    /// successful flush. Concurrent writers to the same path are not
    /// supported; the caller serializes saves.
    pub fn persist(&self, path: &Path) -> Result<(), PickStoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("{name}.tmp"),
            None => {
                return Err(PickStoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a writable file path: {}", path.display()),
                )));
            }
        };
        let tmp = path.with_file_name(tmp_name);

        let mut writer = csv::Writer::from_path(&tmp)?;
        for pick in self.iter() {
            writer.serialize(PickRow {
                name: pick.id.to_string(),
                marked_point: pick.marked_point(),
            })?;
        }
        writer.flush().map_err(PickStoreError::Io)?;
        drop(writer);

        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(PickStoreError::Io(e));
        }

        log::debug!("persisted {} pick rows to {}", self.len(), path.display());
        Ok(())
    }
}
