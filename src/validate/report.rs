// Residual report export
// Optional JSON snapshot of a validation pass for sharing with reviewers;
// the pick tables stay authoritative

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::validate::residual::ResidualRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Snapshot of one validation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualReport {
    /// ISO 8601 timestamp of when the pass ran
    pub created_at: String,

    /// Residual threshold the records exceeded
    pub threshold: i64,

    /// Flagged records, in join order
    pub records: Vec<ResidualRecord>,
}

impl ResidualReport {
    pub fn new(threshold: i64, records: Vec<ResidualRecord>) -> Self {
        ResidualReport {
            created_at: chrono::Utc::now().to_rfc3339(),
            threshold,
            records,
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!(
            "residual report with {} records written to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a previously saved report
    pub fn load(path: &Path) -> Result<ResidualReport, ReportError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
