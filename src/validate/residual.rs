// Residual computation
// Inner join of pick tables on trace identifier, max pairwise residual,
// threshold filter

use serde::{Deserialize, Serialize};

use crate::picks::{Pick, PickSet};
use crate::trace::TraceId;

/// One flagged disagreement: the picks every joined table holds for a
/// trace, plus the largest pairwise residual among them.
///
/// Derived data, recomputed on each validation pass; the pick tables
/// remain the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualRecord {
    pub id: TraceId,

    /// One pick per joined table, in the order the tables were supplied
    pub picks: Vec<Pick>,

    /// Max |a − b| over all comparable pairs of picks
    pub max_residual: i64,
}

/// Join two or more pick tables on trace identifier and keep the records
/// whose picks disagree by more than `threshold` samples.
///
/// Inner-join semantics: an identifier absent from any one table is
/// dropped entirely, no partial records. Iteration (and output) order is
/// the first table's row order, so the result is deterministic given
/// deterministic inputs. Pairs where either pick is the sentinel are
/// incomparable and excluded from the max; a record with no comparable
/// pair at all is dropped, since a sentinel's magnitude is not a
/// disagreement. Tables with no identifier overlap yield an empty list,
/// not an error.
pub fn validate(sets: &[&PickSet], threshold: i64) -> Vec<ResidualRecord> {
    if sets.len() < 2 {
        log::warn!(
            "residual validation needs at least two pick tables, got {}",
            sets.len()
        );
        return Vec::new();
    }

    let first = sets[0];
    let rest = &sets[1..];

    let mut joined = 0usize;
    let mut flagged = Vec::new();

    for pick in first.iter() {
        let mut picks = Vec::with_capacity(sets.len());
        picks.push(pick.clone());
        for set in rest.iter() {
            match set.get(&pick.id) {
                Some(other) => picks.push(other.clone()),
                None => break,
            }
        }
        if picks.len() != sets.len() {
            continue;
        }
        joined += 1;

        if let Some(max_residual) = max_pairwise_residual(&picks) {
            if max_residual > threshold {
                flagged.push(ResidualRecord {
                    id: pick.id.clone(),
                    picks,
                    max_residual,
                });
            }
        }
    }

    log::info!(
        "residual pass: {joined} traces joined across {} tables, {} above threshold {threshold}",
        sets.len(),
        flagged.len()
    );
    flagged
}

/// Largest |a − b| over all unordered pairs with both picks set; `None`
/// when no pair is comparable.
fn max_pairwise_residual(picks: &[Pick]) -> Option<i64> {
    let mut max: Option<i64> = None;
    for (i, a) in picks.iter().enumerate() {
        for b in &picks[i + 1..] {
            if let (Some(sa), Some(sb)) = (a.sample, b.sample) {
                let residual = (sa as i64 - sb as i64).abs();
                max = Some(max.map_or(residual, |m| m.max(residual)));
            }
        }
    }
    max
}
