// Trace identifiers
// Canonical keys joining pick tables produced by independent methods

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::trace::types::TraceError;

/// Canonical identifier for a single trace within the
/// experiment/run/event/trace-index namespace.
///
/// Rendered as `p_picks_{experiment}_{run}_{event}_trace{i}` where `event`
/// is the first two underscore-separated tokens of the waveform file's base
/// name and `i` is the 1-based trace position within that file's reading.
/// Two pick tables join only through exact equality of this rendered form,
/// so construction is confined to [`TraceId::from_path_parts`] (hierarchy
/// side) and [`TraceId::from_name`] (storage side); nothing else in the
/// crate splits path strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(String);

impl TraceId {
    /// Build an identifier from the storage-hierarchy parts.
    ///
    /// `file_stem` is the waveform file's base name without extension;
    /// its first two underscore-separated tokens form the event id (the
    /// whole stem if it has fewer). `trace_index` is 1-based.
    pub fn from_path_parts(
        experiment: &str,
        run: &str,
        file_stem: &str,
        trace_index: usize,
    ) -> TraceId {
        let tokens: Vec<&str> = file_stem.split('_').collect();
        let event = tokens[..tokens.len().min(2)].join("_");
        TraceId(format!(
            "p_picks_{experiment}_{run}_{event}_trace{trace_index}"
        ))
    }

    /// Identifiers for every trace of one file's reading, in reading order.
    pub fn for_file(
        experiment: &str,
        run: &str,
        file_stem: &str,
        trace_count: usize,
    ) -> Vec<TraceId> {
        (1..=trace_count)
            .map(|i| TraceId::from_path_parts(experiment, run, file_stem, i))
            .collect()
    }

    /// Reconstruct an identifier from its rendered form, as read back from
    /// a persisted pick table. Rejects names that do not carry the
    /// `p_picks_` prefix or a trailing `trace{i}` component.
    pub fn from_name(name: &str) -> Result<TraceId, TraceError> {
        if !name.starts_with("p_picks_") {
            return Err(TraceError::BadName(name.to_string()));
        }
        let valid_tail = name
            .rsplit('_')
            .next()
            .and_then(|tail| tail.strip_prefix("trace"))
            .and_then(|digits| digits.parse::<usize>().ok())
            .is_some_and(|i| i >= 1);
        if !valid_tail {
            return Err(TraceError::BadName(name.to_string()));
        }
        Ok(TraceId(name.to_string()))
    }

    /// The rendered identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 1-based trace position within the source file's reading
    pub fn trace_index(&self) -> usize {
        self.0
            .rsplit('_')
            .next()
            .and_then(|tail| tail.strip_prefix("trace"))
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TraceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TraceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        TraceId::from_name(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_from_path_parts() {
        let id = TraceId::from_path_parts(
            "Exp_T4",
            "Run2",
            "EventID_173_WindowSize_0.05s_Data",
            3,
        );
        assert_eq!(id.as_str(), "p_picks_Exp_T4_Run2_EventID_173_trace3");
        assert_eq!(id.trace_index(), 3);
    }

    #[test]
    fn test_short_file_stem_keeps_whole_stem() {
        let id = TraceId::from_path_parts("E", "R1", "shot", 1);
        assert_eq!(id.as_str(), "p_picks_E_R1_shot_trace1");
    }

    #[test]
    fn test_for_file_is_one_based_and_ordered() {
        let ids = TraceId::for_file("E", "R1", "EventID_9_x", 3);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0].trace_index(), 1);
        assert_eq!(ids[2].trace_index(), 3);
        assert!(ids[0] != ids[1]);
    }

    #[test]
    fn test_name_round_trip() {
        let id = TraceId::from_path_parts("Exp_T1", "Run7", "EventID_41_tail", 12);
        let back = TraceId::from_name(id.as_str()).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.trace_index(), 12);
    }

    #[test]
    fn test_from_name_rejects_bad_names() {
        assert!(TraceId::from_name("q_picks_E_R_ev_trace1").is_err());
        assert!(TraceId::from_name("p_picks_E_R_ev").is_err());
        assert!(TraceId::from_name("p_picks_E_R_ev_traceX").is_err());
        assert!(TraceId::from_name("p_picks_E_R_ev_trace0").is_err());
    }
}
