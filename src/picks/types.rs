// Pick types
// A pick marks the interpreted onset sample of one trace, tagged with the
// method that produced it

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::trace::TraceId;

/// Reserved `marked_point` value meaning "no pick established"
pub const SENTINEL: i64 = -1;

/// The method that produced a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickSource {
    /// Human annotator clicking on a plotted waveform
    Manual,
    /// Short-term/long-term energy-ratio trigger
    StaLta,
    /// Deviation from the initial noise envelope
    Noise,
}

impl PickSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickSource::Manual => "manual",
            PickSource::StaLta => "sta_lta",
            PickSource::Noise => "noise",
        }
    }
}

impl fmt::Display for PickSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labeled onset for one trace.
///
/// `sample` is `None` when no onset was established; at every persistence
/// and export boundary that state is rendered as the −1 sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub id: TraceId,

    #[serde(with = "sentinel_repr")]
    pub sample: Option<usize>,

    pub source: PickSource,
}

impl Pick {
    pub fn new(id: TraceId, sample: Option<usize>, source: PickSource) -> Self {
        Pick { id, sample, source }
    }

    /// Sample index in boundary form: the index itself, or −1
    pub fn marked_point(&self) -> i64 {
        match self.sample {
            Some(s) => s as i64,
            None => SENTINEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.sample.is_none()
    }
}

/// Serde adapter between `Option<usize>` and the −1 boundary convention
pub(crate) mod sentinel_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SENTINEL;

    pub fn serialize<S: Serializer>(
        sample: &Option<usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match sample {
            Some(s) => serializer.serialize_i64(*s as i64),
            None => serializer.serialize_i64(SENTINEL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let value = i64::deserialize(deserializer)?;
        if value == SENTINEL {
            Ok(None)
        } else if value >= 0 {
            Ok(Some(value as usize))
        } else {
            Err(serde::de::Error::custom(format!(
                "marked_point {value} is neither a sample index nor the sentinel"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> TraceId {
        TraceId::from_path_parts("E", "R1", "EventID_1_x", i)
    }

    #[test]
    fn test_marked_point_boundary_form() {
        let set_pick = Pick::new(id(1), Some(500), PickSource::Manual);
        assert_eq!(set_pick.marked_point(), 500);
        assert!(!set_pick.is_sentinel());

        let unset = Pick::new(id(2), None, PickSource::Manual);
        assert_eq!(unset.marked_point(), SENTINEL);
        assert!(unset.is_sentinel());
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(PickSource::Manual.as_str(), "manual");
        assert_eq!(PickSource::StaLta.as_str(), "sta_lta");
        assert_eq!(PickSource::Noise.as_str(), "noise");
    }

    #[test]
    fn test_sentinel_json_round_trip() {
        let pick = Pick::new(id(1), None, PickSource::Noise);
        let json = serde_json::to_string(&pick).unwrap();
        assert!(json.contains("\"sample\":-1"));
        assert!(json.contains("\"source\":\"noise\""));

        let back: Pick = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pick);
    }

    #[test]
    fn test_negative_non_sentinel_rejected() {
        let json = r#"{"id":"p_picks_E_R1_EventID_1_trace1","sample":-7,"source":"manual"}"#;
        assert!(serde_json::from_str::<Pick>(json).is_err());
    }
}
