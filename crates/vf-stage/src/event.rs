//! PhaseEvent — a phase boundary with metadata
//!
//! Wraps a SequencePhase with its cycle-relative timestamp and the follower
//! form applied at that boundary, if any.

use serde::{Deserialize, Serialize};

use crate::phase::{SequencePhase, SoundCue};

/// One timestamped phase boundary inside a reroll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEvent {
    /// The canonical phase
    pub phase: SequencePhase,

    /// Timestamp in milliseconds from the start of the cycle
    pub timestamp_ms: f64,

    /// Form id applied at this boundary (spawn and shuffle frames)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,

    /// Sound cue fired at this boundary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cue: Option<SoundCue>,
}

impl PhaseEvent {
    /// Create a new phase event
    pub fn new(phase: SequencePhase, timestamp_ms: f64) -> Self {
        Self {
            phase,
            timestamp_ms,
            form: None,
            cue: None,
        }
    }

    /// Attach the applied form id
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Attach the fired sound cue
    pub fn with_cue(mut self, cue: SoundCue) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Get phase type name
    pub fn type_name(&self) -> &'static str {
        self.phase.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = PhaseEvent::new(SequencePhase::Spawn, 433.3)
            .with_form("Deer")
            .with_cue(SoundCue::Spawn);

        assert_eq!(event.phase, SequencePhase::Spawn);
        assert_eq!(event.timestamp_ms, 433.3);
        assert_eq!(event.form.as_deref(), Some("Deer"));
        assert_eq!(event.cue, Some(SoundCue::Spawn));
    }

    #[test]
    fn test_event_serialization_skips_empty_fields() {
        let bare = PhaseEvent::new(SequencePhase::Death, 0.0);
        let json = serde_json::to_string(&bare).unwrap();

        assert!(json.contains("death"));
        assert!(!json.contains("form"));
        assert!(!json.contains("cue"));

        let deserialized: PhaseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(bare, deserialized);
    }

    #[test]
    fn test_shuffle_event_round_trip() {
        let event = PhaseEvent::new(SequencePhase::Shuffle { step: 2, total: 8 }, 615.0)
            .with_form("Crow")
            .with_cue(SoundCue::ShuffleStep);

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: PhaseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
        assert_eq!(deserialized.type_name(), "shuffle");
    }
}
