//! SequenceTrace — the complete timeline of one reroll cycle
//!
//! A trace captures every phase boundary from trigger accept to idle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::PhaseEvent;
use crate::phase::SequencePhase;
use crate::timing::TimingProfile;

/// A complete trace of phase events for one reroll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceTrace {
    /// Unique identifier for this cycle
    pub cycle_id: String,

    /// All events in chronological order
    pub events: Vec<PhaseEvent>,

    /// When this trace was recorded
    pub recorded_at: DateTime<Utc>,

    /// Timing profile the cycle ran under
    #[serde(default)]
    pub timing_profile: Option<TimingProfile>,

    /// Custom metadata (seed, catalog name, ...)
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl SequenceTrace {
    /// Create a new empty trace
    pub fn new(cycle_id: impl Into<String>) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            timing_profile: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: PhaseEvent) {
        self.events.push(event);
    }

    /// Add an event and return self (builder pattern)
    pub fn with_event(mut self, event: PhaseEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Set the timing profile
    pub fn with_profile(mut self, profile: TimingProfile) -> Self {
        self.timing_profile = Some(profile);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        if self.events.is_empty() {
            return 0.0;
        }
        let first = self.events.first().map(|e| e.timestamp_ms).unwrap_or(0.0);
        let last = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0.0);
        last - first
    }

    /// Get events by phase type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&PhaseEvent> {
        self.events
            .iter()
            .filter(|e| e.type_name() == type_name)
            .collect()
    }

    /// Check if trace contains a specific phase type
    pub fn has_phase(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.type_name() == type_name)
    }

    /// Phase type names in event order
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.type_name()).collect()
    }

    /// Form ids in the order they were applied
    pub fn applied_forms(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| e.form.as_deref())
            .collect()
    }

    /// Number of shuffle frames in the trace
    pub fn shuffle_steps(&self) -> usize {
        self.events_by_type("shuffle").len()
    }

    /// The last phase recorded, if any
    pub fn final_phase(&self) -> Option<SequencePhase> {
        self.events.last().map(|e| e.phase)
    }

    /// The form left on screen when the cycle ended
    pub fn final_form(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| e.form.as_deref())
    }

    /// Validate trace has the expected cycle shape
    pub fn validate(&self) -> CycleValidation {
        CycleValidation {
            has_death: self.has_phase("death"),
            has_spawn: self.has_phase("spawn"),
            shuffle_step_count: self.shuffle_steps(),
            has_settling: self.has_phase("settling"),
            ends_idle: self.final_phase() == Some(SequencePhase::Idle),
        }
    }

    /// Get summary of trace
    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            cycle_id: self.cycle_id.clone(),
            event_count: self.events.len(),
            duration_ms: self.duration_ms(),
            shuffle_steps: self.shuffle_steps(),
            final_form: self.final_form().map(|f| f.to_string()),
            landed_idle: self.final_phase() == Some(SequencePhase::Idle),
        }
    }
}

/// Validation result for a cycle trace
#[derive(Debug, Clone, Default)]
pub struct CycleValidation {
    pub has_death: bool,
    pub has_spawn: bool,
    pub shuffle_step_count: usize,
    pub has_settling: bool,
    pub ends_idle: bool,
}

impl CycleValidation {
    /// Check the trace covers a full cycle
    pub fn is_valid(&self) -> bool {
        self.has_death && self.has_spawn && self.has_settling && self.ends_idle
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.has_death {
            warnings.push("Missing death phase");
        }
        if !self.has_spawn {
            warnings.push("Missing spawn phase");
        }
        if self.shuffle_step_count == 0 {
            warnings.push("No shuffle frames recorded");
        }
        if !self.has_settling {
            warnings.push("Missing settling phase");
        }
        if !self.ends_idle {
            warnings.push("Cycle did not land back at idle");
        }

        warnings
    }
}

/// Summary of a trace for quick overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub cycle_id: String,
    pub event_count: usize,
    pub duration_ms: f64,
    pub shuffle_steps: usize,
    pub final_form: Option<String>,
    pub landed_idle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::SoundCue;

    fn create_basic_trace() -> SequenceTrace {
        let mut trace = SequenceTrace::new("cycle-000001");

        trace.push(PhaseEvent::new(SequencePhase::Death, 0.0).with_cue(SoundCue::Death));
        trace.push(
            PhaseEvent::new(SequencePhase::Spawn, 433.3)
                .with_form("Deer")
                .with_cue(SoundCue::Spawn),
        );
        for step in 0..8 {
            trace.push(
                PhaseEvent::new(
                    SequencePhase::Shuffle { step, total: 8 },
                    500.0 + step as f64 * 120.0,
                )
                .with_form("Crow"),
            );
        }
        trace.push(PhaseEvent::new(SequencePhase::Settling, 1500.0).with_cue(SoundCue::Land));
        trace.push(PhaseEvent::new(SequencePhase::Idle, 1500.0));

        trace
    }

    #[test]
    fn test_trace_creation() {
        let trace = create_basic_trace();

        assert_eq!(trace.cycle_id, "cycle-000001");
        assert_eq!(trace.events.len(), 12); // death + spawn + 8 shuffle + settling + idle
        assert_eq!(trace.shuffle_steps(), 8);
    }

    #[test]
    fn test_trace_duration() {
        let trace = create_basic_trace();
        assert_eq!(trace.duration_ms(), 1500.0);
    }

    #[test]
    fn test_trace_phase_order_queries() {
        let trace = create_basic_trace();

        assert!(trace.has_phase("death"));
        assert!(trace.has_phase("settling"));
        assert_eq!(trace.phase_names().first(), Some(&"death"));
        assert_eq!(trace.final_phase(), Some(SequencePhase::Idle));
        assert_eq!(trace.final_form(), Some("Crow"));
        assert_eq!(trace.applied_forms().len(), 9); // spawn + 8 shuffle frames
    }

    #[test]
    fn test_trace_validation() {
        let trace = create_basic_trace();
        let validation = trace.validate();

        assert!(validation.has_death);
        assert!(validation.has_spawn);
        assert_eq!(validation.shuffle_step_count, 8);
        assert!(validation.is_valid());
        assert!(validation.warnings().is_empty());

        let partial = SequenceTrace::new("cycle-000002")
            .with_event(PhaseEvent::new(SequencePhase::Death, 0.0));
        let validation = partial.validate();
        assert!(!validation.is_valid());
        assert!(validation.warnings().contains(&"Missing spawn phase"));
    }

    #[test]
    fn test_trace_summary() {
        let summary = create_basic_trace().summary();

        assert_eq!(summary.event_count, 12);
        assert_eq!(summary.shuffle_steps, 8);
        assert_eq!(summary.final_form.as_deref(), Some("Crow"));
        assert!(summary.landed_idle);
    }

    #[test]
    fn test_trace_serialization() {
        let trace = create_basic_trace()
            .with_profile(TimingProfile::Normal)
            .with_metadata("seed", serde_json::json!(42));
        let json = serde_json::to_string_pretty(&trace).unwrap();

        assert!(json.contains("cycle-000001"));
        assert!(json.contains("shuffle"));

        let deserialized: SequenceTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.cycle_id, trace.cycle_id);
        assert_eq!(deserialized.events.len(), trace.events.len());
        assert_eq!(deserialized.timing_profile, Some(TimingProfile::Normal));
    }
}
