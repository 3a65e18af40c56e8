//! SequencePhase — the core enum defining all canonical reroll phases
//!
//! A phase is NOT an animation and NOT a renderer callback.
//! A phase is the SEMANTIC MEANING of a moment in the reroll flow.

use serde::{Deserialize, Serialize};

/// Canonical reroll phase — the universal language of one cycle
///
/// Exactly one phase is active per controller at any time. Rendering and
/// audio respond to phases, never to raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SequencePhase {
    /// Nothing in flight, triggers are accepted
    Idle,

    /// Current follower plays its death animation
    Death,

    /// Freshly generated follower spawns in
    Spawn,

    /// Rapid re-roll frames with progressively longer delays
    Shuffle {
        /// Which shuffle frame (0-indexed)
        step: u32,
        /// Total frames in this shuffle
        total: u32,
    },

    /// Landing: final sound cue, renderer reset to idle pose
    Settling,
}

impl SequencePhase {
    /// Get a simple string name for this phase type
    pub fn type_name(&self) -> &'static str {
        match self {
            SequencePhase::Idle => "idle",
            SequencePhase::Death => "death",
            SequencePhase::Spawn => "spawn",
            SequencePhase::Shuffle { .. } => "shuffle",
            SequencePhase::Settling => "settling",
        }
    }

    /// Check if this phase belongs to an in-flight cycle
    ///
    /// Triggers arriving while a busy phase is active are dropped.
    pub fn is_busy(&self) -> bool {
        !matches!(self, SequencePhase::Idle)
    }

    /// Get all valid phase type names for validation
    pub fn all_type_names() -> &'static [&'static str] {
        &["idle", "death", "spawn", "shuffle", "settling"]
    }
}

impl Default for SequencePhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Sound cue taxonomy — what the audio seam consumes
///
/// Cue timing is owned by the sequence controller; the audio layer only
/// receives cues and plays them fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Trigger accepted (reroll button press)
    Click,
    /// Death animation begins
    Death,
    /// Spawn-in animation begins
    Spawn,
    /// One shuffle frame applied (suppressed on the final frame)
    ShuffleStep,
    /// Cycle lands back at idle
    Land,
}

impl SoundCue {
    /// Get a simple string name for this cue
    pub fn type_name(&self) -> &'static str {
        match self {
            SoundCue::Click => "click",
            SoundCue::Death => "death",
            SoundCue::Spawn => "spawn",
            SoundCue::ShuffleStep => "shuffle_step",
            SoundCue::Land => "land",
        }
    }

    /// All cues in the taxonomy
    pub fn all() -> &'static [SoundCue] {
        &[
            SoundCue::Click,
            SoundCue::Death,
            SoundCue::Spawn,
            SoundCue::ShuffleStep,
            SoundCue::Land,
        ]
    }
}
