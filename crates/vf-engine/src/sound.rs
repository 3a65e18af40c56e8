//! Sound seam
//!
//! Cue playback is fire-and-forget: implementations must not block the
//! sequence and must swallow their own failures.

use parking_lot::Mutex;

use vf_stage::SoundCue;

/// Audio output consumed by the sequence controller.
pub trait SoundPlayer: Send + Sync {
    /// Play a cue. Non-blocking, failures ignored.
    fn play(&self, cue: SoundCue);
}

/// Sound player that discards every cue.
#[derive(Debug, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&self, _cue: SoundCue) {}
}

/// Sound player that writes cues to the log.
#[derive(Debug, Default)]
pub struct LogSoundPlayer;

impl SoundPlayer for LogSoundPlayer {
    fn play(&self, cue: SoundCue) {
        log::debug!("sound: {}", cue.type_name());
    }
}

/// Sound player that records cues for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSoundPlayer {
    cues: Mutex<Vec<SoundCue>>,
}

impl RecordingSoundPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cues played so far, in order
    pub fn cues(&self) -> Vec<SoundCue> {
        self.cues.lock().clone()
    }

    /// Number of times `cue` has been played
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.lock().iter().filter(|c| **c == cue).count()
    }
}

impl SoundPlayer for RecordingSoundPlayer {
    fn play(&self, cue: SoundCue) {
        self.cues.lock().push(cue);
    }
}
