//! Timing profiles and the progressive shuffle delay curve

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timing profile for reroll cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast preview mode
    Turbo,
    /// Studio mode (near-instant, for audio and test work)
    Studio,
    /// Custom timing multiplier
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Timing validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimingError {
    #[error("shuffle_frames must be at least 1")]
    NoShuffleFrames,

    #[error("invalid shuffle delay range: base {base} ms, max {max} ms")]
    InvalidDelayRange { base: f64, max: f64 },

    #[error("speed factor must be positive, got {0}")]
    NonPositiveSpeed(f64),
}

/// Convenience alias for timing validation results
pub type TimingResult<T> = Result<T, TimingError>;

/// Detailed timing configuration for one reroll cycle
///
/// Speed factors are playback multipliers (> 1.0 = the renderer plays the
/// animation faster); the controller shortens its wait by the same factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceTiming {
    /// Profile type
    pub profile: TimingProfile,

    /// Playback speed factor for the death animation
    pub death_speed: f64,

    /// Playback speed factor for the spawn-in animation
    pub spawn_speed: f64,

    /// Number of rapid re-roll frames per shuffle
    pub shuffle_frames: u32,

    /// Delay after the first shuffle frame (ms)
    pub shuffle_base_delay_ms: f64,

    /// Delay approached by the final shuffle frames (ms)
    pub shuffle_max_delay_ms: f64,
}

impl SequenceTiming {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            death_speed: 1.2,
            spawn_speed: 1.5,
            shuffle_frames: 8,
            shuffle_base_delay_ms: 50.0,
            shuffle_max_delay_ms: 200.0,
        }
    }

    /// Turbo mode (shorter shuffle, faster animations)
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            death_speed: 2.4,
            spawn_speed: 3.0,
            shuffle_frames: 5,
            shuffle_base_delay_ms: 25.0,
            shuffle_max_delay_ms: 80.0,
        }
    }

    /// Studio mode (near-instant, keeps cue ordering audible in tests)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            death_speed: 10.0,
            spawn_speed: 10.0,
            shuffle_frames: 3,
            shuffle_base_delay_ms: 5.0,
            shuffle_max_delay_ms: 15.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            death_speed: self.death_speed / factor,
            spawn_speed: self.spawn_speed / factor,
            shuffle_frames: self.shuffle_frames,
            shuffle_base_delay_ms: self.shuffle_base_delay_ms * factor,
            shuffle_max_delay_ms: self.shuffle_max_delay_ms * factor,
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> TimingResult<()> {
        if self.shuffle_frames < 1 {
            return Err(TimingError::NoShuffleFrames);
        }
        let base = self.shuffle_base_delay_ms;
        let max = self.shuffle_max_delay_ms;
        if !(base >= 0.0 && max >= base) {
            return Err(TimingError::InvalidDelayRange { base, max });
        }
        for speed in [self.death_speed, self.spawn_speed] {
            if speed.is_nan() || speed <= 0.0 {
                return Err(TimingError::NonPositiveSpeed(speed));
            }
        }
        Ok(())
    }

    /// Delay after shuffle frame `step` (ms)
    ///
    /// Quadratic ease-out from base toward max: early frames flip fast, late
    /// frames linger. With a single frame there is no curve to interpolate
    /// and the delay is pinned to max.
    pub fn shuffle_delay_ms(&self, step: u32) -> f64 {
        if self.shuffle_frames <= 1 {
            return self.shuffle_max_delay_ms;
        }
        let progress = step as f64 / (self.shuffle_frames - 1) as f64;
        let eased = progress * (2.0 - progress);
        let span = self.shuffle_max_delay_ms - self.shuffle_base_delay_ms;
        self.shuffle_base_delay_ms + span * eased
    }

    /// Total time spent waiting inside the shuffle loop (ms)
    ///
    /// The final frame has no delay after it; the cycle moves straight to
    /// settling.
    pub fn shuffle_total_ms(&self) -> f64 {
        (0..self.shuffle_frames.saturating_sub(1))
            .map(|step| self.shuffle_delay_ms(step))
            .sum()
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::normal()
    }
}

/// Timestamp accumulator for sequential phase events
///
/// Advances by the waits the controller plans, so trace timestamps are
/// deterministic and independent of scheduler jitter.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    current_ms: f64,
}

impl PhaseClock {
    /// Create a new clock at zero
    pub fn new() -> Self {
        Self { current_ms: 0.0 }
    }

    /// Reset to zero
    pub fn reset(&mut self) {
        self.current_ms = 0.0;
    }

    /// Get current timestamp
    pub fn current(&self) -> f64 {
        self.current_ms
    }

    /// Advance by duration and return the new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(0.0);
        self.current_ms
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}
