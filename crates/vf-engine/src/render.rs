//! Renderer seam
//!
//! The sequence controller only ever talks to [`Renderer`]. A skeletal
//! animation backend implements it for real playback; the included
//! implementations cover headless runs ([`NullRenderer`]), terminal
//! output ([`ConsoleRenderer`]) and test inspection
//! ([`RecordingRenderer`]).
//!
//! Durations are reported in milliseconds. A `0.0` duration means the
//! current form has no matching animation and the caller should advance
//! immediately.

use parking_lot::Mutex;

use vf_catalog::Catalog;

use crate::follower::FollowerConfig;

/// Visual output consumed by the sequence controller.
pub trait Renderer: Send + Sync {
    /// Synchronously update visual state to the given configuration.
    fn apply_config(&self, config: &FollowerConfig, catalog: &Catalog);

    /// Update the displayed name label.
    fn set_label(&self, label: &str);

    /// Play a death-style animation scaled by `speed_factor`.
    ///
    /// Returns the unscaled animation duration in milliseconds, `0.0`
    /// when the current form has none.
    fn play_death(&self, speed_factor: f64) -> f64;

    /// Play a spawn/arrival animation scaled by `speed_factor`.
    ///
    /// Returns the unscaled duration in milliseconds. Implementations
    /// without one return `0.0` and fall back to the idle pose.
    fn play_spawn_in(&self, speed_factor: f64) -> f64;

    /// Reset the displayed animation to the resting idle state.
    fn reset_to_idle(&self);

    /// Begin a continuous render loop, if the implementation has one.
    fn start(&self) {}
}

/// Renderer that does nothing and reports no animations.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn apply_config(&self, _config: &FollowerConfig, _catalog: &Catalog) {}

    fn set_label(&self, _label: &str) {}

    fn play_death(&self, _speed_factor: f64) -> f64 {
        0.0
    }

    fn play_spawn_in(&self, _speed_factor: f64) -> f64 {
        0.0
    }

    fn reset_to_idle(&self) {}
}

/// Renderer that narrates the stage to the log.
#[derive(Debug)]
pub struct ConsoleRenderer {
    death_ms: f64,
    spawn_ms: f64,
}

impl ConsoleRenderer {
    /// Create with plausible stage animation durations
    pub fn new() -> Self {
        Self {
            death_ms: 600.0,
            spawn_ms: 450.0,
        }
    }

    /// Create with explicit death and spawn durations in milliseconds
    pub fn with_durations(death_ms: f64, spawn_ms: f64) -> Self {
        Self { death_ms, spawn_ms }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ConsoleRenderer {
    fn apply_config(&self, config: &FollowerConfig, catalog: &Catalog) {
        log::info!(
            "stage: {} (variant {}, colors {}) wearing {}",
            catalog.display_name(&config.form),
            config.form_variant_idx,
            config.form_color_set_idx,
            config.clothing
        );
    }

    fn set_label(&self, label: &str) {
        log::info!("label: {label}");
    }

    fn play_death(&self, speed_factor: f64) -> f64 {
        log::debug!("stage: death animation at {speed_factor}x");
        self.death_ms
    }

    fn play_spawn_in(&self, speed_factor: f64) -> f64 {
        log::debug!("stage: spawn-in animation at {speed_factor}x");
        self.spawn_ms
    }

    fn reset_to_idle(&self) {
        log::debug!("stage: idle");
    }
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Applied(FollowerConfig),
    Label(String),
    DeathPlayed { speed: f64 },
    SpawnPlayed { speed: f64 },
    ResetToIdle,
    Started,
}

/// Renderer that records every call for later assertions.
#[derive(Debug)]
pub struct RecordingRenderer {
    ops: Mutex<Vec<RenderOp>>,
    death_ms: f64,
    spawn_ms: f64,
}

impl RecordingRenderer {
    /// Create with round-number durations (120ms death, 90ms spawn)
    pub fn new() -> Self {
        Self::with_durations(120.0, 90.0)
    }

    /// Create with explicit reported durations in milliseconds
    pub fn with_durations(death_ms: f64, spawn_ms: f64) -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            death_ms,
            spawn_ms,
        }
    }

    /// Snapshot of the recorded calls in order
    pub fn ops(&self) -> Vec<RenderOp> {
        self.ops.lock().clone()
    }

    /// Configurations applied so far, in order
    pub fn applied_configs(&self) -> Vec<FollowerConfig> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                RenderOp::Applied(config) => Some(config.clone()),
                _ => None,
            })
            .collect()
    }

    /// Labels set so far, in order
    pub fn labels(&self) -> Vec<String> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                RenderOp::Label(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: RenderOp) {
        self.ops.lock().push(op);
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn apply_config(&self, config: &FollowerConfig, _catalog: &Catalog) {
        self.record(RenderOp::Applied(config.clone()));
    }

    fn set_label(&self, label: &str) {
        self.record(RenderOp::Label(label.to_string()));
    }

    fn play_death(&self, speed_factor: f64) -> f64 {
        self.record(RenderOp::DeathPlayed {
            speed: speed_factor,
        });
        self.death_ms
    }

    fn play_spawn_in(&self, speed_factor: f64) -> f64 {
        self.record(RenderOp::SpawnPlayed {
            speed: speed_factor,
        });
        self.spawn_ms
    }

    fn reset_to_idle(&self) {
        self.record(RenderOp::ResetToIdle);
    }

    fn start(&self) {
        self.record(RenderOp::Started);
    }
}
