//! Reroll sequence controller
//!
//! Drives the timed cycle `Idle -> Death -> Spawn -> Shuffle(N) ->
//! Settling -> Idle` against the renderer and sound seams. A busy flag
//! keeps at most one cycle in flight; triggers that arrive mid-cycle
//! are dropped, never queued.
//!
//! Each completed cycle yields a [`CycleReport`] whose trace carries the
//! planned timeline (phase start offsets accumulated from the computed
//! waits), so tests can assert on timing without measuring wall clocks.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use vf_catalog::Catalog;
use vf_stage::{PhaseClock, PhaseEvent, SequencePhase, SequenceTiming, SequenceTrace, SoundCue};

use crate::error::EngineResult;
use crate::follower::FollowerConfig;
use crate::randomizer::Randomizer;
use crate::render::Renderer;
use crate::sound::SoundPlayer;

/// Outcome of a reroll trigger.
#[derive(Debug)]
pub enum RerollOutcome {
    /// The cycle ran to completion.
    Completed(CycleReport),
    /// A cycle was already in flight; the trigger was dropped.
    Ignored,
}

impl RerollOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Ignored => None,
        }
    }

    pub fn into_report(self) -> Option<CycleReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Ignored => None,
        }
    }
}

/// Record of one completed reroll cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_id: String,
    /// Configuration left on stage when the cycle settled
    pub final_config: FollowerConfig,
    pub trace: SequenceTrace,
}

/// Running session counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RerollStats {
    pub cycles_completed: u64,
    pub triggers_ignored: u64,
    pub configs_applied: u64,
    /// Applied forms tallied by rarity category
    pub forms_by_category: BTreeMap<u32, u64>,
}

/// Reroll cycle state machine.
///
/// All methods take `&self`; the controller is safe to share behind an
/// [`Arc`] between the trigger surface and the driving task.
pub struct SequenceController {
    randomizer: Mutex<Randomizer>,
    catalog: Arc<Catalog>,
    renderer: Arc<dyn Renderer>,
    sounds: Arc<dyn SoundPlayer>,
    timing: SequenceTiming,
    busy: AtomicBool,
    phase: Mutex<SequencePhase>,
    stats: Mutex<RerollStats>,
    cycle_counter: AtomicU64,
}

impl SequenceController {
    /// Create with the standard timing profile
    pub fn new(
        randomizer: Randomizer,
        renderer: Arc<dyn Renderer>,
        sounds: Arc<dyn SoundPlayer>,
    ) -> EngineResult<Self> {
        Self::with_timing(randomizer, renderer, sounds, SequenceTiming::normal())
    }

    /// Create with an explicit timing profile
    pub fn with_timing(
        randomizer: Randomizer,
        renderer: Arc<dyn Renderer>,
        sounds: Arc<dyn SoundPlayer>,
        timing: SequenceTiming,
    ) -> EngineResult<Self> {
        timing.validate()?;
        let catalog = randomizer.catalog_handle();
        Ok(Self {
            randomizer: Mutex::new(randomizer),
            catalog,
            renderer,
            sounds,
            timing,
            busy: AtomicBool::new(false),
            phase: Mutex::new(SequencePhase::Idle),
            stats: Mutex::new(RerollStats::default()),
            cycle_counter: AtomicU64::new(0),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE & STATS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current phase of the state machine
    pub fn phase(&self) -> SequencePhase {
        *self.phase.lock()
    }

    /// Whether a cycle is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Active timing profile
    pub fn timing(&self) -> &SequenceTiming {
        &self.timing
    }

    /// Snapshot of the session counters
    pub fn stats(&self) -> RerollStats {
        self.stats.lock().clone()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CYCLE EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Generate and apply one configuration outside the cycle machine.
    ///
    /// Used at startup so the stage shows a follower before the first
    /// trigger.
    pub fn present_initial(&self) -> FollowerConfig {
        let config = self.randomizer.lock().generate();
        self.apply_config(&config);
        config
    }

    /// Run one reroll cycle, or drop the trigger if one is in flight.
    ///
    /// Suspension points are exactly the phase boundaries: the death and
    /// spawn waits scaled by their speed factors, and the eased per-step
    /// shuffle delays.
    pub async fn reroll(&self) -> RerollOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("reroll trigger dropped: cycle already in flight");
            self.stats.lock().triggers_ignored += 1;
            return RerollOutcome::Ignored;
        }

        let seq = self.cycle_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let cycle_id = format!("cycle-{seq:06}");
        log::info!("{cycle_id}: reroll accepted");
        self.sounds.play(SoundCue::Click);

        let report = self.run_cycle(cycle_id).await;

        self.set_phase(SequencePhase::Idle);
        self.busy.store(false, Ordering::Release);
        self.stats.lock().cycles_completed += 1;
        log::info!(
            "{}: settled on {} after {:.0}ms",
            report.cycle_id,
            report.final_config.form,
            report.trace.duration_ms()
        );

        RerollOutcome::Completed(report)
    }

    async fn run_cycle(&self, cycle_id: String) -> CycleReport {
        let mut clock = PhaseClock::new();
        let mut trace = SequenceTrace::new(&cycle_id).with_profile(self.timing.profile);

        // Death: the old follower goes down. The renderer has already
        // scaled playback, so the wait is the reported duration divided
        // by the same factor.
        self.set_phase(SequencePhase::Death);
        let death_ms = self.renderer.play_death(self.timing.death_speed);
        self.sounds.play(SoundCue::Death);
        trace.push(
            PhaseEvent::new(SequencePhase::Death, clock.current()).with_cue(SoundCue::Death),
        );
        if death_ms > 0.0 {
            let wait = death_ms / self.timing.death_speed;
            clock.advance(wait);
            sleep_ms(wait).await;
        } else {
            log::debug!("{cycle_id}: no death animation, advancing");
        }

        // Spawn: a fresh follower drops in already wearing its new
        // configuration.
        self.set_phase(SequencePhase::Spawn);
        let spawn_config = self.randomizer.lock().generate();
        self.apply_config(&spawn_config);
        self.sounds.play(SoundCue::Spawn);
        let spawn_ms = self.renderer.play_spawn_in(self.timing.spawn_speed);
        trace.push(
            PhaseEvent::new(SequencePhase::Spawn, clock.current())
                .with_form(&spawn_config.form)
                .with_cue(SoundCue::Spawn),
        );
        if spawn_ms > 0.0 {
            let wait = spawn_ms / self.timing.spawn_speed;
            clock.advance(wait);
            sleep_ms(wait).await;
        } else {
            log::debug!("{cycle_id}: no spawn animation, advancing");
        }

        // Shuffle: the whole batch is drawn up front so the sequence is
        // fixed before the first frame shows.
        let total = self.timing.shuffle_frames;
        let configs = self.randomizer.lock().generate_multiple(total as usize);
        for (step, config) in configs.iter().enumerate() {
            let step_no = step as u32;
            let phase = SequencePhase::Shuffle {
                step: step_no,
                total,
            };
            self.set_phase(phase);
            self.apply_config(config);

            let is_last = step + 1 == configs.len();
            if !is_last {
                self.sounds.play(SoundCue::ShuffleStep);
            }

            let mut event = PhaseEvent::new(phase, clock.current()).with_form(&config.form);
            if !is_last {
                event = event.with_cue(SoundCue::ShuffleStep);
            }
            trace.push(event);

            // No suspension after the final frame, except the fixed
            // single delay of a one-frame shuffle.
            if !is_last || total == 1 {
                let wait = self.timing.shuffle_delay_ms(step_no);
                clock.advance(wait);
                sleep_ms(wait).await;
            }
        }

        // Settling: land, drop back to the idle pose.
        self.set_phase(SequencePhase::Settling);
        self.sounds.play(SoundCue::Land);
        self.renderer.reset_to_idle();
        trace.push(
            PhaseEvent::new(SequencePhase::Settling, clock.current()).with_cue(SoundCue::Land),
        );
        trace.push(PhaseEvent::new(SequencePhase::Idle, clock.current()));

        let final_config = configs.into_iter().last().unwrap_or(spawn_config);
        CycleReport {
            cycle_id,
            final_config,
            trace,
        }
    }

    fn apply_config(&self, config: &FollowerConfig) {
        self.renderer.apply_config(config, &self.catalog);
        self.renderer.set_label(config.label(&self.catalog));

        let mut stats = self.stats.lock();
        stats.configs_applied += 1;
        if let Some(form) = self.catalog.form(&config.form) {
            *stats.forms_by_category.entry(form.category).or_insert(0) += 1;
        }
    }

    fn set_phase(&self, phase: SequencePhase) {
        log::trace!("phase -> {}", phase.type_name());
        *self.phase.lock() = phase;
    }
}

impl std::fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceController")
            .field("phase", &self.phase())
            .field("busy", &self.is_busy())
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

async fn sleep_ms(ms: f64) {
    tokio::time::sleep(Duration::from_secs_f64(ms / 1000.0)).await;
}
