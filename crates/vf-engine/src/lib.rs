//! VillagerForge Engine — Follower randomization and reroll sequencing
//!
//! The engine pairs two pieces:
//!
//! - [`Randomizer`] draws complete follower configurations from a
//!   [`vf_catalog::Catalog`] using weighted category selection.
//! - [`SequenceController`] drives the timed reroll cycle
//!   (death, spawn, shuffle, settling) against a [`Renderer`] and a
//!   [`SoundPlayer`], emitting a [`vf_stage::SequenceTrace`] per cycle.
//!
//! ## Key Features
//!
//! - **Weighted draws**: rarity-tiered category selection with a uniform
//!   fallback when no weighted category has entries
//! - **Injectable randomness**: any [`RandomSource`] can back the
//!   randomizer, so tests run on fixed seeds or scripted sequences
//! - **Reentrancy guard**: at most one reroll cycle in flight; extra
//!   triggers are dropped, never queued
//! - **Pluggable output**: renderer and sound seams are traits with
//!   console, recording, and null implementations included

pub mod controller;
pub mod error;
pub mod follower;
pub mod randomizer;
pub mod render;
pub mod rng;
pub mod sound;

pub use controller::{CycleReport, RerollOutcome, RerollStats, SequenceController};
pub use error::{EngineError, EngineResult};
pub use follower::FollowerConfig;
pub use randomizer::Randomizer;
pub use render::{ConsoleRenderer, NullRenderer, RecordingRenderer, RenderOp, Renderer};
pub use rng::RandomSource;
pub use sound::{LogSoundPlayer, NullSoundPlayer, RecordingSoundPlayer, SoundPlayer};
