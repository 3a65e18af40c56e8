//! # vf-stage — VillagerForge Sequence Stage System
//!
//! Defines the canonical phases a follower reroll cycle passes through.
//! The engine never reasons about animations or DOM events — only PHASES.
//!
//! ## Philosophy
//!
//! Every reroll, regardless of front end, passes through the same semantic
//! phases:
//! - Trigger accepted → Death → Spawn → Shuffle frames → Settling → Idle
//!
//! This crate defines these phases, the timing profiles that pace them, and
//! the trace format that records one cycle's timeline.

pub mod event;
pub mod phase;
pub mod timing;
pub mod trace;

pub use event::*;
pub use phase::*;
pub use timing::*;
pub use trace::*;
