//! # vf-catalog — Follower Catalog for VillagerForge
//!
//! Owns the data model every other crate draws from: option entries (forms
//! and clothing), their palettes, the category weight table, and the
//! category index the randomizer samples.
//!
//! ## Key Features
//!
//! - **Document Loading**: serde mirror of the follower data JSON with
//!   required/optional fields made explicit
//! - **One-Shot Validation**: the document is checked once at load; a
//!   `Catalog` is valid by construction and read-only afterwards
//! - **Category Index**: entries grouped by category exactly once, with
//!   category 0 as the default bucket
//! - **Demo Catalog**: built-in data set so tests and the demo binary run
//!   without external files

pub mod catalog;
pub mod color;
pub mod document;
pub mod entry;
pub mod error;
pub mod weights;

pub use catalog::*;
pub use color::*;
pub use document::*;
pub use entry::*;
pub use error::*;
pub use weights::*;
