//! Palette data model — colors and the render slots they target

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color as stored in the follower data document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Create a color from components
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Unit-range components for renderers that want 0.0..=1.0 floats
    pub fn to_unit(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// One palette entry: a color applied to a set of named render slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotColor {
    /// The tint to apply
    pub color: Rgba8,

    /// Slot names this color targets
    pub slots: Vec<String>,
}

impl SlotColor {
    /// Create a palette entry
    pub fn new(color: Rgba8, slots: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            color,
            slots: slots.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// An ordered palette: the core treats it as opaque beyond indexing
pub type ColorSet = Vec<SlotColor>;
