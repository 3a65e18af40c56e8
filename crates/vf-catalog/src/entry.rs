//! OptionEntry — one selectable form or clothing item

use serde::{Deserialize, Serialize};

use crate::color::ColorSet;

/// One selectable catalog entry
///
/// Forms and clothing share this shape; clothing entries simply leave
/// `category` at the default and usually carry no display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    /// Stable identifier (the key in the source document)
    pub id: String,

    /// Display name; the id stands in when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Rarity category; 0 = common/base, higher = rarer
    #[serde(default)]
    pub category: u32,

    /// Skin variant names; validated non-empty at load
    pub variants: Vec<String>,

    /// Entry-specific palettes
    #[serde(default)]
    pub sets: Vec<ColorSet>,

    /// Whether renderers may tint this entry at all
    #[serde(default)]
    pub can_be_tinted: bool,
}

impl OptionEntry {
    /// Create an entry with a single variant named after the id
    pub fn new(id: impl Into<String>, category: u32) -> Self {
        let id = id.into();
        Self {
            name: None,
            category,
            variants: vec![id.clone()],
            sets: Vec::new(),
            can_be_tinted: false,
            id,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the variant list
    pub fn with_variants(mut self, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.variants = variants.into_iter().map(|v| v.into()).collect();
        self
    }

    /// Replace the palette list
    pub fn with_sets(mut self, sets: Vec<ColorSet>) -> Self {
        self.sets = sets;
        self
    }

    /// Mark the entry as tintable
    pub fn tintable(mut self) -> Self {
        self.can_be_tinted = true;
        self
    }

    /// Display name with fallback to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
