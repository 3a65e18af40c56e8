//! Catalog — validated follower data plus its category index
//!
//! A `Catalog` exists only after one-shot validation; holders never need to
//! re-check it. It is read-only for its whole life.

use std::collections::BTreeMap;
use std::path::Path;

use crate::color::{ColorSet, Rgba8, SlotColor};
use crate::document::CatalogDocument;
use crate::entry::OptionEntry;
use crate::error::{CatalogError, CatalogResult};

/// Form entries grouped by category, built exactly once
///
/// Invariant: every entry appears in exactly one bucket, the bucket matching
/// its `category` field.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    buckets: BTreeMap<u32, Vec<OptionEntry>>,
}

impl CatalogIndex {
    /// Group entries by category
    pub fn from_entries(entries: &[OptionEntry]) -> Self {
        let mut buckets: BTreeMap<u32, Vec<OptionEntry>> = BTreeMap::new();
        for entry in entries {
            buckets.entry(entry.category).or_default().push(entry.clone());
        }
        Self { buckets }
    }

    /// Entries in one category
    pub fn bucket(&self, category: u32) -> Option<&[OptionEntry]> {
        self.buckets.get(&category).map(|bucket| bucket.as_slice())
    }

    /// Categories present, ascending
    pub fn categories(&self) -> impl Iterator<Item = u32> + '_ {
        self.buckets.keys().copied()
    }

    /// Number of non-empty categories
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total entries across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    /// Check if the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(|bucket| bucket.is_empty())
    }

    /// All entries concatenated in ascending category order
    ///
    /// The zero-weight fallback draws uniformly from this.
    pub fn flatten(&self) -> Vec<&OptionEntry> {
        self.buckets.values().flat_map(|bucket| bucket.iter()).collect()
    }
}

/// Validated follower catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    forms: Vec<OptionEntry>,
    clothing: Vec<OptionEntry>,
    general_color_sets: Vec<ColorSet>,
    default_clothing: String,
    index: CatalogIndex,
}

impl Catalog {
    /// Build and validate a catalog from materialized entries
    pub fn from_entries(
        forms: Vec<OptionEntry>,
        clothing: Vec<OptionEntry>,
        general_color_sets: Vec<ColorSet>,
        default_clothing: impl Into<String>,
    ) -> CatalogResult<Self> {
        let catalog = Self::assemble(forms, clothing, general_color_sets, default_clothing.into());
        catalog.check()?;
        log::debug!(
            "Catalog validated: {} forms in {} categories, {} clothing items, {} shared palettes",
            catalog.forms.len(),
            catalog.index.bucket_count(),
            catalog.clothing.len(),
            catalog.general_color_sets.len()
        );
        Ok(catalog)
    }

    /// Load and validate a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        CatalogDocument::from_path(path)?.validate()
    }

    fn assemble(
        forms: Vec<OptionEntry>,
        clothing: Vec<OptionEntry>,
        general_color_sets: Vec<ColorSet>,
        default_clothing: String,
    ) -> Self {
        let index = CatalogIndex::from_entries(&forms);
        Self {
            forms,
            clothing,
            general_color_sets,
            default_clothing,
            index,
        }
    }

    fn check(&self) -> CatalogResult<()> {
        if self.forms.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        for entry in self.forms.iter().chain(self.clothing.iter()) {
            if entry.variants.is_empty() {
                return Err(CatalogError::EmptyVariants {
                    id: entry.id.clone(),
                });
            }
        }
        if self.clothing(&self.default_clothing).is_none() {
            return Err(CatalogError::MissingDefaultClothing {
                id: self.default_clothing.clone(),
            });
        }
        Ok(())
    }

    /// All form entries
    pub fn forms(&self) -> &[OptionEntry] {
        &self.forms
    }

    /// All clothing entries
    pub fn clothing_items(&self) -> &[OptionEntry] {
        &self.clothing
    }

    /// Look up a form by id
    pub fn form(&self, id: &str) -> Option<&OptionEntry> {
        self.forms.iter().find(|entry| entry.id == id)
    }

    /// Look up a clothing item by id
    pub fn clothing(&self, id: &str) -> Option<&OptionEntry> {
        self.clothing.iter().find(|entry| entry.id == id)
    }

    /// Shared palettes every tintable form can draw from
    pub fn general_color_sets(&self) -> &[ColorSet] {
        &self.general_color_sets
    }

    /// The clothing id the generator pins every configuration to
    pub fn default_clothing_id(&self) -> &str {
        &self.default_clothing
    }

    /// The category index the randomizer samples
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Number of form entries
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Size of the pooled color index space for a form
    ///
    /// Indices span the form's own palettes first, then the shared pool.
    pub fn pooled_color_set_count(&self, form: &OptionEntry) -> usize {
        form.sets.len() + self.general_color_sets.len()
    }

    /// Display name for a form id, falling back to the id itself
    pub fn display_name<'a>(&'a self, form_id: &'a str) -> &'a str {
        self.form(form_id)
            .map(|entry| entry.display_name())
            .unwrap_or(form_id)
    }
}

/// Built-in catalog for demos and tests — no external files needed
pub fn demo_catalog() -> Catalog {
    fn skin(color: Rgba8) -> ColorSet {
        vec![SlotColor::new(
            color,
            ["BODY_SKIN", "HEAD_SKIN", "ARM_LEFT_SKIN", "ARM_RIGHT_SKIN"],
        )]
    }

    let forms = vec![
        OptionEntry::new("Deer", 0)
            .with_name("Deer")
            .with_variants(["Deer", "Deer_2"])
            .with_sets(vec![skin(Rgba8::opaque(150, 111, 73))])
            .tintable(),
        OptionEntry::new("Pig", 0)
            .with_name("Pig")
            .with_sets(vec![skin(Rgba8::opaque(222, 140, 152))])
            .tintable(),
        OptionEntry::new("Rabbit", 0)
            .with_name("Rabbit")
            .with_variants(["Rabbit", "Rabbit_2"])
            .with_sets(vec![skin(Rgba8::opaque(214, 203, 180))])
            .tintable(),
        OptionEntry::new("Dog", 0)
            .with_name("Dog")
            .with_sets(vec![skin(Rgba8::opaque(130, 96, 60))])
            .tintable(),
        OptionEntry::new("Cat", 1)
            .with_name("Cat")
            .with_sets(vec![skin(Rgba8::opaque(90, 90, 100))])
            .tintable(),
        OptionEntry::new("Fox", 1)
            .with_name("Fox")
            .with_variants(["Fox", "Fox_2"])
            .with_sets(vec![skin(Rgba8::opaque(200, 110, 40))])
            .tintable(),
        OptionEntry::new("Crow", 2)
            .with_name("Crow")
            .with_sets(vec![skin(Rgba8::opaque(40, 38, 52))])
            .tintable(),
        OptionEntry::new("Snake", 2).with_name("Snake"),
        OptionEntry::new("Axolotl", 3)
            .with_name("Axolotl")
            .with_sets(vec![skin(Rgba8::opaque(240, 150, 170))])
            .tintable(),
    ];

    let clothing = vec![
        OptionEntry::new("Default_Clothing", 0),
        OptionEntry::new("Ceremony_Robes", 0).with_name("Ceremony Robes"),
    ];

    let general_color_sets = vec![
        skin(Rgba8::opaque(220, 220, 210)),
        skin(Rgba8::opaque(60, 60, 64)),
        skin(Rgba8::opaque(164, 58, 48)),
    ];

    Catalog::assemble(
        forms,
        clothing,
        general_color_sets,
        "Default_Clothing".to_string(),
    )
}
