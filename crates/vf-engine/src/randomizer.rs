//! Weighted follower configuration generator
//!
//! Draws a form by category weight, a variant and a color set uniformly
//! within the form, and pins clothing to the catalog default. Categories
//! with no entries contribute nothing to the roll, so rarity weights only
//! ever select forms that actually exist.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_chacha::ChaCha8Rng;

use vf_catalog::{Catalog, CatalogIndex, CategoryWeights, OptionEntry};

use crate::error::{EngineError, EngineResult};
use crate::follower::FollowerConfig;
use crate::rng::RandomSource;

/// Weighted random follower generator.
pub struct Randomizer {
    catalog: Arc<Catalog>,
    weights: CategoryWeights,
    rng: Box<dyn RandomSource>,
}

impl Randomizer {
    /// Create with default rarity weights and OS-seeded randomness
    pub fn new(catalog: Arc<Catalog>) -> EngineResult<Self> {
        Self::with_rng(
            catalog,
            CategoryWeights::default(),
            Box::new(StdRng::from_os_rng()),
        )
    }

    /// Create with default rarity weights and a fixed seed
    pub fn seeded(catalog: Arc<Catalog>, seed: u64) -> EngineResult<Self> {
        Self::with_rng(
            catalog,
            CategoryWeights::default(),
            Box::new(ChaCha8Rng::seed_from_u64(seed)),
        )
    }

    /// Create with explicit weights and randomness source
    pub fn with_rng(
        catalog: Arc<Catalog>,
        weights: CategoryWeights,
        rng: Box<dyn RandomSource>,
    ) -> EngineResult<Self> {
        if catalog.index().is_empty() {
            return Err(EngineError::CatalogEmpty);
        }
        Ok(Self {
            catalog,
            weights,
            rng,
        })
    }

    /// Replace the randomness source with a seeded one
    pub fn seed(&mut self, seed: u64) {
        self.rng = Box::new(ChaCha8Rng::seed_from_u64(seed));
    }

    /// The catalog backing this randomizer
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the backing catalog
    pub fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Active category weights
    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Generate one complete follower configuration.
    pub fn generate(&mut self) -> FollowerConfig {
        let form = weighted_random_form(self.catalog.index(), &self.weights, self.rng.as_mut());
        let form_variant_idx = draw_index(self.rng.as_mut(), form.variants.len());
        let pooled = self.catalog.pooled_color_set_count(form);
        let form_color_set_idx = draw_index(self.rng.as_mut(), pooled);

        FollowerConfig {
            form: form.id.clone(),
            form_variant_idx,
            form_color_set_idx,
            // Clothing is never randomized; the default item is worn at
            // variant 0 / color 0.
            clothing: self.catalog.default_clothing_id().to_string(),
            clothing_variant_idx: 0,
            clothing_color_set_idx: 0,
        }
    }

    /// Generate `count` independent configurations in draw order.
    pub fn generate_multiple(&mut self, count: usize) -> Vec<FollowerConfig> {
        (0..count).map(|_| self.generate()).collect()
    }
}

impl std::fmt::Debug for Randomizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Randomizer")
            .field("forms", &self.catalog.form_count())
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

/// Roulette-wheel selection over categories, then a uniform pick inside
/// the winning bucket. Only categories that are both weighted and
/// populated join the wheel.
fn weighted_random_form<'a>(
    index: &'a CatalogIndex,
    weights: &CategoryWeights,
    rng: &mut dyn RandomSource,
) -> &'a OptionEntry {
    let mut available: Vec<(f64, &[OptionEntry])> = Vec::new();
    let mut total = 0.0;
    for (category, weight) in weights.iter() {
        if weight <= 0.0 {
            continue;
        }
        if let Some(bucket) = index.bucket(category) {
            if !bucket.is_empty() {
                total += weight;
                available.push((weight, bucket));
            }
        }
    }

    if available.is_empty() || total <= 0.0 {
        // No weighted category has entries: uniform draw over the whole
        // catalog instead.
        let all = index.flatten();
        return all[rng.next_index(all.len())];
    }

    let mut remaining = rng.next_f64() * total;
    for (weight, bucket) in &available {
        remaining -= weight;
        if remaining <= 0.0 {
            return &bucket[rng.next_index(bucket.len())];
        }
    }

    // Float rounding can leave a sliver after the last subtraction.
    let (_, bucket) = available[0];
    &bucket[rng.next_index(bucket.len())]
}

fn draw_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    if len == 0 { 0 } else { rng.next_index(len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use vf_catalog::{DEFAULT_CLOTHING_ID, demo_catalog};

    use crate::rng::StepRandom;

    fn test_catalog(forms: Vec<OptionEntry>) -> Arc<Catalog> {
        let clothing = vec![OptionEntry::new(DEFAULT_CLOTHING_ID, 0)];
        Arc::new(Catalog::from_entries(forms, clothing, Vec::new(), DEFAULT_CLOTHING_ID).unwrap())
    }

    #[test]
    fn test_generated_configs_within_bounds() {
        let catalog = Arc::new(demo_catalog());
        let mut randomizer = Randomizer::seeded(catalog.clone(), 42).unwrap();

        for _ in 0..10_000 {
            let config = randomizer.generate();
            let form = catalog.form(&config.form).unwrap();
            assert!(config.form_variant_idx < form.variants.len());
            assert!(config.form_color_set_idx < catalog.pooled_color_set_count(form));
            assert_eq!(config.clothing, DEFAULT_CLOTHING_ID);
            assert_eq!(config.clothing_variant_idx, 0);
            assert_eq!(config.clothing_color_set_idx, 0);
        }
    }

    #[test]
    fn test_weighted_distribution_skips_empty_categories() {
        // Weights name categories 0, 1 and 2 but the catalog only
        // populates 0 and 2, so the effective split is 70:5.
        let catalog = test_catalog(vec![
            OptionEntry::new("Common_A", 0),
            OptionEntry::new("Common_B", 0),
            OptionEntry::new("Rare", 2),
        ]);
        let weights = CategoryWeights::new().with(0, 70.0).with(1, 15.0).with(2, 5.0);
        let rng = Box::new(ChaCha8Rng::seed_from_u64(9001));
        let mut randomizer = Randomizer::with_rng(catalog.clone(), weights, rng).unwrap();

        let draws = 100_000;
        let mut by_category: BTreeMap<u32, u64> = BTreeMap::new();
        for _ in 0..draws {
            let config = randomizer.generate();
            let form = catalog.form(&config.form).unwrap();
            *by_category.entry(form.category).or_insert(0) += 1;
        }

        let common = by_category.get(&0).copied().unwrap_or(0) as f64 / draws as f64;
        let rare = by_category.get(&2).copied().unwrap_or(0) as f64 / draws as f64;
        assert!((common - 70.0 / 75.0).abs() < 0.01, "common ratio {common}");
        assert!((rare - 5.0 / 75.0).abs() < 0.01, "rare ratio {rare}");
        assert!(!by_category.contains_key(&1));
    }

    #[test]
    fn test_zero_weight_fallback_is_uniform_over_all_entries() {
        // Weights only reference a category with no entries, so every
        // draw falls back to a uniform pick across the whole catalog.
        let catalog = test_catalog(vec![
            OptionEntry::new("A", 0),
            OptionEntry::new("B", 1),
            OptionEntry::new("C", 5),
        ]);
        let weights = CategoryWeights::new().with(9, 100.0);
        let rng = Box::new(ChaCha8Rng::seed_from_u64(7));
        let mut randomizer = Randomizer::with_rng(catalog, weights, rng).unwrap();

        let draws = 30_000;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for _ in 0..draws {
            *counts.entry(randomizer.generate().form).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 3);
        for (form, count) in counts {
            let ratio = count as f64 / draws as f64;
            assert!((ratio - 1.0 / 3.0).abs() < 0.02, "{form} ratio {ratio}");
        }
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let catalog = Arc::new(demo_catalog());
        let mut a = Randomizer::seeded(catalog.clone(), 1234).unwrap();
        let mut b = Randomizer::seeded(catalog, 1234).unwrap();

        assert_eq!(a.generate_multiple(100), b.generate_multiple(100));
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let catalog = Arc::new(demo_catalog());
        let mut randomizer = Randomizer::seeded(catalog, 55).unwrap();

        let first = randomizer.generate_multiple(10);
        randomizer.seed(55);
        assert_eq!(randomizer.generate_multiple(10), first);
    }

    #[test]
    fn test_empty_color_pool_defaults_to_index_zero() {
        // One form with no own sets and a catalog with no general sets.
        let catalog = test_catalog(vec![OptionEntry::new("Plain", 0)]);
        let mut randomizer = Randomizer::seeded(catalog, 3).unwrap();

        for _ in 0..100 {
            assert_eq!(randomizer.generate().form_color_set_idx, 0);
        }
    }

    #[test]
    fn test_scripted_roll_lands_in_first_weighted_bucket() {
        let catalog = test_catalog(vec![
            OptionEntry::new("First", 0),
            OptionEntry::new("Second", 2),
        ]);
        let weights = CategoryWeights::new().with(0, 70.0).with(2, 5.0);
        let rng = Box::new(StepRandom::new([0.0]));
        let mut randomizer = Randomizer::with_rng(catalog, weights, rng).unwrap();

        assert_eq!(randomizer.generate().form, "First");
    }

    #[test]
    fn test_scripted_roll_lands_in_last_weighted_bucket() {
        let catalog = test_catalog(vec![
            OptionEntry::new("First", 0),
            OptionEntry::new("Second", 2),
        ]);
        let weights = CategoryWeights::new().with(0, 70.0).with(2, 5.0);
        // 0.999 * 75 = 74.925, past the category-0 share of 70.
        let rng = Box::new(StepRandom::new([0.999]));
        let mut randomizer = Randomizer::with_rng(catalog, weights, rng).unwrap();

        assert_eq!(randomizer.generate().form, "Second");
    }

    #[test]
    fn test_empty_catalog_rejected_at_construction() {
        let clothing = vec![OptionEntry::new(DEFAULT_CLOTHING_ID, 0)];
        let catalog = Catalog::from_entries(Vec::new(), clothing, Vec::new(), DEFAULT_CLOTHING_ID);
        // The catalog itself refuses to exist without forms.
        assert!(catalog.is_err());
    }
}
