//! CategoryWeights — the rarity table driving form selection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category → weight table, iterated in ascending category order
///
/// Higher weight = more likely. The table is fixed after load; selection
/// never mutates it. Categories absent from the table are never drawn
/// (except through the zero-weight fallback, which ignores the table
/// entirely).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeights {
    weights: BTreeMap<u32, f64>,
}

impl CategoryWeights {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// The standard form rarity table: category 0 dominates, DLC tails off
    pub fn default_form_weights() -> Self {
        Self::new()
            .with(0, 70.0)
            .with(1, 15.0)
            .with(2, 5.0)
            .with(3, 4.0)
            .with(4, 3.0)
            .with(5, 2.0)
            .with(6, 1.0)
    }

    /// Add or replace a category weight (builder pattern)
    pub fn with(mut self, category: u32, weight: f64) -> Self {
        self.weights.insert(category, weight);
        self
    }

    /// Weight for a category, if present
    pub fn get(&self, category: u32) -> Option<f64> {
        self.weights.get(&category).copied()
    }

    /// Iterate (category, weight) pairs in ascending category order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.weights.iter().map(|(category, weight)| (*category, *weight))
    }

    /// Number of categories in the table
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::default_form_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let weights = CategoryWeights::default_form_weights();

        assert_eq!(weights.len(), 7);
        assert_eq!(weights.get(0), Some(70.0));
        assert_eq!(weights.get(6), Some(1.0));
        assert_eq!(weights.get(7), None);

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_iteration_order_is_ascending() {
        let weights = CategoryWeights::new().with(4, 1.0).with(0, 9.0).with(2, 3.0);

        let categories: Vec<u32> = weights.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![0, 2, 4]);
    }

    #[test]
    fn test_serde_round_trip() {
        let weights = CategoryWeights::default_form_weights();
        let json = serde_json::to_string(&weights).unwrap();

        // Transparent map shape, integer keys as JSON strings
        assert!(json.starts_with('{'));
        assert!(json.contains("\"0\":70.0"));

        let deserialized: CategoryWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, deserialized);
    }
}
