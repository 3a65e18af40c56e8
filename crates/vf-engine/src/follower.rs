//! Follower configuration record

use serde::{Deserialize, Serialize};

use vf_catalog::Catalog;

/// One complete visual configuration for a follower.
///
/// Indices are positions into the selected entry's variant list and the
/// pooled color-set list (the form's own sets followed by the catalog's
/// general sets). The renderer resolves them against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerConfig {
    /// Selected form id
    pub form: String,
    /// Index into the form's variants
    pub form_variant_idx: usize,
    /// Index into the form's pooled color sets
    pub form_color_set_idx: usize,
    /// Selected clothing id
    pub clothing: String,
    /// Index into the clothing's variants
    pub clothing_variant_idx: usize,
    /// Index into the clothing's pooled color sets
    pub clothing_color_set_idx: usize,
}

impl FollowerConfig {
    /// Human-readable name of the configured form.
    pub fn label<'a>(&'a self, catalog: &'a Catalog) -> &'a str {
        catalog.display_name(&self.form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_catalog::demo_catalog;

    #[test]
    fn test_serde_wire_names() {
        let config = FollowerConfig {
            form: "Deer".to_string(),
            form_variant_idx: 1,
            form_color_set_idx: 2,
            clothing: "Default_Clothing".to_string(),
            clothing_variant_idx: 0,
            clothing_color_set_idx: 0,
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"formVariantIdx\":1"));
        assert!(json.contains("\"clothingColorSetIdx\":0"));

        let back: FollowerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_label_resolves_display_name() {
        let catalog = demo_catalog();
        let config = FollowerConfig {
            form: "Deer".to_string(),
            form_variant_idx: 0,
            form_color_set_idx: 0,
            clothing: "Default_Clothing".to_string(),
            clothing_variant_idx: 0,
            clothing_color_set_idx: 0,
        };

        assert_eq!(config.label(&catalog), "Deer");
    }
}
