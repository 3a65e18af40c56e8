//! CatalogDocument — serde mirror of the follower data JSON
//!
//! The document is the untrusted wire shape. `validate()` turns it into a
//! `Catalog` exactly once; nothing downstream re-checks fields ad hoc.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::color::ColorSet;
use crate::entry::OptionEntry;
use crate::error::CatalogResult;

/// Clothing id assumed when the document names none
pub const DEFAULT_CLOTHING_ID: &str = "Default_Clothing";

/// One entry as it appears in the document (the id lives in the map key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySpec {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Rarity category, defaults to the common bucket
    #[serde(default)]
    pub category: u32,

    /// Skin variant names; required by the schema, emptiness is a
    /// validation error
    pub variants: Vec<String>,

    /// Entry-specific palettes
    #[serde(default)]
    pub sets: Vec<ColorSet>,

    /// Whether renderers may tint this entry
    #[serde(default)]
    pub can_be_tinted: bool,
}

impl EntrySpec {
    fn into_entry(self, id: String) -> OptionEntry {
        OptionEntry {
            id,
            name: self.name,
            category: self.category,
            variants: self.variants,
            sets: self.sets,
            can_be_tinted: self.can_be_tinted,
        }
    }
}

/// The raw follower data document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Follower forms keyed by id
    pub forms: BTreeMap<String, EntrySpec>,

    /// Clothing items keyed by id
    #[serde(default)]
    pub clothing: BTreeMap<String, EntrySpec>,

    /// Shared palettes every tintable form can draw from
    #[serde(default)]
    pub general_color_sets: Vec<ColorSet>,

    /// Designated default clothing id; `DEFAULT_CLOTHING_ID` when absent
    #[serde(default)]
    pub default_clothing: Option<String>,
}

impl CatalogDocument {
    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a reader
    pub fn from_reader(reader: impl Read) -> CatalogResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a document from a file path
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        log::info!("Loading follower data from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validate the document and build the catalog
    ///
    /// Checks: at least one form, every entry has variants, the default
    /// clothing id exists.
    pub fn validate(self) -> CatalogResult<Catalog> {
        let default_clothing = self
            .default_clothing
            .unwrap_or_else(|| DEFAULT_CLOTHING_ID.to_string());

        let forms: Vec<OptionEntry> = self
            .forms
            .into_iter()
            .map(|(id, spec)| spec.into_entry(id))
            .collect();
        let clothing: Vec<OptionEntry> = self
            .clothing
            .into_iter()
            .map(|(id, spec)| spec.into_entry(id))
            .collect();

        Catalog::from_entries(forms, clothing, self.general_color_sets, default_clothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use std::io::Write;

    const SAMPLE_DOC: &str = r#"{
        "forms": {
            "Deer": {
                "name": "Deer",
                "category": 0,
                "variants": ["Deer", "Deer_2"],
                "sets": [
                    [
                        { "color": { "r": 150, "g": 111, "b": 73, "a": 255 }, "slots": ["BODY_SKIN"] }
                    ]
                ],
                "canBeTinted": true
            },
            "Crow": {
                "category": 2,
                "variants": ["Crow"]
            }
        },
        "clothing": {
            "Default_Clothing": {
                "variants": ["Default_Clothing"]
            }
        },
        "generalColorSets": [
            [
                { "color": { "r": 220, "g": 220, "b": 210, "a": 255 }, "slots": ["BODY_SKIN", "HEAD_SKIN"] }
            ]
        ]
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let doc = CatalogDocument::from_json_str(SAMPLE_DOC).unwrap();

        assert_eq!(doc.forms.len(), 2);
        assert_eq!(doc.clothing.len(), 1);
        assert_eq!(doc.general_color_sets.len(), 1);
        assert!(doc.default_clothing.is_none());

        let deer = &doc.forms["Deer"];
        assert!(deer.can_be_tinted);
        assert_eq!(deer.variants.len(), 2);

        // Absent optional fields fall back
        let crow = &doc.forms["Crow"];
        assert_eq!(crow.category, 2);
        assert!(!crow.can_be_tinted);
        assert!(crow.sets.is_empty());
    }

    #[test]
    fn test_validate_builds_catalog() {
        let catalog = CatalogDocument::from_json_str(SAMPLE_DOC)
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(catalog.form_count(), 2);
        assert_eq!(catalog.default_clothing_id(), DEFAULT_CLOTHING_ID);
        assert!(catalog.form("Deer").is_some());
        assert!(catalog.clothing(DEFAULT_CLOTHING_ID).is_some());
    }

    #[test]
    fn test_missing_variants_is_parse_error() {
        let json = r#"{ "forms": { "Deer": { "category": 0 } } }"#;
        let err = CatalogDocument::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_empty_forms_rejected() {
        let json = r#"{ "forms": {} }"#;
        let err = CatalogDocument::from_json_str(json)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCatalog));
    }

    #[test]
    fn test_empty_variants_rejected() {
        let json = r#"{
            "forms": { "Deer": { "variants": [] } },
            "clothing": { "Default_Clothing": { "variants": ["Default_Clothing"] } }
        }"#;
        let err = CatalogDocument::from_json_str(json)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyVariants { id } if id == "Deer"));
    }

    #[test]
    fn test_missing_default_clothing_rejected() {
        let json = r#"{ "forms": { "Deer": { "variants": ["Deer"] } } }"#;
        let err = CatalogDocument::from_json_str(json)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::MissingDefaultClothing { id } if id == DEFAULT_CLOTHING_ID)
        );
    }

    #[test]
    fn test_default_clothing_override() {
        let json = r#"{
            "forms": { "Deer": { "variants": ["Deer"] } },
            "clothing": { "Festive": { "variants": ["Festive"] } },
            "defaultClothing": "Festive"
        }"#;
        let catalog = CatalogDocument::from_json_str(json)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(catalog.default_clothing_id(), "Festive");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DOC.as_bytes()).unwrap();

        let doc = CatalogDocument::from_path(file.path()).unwrap();
        assert_eq!(doc.forms.len(), 2);
    }

    #[test]
    fn test_document_round_trip() {
        let doc = CatalogDocument::from_json_str(SAMPLE_DOC).unwrap();
        let json = serde_json::to_string(&doc).unwrap();

        assert!(json.contains("generalColorSets"));
        assert!(json.contains("canBeTinted"));

        let reparsed = CatalogDocument::from_json_str(&json).unwrap();
        assert_eq!(doc, reparsed);
    }
}
