//! Error types for catalog loading and validation

use thiserror::Error;

/// Catalog error type — every variant is fatal at startup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no form entries")]
    EmptyCatalog,

    #[error("Entry '{id}' has no variants")]
    EmptyVariants { id: String },

    #[error("Default clothing '{id}' not found in catalog")]
    MissingDefaultClothing { id: String },
}

/// Result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;
