//! Engine error types

use thiserror::Error;

/// Errors surfaced by the randomization engine.
///
/// Everything here is fatal at construction time. Once a controller is
/// running, degraded cases (missing animations, unavailable audio) are
/// absorbed without erroring so the visual sequence always completes.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog has no selectable entries")]
    CatalogEmpty,

    #[error("catalog error: {0}")]
    Catalog(#[from] vf_catalog::CatalogError),

    #[error("timing error: {0}")]
    Timing(#[from] vf_stage::TimingError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
