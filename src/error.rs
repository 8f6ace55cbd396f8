//! Error taxonomy for the import engine.
//!
//! Batch processing converts these into per-source report strings at the
//! orchestrator boundary; single-target operations propagate them to the
//! caller as-is.

use thiserror::Error;

/// Errors produced by the import/merge/library engine
#[derive(Debug, Error)]
pub enum ImportError {
    /// Payload is not well-formed JSON
    #[error("failed to parse payload: {detail}")]
    Parse { detail: String },

    /// Payload parsed but does not match the declared asset-kind shape
    #[error("payload schema invalid: {detail}")]
    Schema { detail: String },

    /// Referenced library item does not exist
    #[error("library item not found: {id}")]
    NotFound { id: String },

    /// Supplied metadata is invalid (e.g. blank library name)
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    /// External store failure (filesystem, serialization of stored state)
    #[error("persistence failure: {detail}")]
    Persistence { detail: String },
}

impl ImportError {
    /// Construct a parse error from any displayable cause
    pub fn parse(detail: impl std::fmt::Display) -> Self {
        Self::Parse {
            detail: detail.to_string(),
        }
    }

    /// Construct a schema error from any displayable cause
    pub fn schema(detail: impl std::fmt::Display) -> Self {
        Self::Schema {
            detail: detail.to_string(),
        }
    }

    /// Construct a persistence error from any displayable cause
    pub fn persistence(detail: impl std::fmt::Display) -> Self {
        Self::Persistence {
            detail: detail.to_string(),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        Self::persistence(e)
    }
}
