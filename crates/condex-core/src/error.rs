//! Error types for Condex Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// The catalog document could not be deserialized
    #[error("Invalid catalog document: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    /// Entity key not present in the catalog
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Attribute key not present on the entity
    #[error("Unknown attribute '{attribute}' on entity '{entity}'")]
    UnknownAttribute { entity: String, attribute: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
