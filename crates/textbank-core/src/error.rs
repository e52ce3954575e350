//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Caller supplied neither a direct conversation id nor a complete
    /// indirect reference. A programming-contract violation, never retried.
    #[error("conversation id required, or assignment-cell-routing reference required")]
    MissingIdentity,

    #[error("database error: {0}")]
    Database(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
