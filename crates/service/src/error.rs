//! Typed error enum for the service layer.
//!
//! Unifies storage, validation and token failures so the HTTP layer can map
//! each to a status code without downcasting.

use habitlog_core::{ConfigError, ValidationError};
use habitlog_storage::StorageError;
use thiserror::Error;

use crate::token::TokenError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, pool, not found).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller input failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No credential was presented.
    #[error("no token provided")]
    Unauthorized,

    /// A credential was presented but did not verify.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// Serialization failed while building a token.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
