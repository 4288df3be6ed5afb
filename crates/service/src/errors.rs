use thiserror::Error;

use crate::client::repository::RepositoryError;

/// Domain-level failures surfaced by the service layer.
///
/// Callers map these onto their own protocol (not-found, conflict, server error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    IntegrityConflict(String),
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self { Self::NotFound(msg.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 2001,
            ServiceError::IntegrityConflict(_) => 2002,
            ServiceError::StorageFailure(_) => 2200,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ServiceError::NotFound(format!("Id not found {id}")),
            RepositoryError::IntegrityConflict(_) => ServiceError::IntegrityConflict("Integrity violation".into()),
            RepositoryError::Storage(msg) => ServiceError::StorageFailure(msg),
        }
    }
}
