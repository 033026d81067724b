// ABOUTME: Error types for the lookup core using thiserror.
// ABOUTME: Separates metadata lookup failures from key retrieval failures.

use thiserror::Error;

use crate::model::EntityId;
use crate::service::ServiceError;
use crate::status::ExitStatus;

/// Entity metadata could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error loading entity '{entity}': {source}")]
pub struct LookupError {
    pub entity: EntityId,
    #[source]
    pub source: ServiceError,
}

/// The entity resolved and disclosure was allowed, but its keys could not be
/// obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error retrieving keys for '{entity}': {source}")]
pub struct RetrievalError {
    pub entity: EntityId,
    #[source]
    pub source: ServiceError,
}

/// A failed lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

impl Error {
    /// Process status reported for this failure.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Error::Lookup(_) => ExitStatus::LookupFailed,
            Error::Retrieval(_) => ExitStatus::RetrievalFailed,
        }
    }
}

/// Result type alias using the lookup Error.
pub type Result<T> = std::result::Result<T, Error>;
