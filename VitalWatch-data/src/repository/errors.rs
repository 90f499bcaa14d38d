use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport error talking to the reading provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The reading provider answered with a non-success status
    #[error("Reading provider returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The provider's payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Operation not offered by this repository
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        RepositoryError::Decode(error.to_string())
    }
}
