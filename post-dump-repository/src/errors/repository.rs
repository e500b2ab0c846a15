//! Errors raised while talking to the source content store.
use thiserror::Error;

/// Represents errors that can occur within the source repository.
///
/// Every variant is fatal for a dump: the generator surfaces them verbatim
/// and never emits a partial script.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid query {label}: {reason}")]
    InvalidQuery { label: String, reason: String },
}

impl RepositoryError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an invalid query error.
    pub fn invalid_query(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
