//! Error types for the dump command.

use post_dump_generator::GenerateError;
use post_dump_repository::RepositoryError;
use post_dump_shared::ContentTypeError;
use thiserror::Error;

/// Errors that can occur while preparing or writing a dump.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested content type is not a usable key.
    #[error("Invalid post type: {0}")]
    ContentType(#[from] ContentTypeError),

    /// The source database could not be reached.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Generation failed.
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    /// The artifact could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
