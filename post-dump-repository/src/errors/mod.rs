//! Error types for the post dump repository.
//! Consolidates and re-exports error types raised while reading the source.
mod repository;

pub use repository::RepositoryError;
