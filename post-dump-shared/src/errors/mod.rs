//! Error types for the shared crate.
mod content_type;

pub use content_type::ContentTypeError;
