use thiserror::Error;

/// Represents errors raised while turning user input into a `ContentType`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentTypeError {
    #[error("Content type is empty after sanitising: {0:?}")]
    Empty(String),

    #[error("Content type exceeds {max} characters: {value}")]
    TooLong { value: String, max: usize },
}
