//! Errors raised while decoding a legacy serialized translation-group map.
use thiserror::Error;

/// Represents a malformed legacy array.
///
/// Decode failures are recoverable: the affected group is logged and left out
/// of the backfill, the rest of the dump continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),

    #[error("expected {expected:?} at byte {position}")]
    Expected { expected: &'static str, position: usize },

    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),

    #[error("string at byte {0} is not valid UTF-8")]
    InvalidUtf8(usize),

    #[error("unsupported key type at byte {0}")]
    UnsupportedKey(usize),

    #[error("unsupported member value at byte {0}")]
    UnsupportedValue(usize),

    #[error("declared {declared} entries, found {found}")]
    CountMismatch { declared: usize, found: usize },

    #[error("trailing data at byte {0}")]
    TrailingData(usize),
}
