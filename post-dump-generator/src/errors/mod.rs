//! Error types for the dump generator.
//! Fatal generation errors and the recoverable legacy-decoding error.
mod decode;
mod generate;

pub use decode::DecodeError;
pub use generate::GenerateError;
