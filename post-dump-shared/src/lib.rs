//! # Post Dump Shared
//! Types shared by the repository, the generator and the binary: the ordered
//! row records returned by the source, the scalar values they carry, the
//! sanitised content-type key and the reserved taxonomy and meta-key names.
pub mod errors;
pub mod names;
pub mod types;

pub use errors::ContentTypeError;
pub use types::{ContentType, Row, Value};
