//! Core data types exchanged between the source collaborator and the generator.
mod content_type;
mod row;
mod value;

pub use content_type::ContentType;
pub use row::Row;
pub use value::Value;
