//! # Post Dump Generator
//! Compiles one content type of a relational content store into a SQL script
//! that recreates its items, featured images, metadata, terms, language
//! assignments and translation groups in another database.
//!
//! Rows are inserted without their source keys. Each insert captures the
//! generated key into a session variable, and every foreign key in later
//! statements is written as that variable. Translation-group descriptions,
//! which embed member ids inside a serialized map, are rebuilt at the end
//! with the captured ids spliced in.
pub mod codec;
pub mod config;
pub mod dialect;
pub mod emitter;
pub mod errors;
pub mod extraction;
pub mod generator;
pub mod reassembler;
pub mod script;
pub mod stage;
pub mod symbols;

mod stages;

pub use config::GeneratorConfig;
pub use errors::{DecodeError, GenerateError};
pub use extraction::ExportSnapshot;
pub use generator::DumpGenerator;
pub use script::SqlScript;
pub use stage::Stage;
