//! # Post Dump
//!
//! Exports one post type of a MySQL content store, with its featured images,
//! metadata, terms, languages and translation groups, as a SQL script that
//! can be replayed into another database of the same schema.
//!
//! ## Modules
//!
//! - [`cli`]: Command-line arguments
//! - [`config`]: Settings and dependency initialization
//! - [`dump`]: The dump command
//! - [`artifact`]: Naming and writing of the exported file
//! - [`errors`]: Error types for the command

pub mod artifact;
pub mod cli;
pub mod config;
pub mod dump;
pub mod errors;

pub use config::{Dependencies, Settings};
pub use errors::DumpError;
