//! # Post Dump Repository
//! This crate provides the collaborator interfaces the dump generator reads
//! through: a parameterized query executor scoped to one session, a taxonomy
//! catalog and a SQL value escaper. It includes a MySQL implementation of each
//! and an in-memory catalog.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod mysql;

pub use errors::RepositoryError;
pub use interfaces::{Query, QueryExecutor, SessionSource, TaxonomyCatalog, ValueEscaper};
pub use memory::StaticTaxonomyCatalog;
pub use mysql::{MysqlEscaper, MysqlRepository, MysqlSession, SourceTaxonomyCatalog};
