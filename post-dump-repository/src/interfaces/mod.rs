//! This module defines and re-exports the collaborator interfaces of the
//! dump generator.
mod query_executor;
mod taxonomy_catalog;
mod value_escaper;

pub use query_executor::{Query, QueryExecutor, SessionSource};
pub use taxonomy_catalog::TaxonomyCatalog;
pub use value_escaper::ValueEscaper;
