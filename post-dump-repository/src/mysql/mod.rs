//! MySQL implementation of the source interfaces.
mod catalog;
mod escaper;
mod repository;
mod row;

pub use catalog::SourceTaxonomyCatalog;
pub use escaper::{interpolate, MysqlEscaper};
pub use repository::{MysqlRepository, MysqlSession};
