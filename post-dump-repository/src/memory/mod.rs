//! In-memory implementations of the source interfaces.
mod static_catalog;

pub use static_catalog::StaticTaxonomyCatalog;
