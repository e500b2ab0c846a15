//! Reads the exported subgraph from the source.
mod queries;
mod snapshot;

pub use queries::Queries;
pub use snapshot::{extract, ExportSnapshot};
