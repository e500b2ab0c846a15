//! Errors that abort a dump.
use post_dump_repository::RepositoryError;
use thiserror::Error;

use crate::stage::Stage;

/// Represents errors that abort generation.
///
/// A dump is either complete or not produced at all; every variant here means
/// no script is returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The source could not be reached or a read failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A stage was entered out of the fixed emission order.
    #[error("Stage {found} entered out of order, expected {expected}")]
    StageOrder { expected: Stage, found: Stage },

    /// The script was finished before reaching its last stage.
    #[error("Script finished before the footer (last stage: {last})")]
    Incomplete { last: String },
}
