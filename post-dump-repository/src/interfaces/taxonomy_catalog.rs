use std::collections::BTreeSet;

use post_dump_shared::ContentType;

use crate::errors::RepositoryError;
use crate::interfaces::QueryExecutor;

/// Answers which taxonomies are attached to a content type.
///
/// Implementations may consult the source through `executor` or ignore it.
#[async_trait::async_trait]
pub trait TaxonomyCatalog: Send + Sync {
    async fn object_taxonomies(
        &self,
        executor: &mut dyn QueryExecutor,
        content_type: &ContentType,
    ) -> Result<BTreeSet<String>, RepositoryError>;
}
