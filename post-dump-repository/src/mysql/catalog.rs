use std::collections::BTreeSet;

use async_trait::async_trait;
use post_dump_shared::ContentType;

use crate::errors::RepositoryError;
use crate::interfaces::{Query, QueryExecutor, TaxonomyCatalog};

/// Discovers a content type's taxonomies from the source data: every taxonomy
/// with at least one relationship to an item of that type.
#[derive(Debug, Clone)]
pub struct SourceTaxonomyCatalog {
    table_prefix: String,
}

impl SourceTaxonomyCatalog {
    pub fn new(table_prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }

    fn query(&self, content_type: &ContentType) -> Query {
        let p = &self.table_prefix;
        Query::new(
            "object_taxonomies",
            format!(
                "SELECT DISTINCT tt.taxonomy \
                 FROM {p}term_taxonomy tt \
                 INNER JOIN {p}term_relationships tr ON tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}posts p ON tr.object_id = p.ID \
                 WHERE p.post_type = ? \
                 ORDER BY tt.taxonomy"
            ),
        )
        .bind(content_type.as_str())
    }
}

#[async_trait]
impl TaxonomyCatalog for SourceTaxonomyCatalog {
    async fn object_taxonomies(
        &self,
        executor: &mut dyn QueryExecutor,
        content_type: &ContentType,
    ) -> Result<BTreeSet<String>, RepositoryError> {
        let names = executor.fetch_column(&self.query(content_type)).await?;
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_uses_prefix_and_binds_content_type() {
        let catalog = SourceTaxonomyCatalog::new("site2_");
        let query = catalog.query(&ContentType::parse("page").unwrap());
        assert!(query.sql.contains("FROM site2_term_taxonomy tt"));
        assert!(query.sql.contains("INNER JOIN site2_posts p"));
        assert_eq!(query.params, vec![post_dump_shared::Value::from("page")]);
    }
}
