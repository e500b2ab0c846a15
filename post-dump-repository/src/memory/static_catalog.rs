use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use post_dump_shared::ContentType;

use crate::errors::RepositoryError;
use crate::interfaces::{QueryExecutor, TaxonomyCatalog};

/// A catalog answered from an explicit content-type → taxonomies map.
///
/// Unknown content types have no taxonomies.
#[derive(Debug, Clone, Default)]
pub struct StaticTaxonomyCatalog {
    taxonomies: HashMap<String, BTreeSet<String>>,
}

impl StaticTaxonomyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `taxonomies` for `content_type`, builder style.
    pub fn with<I, S>(mut self, content_type: &str, taxonomies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taxonomies
            .entry(content_type.to_string())
            .or_default()
            .extend(taxonomies.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl TaxonomyCatalog for StaticTaxonomyCatalog {
    async fn object_taxonomies(
        &self,
        _executor: &mut dyn QueryExecutor,
        content_type: &ContentType,
    ) -> Result<BTreeSet<String>, RepositoryError> {
        Ok(self
            .taxonomies
            .get(content_type.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::Query;
    use post_dump_shared::Row;

    struct UnreachableExecutor;

    #[async_trait]
    impl QueryExecutor for UnreachableExecutor {
        async fn fetch_all(&mut self, query: &Query) -> Result<Vec<Row>, RepositoryError> {
            panic!("static catalog must not query the source: {}", query.label);
        }
    }

    #[tokio::test]
    async fn test_returns_registered_taxonomies() {
        let catalog = StaticTaxonomyCatalog::new()
            .with("post", ["category", "post_tag"])
            .with("post", ["language"]);
        let mut executor = UnreachableExecutor;
        let taxonomies = catalog
            .object_taxonomies(&mut executor, &ContentType::parse("post").unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = taxonomies.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["category", "language", "post_tag"]);
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_empty() {
        let catalog = StaticTaxonomyCatalog::new().with("post", ["category"]);
        let mut executor = UnreachableExecutor;
        let taxonomies = catalog
            .object_taxonomies(&mut executor, &ContentType::parse("page").unwrap())
            .await
            .unwrap();
        assert!(taxonomies.is_empty());
    }
}
