//! Loading the rows of one export.
use indexmap::IndexMap;
use post_dump_repository::{Query, QueryExecutor, RepositoryError, TaxonomyCatalog};
use post_dump_shared::names::{LANGUAGE, POST_TRANSLATIONS};
use post_dump_shared::{ContentType, Row};
use tracing::{debug, warn};

use super::Queries;

/// Every source row an export needs, read through one session.
///
/// Rows are already deduplicated: fan-out joins never yield the same item,
/// term or meta row twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSnapshot {
    /// Taxonomies whose relationships the cleanup removes.
    pub cleanup_taxonomies: Vec<String>,
    pub language_slugs: Vec<String>,
    /// Items with a `post_language` column.
    pub posts: Vec<Row>,
    pub attachments: Vec<Row>,
    pub attachment_meta: Vec<Row>,
    pub post_meta: Vec<Row>,
    pub post_group_terms: Vec<Row>,
    pub post_group_taxonomy: Vec<Row>,
    pub plain_taxonomies: Vec<String>,
    /// Terms with a `term_language` column.
    pub plain_terms: Vec<Row>,
    pub term_group_terms: Vec<Row>,
    pub term_group_taxonomy: Vec<Row>,
    pub plain_term_taxonomy: Vec<Row>,
    pub term_meta: Vec<Row>,
    pub term_language_groups: Vec<Row>,
    pub post_languages: Vec<Row>,
    pub post_relationships: Vec<Row>,
    pub term_group_relationships: Vec<Row>,
}

async fn rows(executor: &mut dyn QueryExecutor, query: Query) -> Result<Vec<Row>, RepositoryError> {
    let rows = executor.fetch_all(&query).await?;
    debug!(query = query.label, rows = rows.len(), "Extracted rows");
    Ok(rows)
}

fn has_value(row: &Row, column: &str) -> bool {
    row.get(column).is_some_and(|value| !value.is_null())
}

/// Keeps one row per `id_column`, in first-seen order.
///
/// A later row replaces the kept one only when the kept row has no value in
/// `prefer_column` and the later row does. Rows without an identifier are
/// dropped.
fn dedupe(rows: Vec<Row>, label: &str, id_column: &str, prefer_column: Option<&str>) -> Vec<Row> {
    let total = rows.len();
    let mut unique: IndexMap<u64, Row> = IndexMap::with_capacity(total);
    for row in rows {
        let Some(id) = row.id(id_column) else {
            warn!(query = label, column = id_column, "Skipping row without identifier");
            continue;
        };
        match unique.get_mut(&id) {
            None => {
                unique.insert(id, row);
            }
            Some(kept) => {
                if let Some(column) = prefer_column {
                    if !has_value(kept, column) && has_value(&row, column) {
                        *kept = row;
                    }
                }
            }
        }
    }
    if unique.len() != total {
        debug!(query = label, before = total, after = unique.len(), "Collapsed duplicate rows");
    }
    unique.into_values().collect()
}

/// Reads the subgraph of `content_type`.
///
/// Queries run one after another on `executor`; the caller decides which
/// session they share.
pub async fn extract(
    executor: &mut dyn QueryExecutor,
    catalog: &dyn TaxonomyCatalog,
    queries: &Queries,
    content_type: &ContentType,
) -> Result<ExportSnapshot, RepositoryError> {
    let cleanup_taxonomies = catalog
        .object_taxonomies(executor, content_type)
        .await?
        .into_iter()
        .filter(|taxonomy| taxonomy != LANGUAGE && taxonomy != POST_TRANSLATIONS)
        .collect();

    let language_slugs = executor.fetch_column(&queries.language_slugs()).await?;
    debug!(languages = ?language_slugs, "Found source languages");

    let posts = dedupe(
        rows(executor, queries.posts(content_type)).await?,
        "posts",
        "ID",
        Some("post_language"),
    );
    let attachments = dedupe(
        rows(executor, queries.attachments(content_type)).await?,
        "attachments",
        "ID",
        None,
    );
    let attachment_meta = dedupe(
        rows(executor, queries.attachment_meta(content_type)).await?,
        "attachment_meta",
        "meta_id",
        None,
    );
    let post_meta = rows(executor, queries.post_meta(content_type)).await?;
    let post_group_terms = rows(executor, queries.post_group_terms(content_type)).await?;
    let post_group_taxonomy = rows(executor, queries.post_group_taxonomy(content_type)).await?;
    let plain_taxonomies = executor
        .fetch_column(&queries.plain_taxonomies(content_type))
        .await?;

    let mut snapshot = ExportSnapshot {
        cleanup_taxonomies,
        language_slugs,
        posts,
        attachments,
        attachment_meta,
        post_meta,
        post_group_terms,
        post_group_taxonomy,
        plain_taxonomies,
        ..ExportSnapshot::default()
    };

    if !snapshot.plain_taxonomies.is_empty() {
        let taxonomies = snapshot.plain_taxonomies.clone();
        snapshot.plain_terms = dedupe(
            rows(executor, queries.plain_terms(&taxonomies)).await?,
            "plain_terms",
            "term_id",
            Some("term_language"),
        );
        snapshot.term_group_terms = rows(executor, queries.term_group_terms(&taxonomies)).await?;
        snapshot.term_group_taxonomy = rows(executor, queries.term_group_taxonomy(&taxonomies)).await?;
        snapshot.plain_term_taxonomy = rows(executor, queries.plain_term_taxonomy(&taxonomies)).await?;
        snapshot.term_meta = rows(executor, queries.term_meta(&taxonomies)).await?;
        snapshot.term_language_groups =
            rows(executor, queries.term_language_groups(&taxonomies)).await?;
    }

    snapshot.post_languages = rows(executor, queries.post_languages(content_type)).await?;
    snapshot.post_relationships = rows(executor, queries.post_relationships(content_type)).await?;
    if !snapshot.plain_taxonomies.is_empty() {
        let taxonomies = snapshot.plain_taxonomies.clone();
        snapshot.term_group_relationships =
            rows(executor, queries.term_group_relationships(&taxonomies)).await?;
    }

    Ok(snapshot)
}
