//! Read queries against the source content store.
//!
//! Every query orders its rows so the generated script is reproducible, and
//! every user-supplied value is bound as a parameter. Table names come from
//! the configured prefix.
use post_dump_repository::Query;
use post_dump_shared::names::{
    ATTACHMENT, LANGUAGE, LANGUAGE_TAXONOMIES, POST_TRANSLATIONS, TERM_LANGUAGE, TERM_TRANSLATIONS,
    THUMBNAIL_META_KEY,
};
use post_dump_shared::ContentType;

fn markers(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Builds the extraction queries for one table prefix.
#[derive(Debug, Clone)]
pub struct Queries {
    prefix: String,
}

impl Queries {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Every language defined on the source.
    pub fn language_slugs(&self) -> Query {
        let p = &self.prefix;
        Query::new(
            "language_slugs",
            format!(
                "SELECT DISTINCT t.slug \
                 FROM {p}terms t \
                 INNER JOIN {p}term_taxonomy tt ON t.term_id = tt.term_id \
                 WHERE tt.taxonomy = ? \
                 ORDER BY t.slug"
            ),
        )
        .bind(LANGUAGE)
    }

    /// Items of the content type, each with its language slug if it has one.
    pub fn posts(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "posts",
            format!(
                "SELECT p.*, lang.slug AS post_language \
                 FROM {p}posts p \
                 LEFT JOIN ( \
                     SELECT tr.object_id, t.slug \
                     FROM {p}term_relationships tr \
                     INNER JOIN {p}term_taxonomy tt ON tr.term_taxonomy_id = tt.term_taxonomy_id \
                     INNER JOIN {p}terms t ON tt.term_id = t.term_id \
                     WHERE tt.taxonomy = ? \
                 ) lang ON lang.object_id = p.ID \
                 WHERE p.post_type = ? \
                 ORDER BY p.ID ASC"
            ),
        )
        .bind(LANGUAGE)
        .bind(content_type.as_str())
    }

    /// Featured-image attachments referenced by items of the content type.
    pub fn attachments(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "attachments",
            format!(
                "SELECT DISTINCT a.* \
                 FROM {p}posts a \
                 INNER JOIN {p}postmeta pm ON a.ID = pm.meta_value \
                 INNER JOIN {p}posts p ON pm.post_id = p.ID \
                 WHERE p.post_type = ? AND pm.meta_key = ? AND a.post_type = ? \
                 ORDER BY a.ID ASC"
            ),
        )
        .bind(content_type.as_str())
        .bind(THUMBNAIL_META_KEY)
        .bind(ATTACHMENT)
    }

    /// Metadata of those attachments, once per meta row.
    pub fn attachment_meta(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "attachment_meta",
            format!(
                "SELECT pm.meta_id, pm.post_id AS old_attachment_id, pm.meta_key, pm.meta_value \
                 FROM {p}postmeta pm \
                 WHERE pm.post_id IN ( \
                     SELECT a.ID \
                     FROM {p}posts a \
                     INNER JOIN {p}postmeta thumb ON a.ID = thumb.meta_value \
                     INNER JOIN {p}posts p ON thumb.post_id = p.ID \
                     WHERE p.post_type = ? AND thumb.meta_key = ? AND a.post_type = ? \
                 ) \
                 ORDER BY pm.meta_id ASC"
            ),
        )
        .bind(content_type.as_str())
        .bind(THUMBNAIL_META_KEY)
        .bind(ATTACHMENT)
    }

    pub fn post_meta(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "post_meta",
            format!(
                "SELECT pm.meta_id, pm.post_id AS old_post_id, pm.meta_key, pm.meta_value \
                 FROM {p}postmeta pm \
                 INNER JOIN {p}posts p ON pm.post_id = p.ID \
                 WHERE p.post_type = ? \
                 ORDER BY pm.meta_id ASC"
            ),
        )
        .bind(content_type.as_str())
    }

    /// Terms of the translation groups the content items belong to.
    pub fn post_group_terms(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "post_group_terms",
            format!(
                "SELECT DISTINCT t.* \
                 FROM {p}terms t \
                 INNER JOIN {p}term_taxonomy tt ON t.term_id = tt.term_id \
                 INNER JOIN {p}term_relationships tr ON tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}posts p ON tr.object_id = p.ID \
                 WHERE tt.taxonomy = ? AND p.post_type = ? \
                 ORDER BY t.term_id ASC"
            ),
        )
        .bind(POST_TRANSLATIONS)
        .bind(content_type.as_str())
    }

    pub fn post_group_taxonomy(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "post_group_taxonomy",
            format!(
                "SELECT DISTINCT tt.* \
                 FROM {p}term_taxonomy tt \
                 INNER JOIN {p}term_relationships tr ON tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}posts p ON tr.object_id = p.ID \
                 WHERE tt.taxonomy = ? AND p.post_type = ? \
                 ORDER BY tt.term_taxonomy_id ASC"
            ),
        )
        .bind(POST_TRANSLATIONS)
        .bind(content_type.as_str())
    }

    /// Classification taxonomies in use by the content type.
    pub fn plain_taxonomies(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "plain_taxonomies",
            format!(
                "SELECT DISTINCT tt.taxonomy \
                 FROM {p}term_taxonomy tt \
                 INNER JOIN {p}term_relationships tr ON tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}posts p ON tr.object_id = p.ID \
                 WHERE p.post_type = ? AND tt.taxonomy NOT IN ({}) \
                 ORDER BY tt.taxonomy",
                markers(LANGUAGE_TAXONOMIES.len())
            ),
        )
        .bind(content_type.as_str())
        .bind_all(LANGUAGE_TAXONOMIES)
    }

    /// Every term of `taxonomies`, each with its language slug if it has one.
    pub fn plain_terms(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "plain_terms",
            format!(
                "SELECT DISTINCT t.*, lang.slug AS term_language \
                 FROM {p}terms t \
                 INNER JOIN {p}term_taxonomy tt ON t.term_id = tt.term_id \
                 LEFT JOIN ( \
                     SELECT tr.object_id, lt.slug \
                     FROM {p}term_relationships tr \
                     INNER JOIN {p}term_taxonomy ltt ON tr.term_taxonomy_id = ltt.term_taxonomy_id \
                     INNER JOIN {p}terms lt ON ltt.term_id = lt.term_id \
                     WHERE ltt.taxonomy = ? \
                 ) lang ON lang.object_id = t.term_id \
                 WHERE tt.taxonomy IN ({}) \
                 ORDER BY t.term_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind(TERM_LANGUAGE)
        .bind_all(taxonomies.iter().map(String::as_str))
    }

    /// Terms of the translation groups joining the terms of `taxonomies`.
    pub fn term_group_terms(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "term_group_terms",
            format!(
                "SELECT DISTINCT group_t.* \
                 FROM {p}terms group_t \
                 INNER JOIN {p}term_taxonomy group_tt ON group_t.term_id = group_tt.term_id \
                 INNER JOIN {p}term_relationships tr ON group_tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}term_taxonomy tt ON tr.object_id = tt.term_id \
                 WHERE group_tt.taxonomy = ? AND tt.taxonomy IN ({}) \
                 ORDER BY group_t.term_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind(TERM_TRANSLATIONS)
        .bind_all(taxonomies.iter().map(String::as_str))
    }

    pub fn term_group_taxonomy(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "term_group_taxonomy",
            format!(
                "SELECT DISTINCT group_tt.* \
                 FROM {p}term_taxonomy group_tt \
                 INNER JOIN {p}term_relationships tr ON group_tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {p}term_taxonomy tt ON tr.object_id = tt.term_id \
                 WHERE group_tt.taxonomy = ? AND tt.taxonomy IN ({}) \
                 ORDER BY group_tt.term_taxonomy_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind(TERM_TRANSLATIONS)
        .bind_all(taxonomies.iter().map(String::as_str))
    }

    pub fn plain_term_taxonomy(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "plain_term_taxonomy",
            format!(
                "SELECT tt.* \
                 FROM {p}term_taxonomy tt \
                 WHERE tt.taxonomy IN ({}) \
                 ORDER BY tt.term_taxonomy_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind_all(taxonomies.iter().map(String::as_str))
    }

    pub fn term_meta(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "term_meta",
            format!(
                "SELECT tm.meta_id, tm.term_id AS old_term_id, tm.meta_key, tm.meta_value \
                 FROM {p}termmeta tm \
                 WHERE tm.term_id IN ( \
                     SELECT tt.term_id FROM {p}term_taxonomy tt WHERE tt.taxonomy IN ({}) \
                 ) \
                 ORDER BY tm.meta_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind_all(taxonomies.iter().map(String::as_str))
    }

    /// Term translation-group descriptions, one row per member term.
    pub fn term_language_groups(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "term_language_groups",
            format!(
                "SELECT DISTINCT group_tr.object_id AS old_term_id, \
                        group_tt.term_taxonomy_id AS group_taxonomy_id, \
                        group_tt.description \
                 FROM {p}term_taxonomy tt \
                 INNER JOIN {p}term_relationships group_tr ON tt.term_id = group_tr.object_id \
                 INNER JOIN {p}term_taxonomy group_tt ON group_tr.term_taxonomy_id = group_tt.term_taxonomy_id \
                 WHERE tt.taxonomy IN ({}) AND group_tt.taxonomy = ? \
                   AND group_tt.description != '' \
                 ORDER BY group_taxonomy_id ASC, old_term_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind_all(taxonomies.iter().map(String::as_str))
        .bind(TERM_TRANSLATIONS)
    }

    /// Language slug of each content item.
    pub fn post_languages(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "post_languages",
            format!(
                "SELECT DISTINCT p.ID AS old_post_id, t.slug AS language_slug \
                 FROM {p}posts p \
                 INNER JOIN {p}term_relationships tr ON p.ID = tr.object_id \
                 INNER JOIN {p}term_taxonomy tt ON tr.term_taxonomy_id = tt.term_taxonomy_id \
                 INNER JOIN {p}terms t ON tt.term_id = t.term_id \
                 WHERE p.post_type = ? AND tt.taxonomy = ? \
                 ORDER BY old_post_id ASC, language_slug ASC"
            ),
        )
        .bind(content_type.as_str())
        .bind(LANGUAGE)
    }

    /// Relationships of the content items, language links excluded.
    pub fn post_relationships(&self, content_type: &ContentType) -> Query {
        let p = &self.prefix;
        Query::new(
            "post_relationships",
            format!(
                "SELECT tr.object_id AS old_post_id, tr.term_taxonomy_id, tr.term_order, tt.taxonomy \
                 FROM {p}term_relationships tr \
                 INNER JOIN {p}posts p ON tr.object_id = p.ID \
                 INNER JOIN {p}term_taxonomy tt ON tr.term_taxonomy_id = tt.term_taxonomy_id \
                 WHERE p.post_type = ? AND tt.taxonomy <> ? \
                 ORDER BY tt.taxonomy ASC, tr.object_id ASC, tr.term_taxonomy_id ASC"
            ),
        )
        .bind(content_type.as_str())
        .bind(LANGUAGE)
    }

    /// Links between terms of `taxonomies` and their translation groups.
    pub fn term_group_relationships(&self, taxonomies: &[String]) -> Query {
        let p = &self.prefix;
        Query::new(
            "term_group_relationships",
            format!(
                "SELECT DISTINCT tr.object_id AS old_term_id, tr.term_taxonomy_id AS old_term_taxonomy_id \
                 FROM {p}term_relationships tr \
                 INNER JOIN {p}term_taxonomy group_tt ON tr.term_taxonomy_id = group_tt.term_taxonomy_id \
                 INNER JOIN {p}term_taxonomy tt ON tr.object_id = tt.term_id \
                 WHERE group_tt.taxonomy = ? AND tt.taxonomy IN ({}) \
                 ORDER BY old_term_taxonomy_id ASC, old_term_id ASC",
                markers(taxonomies.len())
            ),
        )
        .bind(TERM_TRANSLATIONS)
        .bind_all(taxonomies.iter().map(String::as_str))
    }
}
