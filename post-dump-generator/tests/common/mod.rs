//! In-memory source for driving the generator in tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use post_dump_repository::{Query, QueryExecutor, RepositoryError, SessionSource};
use post_dump_shared::Row;

/// Answers each query with the rows registered under its label.
#[derive(Clone, Default)]
pub struct MockSource {
    answers: Arc<HashMap<&'static str, Vec<Row>>>,
    fail_on: Option<&'static str>,
    pub opened: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub labels: Arc<Mutex<Vec<&'static str>>>,
}

impl MockSource {
    pub fn new(answers: HashMap<&'static str, Vec<Row>>) -> Self {
        Self {
            answers: Arc::new(answers),
            ..Self::default()
        }
    }

    /// Makes the query labelled `label` fail with a connection error.
    pub fn failing_on(mut self, label: &'static str) -> Self {
        self.fail_on = Some(label);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.labels.lock().unwrap().clone()
    }
}

pub struct MockSession {
    source: MockSource,
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.source.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl QueryExecutor for MockSession {
    async fn fetch_all(&mut self, query: &Query) -> Result<Vec<Row>, RepositoryError> {
        assert_eq!(
            query.sql.matches('?').count(),
            query.params.len(),
            "marker count of {}",
            query.label
        );
        self.source.labels.lock().unwrap().push(query.label);
        if self.source.fail_on == Some(query.label) {
            return Err(RepositoryError::connection("server has gone away"));
        }
        Ok(self
            .source
            .answers
            .get(query.label)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl SessionSource for MockSource {
    type Session = MockSession;

    async fn open(&self) -> Result<MockSession, RepositoryError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MockSession {
            source: self.clone(),
        })
    }
}

pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
}

fn post(id: i64, title: &str, parent: i64, language: Option<&str>) -> Row {
    Row::new()
        .with("ID", id)
        .with("post_author", 1)
        .with("post_title", title)
        .with("post_parent", parent)
        .with("post_type", "post")
        .with("post_language", language)
}

fn term(id: i64, name: &str, slug: &str) -> Row {
    Row::new()
        .with("term_id", id)
        .with("name", name)
        .with("slug", slug)
        .with("term_group", 0)
}

fn term_taxonomy(id: i64, term_id: i64, taxonomy: &str, description: &str, count: i64) -> Row {
    Row::new()
        .with("term_taxonomy_id", id)
        .with("term_id", term_id)
        .with("taxonomy", taxonomy)
        .with("description", description)
        .with("parent", 0)
        .with("count", count)
}

fn meta(meta_id: i64, owner_column: &str, owner: i64, key: &str, value: &str) -> Row {
    Row::new()
        .with("meta_id", meta_id)
        .with(owner_column, owner)
        .with("meta_key", key)
        .with("meta_value", value)
}

pub const POST_GROUP: &str = r#"a:2:{s:2:"en";i:10;s:2:"fr";i:12;}"#;
pub const TERM_GROUP: &str = r#"a:2:{s:2:"en";i:30;s:2:"fr";i:31;}"#;

/// A small site: an English parent page with a child, its French
/// translation, a shared featured image and two translated categories.
pub fn site() -> HashMap<&'static str, Vec<Row>> {
    HashMap::from([
        (
            "language_slugs",
            vec![Row::new().with("slug", "en"), Row::new().with("slug", "fr")],
        ),
        (
            "posts",
            vec![
                post(10, "Parent", 0, Some("en")),
                post(11, "Child", 10, Some("en")),
                post(12, "Parent FR", 0, Some("fr")),
            ],
        ),
        (
            "attachments",
            vec![Row::new()
                .with("ID", 50)
                .with("post_author", 1)
                .with("post_title", "Cover")
                .with("post_parent", 10)
                .with("post_type", "attachment")],
        ),
        (
            "attachment_meta",
            vec![
                meta(900, "old_attachment_id", 50, "_wp_attached_file", "2024/01/cover.jpg"),
                meta(900, "old_attachment_id", 50, "_wp_attached_file", "2024/01/cover.jpg"),
            ],
        ),
        (
            "post_meta",
            vec![
                meta(1, "old_post_id", 10, "_thumbnail_id", "50"),
                meta(2, "old_post_id", 11, "_thumbnail_id", "50"),
                meta(3, "old_post_id", 12, "subtitle", "Bonjour l'ami"),
            ],
        ),
        ("post_group_terms", vec![term(70, "pll_abc", "pll_abc")]),
        (
            "post_group_taxonomy",
            vec![term_taxonomy(71, 70, "post_translations", POST_GROUP, 2)],
        ),
        ("plain_taxonomies", vec![Row::new().with("taxonomy", "category")]),
        (
            "plain_terms",
            vec![
                term(30, "News", "news").with("term_language", "en"),
                term(31, "Actualites", "actualites").with("term_language", "fr"),
            ],
        ),
        ("term_group_terms", vec![term(80, "pll_def", "pll_def")]),
        (
            "term_group_taxonomy",
            vec![term_taxonomy(81, 80, "term_translations", TERM_GROUP, 2)],
        ),
        (
            "plain_term_taxonomy",
            vec![
                term_taxonomy(40, 30, "category", "", 2),
                term_taxonomy(41, 31, "category", "", 1),
                term_taxonomy(42, 99, "category", "", 0),
            ],
        ),
        (
            "term_meta",
            vec![meta(5, "old_term_id", 30, "color", "red")],
        ),
        (
            "term_language_groups",
            vec![
                Row::new()
                    .with("old_term_id", 30)
                    .with("group_taxonomy_id", 81)
                    .with("description", TERM_GROUP),
                Row::new()
                    .with("old_term_id", 31)
                    .with("group_taxonomy_id", 81)
                    .with("description", TERM_GROUP),
            ],
        ),
        (
            "post_languages",
            vec![
                Row::new().with("old_post_id", 10).with("language_slug", "en"),
                Row::new().with("old_post_id", 11).with("language_slug", "en"),
                Row::new().with("old_post_id", 12).with("language_slug", "fr"),
            ],
        ),
        (
            "post_relationships",
            vec![
                relationship(10, 40, "category"),
                relationship(11, 40, "category"),
                relationship(12, 41, "category"),
                relationship(10, 71, "post_translations"),
                relationship(12, 71, "post_translations"),
            ],
        ),
        (
            "term_group_relationships",
            vec![
                Row::new().with("old_term_id", 30).with("old_term_taxonomy_id", 81),
                Row::new().with("old_term_id", 31).with("old_term_taxonomy_id", 81),
            ],
        ),
    ])
}

fn relationship(post_id: i64, term_taxonomy_id: i64, taxonomy: &str) -> Row {
    Row::new()
        .with("old_post_id", post_id)
        .with("term_taxonomy_id", term_taxonomy_id)
        .with("term_order", 0)
        .with("taxonomy", taxonomy)
}

/// Session variables referenced by `statement`, in order of appearance.
pub fn variables(statement: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut chars = statement.char_indices().peekable();
    let mut in_literal = false;
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' if in_literal => {
                chars.next();
            }
            '\'' => in_literal = !in_literal,
            '@' if !in_literal => {
                let mut name = String::new();
                if chars.peek().map(|(_, c)| *c) == Some('`') {
                    chars.next();
                    for (_, c) in chars.by_ref() {
                        if c == '`' {
                            break;
                        }
                        name.push(c);
                    }
                } else {
                    while let Some((_, c)) = chars.peek() {
                        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$') {
                            name.push(*c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
                found.push(name);
            }
            _ => {}
        }
    }
    found
}

/// Variable assigned by a `SET @x = ...;` statement.
pub fn assigned(statement: &str) -> Option<String> {
    let rest = statement.strip_prefix("SET @")?;
    let (name, _) = rest.split_once(" = ")?;
    Some(name.trim_matches('`').to_string())
}
