//! This module defines the read side of the source store: a parameterized
//! query, an executor bound to one session, and the source of such sessions.
use post_dump_shared::{Row, Value};

use crate::errors::RepositoryError;

/// A parameterized read query.
///
/// `sql` uses `?` as the positional marker for each entry of `params`.
/// `label` names the extraction step and shows up in logs and errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub label: &'static str,
    pub sql: String,
    pub params: Vec<Value>,
}

impl Query {
    pub fn new(label: &'static str, sql: impl Into<String>) -> Self {
        Self {
            label,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends one positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Appends several positional parameters, in order.
    pub fn bind_all<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }
}

/// Runs read queries against the source within a single session.
///
/// Rows come back fully materialised, with columns in query order.
#[async_trait::async_trait]
pub trait QueryExecutor: Send {
    /// Runs `query` and returns every row.
    async fn fetch_all(&mut self, query: &Query) -> Result<Vec<Row>, RepositoryError>;

    /// Runs `query` and returns the first column of each row as text.
    ///
    /// Rows whose first column is NULL are skipped.
    async fn fetch_column(&mut self, query: &Query) -> Result<Vec<String>, RepositoryError> {
        let rows = self.fetch_all(query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.first())
            .filter(|value| !value.is_null())
            .map(ToString::to_string)
            .collect())
    }
}

/// Hands out executor sessions.
///
/// A session holds one connection for its whole lifetime and releases it on
/// drop, whichever way the caller exits.
#[async_trait::async_trait]
pub trait SessionSource: Send + Sync {
    type Session: QueryExecutor;

    async fn open(&self) -> Result<Self::Session, RepositoryError>;
}
