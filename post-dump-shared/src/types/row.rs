use indexmap::IndexMap;

use super::Value;

/// One record returned by the source, keeping the column order of the query.
///
/// Column order matters: emitted `INSERT` statements list columns in the
/// order the source returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, builder style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets a column. Re-setting an existing column keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Returns the column as a positive identifier.
    pub fn id(&self, column: &str) -> Option<u64> {
        self.get(column).and_then(Value::as_id)
    }

    /// Returns the column as text; non-text and missing columns yield `None`.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Value of the first column, used for single-column reads.
    pub fn first(&self) -> Option<&Value> {
        self.columns.get_index(0).map(|(_, v)| v)
    }
}
