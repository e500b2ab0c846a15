//! Statement rendering for copied rows.
use post_dump_repository::ValueEscaper;
use post_dump_shared::Value;

use crate::dialect::Dialect;
use crate::symbols::Symbol;

/// Renders a stored value as a literal of the destination engine.
///
/// Text is always quoted and escaped. Non-finite floats have no literal form
/// and render as `NULL`.
pub fn literal(value: &Value, escaper: &dyn ValueEscaper) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Float(number) if number.is_finite() => number.to_string(),
        Value::Float(_) => "NULL".to_string(),
        Value::Text(text) => escaper.quote(text),
    }
}

/// How a source row is turned into an insert.
#[derive(Debug, Clone, Default)]
pub struct RowPlan {
    /// Columns left out, e.g. the auto-increment key.
    pub dropped: Vec<&'static str>,
    /// Columns holding an identifier of another exported row.
    pub references: Vec<(&'static str, fn(u64) -> Symbol)>,
    /// Columns whose value is replaced by a fixed expression.
    pub overrides: Vec<(&'static str, String)>,
    /// Columns placed before the row's own columns.
    pub leading: Vec<(&'static str, String)>,
}

impl RowPlan {
    pub fn dropping(columns: &[&'static str]) -> Self {
        Self {
            dropped: columns.to_vec(),
            ..Self::default()
        }
    }

    pub fn reference(mut self, column: &'static str, to: fn(u64) -> Symbol) -> Self {
        self.references.push((column, to));
        self
    }

    pub fn replace(mut self, column: &'static str, expr: impl Into<String>) -> Self {
        self.overrides.push((column, expr.into()));
        self
    }

    pub fn lead(mut self, column: &'static str, expr: impl Into<String>) -> Self {
        self.leading.push((column, expr.into()));
        self
    }

    pub fn is_dropped(&self, column: &str) -> bool {
        self.dropped.iter().any(|dropped| dropped.eq_ignore_ascii_case(column))
            || self.leading.iter().any(|(lead, _)| *lead == column)
    }

    pub fn override_for(&self, column: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, expr)| expr.as_str())
    }

    pub fn reference_for(&self, column: &str) -> Option<fn(u64) -> Symbol> {
        self.references
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, to)| *to)
    }
}

/// A single-row insert, optionally guarded on variables being non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    values: Vec<String>,
    guards: Vec<String>,
}

impl Insert {
    /// Starts an insert into `table`, a full, unquoted table name.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
            guards: Vec::new(),
        }
    }

    pub fn value(mut self, column: impl Into<String>, expr: impl Into<String>) -> Self {
        self.push(column, expr);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, expr: impl Into<String>) {
        self.columns.push(column.into());
        self.values.push(expr.into());
    }

    /// Only insert when the rendered `variable` is non-null at replay.
    pub fn guard(mut self, variable: impl Into<String>) -> Self {
        self.guards.push(variable.into());
        self
    }

    pub fn render(&self, dialect: &dyn Dialect) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| dialect.quote_ident(column))
            .collect::<Vec<_>>()
            .join(", ");
        let values = self.values.join(", ");
        let table = dialect.quote_ident(&self.table);
        if self.guards.is_empty() {
            format!("INSERT INTO {} ({}) VALUES ({});", table, columns, values)
        } else {
            let conditions = self
                .guards
                .iter()
                .map(|guard| format!("{} IS NOT NULL", guard))
                .collect::<Vec<_>>()
                .join(" AND ");
            format!(
                "INSERT INTO {} ({}) SELECT {} WHERE {};",
                table, columns, values, conditions
            )
        }
    }
}
