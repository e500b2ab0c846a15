//! String escaping and client-side parameter interpolation for MySQL.
use post_dump_shared::Value;

use crate::errors::RepositoryError;
use crate::interfaces::{Query, ValueEscaper};

/// Escapes text the way the MySQL client library does: a backslash before
/// NUL, newline, carriage return, backslash, both quote characters and ^Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlEscaper;

impl MysqlEscaper {
    pub fn new() -> Self {
        Self
    }
}

impl ValueEscaper for MysqlEscaper {
    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            match c {
                '\0' => escaped.push_str("\\0"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '"' => escaped.push_str("\\\""),
                '\x1a' => escaped.push_str("\\Z"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

/// Substitutes each `?` marker of `query` with its rendered parameter.
///
/// Markers inside single-quoted literals are left alone. A marker/parameter
/// count mismatch is reported as `RepositoryError::InvalidQuery`.
pub fn interpolate(query: &Query, escaper: &dyn ValueEscaper) -> Result<String, RepositoryError> {
    let mut sql = String::with_capacity(query.sql.len() + query.params.len() * 8);
    let mut params = query.params.iter();
    let mut in_literal = false;
    let mut previous = '\0';

    for c in query.sql.chars() {
        match c {
            '\'' if previous != '\\' => {
                in_literal = !in_literal;
                sql.push(c);
            }
            '?' if !in_literal => {
                let value = params.next().ok_or_else(|| {
                    RepositoryError::invalid_query(query.label, "more markers than parameters")
                })?;
                sql.push_str(&render_param(value, escaper));
            }
            _ => sql.push(c),
        }
        previous = c;
    }

    if params.next().is_some() {
        return Err(RepositoryError::invalid_query(
            query.label,
            "more parameters than markers",
        ));
    }
    Ok(sql)
}

fn render_param(value: &Value, escaper: &dyn ValueEscaper) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Text(s) => escaper.quote(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        let escaper = MysqlEscaper::new();
        assert_eq!(escaper.escape("O'Reilly"), "O\\'Reilly");
        assert_eq!(escaper.escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escaper.escape("a\\b"), "a\\\\b");
        assert_eq!(escaper.escape("line\nbreak\r"), "line\\nbreak\\r");
        assert_eq!(escaper.escape("nul\0sub\x1a"), "nul\\0sub\\Z");
        assert_eq!(escaper.escape("héllo"), "héllo");
    }

    #[test]
    fn test_quote_wraps_in_single_quotes() {
        assert_eq!(MysqlEscaper.quote("it's"), "'it\\'s'");
    }

    #[test]
    fn test_interpolate_renders_each_param() {
        let query = Query::new("test", "SELECT * FROM t WHERE a = ? AND b = ? AND c IN (?, ?)")
            .bind("x'y")
            .bind(5)
            .bind(Value::Null)
            .bind(1.5);
        let sql = interpolate(&query, &MysqlEscaper).unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM t WHERE a = 'x\\'y' AND b = 5 AND c IN (NULL, 1.5)"
        );
    }

    #[test]
    fn test_interpolate_escapes_quote_and_backslash() {
        let query = Query::new("test", "SELECT ? AS v").bind("O'Reilly \\ 'x\\'");
        assert_eq!(
            interpolate(&query, &MysqlEscaper).unwrap(),
            "SELECT 'O\\'Reilly \\\\ \\'x\\\\\\'' AS v"
        );
    }

    #[test]
    fn test_interpolate_skips_markers_inside_literals() {
        let query = Query::new("test", "SELECT '?' AS q, ? AS v").bind("a");
        assert_eq!(
            interpolate(&query, &MysqlEscaper).unwrap(),
            "SELECT '?' AS q, 'a' AS v"
        );
    }

    #[test]
    fn test_interpolate_count_mismatch() {
        let missing = Query::new("missing", "SELECT ?, ?").bind(1);
        assert!(matches!(
            interpolate(&missing, &MysqlEscaper),
            Err(RepositoryError::InvalidQuery { .. })
        ));

        let extra = Query::new("extra", "SELECT ?").bind(1).bind(2);
        assert!(matches!(
            interpolate(&extra, &MysqlEscaper),
            Err(RepositoryError::InvalidQuery { .. })
        ));
    }
}
