//! Conversion of text-protocol MySQL rows into ordered `Row` records.
use post_dump_shared::{Row, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo};
use tracing::warn;

use crate::errors::RepositoryError;

/// How a column's text representation is turned into a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnClass {
    Integer,
    Float,
    Text,
}

impl ColumnClass {
    /// Classifies a MySQL type name such as `BIGINT UNSIGNED` or `LONGTEXT`.
    pub(crate) fn from_type_name(name: &str) -> Self {
        let base = name.split_whitespace().next().unwrap_or_default();
        match base.to_ascii_uppercase().as_str() {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "YEAR" => {
                Self::Integer
            }
            "FLOAT" | "DOUBLE" | "REAL" => Self::Float,
            _ => Self::Text,
        }
    }

    pub(crate) fn parse(self, text: String) -> Value {
        match self {
            Self::Integer => text
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or(Value::Text(text)),
            Self::Float => text
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Value::Float)
                .unwrap_or(Value::Text(text)),
            Self::Text => Value::Text(text),
        }
    }
}

/// Decodes the text of `column`. Invalid UTF-8 is replaced and reported.
fn column_text(column: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => {
            let valid_up_to = error.utf8_error().valid_up_to();
            warn!(
                column,
                valid_up_to,
                "Column holds invalid UTF-8, replacing the invalid bytes"
            );
            String::from_utf8_lossy(error.as_bytes()).into_owned()
        }
    }
}

/// Converts one MySQL row read over the text protocol.
pub(crate) fn to_row(row: &MySqlRow) -> Result<Row, RepositoryError> {
    let mut record = Row::new();
    for column in row.columns() {
        let class = ColumnClass::from_type_name(column.type_info().name());
        let raw: Option<Vec<u8>> = row.try_get_unchecked(column.ordinal())?;
        let value = match raw {
            None => Value::Null,
            Some(bytes) => class.parse(column_text(column.name(), bytes)),
        };
        record.insert(column.name(), value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_type_names() {
        assert_eq!(ColumnClass::from_type_name("BIGINT UNSIGNED"), ColumnClass::Integer);
        assert_eq!(ColumnClass::from_type_name("INT"), ColumnClass::Integer);
        assert_eq!(ColumnClass::from_type_name("DOUBLE"), ColumnClass::Float);
        assert_eq!(ColumnClass::from_type_name("DATETIME"), ColumnClass::Text);
        assert_eq!(ColumnClass::from_type_name("LONGTEXT"), ColumnClass::Text);
        assert_eq!(ColumnClass::from_type_name("DECIMAL"), ColumnClass::Text);
    }

    #[test]
    fn test_column_text_keeps_valid_utf8() {
        assert_eq!(column_text("post_title", "Caf\u{e9}".as_bytes().to_vec()), "Caf\u{e9}");
    }

    #[test]
    fn test_column_text_replaces_invalid_bytes() {
        let text = column_text("post_content", vec![b'o', b'k', 0xff, b'!']);
        assert_eq!(text, "ok\u{fffd}!");
    }

    #[test]
    fn test_parse_by_class() {
        assert_eq!(ColumnClass::Integer.parse("12".into()), Value::Integer(12));
        assert_eq!(ColumnClass::Float.parse("0.25".into()), Value::Float(0.25));
        assert_eq!(
            ColumnClass::Text.parse("0000-00-00 00:00:00".into()),
            Value::Text("0000-00-00 00:00:00".into())
        );
        // Out-of-range unsigned values keep their exact digits.
        assert_eq!(
            ColumnClass::Integer.parse("18446744073709551615".into()),
            Value::Text("18446744073709551615".into())
        );
    }
}
